use super::helpers::{centered_rect, draw_drop_shadow};
use crate::app::state::{CommandFocus, CommandFormState};
use crate::domain::models::PromptCommand;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

pub struct CommandsModal<'a> {
    pub theme: &'a Theme,
    pub form: &'a CommandFormState<'a>,
    pub commands: &'a [PromptCommand],
}

impl CommandsModal<'_> {
    fn field_block(&self, title: &'static str, focus: CommandFocus) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.form.focus == focus {
                self.theme.border_focus
            } else {
                self.theme.border
            })
    }

    fn render_field(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &'static str,
        focus: CommandFocus,
        input: &crate::app::state::AppTextArea<'_>,
    ) {
        let block = self.field_block(title, focus);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width > 0 && inner.height > 0 {
            Widget::render(input, inner, buf);
        }
    }
}

impl Widget for CommandsModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(80, 80, area);
        if modal_area.width < 20 || modal_area.height < 16 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("Commands", self.theme.header_accent),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        // Left: the new-command form.
        let form_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // name
                Constraint::Min(5),    // prompt
                Constraint::Length(3), // model
                Constraint::Length(3), // temperature
            ])
            .split(columns[0]);

        self.render_field(buf, form_rows[0], "Name", CommandFocus::Name, &self.form.name_input);
        self.render_field(
            buf,
            form_rows[1],
            "Prompt",
            CommandFocus::Prompt,
            &self.form.prompt_input,
        );
        self.render_field(
            buf,
            form_rows[2],
            "Model (optional)",
            CommandFocus::Model,
            &self.form.model_input,
        );
        self.render_field(
            buf,
            form_rows[3],
            "Temperature (optional)",
            CommandFocus::Temperature,
            &self.form.temperature_input,
        );

        // Right: existing commands.
        let list_block = self.field_block("Existing", CommandFocus::List);
        let list_inner = list_block.inner(columns[1]);
        list_block.render(columns[1], buf);
        if list_inner.width == 0 || list_inner.height == 0 {
            return;
        }

        if self.commands.is_empty() {
            let line = Line::from(Span::styled("no commands configured", self.theme.dim));
            buf.set_line(list_inner.x + 1, list_inner.y, &line, list_inner.width);
            return;
        }

        let visible = list_inner.height as usize;
        let offset = self
            .form
            .selected_command
            .saturating_sub(visible.saturating_sub(1));
        for (row, command) in self.commands.iter().skip(offset).enumerate() {
            let y = list_inner.y + row as u16;
            if y >= list_inner.bottom() {
                break;
            }
            let index = offset + row;
            let style = if index == self.form.selected_command {
                self.theme.list_selected
            } else {
                self.theme.list_item
            };
            let model = command.model.as_deref().unwrap_or("default");
            let line = Line::from(vec![
                Span::styled(format!(" {:<28}", command.name), style),
                Span::styled(format!(" {model}"), self.theme.dim),
            ]);
            buf.set_line(list_inner.x, y, &line, list_inner.width);
        }
    }
}
