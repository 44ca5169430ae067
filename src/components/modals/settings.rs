use super::helpers::{centered_rect, draw_drop_shadow};
use crate::app::state::{SettingsFocus, SettingsFormState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

pub struct SettingsModal<'a> {
    pub theme: &'a Theme,
    pub form: &'a SettingsFormState<'a>,
    pub default_model: &'a str,
}

impl SettingsModal<'_> {
    fn field_block(&self, title: &'static str, focused: bool) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                self.theme.border_focus
            } else {
                self.theme.border
            })
    }
}

impl Widget for SettingsModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(60, 70, area);
        if modal_area.width < 10 || modal_area.height < 12 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("Server settings", self.theme.header_accent),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // server URL
                Constraint::Min(4),    // model list
                Constraint::Length(3), // pull field
            ])
            .split(inner);

        // Server URL
        let url_block = self.field_block("Server URL", self.form.focus == SettingsFocus::ServerUrl);
        let url_inner = url_block.inner(rows[0]);
        url_block.render(rows[0], buf);
        if url_inner.width > 0 && url_inner.height > 0 {
            Widget::render(&self.form.url_input, url_inner, buf);
        }

        // Default model picker
        let model_block = self.field_block(
            "Default model",
            self.form.focus == SettingsFocus::DefaultModel,
        );
        let model_inner = model_block.inner(rows[1]);
        model_block.render(rows[1], buf);
        if model_inner.width > 0 && model_inner.height > 0 {
            if self.form.loading_models {
                let line = Line::from(Span::styled("loading models...", self.theme.dim));
                buf.set_line(model_inner.x + 1, model_inner.y, &line, model_inner.width);
            } else if let Some(err) = &self.form.models_error {
                let line = Line::from(Span::styled(
                    format!("could not load models: {err}"),
                    self.theme.status_error,
                ));
                buf.set_line(model_inner.x + 1, model_inner.y, &line, model_inner.width);
            } else if self.form.models.is_empty() {
                let line = Line::from(Span::styled("no models installed", self.theme.dim));
                buf.set_line(model_inner.x + 1, model_inner.y, &line, model_inner.width);
            } else {
                // Keep the highlighted row in view.
                let visible = model_inner.height as usize;
                let offset = self
                    .form
                    .selected_model
                    .saturating_sub(visible.saturating_sub(1));
                for (row, model) in self.form.models.iter().skip(offset).enumerate() {
                    let y = model_inner.y + row as u16;
                    if y >= model_inner.bottom() {
                        break;
                    }
                    let index = offset + row;
                    let is_selected = index == self.form.selected_model;
                    let is_default = model.name == self.default_model;
                    let style = if is_selected {
                        self.theme.list_selected
                    } else {
                        self.theme.list_item
                    };
                    let marker = if is_default { "●" } else { " " };
                    let line = Line::from(vec![
                        Span::styled(format!(" {marker} "), self.theme.footer_key),
                        Span::styled(model.name.clone(), style),
                    ]);
                    buf.set_line(model_inner.x, y, &line, model_inner.width);
                }
            }
        }

        // Model download
        let pull_block = self.field_block("Download model", self.form.focus == SettingsFocus::Pull);
        let pull_inner = pull_block.inner(rows[2]);
        pull_block.render(rows[2], buf);
        if pull_inner.width > 0 && pull_inner.height > 0 {
            if self.form.pull_input.lines().join("").is_empty()
                && self.form.focus != SettingsFocus::Pull
            {
                let hint = Line::from(Span::styled("e.g. llama3.2", self.theme.dim));
                buf.set_line(pull_inner.x, pull_inner.y, &hint, pull_inner.width);
            } else {
                Widget::render(&self.form.pull_input, pull_inner, buf);
            }
        }
    }
}
