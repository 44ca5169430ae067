use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};
use crate::app::state::CommandPaletteState;
use crate::domain::models::PromptCommand;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

pub struct PaletteModal<'a> {
    pub theme: &'a Theme,
    pub palette: &'a CommandPaletteState,
    pub commands: &'a [PromptCommand],
}

impl Widget for PaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.palette.matches.len() as u16 + 4).clamp(5, 14);
        let modal_area = centered_rect_fixed_height(60, height, area);
        if modal_area.width < 4 || modal_area.height < 3 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("Run command", self.theme.header_accent),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let query = Line::from(vec![
            Span::styled("> ", self.theme.footer_key),
            Span::styled(self.palette.query.clone(), self.theme.text),
            Span::styled("▏", self.theme.dim),
        ]);
        buf.set_line(inner.x + 1, inner.y, &query, inner.width.saturating_sub(1));

        let list_top = inner.y + 2;
        if self.palette.matches.is_empty() {
            let empty = Line::from(Span::styled("no matching commands", self.theme.dim));
            if list_top < inner.bottom() {
                buf.set_line(inner.x + 1, list_top, &empty, inner.width.saturating_sub(1));
            }
            return;
        }

        for (row, match_idx) in self.palette.matches.iter().enumerate() {
            let y = list_top + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let Some(command) = self.commands.get(*match_idx) else {
                continue;
            };
            let style = if row == self.palette.selected_index {
                self.theme.list_selected
            } else {
                self.theme.list_item
            };
            let model = command.model.as_deref().unwrap_or("default");
            let line = Line::from(vec![
                Span::styled(format!(" {:<32}", command.name), style),
                Span::styled(format!(" {model}"), self.theme.dim),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
