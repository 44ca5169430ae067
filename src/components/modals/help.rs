use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

const BINDINGS: [(&str, &str); 12] = [
    ("shift+arrows", "extend the selection"),
    ("ctrl+a", "select all"),
    ("ctrl+p", "run a prompt command on the selection"),
    ("ctrl+o", "server settings"),
    ("ctrl+e", "manage commands"),
    ("esc", "clear selection / close modal"),
    ("ctrl+q", "quit"),
    ("", ""),
    ("In the command list:", ""),
    ("d", "remove the highlighted command"),
    ("r", "reset all commands to the defaults"),
    ("m", "merge default commands into yours"),
];

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(60, BINDINGS.len() as u16 + 2, area);
        if modal_area.width < 10 || modal_area.height < 4 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("Help", self.theme.header_accent),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        for (row, (key, label)) in BINDINGS.iter().enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let line = Line::from(vec![
                Span::styled(format!("  {key:<22}"), self.theme.footer_key),
                Span::styled(*label, self.theme.footer_label),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
