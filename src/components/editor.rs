use crate::domain::models::Position;
use crate::infrastructure::buffer::EditorSnapshot;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BorderType, Borders, Widget},
};

/// The document pane. Renders a window of the shared buffer with the
/// selection highlighted and a block cursor when focused.
pub struct EditorView<'a> {
    pub snapshot: &'a EditorSnapshot,
    pub theme: &'a Theme,
    /// (scroll_y, scroll_x) in lines / chars.
    pub scroll: (usize, usize),
    pub focused: bool,
}

impl EditorView<'_> {
    fn in_selection(&self, pos: Position) -> bool {
        self.snapshot
            .selection
            .is_some_and(|(from, to)| from <= pos && pos < to)
    }
}

impl Widget for EditorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" scratch ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                self.theme.border_focus
            } else {
                self.theme.border
            });
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (scroll_y, scroll_x) = self.scroll;
        for row in 0..inner.height {
            let line_idx = scroll_y + row as usize;
            let Some(line) = self.snapshot.lines.get(line_idx) else {
                break;
            };
            let chars: Vec<char> = line.chars().collect();

            for col in 0..inner.width {
                let ch_idx = scroll_x + col as usize;
                let pos = Position::new(line_idx, ch_idx);
                let symbol = chars.get(ch_idx).copied();

                let mut style = self.theme.text;
                // Highlight one cell past the end of a line the selection
                // runs through, so multi-line selections read as a block.
                if self.in_selection(pos) && (symbol.is_some() || ch_idx == chars.len()) {
                    style = style.patch(self.theme.selection);
                }
                let at_cursor = self.focused && self.snapshot.cursor == pos;
                if at_cursor {
                    style = style.patch(self.theme.cursor);
                }

                let x = inner.x + col;
                let y = inner.y + row;
                match symbol {
                    Some(c) => {
                        buf[(x, y)].set_symbol(&c.to_string()).set_style(style);
                    }
                    None if at_cursor || (self.in_selection(pos) && ch_idx == chars.len()) => {
                        buf[(x, y)].set_symbol(" ").set_style(style);
                    }
                    None => break,
                }
            }
        }
    }
}
