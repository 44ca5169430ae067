use crate::domain::editor::EditorSurface;
use crate::domain::models::Position;

/// Per-invocation insertion state: the live anchor at which the next
/// fragment lands. Owned exclusively by one invocation, never shared.
#[derive(Debug)]
pub struct InsertionSession {
    anchor: Position,
    fragments: usize,
    chars_inserted: usize,
}

impl InsertionSession {
    pub fn new(anchor: Position) -> Self {
        Self {
            anchor,
            fragments: 0,
            chars_inserted: 0,
        }
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    pub fn chars_inserted(&self) -> usize {
        self.chars_inserted
    }

    /// Inserts one fragment at the anchor and advances it by the
    /// fragment's extent. Fragments are applied strictly in arrival order.
    pub fn insert(&mut self, editor: &dyn EditorSurface, fragment: &str) {
        editor.replace_range(fragment, self.anchor, None);
        self.anchor = self.anchor.advanced_by(fragment);
        self.fragments += 1;
        self.chars_inserted += fragment.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::buffer::SharedBuffer;

    #[test]
    fn anchor_advances_within_a_line() {
        let buffer = SharedBuffer::from_text("xy");
        let mut session = InsertionSession::new(Position::new(0, 1));

        session.insert(&buffer, "ab");
        session.insert(&buffer, "cd");

        assert_eq!(buffer.text(), "xabcdy");
        assert_eq!(session.anchor(), Position::new(0, 5));
        assert_eq!(session.fragments(), 2);
        assert_eq!(session.chars_inserted(), 4);
    }

    #[test]
    fn embedded_newlines_move_the_anchor_down() {
        let buffer = SharedBuffer::from_text("");
        let mut session = InsertionSession::new(Position::new(0, 0));

        session.insert(&buffer, "one\ntwo");
        assert_eq!(session.anchor(), Position::new(1, 3));

        // The next fragment lands right after "two", not on line 0.
        session.insert(&buffer, "!");
        assert_eq!(buffer.text(), "one\ntwo!");
        assert_eq!(session.anchor(), Position::new(1, 4));
    }
}
