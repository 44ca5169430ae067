use crate::domain::models::Position;

/// Which end of the selection a cursor query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSide {
    /// Start of the selection (the earlier position).
    From,
    /// End of the selection (the later position).
    To,
    /// The moving end, i.e. where the caret currently is.
    Head,
}

/// The capability surface the insertion engine needs from a host editor.
///
/// Implementations must be safe to share across tasks; a streaming
/// invocation holds a clone and mutates the document while the UI keeps
/// rendering it.
#[cfg_attr(test, mockall::automock)]
pub trait EditorSurface: Send + Sync {
    /// The currently selected text, or "" when nothing is selected.
    fn get_selection(&self) -> String;

    fn get_cursor(&self, side: CursorSide) -> Position;

    /// Replaces `[from, to)` with `text`. With `to == None` this is a
    /// pure insertion at `from`.
    fn replace_range(&self, text: &str, from: Position, to: Option<Position>);

    fn set_cursor(&self, pos: Position);
}
