use crate::domain::editor::{CursorSide, EditorSurface};
use crate::domain::models::Position;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// A plain line/column text document with a cursor and an optional
/// selection. Columns are char offsets. There is always at least one
/// (possibly empty) line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
    /// Selection anchor; the selection spans anchor..cursor in either
    /// direction. `None` or equal to the cursor means no selection.
    anchor: Option<Position>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
            anchor: None,
        }
    }
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    fn end_of_document(&self) -> Position {
        let line = self.lines.len() - 1;
        Position::new(line, self.line_len(line))
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        Position::new(line, pos.ch.min(self.line_len(line)))
    }

    /// The ordered selection span, if a non-empty selection exists.
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        let (from, to) = if anchor < self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        };
        Some((self.clamp(from), self.clamp(to)))
    }

    pub fn selection_text(&self) -> String {
        let Some((from, to)) = self.selection_range() else {
            return String::new();
        };
        if from.line == to.line {
            return self.lines[from.line]
                .chars()
                .skip(from.ch)
                .take(to.ch - from.ch)
                .collect();
        }
        let mut out: String = self.lines[from.line].chars().skip(from.ch).collect();
        for line in &self.lines[from.line + 1..to.line] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.extend(self.lines[to.line].chars().take(to.ch));
        out
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(Position::new(0, 0));
        self.cursor = self.end_of_document();
    }

    pub fn select(&mut self, from: Position, to: Position) {
        self.anchor = Some(self.clamp(from));
        self.cursor = self.clamp(to);
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Replaces `[from, to)` with `text`; `to == None` is a pure insert.
    /// The cursor and anchor are remapped so positions after the edit keep
    /// pointing at the same characters; positions inside the replaced span
    /// collapse to the end of the inserted text.
    pub fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) {
        let a = self.clamp(from);
        let b = to.map_or(a, |t| self.clamp(t));
        let (from, to) = if a <= b { (a, b) } else { (b, a) };

        let prefix: String = self.lines[from.line].chars().take(from.ch).collect();
        let suffix: String = self.lines[to.line].chars().skip(to.ch).collect();

        let mut replacement: Vec<String> = format!("{prefix}{text}")
            .split('\n')
            .map(String::from)
            .collect();
        if let Some(last) = replacement.last_mut() {
            last.push_str(&suffix);
        }
        self.lines.splice(from.line..=to.line, replacement);

        let end = from.advanced_by(text);
        self.cursor = remap(self.cursor, from, to, end);
        self.anchor = self.anchor.map(|p| remap(p, from, to, end));
        if self.anchor == Some(self.cursor) {
            self.anchor = None;
        }
    }

    /// Inserts at the cursor, replacing the selection if one exists.
    pub fn insert_str(&mut self, text: &str) {
        match self.selection_range() {
            Some((from, to)) => {
                self.replace_range(text, from, Some(to));
                self.anchor = None;
            }
            None => self.replace_range(text, self.cursor, None),
        }
    }

    pub fn backspace(&mut self) {
        if let Some((from, to)) = self.selection_range() {
            self.replace_range("", from, Some(to));
            self.anchor = None;
        } else if self.cursor.ch > 0 {
            let from = Position::new(self.cursor.line, self.cursor.ch - 1);
            self.replace_range("", from, Some(self.cursor));
        } else if self.cursor.line > 0 {
            let from = Position::new(self.cursor.line - 1, self.line_len(self.cursor.line - 1));
            self.replace_range("", from, Some(self.cursor));
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some((from, to)) = self.selection_range() {
            self.replace_range("", from, Some(to));
            self.anchor = None;
        } else if self.cursor.ch < self.line_len(self.cursor.line) {
            let to = Position::new(self.cursor.line, self.cursor.ch + 1);
            self.replace_range("", self.cursor, Some(to));
        } else if self.cursor.line + 1 < self.lines.len() {
            let to = Position::new(self.cursor.line + 1, 0);
            self.replace_range("", self.cursor, Some(to));
        }
    }

    pub fn move_cursor(&mut self, movement: Movement, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }

        let Position { line, ch } = self.cursor;
        self.cursor = match movement {
            Movement::Left => {
                if ch > 0 {
                    Position::new(line, ch - 1)
                } else if line > 0 {
                    Position::new(line - 1, self.line_len(line - 1))
                } else {
                    self.cursor
                }
            }
            Movement::Right => {
                if ch < self.line_len(line) {
                    Position::new(line, ch + 1)
                } else if line + 1 < self.lines.len() {
                    Position::new(line + 1, 0)
                } else {
                    self.cursor
                }
            }
            Movement::Up => {
                if line > 0 {
                    self.clamp(Position::new(line - 1, ch))
                } else {
                    Position::new(0, 0)
                }
            }
            Movement::Down => {
                if line + 1 < self.lines.len() {
                    self.clamp(Position::new(line + 1, ch))
                } else {
                    self.end_of_document()
                }
            }
            Movement::LineStart => Position::new(line, 0),
            Movement::LineEnd => Position::new(line, self.line_len(line)),
        };

        if self.anchor == Some(self.cursor) {
            self.anchor = None;
        }
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
        self.anchor = None;
    }
}

/// Remaps a position across a `[from, to) -> end` edit.
fn remap(pos: Position, from: Position, to: Position, end: Position) -> Position {
    if pos < from {
        return pos;
    }
    if pos < to {
        return end;
    }
    if pos.line == to.line {
        Position::new(end.line, end.ch + (pos.ch - to.ch))
    } else {
        Position::new(pos.line + end.line - to.line, pos.ch)
    }
}

/// Immutable view handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
    pub selection: Option<(Position, Position)>,
}

/// The shared document. The UI thread edits and renders it while
/// streaming invocations insert through the `EditorSurface` trait; each
/// lock is held only for one synchronous operation.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<TextBuffer>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TextBuffer::from_text(text))),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut TextBuffer) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn text(&self) -> String {
        self.with(|b| b.text())
    }

    pub fn select_all(&self) {
        self.with(|b| b.select_all());
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.with(|b| EditorSnapshot {
            lines: b.lines().to_vec(),
            cursor: b.cursor(),
            selection: b.selection_range(),
        })
    }
}

impl EditorSurface for SharedBuffer {
    fn get_selection(&self) -> String {
        self.with(|b| b.selection_text())
    }

    fn get_cursor(&self, side: CursorSide) -> Position {
        self.with(|b| match (side, b.selection_range()) {
            (CursorSide::From, Some((from, _))) => from,
            (CursorSide::To, Some((_, to))) => to,
            _ => b.cursor(),
        })
    }

    fn replace_range(&self, text: &str, from: Position, to: Option<Position>) {
        self.with(|b| b.replace_range(text, from, to));
    }

    fn set_cursor(&self, pos: Position) {
        self.with(|b| b.set_cursor(pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_within_a_line() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.replace_range("there", Position::new(0, 6), Some(Position::new(0, 11)));
        assert_eq!(buf.text(), "hello there");
    }

    #[test]
    fn insert_with_newlines_splits_lines() {
        let mut buf = TextBuffer::from_text("ab");
        buf.replace_range("1\n2", Position::new(0, 1), None);
        assert_eq!(buf.text(), "a1\n2b");
    }

    #[test]
    fn replace_across_lines() {
        let mut buf = TextBuffer::from_text("one\ntwo\nthree");
        buf.replace_range("X", Position::new(0, 2), Some(Position::new(2, 3)));
        assert_eq!(buf.text(), "onXee");
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        let mut buf = TextBuffer::from_text("ab");
        buf.replace_range("!", Position::new(9, 9), None);
        assert_eq!(buf.text(), "ab!");
    }

    #[test]
    fn cursor_after_insertion_point_shifts() {
        let mut buf = TextBuffer::from_text("hello");
        buf.set_cursor(Position::new(0, 5));
        buf.replace_range("++", Position::new(0, 0), None);
        assert_eq!(buf.cursor(), Position::new(0, 7));
    }

    #[test]
    fn cursor_inside_replaced_span_collapses_to_end() {
        let mut buf = TextBuffer::from_text("abcdef");
        buf.set_cursor(Position::new(0, 3));
        buf.replace_range("X", Position::new(0, 1), Some(Position::new(0, 5)));
        assert_eq!(buf.text(), "aXf");
        assert_eq!(buf.cursor(), Position::new(0, 2));
    }

    #[test]
    fn selection_text_spans_lines() {
        let mut buf = TextBuffer::from_text("one\ntwo\nthree");
        buf.select(Position::new(0, 1), Position::new(2, 2));
        assert_eq!(buf.selection_text(), "ne\ntwo\nth");
    }

    #[test]
    fn reverse_selection_is_ordered() {
        let mut buf = TextBuffer::from_text("hello");
        buf.select(Position::new(0, 4), Position::new(0, 1));
        assert_eq!(buf.selection_text(), "ell");
        assert_eq!(buf.selection_range().unwrap().0, Position::new(0, 1));
    }

    #[test]
    fn typing_over_a_selection_replaces_it() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.select(Position::new(0, 0), Position::new(0, 5));
        buf.insert_str("bye");
        assert_eq!(buf.text(), "bye world");
        assert_eq!(buf.cursor(), Position::new(0, 3));
        assert!(buf.selection_range().is_none());
    }

    #[test]
    fn backspace_joins_lines_at_column_zero() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.set_cursor(Position::new(1, 0));
        buf.backspace();
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Position::new(0, 2));
    }

    #[test]
    fn delete_forward_joins_lines_at_line_end() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.set_cursor(Position::new(0, 2));
        buf.delete_forward();
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn shift_movement_extends_a_selection() {
        let mut buf = TextBuffer::from_text("hello");
        buf.move_cursor(Movement::Right, true);
        buf.move_cursor(Movement::Right, true);
        assert_eq!(buf.selection_text(), "he");
        // Plain movement drops it again.
        buf.move_cursor(Movement::Left, false);
        assert!(buf.selection_range().is_none());
    }

    #[test]
    fn multibyte_chars_count_as_single_columns() {
        let mut buf = TextBuffer::from_text("👤 héllo");
        buf.replace_range("!", Position::new(0, 2), None);
        assert_eq!(buf.text(), "👤 !héllo");
    }

    #[test]
    fn surface_cursor_sides_follow_the_selection() {
        let buffer = SharedBuffer::from_text("hello world");
        buffer.with(|b| b.select(Position::new(0, 6), Position::new(0, 11)));
        assert_eq!(buffer.get_selection(), "world");
        assert_eq!(buffer.get_cursor(CursorSide::From), Position::new(0, 6));
        assert_eq!(buffer.get_cursor(CursorSide::To), Position::new(0, 11));
        assert_eq!(buffer.get_cursor(CursorSide::Head), Position::new(0, 11));
    }

    #[test]
    fn concurrent_style_inserts_at_distinct_anchors() {
        // Two sessions appending at their own anchors interleaved.
        let buffer = SharedBuffer::from_text("A:\nB:");
        buffer.replace_range("1", Position::new(0, 2), None);
        buffer.replace_range("x", Position::new(1, 2), None);
        buffer.replace_range("2", Position::new(0, 3), None);
        buffer.replace_range("y", Position::new(1, 3), None);
        assert_eq!(buffer.text(), "A:12\nB:xy");
    }
}
