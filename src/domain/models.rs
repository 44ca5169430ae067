use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the document. `ch` counts chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }

    /// The position reached by inserting `text` here: columns reset to 0
    /// and the line count increments per embedded newline.
    pub fn advanced_by(&self, text: &str) -> Position {
        let mut line = self.line;
        let mut ch = self.ch;
        for c in text.chars() {
            if c == '\n' {
                line += 1;
                ch = 0;
            } else {
                ch += 1;
            }
        }
        Position { line, ch }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.ch)
    }
}

/// A named prompt template bound to a model and a temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptCommand {
    pub name: String,
    pub prompt: String,
    /// Falls back to `Settings::default_model` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// In [0, 1]; defaults to 0.2 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server_url: String,
    pub default_model: String,
    #[serde(default)]
    pub commands: Vec<PromptCommand>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:11434".to_string(),
            default_model: "llama3.2".to_string(),
            commands: crate::domain::registry::default_commands(),
        }
    }
}

/// One model known to the server, as reported by `/api/tags`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f64,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub model: String,
    pub options: GenerateOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_by_plain_text() {
        let pos = Position::new(3, 5);
        assert_eq!(pos.advanced_by("abc"), Position::new(3, 8));
    }

    #[test]
    fn advanced_by_resets_column_on_newline() {
        let pos = Position::new(0, 10);
        assert_eq!(pos.advanced_by("ab\ncd\ne"), Position::new(2, 1));
        assert_eq!(pos.advanced_by("\n"), Position::new(1, 0));
    }

    #[test]
    fn advanced_by_counts_chars_not_bytes() {
        let pos = Position::new(0, 0);
        // Two chars: the emoji and the space.
        assert_eq!(pos.advanced_by("🤖 "), Position::new(0, 2));
    }
}
