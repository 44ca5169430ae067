pub mod linebuf;
pub mod session;

use crate::domain::editor::{CursorSide, EditorSurface};
use crate::domain::gateway::{GatewayError, ModelGateway};
use crate::domain::models::{GenerateOptions, GenerateRequest, Position, PromptCommand};
use futures::StreamExt;
use linebuf::LineBuffer;
use serde::Deserialize;
use session::InsertionSession;
use thiserror::Error;

/// Prefix rendered in front of the user's selected text.
pub const USER_MARKER: &str = "👤 ";
/// Separator plus marker reserved for the streamed response. The anchor
/// sits immediately after this string.
pub const RESPONSE_MARKER: &str = "\n\n🤖 ";

pub const DEFAULT_TEMPERATURE: f64 = 0.2;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("select some text first")]
    EmptySelection,

    #[error("server returned HTTP {status}")]
    Server { status: u16 },

    #[error("connection lost: {0}")]
    Stream(String),
}

impl From<GatewayError> for EngineError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Http { status } => EngineError::Server { status },
            other => EngineError::Stream(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationOutcome {
    pub fragments: usize,
    pub chars_inserted: usize,
}

/// One streamed frame off the wire. Everything but `response` is ignored;
/// end-of-body is the completion signal.
#[derive(Debug, Deserialize)]
struct StreamFrame {
    #[serde(default)]
    response: Option<String>,
}

/// Collapses the selection onto predictable lines for the model: CRLF to
/// LF, runs of newlines to a single space, trimmed. Only the prompt
/// payload is normalized; the document keeps the literal text.
pub fn normalize_selection(selection: &str) -> String {
    selection
        .replace("\r\n", "\n")
        .split('\n')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn build_request(command: &PromptCommand, selection: &str, default_model: &str) -> GenerateRequest {
    let model = command
        .model
        .clone()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default_model.to_string());

    GenerateRequest {
        prompt: format!("{}\n\n{}", command.prompt, normalize_selection(selection)),
        model,
        options: GenerateOptions {
            temperature: command.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        },
    }
}

/// Runs one full invocation: validate, render markup, stream, insert.
///
/// One invocation is strictly sequential (read fragment, insert, advance,
/// read next). On mid-stream failure the already-inserted fragments and
/// the markup stay in the document; the caller surfaces the error.
pub async fn run_generation(
    editor: &dyn EditorSurface,
    gateway: &dyn ModelGateway,
    command: &PromptCommand,
    default_model: &str,
) -> Result<GenerationOutcome, EngineError> {
    let selection = editor.get_selection();
    if selection.trim().is_empty() {
        return Err(EngineError::EmptySelection);
    }

    // Render the visible markup. Both insertions happen before the first
    // await point, so no partial markup can be observed on early failure.
    let from = editor.get_cursor(CursorSide::From);
    let to = editor.get_cursor(CursorSide::To);

    let user_block = format!("{USER_MARKER}{}", selection.trim());
    editor.replace_range(&user_block, from, Some(to));

    let user_end = from.advanced_by(&user_block);
    editor.replace_range(RESPONSE_MARKER, user_end, None);

    // The anchor is derived from the actual characters just inserted, so
    // fragments land exactly after the marker whatever its width and
    // however many lines the selection spans.
    let anchor = user_end.advanced_by(RESPONSE_MARKER);
    let mut session = InsertionSession::new(anchor);

    let request = build_request(command, &selection, default_model);
    let mut stream = gateway.generate(request).await?;

    let mut lines = LineBuffer::default();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| EngineError::Stream(e.to_string()))?;
        for line in lines.push(&chunk) {
            apply_line(editor, &mut session, &line);
        }
    }
    // Chunked bodies may omit the final newline.
    if let Some(rest) = lines.finish() {
        apply_line(editor, &mut session, &rest);
    }

    Ok(GenerationOutcome {
        fragments: session.fragments(),
        chars_inserted: session.chars_inserted(),
    })
}

fn apply_line(editor: &dyn EditorSurface, session: &mut InsertionSession, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    match serde_json::from_str::<StreamFrame>(line) {
        Ok(frame) => {
            if let Some(fragment) = frame.response.filter(|r| !r.is_empty()) {
                session.insert(editor, &fragment);
            }
        }
        Err(err) => {
            // A garbled line is dropped; the stream goes on.
            tracing::warn!(%err, line, "skipping malformed stream line");
        }
    }
}

/// Where the response anchor lands for a given selection start and
/// selected text.
pub fn response_anchor(selection_start: Position, selection: &str) -> Position {
    selection_start
        .advanced_by(&format!("{USER_MARKER}{}", selection.trim()))
        .advanced_by(RESPONSE_MARKER)
}
