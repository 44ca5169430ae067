use crate::domain::models::{PromptCommand, Settings};

/// Async intents emitted by the reducer; the handler runs them on tokio
/// tasks and reports back as actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Stream a generation for the current selection.
    RunGeneration {
        command: PromptCommand,
        default_model: String,
    },
    /// Refresh the model list for the settings modal.
    LoadModels,
    /// Start a model download on the server.
    PullModel(String),
    /// Write the configuration to disk (and re-point the gateway).
    PersistSettings(Settings),
    /// Persist after a server-URL change, then refresh the model list.
    ApplyServerUrl(Settings),
}
