use crate::domain::models::PromptCommand;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("no command named \"{0}\"")]
    NotFound(String),

    #[error("a command named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("command name and prompt must not be empty")]
    InvalidCommand,
}

/// The named prompt commands the user can fire. Order is significant only
/// for display.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<PromptCommand>,
}

impl CommandRegistry {
    /// Wraps commands loaded from the settings file as-is; validation
    /// applies to interactive `add` only.
    pub fn new(commands: Vec<PromptCommand>) -> Self {
        Self { commands }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_commands())
    }

    pub fn commands(&self) -> &[PromptCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn resolve(&self, name: &str) -> Result<&PromptCommand, RegistryError> {
        self.commands
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn add(&mut self, command: PromptCommand) -> Result<(), RegistryError> {
        if command.name.trim().is_empty() || command.prompt.trim().is_empty() {
            return Err(RegistryError::InvalidCommand);
        }
        if self.commands.iter().any(|c| c.name == command.name) {
            return Err(RegistryError::DuplicateName(command.name));
        }
        self.commands.push(command);
        Ok(())
    }

    /// No-op when absent.
    pub fn remove(&mut self, name: &str) {
        self.commands.retain(|c| c.name != name);
    }

    pub fn reset_to_defaults(&mut self) {
        self.commands = default_commands();
    }

    /// Per built-in default: overwrite the prompt, model and temperature of
    /// a same-named existing command in place, else append. User commands
    /// with non-matching names survive.
    pub fn merge_defaults(&mut self) {
        for default in default_commands() {
            match self.commands.iter_mut().find(|c| c.name == default.name) {
                Some(existing) => {
                    existing.prompt = default.prompt;
                    existing.model = default.model;
                    existing.temperature = default.temperature;
                }
                None => self.commands.push(default),
            }
        }
    }
}

const STYLE_SUFFIX: &str = "Output only the text and nothing else, do not chat, no preamble, get to the point.";

fn writer_prompt(task: &str) -> String {
    format!("Act as a writer. {task} {STYLE_SUFFIX}")
}

pub fn default_commands() -> Vec<PromptCommand> {
    let defaults = [
        (
            "Summarize selection",
            "Summarize the text in a few sentences highlighting the key takeaways.",
        ),
        (
            "Explain selection",
            "Explain the text in simple and concise terms keeping the same meaning.",
        ),
        (
            "Expand selection",
            "Expand the text by adding more details while keeping the same meaning.",
        ),
        (
            "Rewrite selection (formal)",
            "Rewrite the text in a more formal style while keeping the same meaning.",
        ),
        (
            "Rewrite selection (casual)",
            "Rewrite the text in a more casual style while keeping the same meaning.",
        ),
        (
            "Rewrite selection (active voice)",
            "Rewrite the text with an active voice while keeping the same meaning.",
        ),
        (
            "Rewrite selection (bullet points)",
            "Rewrite the text into bullet points while keeping the same meaning.",
        ),
        (
            "Caption selection",
            "Provide a brief caption for the text.",
        ),
    ];

    defaults
        .into_iter()
        .map(|(name, task)| PromptCommand {
            name: name.to_string(),
            prompt: writer_prompt(task),
            model: None,
            temperature: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> PromptCommand {
        PromptCommand {
            name: name.to_string(),
            prompt: "Do the thing.".to_string(),
            model: None,
            temperature: None,
        }
    }

    #[test]
    fn resolve_finds_by_name() {
        let registry = CommandRegistry::with_defaults();
        let cmd = registry.resolve("Summarize selection").unwrap();
        assert!(cmd.prompt.starts_with("Act as a writer."));
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let registry = CommandRegistry::with_defaults();
        assert_eq!(
            registry.resolve("Nope"),
            Err(RegistryError::NotFound("Nope".to_string()))
        );
    }

    #[test]
    fn add_duplicate_name_fails_and_leaves_registry_unchanged() {
        let mut registry = CommandRegistry::new(vec![command("Foo")]);
        let before = registry.commands().to_vec();

        let result = registry.add(command("Foo"));

        assert_eq!(result, Err(RegistryError::DuplicateName("Foo".to_string())));
        assert_eq!(registry.commands(), before.as_slice());
    }

    #[test]
    fn add_rejects_empty_name_and_prompt() {
        let mut registry = CommandRegistry::default();
        let mut unnamed = command("  ");
        unnamed.name = "  ".to_string();
        assert_eq!(registry.add(unnamed), Err(RegistryError::InvalidCommand));

        let mut promptless = command("Foo");
        promptless.prompt = "\n".to_string();
        assert_eq!(registry.add(promptless), Err(RegistryError::InvalidCommand));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut registry = CommandRegistry::new(vec![command("Foo")]);
        registry.remove("Foo");
        assert!(registry.is_empty());
        // Removing again is a no-op, not an error.
        registry.remove("Foo");
        assert!(registry.is_empty());
    }

    #[test]
    fn reset_replaces_everything() {
        let mut registry = CommandRegistry::new(vec![command("Mine")]);
        registry.reset_to_defaults();
        assert!(registry.resolve("Mine").is_err());
        assert_eq!(registry.commands().len(), default_commands().len());
    }

    #[test]
    fn merge_overwrites_matching_and_keeps_user_commands() {
        let mut summarize = command("Summarize selection");
        summarize.prompt = "my own wording".to_string();
        summarize.temperature = Some(0.9);
        let mut registry = CommandRegistry::new(vec![summarize, command("Mine")]);

        registry.merge_defaults();

        let merged = registry.resolve("Summarize selection").unwrap();
        assert!(merged.prompt.starts_with("Act as a writer."));
        assert_eq!(merged.temperature, None);
        // The user command survives, and every default is present.
        assert!(registry.resolve("Mine").is_ok());
        assert_eq!(registry.commands().len(), default_commands().len() + 1);
    }

    #[test]
    fn merge_defaults_is_idempotent() {
        let mut registry = CommandRegistry::new(vec![command("Mine")]);
        registry.merge_defaults();
        let once = registry.commands().to_vec();
        registry.merge_defaults();
        assert_eq!(registry.commands(), once.as_slice());
    }
}
