use super::input::AppTextArea;
use crate::domain::models::{ModelInfo, PromptCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFocus {
    ServerUrl,
    DefaultModel,
    Pull,
}

/// The server-configuration modal: URL, default model picked from the
/// live tag list, and a model-download field.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsFormState<'a> {
    pub focus: SettingsFocus,
    pub url_input: AppTextArea<'a>,
    pub pull_input: AppTextArea<'a>,
    pub models: Vec<ModelInfo>,
    pub models_error: Option<String>,
    pub loading_models: bool,
    pub selected_model: usize,
}

impl SettingsFormState<'_> {
    pub fn open(server_url: &str) -> Self {
        Self {
            focus: SettingsFocus::ServerUrl,
            url_input: AppTextArea::with_text(server_url),
            pull_input: AppTextArea::default(),
            models: Vec::new(),
            models_error: None,
            loading_models: true,
            selected_model: 0,
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            SettingsFocus::ServerUrl => SettingsFocus::DefaultModel,
            SettingsFocus::DefaultModel => SettingsFocus::Pull,
            SettingsFocus::Pull => SettingsFocus::ServerUrl,
        };
    }

    pub fn models_loaded(&mut self, models: Vec<ModelInfo>, current_default: &str) {
        self.selected_model = models
            .iter()
            .position(|m| m.name == current_default)
            .unwrap_or(0);
        self.models = models;
        self.models_error = None;
        self.loading_models = false;
    }

    pub fn select_next_model(&mut self) {
        if !self.models.is_empty() {
            self.selected_model = (self.selected_model + 1) % self.models.len();
        }
    }

    pub fn select_prev_model(&mut self) {
        if !self.models.is_empty() {
            self.selected_model = self
                .selected_model
                .checked_sub(1)
                .unwrap_or(self.models.len() - 1);
        }
    }

    pub fn selected_model_name(&self) -> Option<&str> {
        self.models.get(self.selected_model).map(|m| m.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFocus {
    Name,
    Prompt,
    Model,
    Temperature,
    List,
}

/// The command-management modal: a new-command form plus the list of
/// existing commands with remove / reset / merge.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandFormState<'a> {
    pub focus: CommandFocus,
    pub name_input: AppTextArea<'a>,
    pub prompt_input: AppTextArea<'a>,
    pub model_input: AppTextArea<'a>,
    pub temperature_input: AppTextArea<'a>,
    pub selected_command: usize,
}

impl Default for CommandFormState<'_> {
    fn default() -> Self {
        Self {
            focus: CommandFocus::Name,
            name_input: AppTextArea::default(),
            prompt_input: AppTextArea::default(),
            model_input: AppTextArea::default(),
            temperature_input: AppTextArea::default(),
            selected_command: 0,
        }
    }
}

impl CommandFormState<'_> {
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            CommandFocus::Name => CommandFocus::Prompt,
            CommandFocus::Prompt => CommandFocus::Model,
            CommandFocus::Model => CommandFocus::Temperature,
            CommandFocus::Temperature => CommandFocus::List,
            CommandFocus::List => CommandFocus::Name,
        };
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected_command = (self.selected_command + 1) % len;
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected_command = self.selected_command.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn clear_inputs(&mut self) {
        self.name_input.clear();
        self.prompt_input.clear();
        self.model_input.clear();
        self.temperature_input.clear();
    }

    /// Builds the command from the form fields. Temperature must parse
    /// into [0, 1] when given; name/prompt emptiness is the registry's
    /// call.
    pub fn build_command(&self) -> Result<PromptCommand, String> {
        let temperature = match self.temperature_input.value().as_str() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(t) if (0.0..=1.0).contains(&t) => Some(t),
                _ => return Err("temperature must be a number between 0 and 1".to_string()),
            },
        };
        let model = match self.model_input.value().as_str() {
            "" => None,
            name => Some(name.to_string()),
        };
        Ok(PromptCommand {
            name: self.name_input.value(),
            prompt: self.prompt_input.text().trim().to_string(),
            model,
            temperature,
        })
    }
}
