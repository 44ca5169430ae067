use crate::domain::models::Settings;
use crate::domain::registry::CommandRegistry;
use crate::infrastructure::buffer::SharedBuffer;
use std::time::{Duration, Instant};

pub mod error;
pub mod forms;
pub mod input;
pub mod palette;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use forms::{CommandFocus, CommandFormState, SettingsFocus, SettingsFormState};
pub use input::AppTextArea;
pub use palette::CommandPaletteState;

const STATUS_LINGER: Duration = Duration::from_secs(4);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppMode {
    Edit,     // Typing into the document
    Palette,  // Choosing a prompt command to fire
    Settings, // Server URL / default model / model download
    Commands, // Managing the command registry
    Help,     // Keybinding overlay
}

#[derive(Debug)]
pub struct AppState<'a> {
    // --- Lifecycle & status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,
    pub active_tasks: Vec<String>,
    pub frame_count: u64,

    // --- The document (shared with streaming invocations) ---
    pub buffer: SharedBuffer,
    pub scroll_y: usize,
    pub scroll_x: usize,

    // --- Configuration (loaded once, persisted on every mutation) ---
    pub server_url: String,
    pub default_model: String,
    pub registry: CommandRegistry,

    // --- Modal state ---
    pub palette: Option<CommandPaletteState>,
    pub settings_form: Option<SettingsFormState<'a>>,
    pub command_form: Option<CommandFormState<'a>>,
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self::new(Settings::default(), SharedBuffer::new())
    }
}

impl<'a> AppState<'a> {
    pub fn new(settings: Settings, buffer: SharedBuffer) -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Edit,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            active_tasks: Vec::new(),
            frame_count: 0,
            buffer,
            scroll_y: 0,
            scroll_x: 0,
            server_url: settings.server_url,
            default_model: settings.default_model,
            registry: CommandRegistry::new(settings.commands),
            palette: None,
            settings_form: None,
            command_form: None,
        }
    }

    /// The persistable view of the current configuration.
    pub fn settings_snapshot(&self) -> Settings {
        Settings {
            server_url: self.server_url.clone(),
            default_model: self.default_model.clone(),
            commands: self.registry.commands().to_vec(),
        }
    }

    pub fn notify_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now() + STATUS_LINGER);
        self.last_error = None;
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(ErrorState::error(message));
    }

    pub fn expire_status(&mut self) {
        if let Some(clear_at) = self.status_clear_time {
            if Instant::now() >= clear_at {
                self.status_message = None;
                self.status_clear_time = None;
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.active_tasks.is_empty()
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.registry.commands().iter().map(|c| c.name.as_str()).collect()
    }
}
