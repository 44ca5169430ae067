use super::{
    action::Action,
    command::Command,
    state::{AppMode, AppState, CommandFormState, CommandPaletteState, SettingsFocus, SettingsFormState},
};
use crate::infrastructure::buffer::{Movement, TextBuffer};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    match action {
        // --- System ---
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            state.expire_status();
        }
        Action::Quit => {
            state.should_quit = true;
        }

        // --- Document editing ---
        Action::EditorKey(key) => {
            state.buffer.with(|b| apply_editor_key(b, key));
        }
        Action::SelectAll => {
            state.buffer.with(|b| b.select_all());
        }

        // --- Mode transitions ---
        Action::OpenPalette => {
            if state.registry.is_empty() {
                state.notify_error("no commands configured");
            } else {
                state.palette = Some(CommandPaletteState::open(&state.command_names()));
                state.mode = AppMode::Palette;
            }
        }
        Action::OpenSettings => {
            state.settings_form = Some(SettingsFormState::open(&state.server_url));
            state.mode = AppMode::Settings;
            return Some(Command::LoadModels);
        }
        Action::OpenCommands => {
            state.command_form = Some(CommandFormState::default());
            state.mode = AppMode::Commands;
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Edit
            } else {
                AppMode::Help
            };
        }
        Action::CancelMode => {
            if state.mode == AppMode::Edit {
                state.buffer.with(|b| b.clear_selection());
            }
            state.mode = AppMode::Edit;
            state.last_error = None;
            state.palette = None;
            state.command_form = None;
            // Closing the settings modal commits a pending URL edit.
            let pending = state.settings_form.take().and_then(|form| {
                let url = form.url_input.value();
                (!url.is_empty() && url != state.server_url).then_some(url)
            });
            if let Some(url) = pending {
                state.server_url = url;
                state.notify_status("Server URL updated");
                return Some(Command::ApplyServerUrl(state.settings_snapshot()));
            }
        }

        // --- Command palette ---
        Action::PaletteInput(key) => {
            if let Some(palette) = state.palette.as_mut() {
                match key.code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        palette.query.push(c);
                    }
                    KeyCode::Backspace => {
                        palette.query.pop();
                    }
                    _ => return None,
                }
            }
            refilter_palette(state);
        }
        Action::PaletteNext => {
            if let Some(palette) = state.palette.as_mut() {
                palette.select_next();
            }
        }
        Action::PalettePrev => {
            if let Some(palette) = state.palette.as_mut() {
                palette.select_prev();
            }
        }
        Action::PaletteSelect => {
            let index = state.palette.as_ref().and_then(|p| p.selected());
            let command = index.and_then(|i| state.registry.commands().get(i).cloned());
            if let Some(command) = command {
                state.palette = None;
                state.mode = AppMode::Edit;
                return Some(Command::RunGeneration {
                    command,
                    default_model: state.default_model.clone(),
                });
            }
        }

        // --- Generation lifecycle ---
        Action::GenerationStarted(name) => {
            state.active_tasks.push(name);
        }
        Action::GenerationCompleted { command, chars } => {
            state.active_tasks.retain(|t| t != &command);
            state.notify_status(format!("{command}: inserted {chars} chars"));
        }
        Action::GenerationFailed { command, message } => {
            state.active_tasks.retain(|t| t != &command);
            state.notify_error(format!("{command}: {message}"));
        }

        // --- Settings modal ---
        Action::SettingsInput(key) => {
            if let Some(form) = state.settings_form.as_mut() {
                match form.focus {
                    SettingsFocus::ServerUrl => {
                        form.url_input.input(key);
                    }
                    SettingsFocus::Pull => {
                        form.pull_input.input(key);
                    }
                    SettingsFocus::DefaultModel => {}
                }
            }
        }
        Action::SettingsNextField => {
            if let Some(form) = state.settings_form.as_mut() {
                form.next_focus();
            }
        }
        Action::SettingsSubmit => return submit_settings(state),
        Action::ModelNext => {
            if let Some(form) = state.settings_form.as_mut() {
                form.select_next_model();
            }
        }
        Action::ModelPrev => {
            if let Some(form) = state.settings_form.as_mut() {
                form.select_prev_model();
            }
        }
        Action::ModelsLoaded(models) => {
            let default_model = state.default_model.clone();
            if let Some(form) = state.settings_form.as_mut() {
                form.models_loaded(models, &default_model);
            }
        }
        Action::ModelsLoadFailed(message) => {
            if let Some(form) = state.settings_form.as_mut() {
                form.models_error = Some(message.clone());
                form.loading_models = false;
            }
            state.notify_error(format!("Failed to load models: {message}"));
        }

        // --- Command management modal ---
        Action::CommandFormInput(key) => {
            if let Some(form) = state.command_form.as_mut() {
                match form.focus {
                    super::state::CommandFocus::Name => form.name_input.input(key),
                    super::state::CommandFocus::Prompt => form.prompt_input.input(key),
                    super::state::CommandFocus::Model => form.model_input.input(key),
                    super::state::CommandFocus::Temperature => form.temperature_input.input(key),
                    super::state::CommandFocus::List => return None,
                };
            }
        }
        Action::CommandFormNextField => {
            if let Some(form) = state.command_form.as_mut() {
                form.next_focus();
            }
        }
        Action::CommandListNext => {
            let len = state.registry.commands().len();
            if let Some(form) = state.command_form.as_mut() {
                form.select_next(len);
            }
        }
        Action::CommandListPrev => {
            let len = state.registry.commands().len();
            if let Some(form) = state.command_form.as_mut() {
                form.select_prev(len);
            }
        }
        Action::SubmitNewCommand => {
            let built = state.command_form.as_ref().map(|f| f.build_command());
            match built {
                Some(Ok(command)) => {
                    let name = command.name.clone();
                    match state.registry.add(command) {
                        Ok(()) => {
                            if let Some(form) = state.command_form.as_mut() {
                                form.clear_inputs();
                            }
                            state.notify_status(format!("Added \"{name}\""));
                            return Some(Command::PersistSettings(state.settings_snapshot()));
                        }
                        Err(err) => state.notify_error(err.to_string()),
                    }
                }
                Some(Err(message)) => state.notify_error(message),
                None => {}
            }
        }
        Action::RemoveSelectedCommand => {
            let name = state.command_form.as_ref().and_then(|form| {
                state
                    .registry
                    .commands()
                    .get(form.selected_command)
                    .map(|c| c.name.clone())
            });
            if let Some(name) = name {
                state.registry.remove(&name);
                let len = state.registry.commands().len();
                if let Some(form) = state.command_form.as_mut() {
                    if form.selected_command >= len {
                        form.selected_command = len.saturating_sub(1);
                    }
                }
                state.notify_status(format!("Removed \"{name}\""));
                return Some(Command::PersistSettings(state.settings_snapshot()));
            }
        }
        Action::ResetCommands => {
            state.registry.reset_to_defaults();
            state.notify_status("Commands reset to defaults");
            return Some(Command::PersistSettings(state.settings_snapshot()));
        }
        Action::MergeCommands => {
            state.registry.merge_defaults();
            state.notify_status("Default commands merged");
            return Some(Command::PersistSettings(state.settings_snapshot()));
        }

        // --- Async results ---
        Action::OperationCompleted(Ok(message)) => state.notify_status(message),
        Action::OperationCompleted(Err(message)) => state.notify_error(message),
        Action::ErrorOccurred(message) => state.notify_error(message),
    }
    None
}

fn submit_settings(state: &mut AppState) -> Option<Command> {
    enum Outcome {
        UrlChanged(String),
        ModelPicked(String),
        Pull(String),
        PullEmpty,
        Nothing,
    }

    let outcome = match state.settings_form.as_mut() {
        Some(form) => match form.focus {
            SettingsFocus::ServerUrl => {
                let url = form.url_input.value();
                if url.is_empty() || url == state.server_url {
                    Outcome::Nothing
                } else {
                    form.loading_models = true;
                    form.models_error = None;
                    Outcome::UrlChanged(url)
                }
            }
            SettingsFocus::DefaultModel => match form.selected_model_name() {
                Some(name) => Outcome::ModelPicked(name.to_string()),
                None => Outcome::Nothing,
            },
            SettingsFocus::Pull => {
                let name = form.pull_input.value();
                if name.is_empty() {
                    Outcome::PullEmpty
                } else {
                    form.pull_input.clear();
                    Outcome::Pull(name)
                }
            }
        },
        None => Outcome::Nothing,
    };

    match outcome {
        Outcome::UrlChanged(url) => {
            state.server_url = url;
            state.notify_status("Server URL updated");
            Some(Command::ApplyServerUrl(state.settings_snapshot()))
        }
        Outcome::ModelPicked(name) => {
            state.default_model = name.clone();
            state.notify_status(format!("Default model set to {name}"));
            Some(Command::PersistSettings(state.settings_snapshot()))
        }
        Outcome::Pull(name) => {
            state.notify_status(format!("Starting download of {name}..."));
            Some(Command::PullModel(name))
        }
        Outcome::PullEmpty => {
            state.notify_error("enter a model name to download");
            None
        }
        Outcome::Nothing => None,
    }
}

fn refilter_palette(state: &mut AppState) {
    let names: Vec<String> = state
        .registry
        .commands()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    if let Some(palette) = state.palette.as_mut() {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        palette.refilter(&refs);
    }
}

fn apply_editor_key(buffer: &mut TextBuffer, key: KeyEvent) {
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.insert_str(&c.to_string());
        }
        KeyCode::Enter => buffer.insert_str("\n"),
        KeyCode::Tab => buffer.insert_str("    "),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete_forward(),
        KeyCode::Left => buffer.move_cursor(Movement::Left, extend),
        KeyCode::Right => buffer.move_cursor(Movement::Right, extend),
        KeyCode::Up => buffer.move_cursor(Movement::Up, extend),
        KeyCode::Down => buffer.move_cursor(Movement::Down, extend),
        KeyCode::Home => buffer.move_cursor(Movement::LineStart, extend),
        KeyCode::End => buffer.move_cursor(Movement::LineEnd, extend),
        _ => {}
    }
}
