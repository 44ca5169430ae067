use crate::app::action::Action;
use crate::app::state::{AppMode, AppState, CommandFocus, SettingsFocus};
use crossterm::event::{Event, KeyCode, KeyModifiers};

pub fn map_event_to_action(event: Event, app_state: &AppState<'_>) -> Option<Action> {
    let key = match event {
        Event::Key(key) => key,
        _ => return None,
    };
    if key.kind == crossterm::event::KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app_state.mode {
        AppMode::Edit => match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => Some(Action::Quit),
            KeyCode::Char('p') if ctrl => Some(Action::OpenPalette),
            KeyCode::Char('o') if ctrl => Some(Action::OpenSettings),
            KeyCode::Char('e') if ctrl => Some(Action::OpenCommands),
            KeyCode::Char('a') if ctrl => Some(Action::SelectAll),
            KeyCode::F(1) => Some(Action::ToggleHelp),
            KeyCode::Esc => Some(Action::CancelMode),
            _ => Some(Action::EditorKey(key)),
        },

        AppMode::Palette => match key.code {
            KeyCode::Esc => Some(Action::CancelMode),
            KeyCode::Enter => Some(Action::PaletteSelect),
            KeyCode::Down => Some(Action::PaletteNext),
            KeyCode::Up => Some(Action::PalettePrev),
            KeyCode::Char('n') if ctrl => Some(Action::PaletteNext),
            KeyCode::Char('p') if ctrl => Some(Action::PalettePrev),
            _ => Some(Action::PaletteInput(key)),
        },

        AppMode::Settings => {
            let model_focus = app_state
                .settings_form
                .as_ref()
                .is_some_and(|f| f.focus == SettingsFocus::DefaultModel);
            match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Tab | KeyCode::BackTab => Some(Action::SettingsNextField),
                KeyCode::Enter => Some(Action::SettingsSubmit),
                KeyCode::Down if model_focus => Some(Action::ModelNext),
                KeyCode::Up if model_focus => Some(Action::ModelPrev),
                _ => Some(Action::SettingsInput(key)),
            }
        }

        AppMode::Commands => {
            let list_focus = app_state
                .command_form
                .as_ref()
                .is_some_and(|f| f.focus == CommandFocus::List);
            let prompt_focus = app_state
                .command_form
                .as_ref()
                .is_some_and(|f| f.focus == CommandFocus::Prompt);
            match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Tab => Some(Action::CommandFormNextField),
                KeyCode::Char('s') if ctrl => Some(Action::SubmitNewCommand),
                _ if list_focus => match key.code {
                    KeyCode::Down | KeyCode::Char('j') => Some(Action::CommandListNext),
                    KeyCode::Up | KeyCode::Char('k') => Some(Action::CommandListPrev),
                    KeyCode::Delete | KeyCode::Char('d') => Some(Action::RemoveSelectedCommand),
                    KeyCode::Char('r') => Some(Action::ResetCommands),
                    KeyCode::Char('m') => Some(Action::MergeCommands),
                    _ => None,
                },
                // Enter inserts a newline only in the multi-line prompt field.
                KeyCode::Enter if !prompt_focus => Some(Action::CommandFormNextField),
                _ => Some(Action::CommandFormInput(key)),
            }
        }

        AppMode::Help => match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => Some(Action::Quit),
            _ => Some(Action::ToggleHelp),
        },
    }
}
