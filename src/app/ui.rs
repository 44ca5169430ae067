use crate::app::state::{AppMode, AppState};
use crate::components::editor::EditorView;
use crate::components::footer::Footer;
use crate::components::modals::{
    commands::CommandsModal, help::HelpModal, palette::PaletteModal, settings::SettingsModal,
};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let theme = Theme::default();
    let area = f.area();

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Document
            Constraint::Length(1), // Footer
        ])
        .split(area);

    // Header
    let header = Line::from(vec![
        Span::styled(" scribe ", theme.header_accent),
        Span::styled(format!("  {}", state.server_url), theme.header),
        Span::styled(format!("  model: {}", state.default_model), theme.header),
    ]);
    f.render_widget(Paragraph::new(header).style(theme.header), main[0]);

    // Document pane, keeping the cursor in view.
    let snapshot = state.buffer.snapshot();
    ensure_cursor_visible(
        state,
        snapshot.cursor,
        main[1].height.saturating_sub(2) as usize,
        main[1].width.saturating_sub(2) as usize,
    );
    f.render_widget(
        EditorView {
            snapshot: &snapshot,
            theme: &theme,
            scroll: (state.scroll_y, state.scroll_x),
            focused: state.mode == AppMode::Edit,
        },
        main[1],
    );

    f.render_widget(
        Footer {
            state,
            theme: &theme,
        },
        main[2],
    );

    match state.mode {
        AppMode::Palette => {
            if let Some(palette) = &state.palette {
                f.render_widget(
                    PaletteModal {
                        theme: &theme,
                        palette,
                        commands: state.registry.commands(),
                    },
                    area,
                );
            }
        }
        AppMode::Settings => {
            if let Some(form) = &state.settings_form {
                f.render_widget(
                    SettingsModal {
                        theme: &theme,
                        form,
                        default_model: &state.default_model,
                    },
                    area,
                );
            }
        }
        AppMode::Commands => {
            if let Some(form) = &state.command_form {
                f.render_widget(
                    CommandsModal {
                        theme: &theme,
                        form,
                        commands: state.registry.commands(),
                    },
                    area,
                );
            }
        }
        AppMode::Help => {
            f.render_widget(HelpModal { theme: &theme }, area);
        }
        AppMode::Edit => {}
    }
}

fn ensure_cursor_visible(
    state: &mut AppState,
    cursor: crate::domain::models::Position,
    view_h: usize,
    view_w: usize,
) {
    if view_h > 0 {
        if cursor.line < state.scroll_y {
            state.scroll_y = cursor.line;
        } else if cursor.line >= state.scroll_y + view_h {
            state.scroll_y = cursor.line + 1 - view_h;
        }
    }
    if view_w > 0 {
        if cursor.ch < state.scroll_x {
            state.scroll_x = cursor.ch;
        } else if cursor.ch >= state.scroll_x + view_w {
            state.scroll_x = cursor.ch + 1 - view_w;
        }
    }
}
