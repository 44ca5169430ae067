use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Footer<'_> {
    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.state.mode {
            AppMode::Edit => &[
                ("^P", "run command"),
                ("^O", "settings"),
                ("^E", "commands"),
                ("F1", "help"),
                ("^Q", "quit"),
            ],
            AppMode::Palette => &[
                ("↑↓", "choose"),
                ("⏎", "run on selection"),
                ("esc", "close"),
            ],
            AppMode::Settings => &[
                ("tab", "next field"),
                ("⏎", "apply"),
                ("esc", "close"),
            ],
            AppMode::Commands => &[
                ("tab", "next field"),
                ("^S", "add"),
                ("d", "remove"),
                ("r", "reset"),
                ("m", "merge defaults"),
                ("esc", "close"),
            ],
            AppMode::Help => &[("any key", "close")],
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        let mut spans: Vec<Span> = Vec::new();
        for (key, label) in self.hints() {
            spans.push(Span::styled(format!(" {key} "), theme.footer_key));
            spans.push(Span::styled(format!("{label}  "), theme.footer_label));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);

        // Right side: spinner for running generations, then the most
        // recent status or error.
        let mut right: Vec<Span> = Vec::new();
        if state.is_busy() {
            let frame = SPINNER_FRAMES[(state.frame_count as usize) % SPINNER_FRAMES.len()];
            right.push(Span::styled(
                format!("{frame} {} ", state.active_tasks.join(", ")),
                theme.spinner,
            ));
        }
        if let Some(error) = &state.last_error {
            right.push(Span::styled(format!(" {} ", error.message), theme.status_error));
        } else if let Some(status) = &state.status_message {
            right.push(Span::styled(format!(" {status} "), theme.status_info));
        }

        let width: u16 = right
            .iter()
            .map(|s| s.content.chars().count() as u16)
            .sum();
        if width > 0 && width < area.width {
            let rect = Rect {
                x: area.x + area.width - width,
                y: area.y,
                width,
                height: 1,
            };
            Paragraph::new(Line::from(right)).render(rect, buf);
        }
    }
}
