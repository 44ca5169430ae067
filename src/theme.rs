use ratatui::style::{Color, Modifier, Style};

/// One dark palette for the whole app.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text: Style,
    pub dim: Style,
    pub selection: Style,
    pub cursor: Style,
    pub header: Style,
    pub header_accent: Style,
    pub footer_key: Style,
    pub footer_label: Style,
    pub status_info: Style,
    pub status_error: Style,
    pub border: Style,
    pub border_focus: Style,
    pub list_item: Style,
    pub list_selected: Style,
    pub spinner: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let fg = Color::Rgb(216, 222, 233);
        let muted = Color::Rgb(110, 120, 140);
        let accent = Color::Rgb(136, 192, 208);
        let warn = Color::Rgb(235, 203, 139);
        let error = Color::Rgb(191, 97, 106);
        let surface = Color::Rgb(46, 52, 64);

        Self {
            text: Style::default().fg(fg),
            dim: Style::default().fg(muted),
            selection: Style::default().bg(Color::Rgb(67, 76, 94)),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            header: Style::default().fg(fg).bg(surface),
            header_accent: Style::default()
                .fg(accent)
                .bg(surface)
                .add_modifier(Modifier::BOLD),
            footer_key: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            footer_label: Style::default().fg(muted),
            status_info: Style::default().fg(warn),
            status_error: Style::default().fg(error).add_modifier(Modifier::BOLD),
            border: Style::default().fg(muted),
            border_focus: Style::default().fg(accent),
            list_item: Style::default().fg(fg),
            list_selected: Style::default()
                .fg(Color::Rgb(236, 239, 244))
                .bg(Color::Rgb(67, 76, 94))
                .add_modifier(Modifier::BOLD),
            spinner: Style::default().fg(accent),
        }
    }
}
