use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const AVAILABLE_STYLE: Style = Style::new().fg(Color::LightBlue).bg(Color::Black);

pub(crate) const UNAVAILABLE_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod form {
    use super::*;

    pub(crate) const FOCUSED_LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const INPUT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

    pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

    pub(crate) const KEY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}
