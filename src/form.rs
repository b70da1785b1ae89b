use crate::locale::Lang;
use crate::theme::{
    form::{ERROR_STYLE, FOCUSED_LABEL_STYLE, INPUT_STYLE, KEY_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use std::fmt;
use thiserror::Error;
use time::Date;

const OUTER_WIDTH: u16 = 54;

/// Columns reserved for field labels, including the focus marker
const LABEL_WIDTH: usize = 16;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub(crate) const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Phone,
            Field::Phone => Field::Name,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Name => Field::Phone,
            Field::Email => Field::Name,
            Field::Phone => Field::Email,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Phone => write!(f, "phone"),
        }
    }
}

/// A completed reservation request
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Reservation {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) date: Date,
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub(crate) enum ValidationError {
    #[error("{0} is required")]
    Empty(Field),
    #[error("email address is not of the form user@domain")]
    InvalidEmail,
}

/// Every problem found by a single validation pass; never empty
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub(crate) struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// State of the reservation form for a single, already-chosen date
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ReservationForm {
    date: Date,
    name: String,
    email: String,
    phone: String,
    focus: Field,
    errors: Vec<ValidationError>,
}

impl ReservationForm {
    pub(crate) fn new(date: Date) -> ReservationForm {
        ReservationForm {
            date,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            focus: Field::Name,
            errors: Vec::new(),
        }
    }

    pub(crate) fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn focused(&self) -> Field {
        self.focus
    }

    pub(crate) fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    /// Errors from the most recent failed submission, cleared on edit
    pub(crate) fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub(crate) fn set_errors(&mut self, errors: &ValidationErrors) {
        self.errors = errors.iter().copied().collect();
    }

    #[cfg(test)]
    pub(crate) fn set_value(&mut self, field: Field, value: &str) {
        value.clone_into(self.value_mut(field));
        self.errors.clear();
    }

    pub(crate) fn insert(&mut self, ch: char) {
        self.value_mut(self.focus).push(ch);
        self.errors.clear();
    }

    pub(crate) fn backspace(&mut self) -> bool {
        let popped = self.value_mut(self.focus).pop().is_some();
        if popped {
            self.errors.clear();
        }
        popped
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        for field in Field::ALL {
            if self.value(field).trim().is_empty() {
                errors.push(ValidationError::Empty(field));
            }
        }
        let email = self.email.trim();
        if !email.is_empty() && !is_email_like(email) {
            errors.push(ValidationError::InvalidEmail);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Returns the completed reservation once every field validates
    pub(crate) fn submit(&self) -> Result<Reservation, ValidationErrors> {
        self.validate()?;
        Ok(Reservation {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            date: self.date,
        })
    }

    fn to_text(&self, lang: Lang) -> Text<'static> {
        let mut lines = vec![
            Line::from_iter([
                Span::styled(pad_label(lang.date_label()), BASE_STYLE),
                Span::styled(lang.format_date(self.date), BASE_STYLE),
            ]),
            Line::styled("", BASE_STYLE),
        ];
        for field in Field::ALL {
            let focused = field == self.focused();
            let (marker, label_style) = if focused {
                ("> ", FOCUSED_LABEL_STYLE)
            } else {
                ("  ", BASE_STYLE)
            };
            let mut spans = vec![Span::styled(
                pad_label(&format!("{marker}{}", lang.field_label(field))),
                label_style,
            )];
            spans.push(Span::styled(self.value(field).to_owned(), INPUT_STYLE));
            if focused {
                spans.push(Span::styled("_", INPUT_STYLE));
            }
            lines.push(Line::from_iter(spans));
        }
        lines.push(Line::styled("", BASE_STYLE));
        for &err in self.errors() {
            lines.push(Line::styled(lang.error_message(err), ERROR_STYLE));
        }
        if !self.errors().is_empty() {
            lines.push(Line::styled("", BASE_STYLE));
        }
        lines.push(
            Line::from_iter([
                Span::styled("Esc", KEY_STYLE),
                Span::styled(format!(" {}   ", lang.cancel()), BASE_STYLE),
                Span::styled("Enter", KEY_STYLE),
                Span::styled(format!(" {}", lang.submit()), BASE_STYLE),
            ])
            .alignment(Alignment::Right),
        );
        Text::from(lines)
    }
}

fn pad_label(label: &str) -> String {
    let width = Span::raw(label).width();
    format!("{label}{}", " ".repeat(LABEL_WIDTH.saturating_sub(width)))
}

fn is_email_like(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !s.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Modal popup displaying a `ReservationForm`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FormModal(pub(crate) Lang);

impl StatefulWidget for FormModal {
    type State = ReservationForm;

    /*
     * ......................................................
     * .┌──────────────── Reservation ─────────────────────┐.
     * .│Date            Tue, 15 Apr 2025                  │.
     * .│                                                  │.
     * .│> Name          Jane Doe_                         │.
     * .│  Email                                           │.
     * .│  Phone                                           │.
     * .│                                                  │.
     * .│                         Esc Cancel   Enter Reserve│.
     * .└──────────────────────────────────────────────────┘.
     * ......................................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let text = state.to_text(self.0);
        let inner_height = u16::try_from(text.height()).unwrap_or(u16::MAX);
        let outer_height = inner_height.saturating_add(4);
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([outer_height])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(format!(" {} ", self.0.form_title()))
            .title_alignment(Alignment::Center)
            .style(BASE_STYLE)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        text.render(text_area, buf);
    }
}
