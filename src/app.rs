use crate::availability::Slots;
use crate::calendar::{Calendar, CalendarState};
use crate::controller::{Controller, ReservationSink};
use crate::form::FormModal;
use crate::help::Help;
use crate::locale::Lang;
use crate::notice::Notice;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Weekday};
use tracing::debug;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<K> {
    calendar: CalendarState,
    controller: Controller<K>,
    lang: Lang,
    state: AppState,
}

impl<K: ReservationSink> App<K> {
    /// Builds the calendar for the month containing `today`
    pub(crate) fn new(today: Date, closed: Weekday, lang: Lang, sink: K) -> App<K> {
        let slots = Slots::generate(today, today, closed);
        App {
            calendar: CalendarState::new(today),
            controller: Controller::new(slots, sink),
            lang,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the key's action
    // could not be carried out
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.calendar.move_days(-1).is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.calendar.move_days(1).is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.calendar.move_days(-7).is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.calendar.move_days(7).is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.calendar.previous_page().is_ok(),
                KeyCode::Char('n') | KeyCode::PageDown => self.calendar.next_page().is_ok(),
                KeyCode::Char('t') | KeyCode::Home => {
                    self.calendar.jump_to_today();
                    true
                }
                KeyCode::Char('v') => {
                    self.calendar.toggle_view();
                    true
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.select(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Reserving => self.handle_form_key(key),
            AppState::Acknowledging(_) => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => {
                self.controller.cancel();
                self.state = AppState::Calendar;
                true
            }
            KeyCode::Enter => match self.controller.submit() {
                Some(Ok(reservation)) => {
                    self.state = AppState::Acknowledging(reservation.date);
                    true
                }
                Some(Err(_)) => false,
                None => {
                    // The form is gone; nothing left to collect
                    self.state = AppState::Calendar;
                    false
                }
            },
            _ => {
                let Some(form) = self.controller.form_mut() else {
                    return false;
                };
                match key {
                    KeyCode::Tab | KeyCode::Down => {
                        form.focus_next();
                        true
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        form.focus_prev();
                        true
                    }
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Char(ch) => {
                        form.insert(ch);
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    fn select(&mut self) -> bool {
        let date = self.calendar.cursor();
        if self.controller.on_day_selected(&date) {
            self.state = AppState::Reserving;
            true
        } else {
            debug!(%date, "cannot reserve selected day");
            false
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<K: ReservationSink> Widget for &mut App<K> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let lang = self.lang;
        Calendar::new(self.controller.slots(), lang).render(area, buf, &mut self.calendar);
        match self.state {
            AppState::Helping => Help {
                lang,
                style: BASE_STYLE,
            }
            .render(area, buf),
            AppState::Reserving => {
                if let Some(form) = self.controller.form_mut() {
                    FormModal(lang).render(area, buf, form);
                }
            }
            AppState::Acknowledging(date) => Notice {
                lang,
                date,
                style: BASE_STYLE,
            }
            .render(area, buf),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Reserving,
    Acknowledging(Date),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Status;
    use crate::form::{Field, Reservation, ValidationError};
    use time::macros::date;

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct Recorder(Vec<Reservation>);

    impl ReservationSink for Recorder {
        fn accept(&mut self, reservation: &Reservation) {
            self.0.push(reservation.clone());
        }
    }

    fn april() -> App<Recorder> {
        App::new(
            date!(2025 - 04 - 10),
            Weekday::Sunday,
            Lang::En,
            Recorder::default(),
        )
    }

    fn type_str(app: &mut App<Recorder>, s: &str) {
        for ch in s.chars() {
            assert!(app.handle_key(KeyCode::Char(ch)));
        }
    }

    fn screen(app: &mut App<Recorder>) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_owned()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_reserve_day() {
        let mut app = april();
        for _ in 0..5 {
            assert!(app.handle_key(KeyCode::Right));
        }
        assert_eq!(app.calendar.cursor(), date!(2025 - 04 - 15));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Reserving);
        assert!(screen(&mut app)
            .iter()
            .any(|ln| ln.contains("Tue, 15 Apr 2025")));
        type_str(&mut app, "Jane Doe");
        assert!(app.handle_key(KeyCode::Tab));
        type_str(&mut app, "jane@example.com");
        assert!(app.handle_key(KeyCode::Tab));
        type_str(&mut app, "090-1234-5678");
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Acknowledging(date!(2025 - 04 - 15)));
        assert!(screen(&mut app)
            .iter()
            .any(|ln| ln.contains("Reservation complete!")));
        assert_eq!(
            app.controller.slots().lookup(&date!(2025 - 04 - 15)),
            Ok(Status::Unavailable)
        );
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
        // Already reserved
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_select_closed_day() {
        let mut app = april();
        // Thursday the 10th to Sunday the 13th
        for _ in 0..3 {
            assert!(app.handle_key(KeyCode::Char('l')));
        }
        assert_eq!(app.calendar.cursor(), date!(2025 - 04 - 13));
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_select_past_day() {
        let mut app = april();
        assert!(app.handle_key(KeyCode::Left));
        assert!(!app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut app = april();
        assert!(app.handle_key(KeyCode::Enter));
        type_str(&mut app, "Jane Doe");
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Reserving);
        assert_eq!(
            app.controller.form_mut().map(|f| f.errors().to_vec()),
            Some(vec![
                ValidationError::Empty(Field::Email),
                ValidationError::Empty(Field::Phone),
            ])
        );
        let lines = screen(&mut app);
        assert!(lines.iter().any(|ln| ln.contains("Email is required")));
        assert!(lines.iter().any(|ln| ln.contains("Phone is required")));
        assert_eq!(
            app.controller.slots().lookup(&date!(2025 - 04 - 10)),
            Ok(Status::Available)
        );
    }

    #[test]
    fn test_cancel_form() {
        let mut app = april();
        assert!(app.handle_key(KeyCode::Enter));
        type_str(&mut app, "Jane");
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Calendar);
        assert!(!app.controller.is_collecting());
        assert_eq!(
            app.controller.slots().lookup(&date!(2025 - 04 - 10)),
            Ok(Status::Available)
        );
        // The form starts over when reopened
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(
            app.controller
                .form_mut()
                .map(|f| f.value(Field::Name).to_owned()),
            Some(String::new())
        );
    }

    #[test]
    fn test_form_keys_do_not_navigate() {
        let mut app = april();
        assert!(app.handle_key(KeyCode::Enter));
        type_str(&mut app, "qjk");
        assert_eq!(app.state, AppState::Reserving);
        assert_eq!(app.calendar.cursor(), date!(2025 - 04 - 10));
        assert_eq!(
            app.controller
                .form_mut()
                .map(|f| f.value(Field::Name).to_owned()),
            Some(String::from("qjk"))
        );
    }

    #[test]
    fn test_help() {
        let mut app = april();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert!(screen(&mut app).iter().any(|ln| ln.contains(" Commands ")));
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_quit() {
        let mut app = april();
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }
}
