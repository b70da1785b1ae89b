use thiserror::Error;
use time::{Date, Duration, Month};

/// Whether the calendar shows a whole month or a single week
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum View {
    #[default]
    Month,
    Week,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarState {
    today: Date,
    cursor: Date,
    view: View,
}

impl CalendarState {
    pub(crate) fn new(today: Date) -> Self {
        CalendarState {
            today,
            cursor: today,
            view: View::default(),
        }
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn view(&self) -> View {
        self.view
    }

    pub(crate) fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Month => View::Week,
            View::Week => View::Month,
        };
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.cursor = self.today;
    }

    pub(crate) fn move_days(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        self.cursor = self
            .cursor
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        Ok(())
    }

    /// Move back by one month or one week, depending on the view
    pub(crate) fn previous_page(&mut self) -> Result<(), OutOfTimeError> {
        match self.view {
            View::Month => {
                self.cursor = add_months(self.cursor, -1).ok_or(OutOfTimeError)?;
                Ok(())
            }
            View::Week => self.move_days(-7),
        }
    }

    /// Move forward by one month or one week, depending on the view
    pub(crate) fn next_page(&mut self) -> Result<(), OutOfTimeError> {
        match self.view {
            View::Month => {
                self.cursor = add_months(self.cursor, 1).ok_or(OutOfTimeError)?;
                Ok(())
            }
            View::Week => self.move_days(7),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

// Moves `date` by `delta` months, clamping the day to the length of the
// target month
fn add_months(date: Date, delta: i32) -> Option<Date> {
    let index = date
        .year()
        .checked_mul(12)?
        .checked_add(i32::from(u8::from(date.month())) - 1)?
        .checked_add(delta)?;
    let year = index.div_euclid(12);
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    (1..=date.day())
        .rev()
        .find_map(|d| Date::from_calendar_date(year, month, d).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(date!(2025 - 04 - 15), 1), Some(date!(2025 - 05 - 15)));
        assert_eq!(add_months(date!(2025 - 01 - 31), 1), Some(date!(2025 - 02 - 28)));
        assert_eq!(add_months(date!(2024 - 03 - 31), -1), Some(date!(2024 - 02 - 29)));
        assert_eq!(add_months(date!(2025 - 01 - 10), -1), Some(date!(2024 - 12 - 10)));
        assert_eq!(add_months(date!(2025 - 12 - 10), 1), Some(date!(2026 - 01 - 10)));
        assert_eq!(add_months(Date::MAX, 1), None);
    }

    #[test]
    fn test_pages_follow_view() {
        let mut state = CalendarState::new(date!(2025 - 04 - 10));
        assert_eq!(state.next_page(), Ok(()));
        assert_eq!(state.cursor(), date!(2025 - 05 - 10));
        state.toggle_view();
        assert_eq!(state.view(), View::Week);
        assert_eq!(state.previous_page(), Ok(()));
        assert_eq!(state.cursor(), date!(2025 - 05 - 03));
        state.jump_to_today();
        assert_eq!(state.cursor(), state.today());
    }

    #[test]
    fn test_end_of_time() {
        let mut state = CalendarState::new(Date::MAX);
        assert_eq!(state.move_days(1), Err(OutOfTimeError));
        assert_eq!(state.cursor(), Date::MAX);
        assert_eq!(state.move_days(-1), Ok(()));
    }
}
