use crate::calendar::{DateStyler, AVAILABLE_MARK, UNAVAILABLE_MARK};
use crate::theme::{AVAILABLE_STYLE, UNAVAILABLE_STYLE};
use ratatui::style::Style;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Weekday};
use tracing::debug;

/// Anything that names a calendar day.  Timestamps are reduced to their date
/// before comparison so that two values for the same day always match
/// regardless of time of day or offset.
pub(crate) trait CalendarDay {
    fn calendar_day(&self) -> Date;
}

impl CalendarDay for Date {
    fn calendar_day(&self) -> Date {
        *self
    }
}

impl CalendarDay for PrimitiveDateTime {
    fn calendar_day(&self) -> Date {
        self.date()
    }
}

impl CalendarDay for OffsetDateTime {
    fn calendar_day(&self) -> Date {
        self.date()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Status {
    Available,
    Unavailable,
}

impl Status {
    pub(crate) fn is_available(self) -> bool {
        self == Status::Available
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DaySlot {
    pub(crate) date: Date,
    pub(crate) status: Status,
}

/// The availability of every day of one month, in date order.
// Invariant: one slot per day of `month`, sorted by date
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Slots {
    year: i32,
    month: Month,
    slots: Vec<DaySlot>,
}

impl Slots {
    /// Generate a slot for each day of the month containing `month_start`.
    /// A day is unavailable if it falls on the `closed` weekday or is
    /// strictly before `today`.
    pub(crate) fn generate(month_start: Date, today: Date, closed: Weekday) -> Slots {
        let (year, month) = (month_start.year(), month_start.month());
        let first = month_start.replace_day(1).unwrap_or(month_start);
        let slots = successors(Some(first), |d| d.next_day())
            .take_while(|d| d.month() == month)
            .map(|date| {
                let status = if date.weekday() == closed || date < today {
                    Status::Unavailable
                } else {
                    Status::Available
                };
                DaySlot { date, status }
            })
            .collect::<Vec<_>>();
        let slots = Slots { year, month, slots };
        debug!(
            %year,
            %month,
            days = slots.len(),
            available = slots.available_days().count(),
            "generated day slots"
        );
        slots
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, DaySlot> {
        self.slots.iter()
    }

    pub(crate) fn available_days(&self) -> impl Iterator<Item = Date> + '_ {
        self.slots
            .iter()
            .filter(|sl| sl.status.is_available())
            .map(|sl| sl.date)
    }

    fn position<D: CalendarDay>(&self, day: &D) -> Option<usize> {
        let date = day.calendar_day();
        if date.year() != self.year || date.month() != self.month {
            return None;
        }
        self.slots.iter().position(|sl| sl.date == date)
    }

    pub(crate) fn lookup<D: CalendarDay>(&self, day: &D) -> Result<Status, NotFound> {
        self.position(day)
            .and_then(|i| self.slots.get(i))
            .map(|sl| sl.status)
            .ok_or_else(|| NotFound {
                date: day.calendar_day(),
            })
    }

    /// Like `lookup()`, but days outside of the month are unavailable
    pub(crate) fn status_of<D: CalendarDay>(&self, day: &D) -> Status {
        self.lookup(day).unwrap_or(Status::Unavailable)
    }

    /// Returns a copy of the slots in which `day` is unavailable.  If `day`
    /// is not in the month, the copy is unchanged.
    pub(crate) fn mark_reserved<D: CalendarDay>(&self, day: &D) -> Slots {
        match self.try_mark_reserved(day) {
            Ok(slots) => slots,
            Err(e) => {
                debug!(date = %e.date, "no slot to mark as reserved");
                self.clone()
            }
        }
    }

    pub(crate) fn try_mark_reserved<D: CalendarDay>(&self, day: &D) -> Result<Slots, NotFound> {
        let i = self.position(day).ok_or_else(|| NotFound {
            date: day.calendar_day(),
        })?;
        let mut slots = self.clone();
        if let Some(sl) = slots.slots.get_mut(i) {
            sl.status = Status::Unavailable;
        }
        Ok(slots)
    }
}

impl<'a> IntoIterator for &'a Slots {
    type Item = &'a DaySlot;
    type IntoIter = std::slice::Iter<'a, DaySlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl DateStyler for Slots {
    fn date_style(&self, date: Date) -> Style {
        match self.status_of(&date) {
            Status::Available => AVAILABLE_STYLE,
            Status::Unavailable => UNAVAILABLE_STYLE,
        }
    }

    fn date_mark(&self, date: Date) -> Option<char> {
        match self.status_of(&date) {
            Status::Available => Some(AVAILABLE_MARK),
            Status::Unavailable => Some(UNAVAILABLE_MARK),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no slot for {date}")]
pub(crate) struct NotFound {
    pub(crate) date: Date,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::Weekday::{Saturday, Sunday};

    fn april() -> Slots {
        Slots::generate(date!(2025 - 04 - 01), date!(2025 - 04 - 10), Sunday)
    }

    #[test]
    fn test_generate_one_slot_per_day() {
        let slots = april();
        assert_eq!(slots.len(), 30);
        assert_eq!(slots.year(), 2025);
        assert_eq!(slots.month(), Month::April);
        let dates = slots.iter().map(|sl| sl.date).collect::<Vec<_>>();
        let expected = successors(Some(date!(2025 - 04 - 01)), |d| d.next_day())
            .take(30)
            .collect::<Vec<_>>();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_generate_from_mid_month() {
        let slots = Slots::generate(date!(2024 - 02 - 17), date!(2024 - 01 - 01), Sunday);
        assert_eq!(slots.len(), 29);
        assert_eq!(
            slots.iter().next().map(|sl| sl.date),
            Some(date!(2024 - 02 - 01))
        );
    }

    #[test]
    fn test_derivation_rule() {
        let today = date!(2025 - 04 - 10);
        for sl in &april() {
            let expected = if sl.date.weekday() == Sunday || sl.date < today {
                Status::Unavailable
            } else {
                Status::Available
            };
            assert_eq!(sl.status, expected, "wrong status for {}", sl.date);
        }
    }

    #[test]
    fn test_today_is_available() {
        assert_eq!(april().lookup(&date!(2025 - 04 - 10)), Ok(Status::Available));
    }

    #[test]
    fn test_closed_weekday_is_configurable() {
        let slots = Slots::generate(date!(2025 - 04 - 01), date!(2025 - 04 - 01), Saturday);
        assert_eq!(slots.lookup(&date!(2025 - 04 - 06)), Ok(Status::Available));
        assert_eq!(slots.lookup(&date!(2025 - 04 - 05)), Ok(Status::Unavailable));
    }

    #[test]
    fn test_lookup_ignores_time_of_day() {
        let slots = april();
        assert_eq!(
            slots.lookup(&datetime!(2025 - 04 - 15 23:59:59)),
            Ok(Status::Available)
        );
        assert_eq!(
            slots.lookup(&datetime!(2025 - 04 - 15 0:00 +9)),
            Ok(Status::Available)
        );
    }

    #[test]
    fn test_lookup_out_of_range() {
        let slots = april();
        assert_eq!(
            slots.lookup(&date!(2025 - 05 - 01)),
            Err(NotFound {
                date: date!(2025 - 05 - 01)
            })
        );
        assert_eq!(slots.lookup(&date!(2024 - 04 - 15)).ok(), None);
        assert_eq!(slots.status_of(&date!(2025 - 05 - 01)), Status::Unavailable);
    }

    #[test]
    fn test_mark_reserved_only_touches_one_day() {
        let slots = april();
        let day = date!(2025 - 04 - 15);
        let reserved = slots.mark_reserved(&day);
        assert_eq!(reserved.lookup(&day), Ok(Status::Unavailable));
        for (before, after) in std::iter::zip(&slots, &reserved) {
            assert_eq!(before.date, after.date);
            if before.date != day {
                assert_eq!(before.status, after.status, "{} changed", before.date);
            }
        }
        // The source slots are unchanged
        assert_eq!(slots.lookup(&day), Ok(Status::Available));
    }

    #[test]
    fn test_mark_reserved_idempotent() {
        let slots = april();
        let once = slots.mark_reserved(&date!(2025 - 04 - 22));
        let twice = once.mark_reserved(&date!(2025 - 04 - 22));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mark_reserved_out_of_range() {
        let slots = april();
        assert_eq!(slots.mark_reserved(&date!(2025 - 05 - 02)), slots);
        assert_eq!(
            slots.try_mark_reserved(&date!(2025 - 05 - 02)),
            Err(NotFound {
                date: date!(2025 - 05 - 02)
            })
        );
    }

    #[test]
    fn test_april_2025_scenario() {
        let slots = april();
        assert_eq!(slots.lookup(&date!(2025 - 04 - 06)), Ok(Status::Unavailable));
        assert_eq!(slots.lookup(&date!(2025 - 04 - 09)), Ok(Status::Unavailable));
        assert_eq!(slots.lookup(&date!(2025 - 04 - 15)), Ok(Status::Available));
    }
}
