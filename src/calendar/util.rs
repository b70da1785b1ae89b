use super::DateStyler;
use ratatui::{style::Style, text::Span};
use std::iter::successors;
use time::{Date, Month, Weekday, Weekday::*};

pub(super) const DAYS_IN_WEEK: usize = 7;

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct StyledDate {
    pub(super) date: Date,
    pub(super) style: Style,
    pub(super) mark: Option<char>,
}

impl StyledDate {
    pub(super) fn day(&self) -> u8 {
        self.date.day()
    }

    pub(super) fn show(&self, is_today: bool) -> Span<'static> {
        let s = if is_today {
            format!("[{:2}]", self.day())
        } else {
            format!(" {:2} ", self.day())
        };
        Span::styled(s, self.style)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Week([Option<StyledDate>; DAYS_IN_WEEK]);

impl Week {
    fn empty() -> Self {
        Week([None; DAYS_IN_WEEK])
    }

    fn set(&mut self, date: StyledDate) {
        let i = usize::from(date.date.weekday().index0());
        if let Some(slot) = self.0.get_mut(i) {
            *slot = Some(date);
        }
    }

    pub(super) fn enumerate(&self) -> impl Iterator<Item = (Weekday, StyledDate)> + '_ {
        successors(Some(Sunday), |&wd| match wd.next() {
            Sunday => None,
            wd2 => Some(wd2),
        })
        .filter_map(|wd| self.get(wd).map(|sd| (wd, sd)))
    }

    pub(super) fn get(&self, wd: Weekday) -> Option<StyledDate> {
        self.0.get(usize::from(wd.index0())).copied().flatten()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) struct WeekFactory<'a, S>(&'a S);

impl<'a, S: DateStyler> WeekFactory<'a, S> {
    pub(super) fn new(styler: &'a S) -> Self {
        WeekFactory(styler)
    }

    fn style_date(&self, date: Date) -> StyledDate {
        StyledDate {
            date,
            style: self.0.date_style(date),
            mark: self.0.date_mark(date),
        }
    }

    /// Returns the full week (Sunday through Saturday) containing `date`,
    /// omitting any days beyond the ends of time
    pub(super) fn containing(&self, date: Date) -> Week {
        let mut week = Week::empty();
        week.set(self.style_date(date));
        let i = usize::from(date.weekday().index0());
        for d in iter_days_before(date).take(i) {
            week.set(self.style_date(d));
        }
        for d in iter_days_after(date).take(DAYS_IN_WEEK - i - 1) {
            week.set(self.style_date(d));
        }
        week
    }

    /// Returns the weeks of `month` in `year`, with days from adjacent months
    /// left out
    pub(super) fn month(&self, year: i32, month: Month) -> Vec<Week> {
        let Ok(first) = Date::from_calendar_date(year, month, 1) else {
            return Vec::new();
        };
        let mut weeks = Vec::new();
        let mut week = Week::empty();
        for d in successors(Some(first), |d| d.next_day()).take_while(|d| d.month() == month) {
            week.set(self.style_date(d));
            if d.weekday() == Saturday {
                weeks.push(std::mem::replace(&mut week, Week::empty()));
            }
        }
        if week != Week::empty() {
            weeks.push(week);
        }
        weeks
    }
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
