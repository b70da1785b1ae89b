use super::state::{CalendarState, View};
use super::util::{WeekFactory, WeekdayExt};
use super::DateStyler;
use crate::locale::Lang;
use crate::theme::{
    AVAILABLE_STYLE, CURSOR_STYLE, HINT_STYLE, TITLE_STYLE, UNAVAILABLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use time::Weekday;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 46;

/// Number of lines above the first week: page title, blank, month title,
/// weekday header, and rule
const HEADER_LINES: u16 = 5;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Column, relative to the left edge of a day, of the availability mark drawn
/// on the line beneath the day
const MARK_OFFSET: u16 = 2;

const ACS_HLINE: char = '─';

pub(crate) const AVAILABLE_MARK: char = '●';
pub(crate) const UNAVAILABLE_MARK: char = '×';

#[derive(Debug)]
pub(crate) struct Calendar<'a, S> {
    styler: &'a S,
    lang: Lang,
}

impl<'a, S> Calendar<'a, S> {
    pub(crate) fn new(styler: &'a S, lang: Lang) -> Calendar<'a, S> {
        Calendar { styler, lang }
    }

    fn hints(&self, view: View) -> String {
        let lang = self.lang;
        let other = match view {
            View::Month => lang.week_view(),
            View::Week => lang.month_view(),
        };
        format!(
            "p {}  t {}  n {}  v {}  ? {}",
            lang.previous(),
            lang.today(),
            lang.next(),
            other,
            lang.help()
        )
    }
}

impl<S: DateStyler> StatefulWidget for Calendar<'_, S> {
    type State = CalendarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length(MAIN_WIDTH.min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let cursor = state.cursor();
        let today = state.today();
        let factory = WeekFactory::new(self.styler);
        let weeks = match state.view() {
            View::Month => factory.month(cursor.year(), cursor.month()),
            View::Week => vec![factory.containing(cursor)],
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_centered(0, self.lang.title(), TITLE_STYLE);
        canvas.draw_centered(
            2,
            self.lang.month_title(cursor.year(), cursor.month()),
            TITLE_STYLE,
        );
        canvas.draw_header(self.lang);
        for (i, week) in std::iter::zip(0u16.., &weeks) {
            for (wd, date) in week.enumerate() {
                let mut s = date.show(date.date == today);
                if date.date == cursor {
                    s = s.patch_style(CURSOR_STYLE);
                }
                canvas.draw_day(i, wd, s);
                if let Some(mark) = date.mark {
                    canvas.draw_mark(i, wd, mark, date.style);
                }
            }
        }
        let week_qty = u16::try_from(weeks.len()).unwrap_or(u16::MAX);
        let footer = HEADER_LINES.saturating_add(week_qty.saturating_mul(WEEK_LINES));
        canvas.draw_legend(footer.saturating_add(1), self.lang);
        canvas.mvprint(
            footer.saturating_add(2),
            0,
            self.hints(state.view()),
            Some(HINT_STYLE),
        );
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_centered<S: AsRef<str>>(&mut self, y: u16, s: S, style: Style) {
        let width = u16::try_from(Span::raw(s.as_ref()).width()).unwrap_or(u16::MAX);
        self.mvprint(y, MAIN_WIDTH.saturating_sub(width) / 2, s, Some(style));
    }

    fn draw_header(&mut self, lang: Lang) {
        let mut wd = Weekday::Sunday;
        for _ in 0..7 {
            self.mvprint(
                HEADER_LINES - 2,
                DAY_WIDTH * wd.index0() + 1,
                lang.weekday_abbrev(wd),
                Some(WEEKDAY_STYLE),
            );
            wd = wd.next();
        }
        self.hline(HEADER_LINES - 1, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: Weekday, s: Span<'_>) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * wd.index0(),
            s.content,
            Some(s.style),
        );
    }

    fn draw_mark(&mut self, week_no: u16, wd: Weekday, mark: char, style: Style) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES + 1,
            DAY_WIDTH * wd.index0() + MARK_OFFSET,
            String::from(mark),
            Some(style),
        );
    }

    fn draw_legend(&mut self, y: u16, lang: Lang) {
        let available = format!("{AVAILABLE_MARK} {}", lang.available());
        let unavailable = format!("{UNAVAILABLE_MARK} {}", lang.unavailable());
        let width = u16::try_from(Span::raw(available.as_str()).width()).unwrap_or(u16::MAX);
        self.mvprint(y, 0, available, Some(AVAILABLE_STYLE));
        self.mvprint(y, width.saturating_add(3), unavailable, Some(UNAVAILABLE_STYLE));
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text that extends beyond the calendar's
            // area, but the Rect passed to it must lie entirely within the
            // frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
