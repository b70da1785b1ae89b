mod state;
mod util;
mod widget;
pub(crate) use self::state::CalendarState;
pub(crate) use self::widget::{Calendar, AVAILABLE_MARK, UNAVAILABLE_MARK};
use ratatui::style::Style;
use time::Date;

pub(crate) trait DateStyler {
    fn date_style(&self, date: Date) -> Style;

    /// Character drawn beneath the date, if any
    fn date_mark(&self, _date: Date) -> Option<char> {
        None
    }
}
