use crate::locale::Lang;
use crate::popup::render_popup;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::Widget,
};
use time::Date;

/// Acknowledgment shown once a reservation has been accepted
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Notice {
    pub(crate) lang: Lang,
    pub(crate) date: Date,
    pub(crate) style: Style,
}

impl Widget for Notice {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::raw(self.lang.reserved()),
            Line::raw(self.lang.format_date(self.date)),
            Line::raw(""),
            Line::raw(self.lang.dismiss()),
        ])
        .centered();
        render_popup(self.lang.form_title(), text, self.style, area, buf);
    }
}
