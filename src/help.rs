use crate::locale::Lang;
use crate::popup::render_popup;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::Widget,
};

static EN_TEXT: &[&str] = &[
    "h, LEFT         Previous day",
    "l, RIGHT        Next day",
    "k, UP           Previous week",
    "j, DOWN         Next week",
    "p, PAGE UP      Previous month/week",
    "n, PAGE DOWN    Next month/week",
    "t, HOME         Jump to today",
    "v               Switch month/week view",
    "ENTER, SPACE    Reserve the selected day",
    "?               Show this help",
    "q, ESC          Quit",
    "",
    "In the form, TAB and SHIFT-TAB move between",
    "fields, ENTER submits, and ESC cancels.",
    "",
    "Press the Any Key to dismiss.",
];

static JA_TEXT: &[&str] = &[
    "h, LEFT         前の日",
    "l, RIGHT        次の日",
    "k, UP           前の週",
    "j, DOWN         次の週",
    "p, PAGE UP      前の月/週",
    "n, PAGE DOWN    次の月/週",
    "t, HOME         今日に移動",
    "v               月/週表示の切り替え",
    "ENTER, SPACE    選択した日を予約",
    "?               このヘルプを表示",
    "q, ESC          終了",
    "",
    "フォームでは TAB と SHIFT-TAB で項目を移動し、",
    "ENTER で送信、ESC でキャンセルします。",
    "",
    "何かキーを押すと閉じます。",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help {
    pub(crate) lang: Lang,
    pub(crate) style: Style,
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, lines) = match self.lang {
            Lang::En => ("Commands", EN_TEXT),
            Lang::Ja => ("コマンド", JA_TEXT),
        };
        let text = Text::from_iter(lines.iter().map(|&s| Line::raw(s)));
        render_popup(title, text, self.style, area, buf);
    }
}
