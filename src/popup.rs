use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Draws `text` in a bordered, titled box centered in `area`, with a one-column
/// blank margin on either side
pub(crate) fn render_popup(title: &str, text: Text<'_>, style: Style, area: Rect, buf: &mut Buffer) {
    let height = u16::try_from(text.height())
        .unwrap_or(u16::MAX)
        .min(area.height)
        .saturating_add(2);
    let width = u16::try_from(text.width().max(Line::raw(title).width() + 4))
        .unwrap_or(u16::MAX)
        .min(area.width)
        .saturating_add(2);
    let para = Paragraph::new(text)
        .block(
            Block::bordered()
                .title(format!(" {title} "))
                .title_alignment(Alignment::Center),
        )
        .style(style);
    let [popup_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    let [popup_area] = Layout::vertical([height])
        .flex(Flex::Center)
        .areas(popup_area);
    let outer_area = Rect {
        x: popup_area.x.saturating_sub(1),
        y: popup_area.y,
        width: popup_area.width.saturating_add(2),
        height: popup_area.height,
    };
    Clear.render(outer_area, buf);
    Block::new().style(style).render(outer_area, buf);
    para.render(popup_area, buf);
}
