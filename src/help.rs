use crate::calendar::Lang;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Popup listing the key bindings in the picker's language
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help {
    pub(crate) lang: Lang,
    pub(crate) style: Style,
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self
            .lang
            .help_lines()
            .iter()
            .map(|&s| Line::raw(s))
            .collect::<Text<'_>>();
        // Room for the border on every side
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        // One column of padding either side of the border, where there's room
        let padded = Rect {
            x: popup.x.saturating_sub(1),
            y: popup.y,
            width: popup.width.saturating_add(2),
            height: popup.height,
        }
        .intersection(area);
        Clear.render(padded, buf);
        Block::new().style(self.style).render(padded, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(self.lang.help_title())
                    .title_alignment(Alignment::Center),
            )
            .style(self.style)
            .render(popup, buf);
    }
}
