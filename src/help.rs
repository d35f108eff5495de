use datepick::Mode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static MOVEMENT: &[&str] = &[
    "h, LEFT         Previous day",
    "l, RIGHT        Next day",
    "k, UP           Previous week",
    "j, DOWN         Next week",
    "p, PAGE UP      Previous month",
    "n, PAGE DOWN    Next month",
    "t, HOME         Jump to today",
];

static COMMANDS: &[&str] = &[
    "c               Clear the selection",
    "i               Type a date",
    "ENTER           Confirm the selection",
    "?               Show this help",
    "q, ESC          Cancel",
    "",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help {
    pub(crate) style: Style,
    pub(crate) mode: Mode,
}

impl Help {
    fn select_line(&self) -> &'static str {
        match self.mode {
            Mode::Single => "SPACE           Pick the highlighted day",
            Mode::Range => "SPACE           Start or finish a range",
            Mode::Multiple => "SPACE           Toggle the highlighted day",
        }
    }

    fn text(&self) -> Text<'static> {
        MOVEMENT
            .iter()
            .copied()
            .chain([self.select_line()])
            .chain(COMMANDS.iter().copied())
            .map(Line::raw)
            .collect()
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // One column of padding on either side of the border
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            width: help_area.width.saturating_add(2),
            ..help_area
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_line_follows_mode() {
        let help = Help {
            style: Style::new(),
            mode: Mode::Range,
        };
        let text = help.text();
        assert_eq!(text.lines.len(), MOVEMENT.len() + 1 + COMMANDS.len());
        assert_eq!(
            text.lines[MOVEMENT.len()].spans[0].content,
            "SPACE           Start or finish a range"
        );
    }
}
