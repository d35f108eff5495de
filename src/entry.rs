use crate::theme::{
    entry::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use datepick::input::{DateParser, DateTextError, Field};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Date;

const OUTER_WIDTH: u16 = 44;
const OUTER_HEIGHT: u16 = 9;
const ENTER_POS: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub(crate) error_style: Style,
}

impl StatefulWidget for Entry {
    type State = EntryState;

    /*
     * ............................................
     * .┌──────────────── Enter Date ────────────┐.
     * .│                                        │.
     * .│               MM/DD/YYYY               │.
     * .│                                        │.
     * .│                [ENTER]                 │.
     * .│ <error message, if any>                │.
     * .└────────────────────────────────────────┘.
     * ............................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Enter Date ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text(self.error_style).render(text_area, buf);
    }
}

/// A date being typed digit by digit into the slots of a fixed format
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EntryState {
    parser: DateParser,
    digits: [Option<u8>; ENTER_POS],
    pos: usize,
    error: Option<String>,
}

impl EntryState {
    pub(crate) fn new(parser: DateParser) -> EntryState {
        EntryState {
            parser,
            digits: [None; ENTER_POS],
            pos: 0,
            error: None,
        }
    }

    fn to_text(&self, error_style: Style) -> Text<'static> {
        let error = match &self.error {
            Some(e) => Line::from(Span::styled(e.clone(), error_style)),
            None => Line::styled("", BASE_STYLE),
        };
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text, not its centering padding, gets
            // underlined
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
            error,
        ])
        .centered()
    }

    fn to_line(&self) -> Line<'static> {
        let sep = self.parser.format().separator.as_char().to_string();
        let mut spans = Vec::new();
        for (i, (field, digits)) in self.field_digits().enumerate() {
            if i > 0 {
                spans.push(Span::styled(sep.clone(), BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(d.to_string(), BASE_STYLE),
                    None => Span::styled(field.placeholder().to_string(), UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    /// The digit slots of each field, in the order the format writes them
    fn field_digits(&self) -> impl Iterator<Item = (Field, &[Option<u8>])> + '_ {
        let mut rest = self.digits.as_slice();
        self.parser.format().fields().into_iter().map(move |field| {
            let (digits, tail) = rest.split_at(field.width());
            rest = tail;
            (field, digits)
        })
    }

    /// The entered text, with unfilled slots dropped
    fn to_input(&self) -> String {
        let sep = self.parser.format().separator.as_char().to_string();
        let fields = self
            .field_digits()
            .map(|(_, digits)| digits.iter().flatten().map(u8::to_string).collect::<String>())
            .collect::<Vec<_>>();
        fields.join(sep.as_str())
    }

    pub(crate) fn handle_input(&mut self, input: EntryInput) -> EntryOutput {
        self.error = None;
        match (input, self.pos) {
            (EntryInput::Digit(d), 0..ENTER_POS) => {
                self.digits[self.pos] = Some(d);
                self.pos += 1;
                EntryOutput::Ok
            }
            (EntryInput::Backspace, 1..) => {
                self.pos -= 1;
                self.digits[self.pos] = None;
                EntryOutput::Ok
            }
            (EntryInput::Enter, ENTER_POS) => match self.parser.parse(&self.to_input()) {
                Ok(date) => EntryOutput::Submit(date),
                Err(e) => {
                    self.error = Some(e.to_string());
                    EntryOutput::Rejected(e)
                }
            },
            _ => EntryOutput::Invalid,
        }
    }

    /// Show `message` under the entry, as when a valid date cannot be
    /// picked
    pub(crate) fn reject(&mut self, message: String) {
        self.error = Some(message);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EntryInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum EntryOutput {
    Ok,
    Invalid,
    Submit(Date),
    Rejected(DateTextError),
}
