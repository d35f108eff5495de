use datepick::DayState;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const OVERFLOW_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const DISABLED_STYLE: Style = BASE_STYLE
    .fg(Color::DarkGray)
    .add_modifier(Modifier::CROSSED_OUT);

pub(crate) const RANGE_STYLE: Style = BASE_STYLE.bg(Color::Blue);

pub(crate) const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

/// Styles for each part of the calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Theme {
    pub(crate) base: Style,
    pub(crate) title: Style,
    pub(crate) weekday: Style,
    pub(crate) overflow: Style,
    pub(crate) disabled: Style,
    pub(crate) range: Style,
    pub(crate) selected: Style,
    pub(crate) error: Style,
}

impl Theme {
    pub(crate) fn day_style(&self, state: DayState, is_cursor: bool) -> Style {
        let mut style = self.base;
        if state.overflow {
            style = style.patch(self.overflow);
        } else if state.disabled {
            style = style.patch(self.disabled);
        } else if state.selected {
            style = style.patch(self.selected);
        } else if state.in_range {
            style = style.patch(self.range);
        }
        if state.range_start || state.range_end {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if is_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            base: BASE_STYLE,
            title: TITLE_STYLE,
            weekday: WEEKDAY_STYLE,
            overflow: OVERFLOW_STYLE,
            disabled: DISABLED_STYLE,
            range: RANGE_STYLE,
            selected: SELECTED_STYLE,
            error: ERROR_STYLE,
        }
    }
}

pub(crate) mod entry {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
