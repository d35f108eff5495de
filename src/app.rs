use crate::entry::{Entry, EntryInput, EntryOutput, EntryState};
use crate::help::Help;
use crate::theme::Theme;
use crate::widget::{Calendar, CALENDAR_HEIGHT};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use datepick::calendar::VisibleMonth;
use datepick::input::{clamp_day, DateFormat, DateParser};
use datepick::locale::LocaleNames;
use datepick::selection::RangeSelection;
use datepick::{DateFilter, DatePicker, GridCell, Selection, SelectionValue};
use ratatui::{
    buffer::Buffer,
    layout::{Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};
use time::{Date, Duration};
use tracing::{debug, info};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<F> {
    picker: DatePicker<F>,
    /// The highlighted day; always a regular day of a shown month
    cursor: Date,
    locale: LocaleNames<'static>,
    parser: DateParser,
    theme: Theme,
    state: AppState,
}

impl<F: DateFilter> App<F> {
    pub(crate) fn new(
        picker: DatePicker<F>,
        locale: LocaleNames<'static>,
        parser: DateParser,
    ) -> App<F> {
        let cursor = [picker.selection().earliest(), Some(picker.today())]
            .into_iter()
            .flatten()
            .find(|&d| picker.is_shown(d))
            .unwrap_or_else(|| picker.visible_month().first_day());
        App {
            picker,
            cursor,
            locale,
            parser,
            theme: Theme::default(),
            state: AppState::Calendar,
        }
    }

    /// Run until the user confirms or cancels.  Returns the confirmed
    /// selection, or `None` on cancellation.
    pub(crate) fn run(
        mut self,
        terminal: &mut DefaultTerminal,
    ) -> io::Result<Option<SelectionValue>> {
        while !self.done() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.outcome())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Cancelled;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Char('p') | KeyCode::PageUp => self.change_month(false),
                KeyCode::Char('n') | KeyCode::PageDown => self.change_month(true),
                KeyCode::Char('t') | KeyCode::Home => {
                    self.jump_to_today();
                    true
                }
                KeyCode::Char(' ') => self.select_cursor(),
                KeyCode::Char('c') => {
                    let value = self.picker.clear();
                    info!(?value, "selection cleared");
                    true
                }
                KeyCode::Char('i') => {
                    self.state = AppState::Entering(EntryState::new(self.parser.clone()));
                    true
                }
                KeyCode::Enter => self.confirm(),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Cancelled;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Entering(state) => {
                if key == KeyCode::Esc {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => match c.to_digit(10).map(u8::try_from) {
                            Some(Ok(d)) => state.handle_input(EntryInput::Digit(d)),
                            _ => EntryOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(EntryInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(EntryInput::Enter),
                        _ => EntryOutput::Invalid,
                    };
                    match output {
                        EntryOutput::Ok => true,
                        EntryOutput::Invalid => false,
                        EntryOutput::Rejected(e) => {
                            debug!("rejected typed date: {e}");
                            false
                        }
                        EntryOutput::Submit(date) => self.submit(date),
                    }
                }
            }
            AppState::Confirmed | AppState::Cancelled => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn done(&self) -> bool {
        matches!(self.state, AppState::Confirmed | AppState::Cancelled)
    }

    fn outcome(&self) -> Option<SelectionValue> {
        (self.state == AppState::Confirmed).then(|| self.picker.selection().value())
    }

    fn move_cursor(&mut self, days: i64) -> bool {
        let Some(date) = self.cursor.checked_add(Duration::days(days)) else {
            return false;
        };
        let shown = if date < self.picker.visible_month().first_day() {
            self.picker.previous_month()
        } else if !self.picker.is_shown(date) {
            self.picker.next_month()
        } else {
            Ok(())
        };
        if shown.is_err() {
            return false;
        }
        self.cursor = date;
        true
    }

    fn change_month(&mut self, forwards: bool) -> bool {
        let Some(cursor) = same_day_in_adjacent_month(self.cursor, forwards) else {
            return false;
        };
        let shown = if forwards {
            self.picker.next_month()
        } else {
            self.picker.previous_month()
        };
        if shown.is_err() {
            return false;
        }
        self.cursor = cursor;
        true
    }

    fn jump_to_today(&mut self) {
        self.picker.jump_to_today();
        let today = self.picker.today();
        if self.picker.is_shown(today) {
            self.cursor = today;
        }
    }

    /// The cursor's cell in the grid of its month
    fn cursor_cell(&self) -> Option<GridCell> {
        self.picker
            .grids()
            .ok()?
            .iter()
            .filter_map(|grid| grid.get(self.cursor))
            .find(|cell| !cell.is_overflow)
    }

    fn select_cursor(&mut self) -> bool {
        let Some(cell) = self.cursor_cell() else {
            return false;
        };
        if !self.picker.day_state(cell).is_selectable() {
            return false;
        }
        if let Some(value) = self.picker.click(cell) {
            info!(?value, "selection changed");
        }
        true
    }

    fn submit(&mut self, date: Date) -> bool {
        let problem = if self.picker.is_disabled(date) {
            Some("cannot be selected")
        } else if self.picker.jump_to(date).is_err() {
            Some("cannot be shown")
        } else {
            None
        };
        if let Some(problem) = problem {
            let message = format!("{} {problem}", self.parser.format().format(date));
            if let AppState::Entering(state) = &mut self.state {
                state.reject(message);
            }
            return false;
        }
        self.cursor = date;
        if let Some(value) = self.picker.select(date) {
            info!(?value, "selection changed");
        }
        self.state = AppState::Calendar;
        true
    }

    fn confirm(&mut self) -> bool {
        if matches!(
            self.picker.selection(),
            Selection::Range(RangeSelection::Pending(_))
        ) {
            return false;
        }
        self.state = AppState::Confirmed;
        true
    }

    fn status(&self) -> String {
        let format = self.parser.format();
        match self.picker.selection() {
            Selection::Range(RangeSelection::Pending(start)) => {
                format!("{} - ?", format.format(*start))
            }
            sel if sel.is_empty() => String::from("No date selected"),
            sel => describe(&sel.value(), format),
        }
    }
}

impl<F: DateFilter> Widget for &mut App<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.base);
        let [calendar_area, _, status_area] =
            Layout::vertical([CALENDAR_HEIGHT, 1, 1]).areas(area);
        Calendar {
            picker: &self.picker,
            locale: &self.locale,
            theme: &self.theme,
            cursor: self.cursor,
        }
        .render(calendar_area, buf);
        Line::styled(self.status(), self.theme.base)
            .centered()
            .render(status_area, buf);
        if self.state == AppState::Helping {
            Help {
                style: self.theme.base,
                mode: self.picker.mode(),
            }
            .render(area, buf);
        } else if let AppState::Entering(ref mut state) = self.state {
            Entry {
                error_style: self.theme.error,
            }
            .render(area, buf, state);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Entering(EntryState),
    Confirmed,
    Cancelled,
}

/// Render a selection for display: ranges as `start - end`, everything else
/// as a comma-separated list
pub(crate) fn describe(value: &SelectionValue, format: DateFormat) -> String {
    let dates = value
        .dates()
        .iter()
        .map(|&d| format.format(d))
        .collect::<Vec<_>>();
    match value {
        SelectionValue::Range(_) => dates.join(" - "),
        _ => dates.join(", "),
    }
}

fn same_day_in_adjacent_month(date: Date, forwards: bool) -> Option<Date> {
    let month = VisibleMonth::containing(date).ok()?;
    let month = if forwards {
        month.next()
    } else {
        month.previous()
    }
    .ok()?;
    let day = clamp_day(month.year(), month.month(), date.day());
    Date::from_calendar_date(month.year(), month.month(), day).ok()
}
