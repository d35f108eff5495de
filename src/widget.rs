use crate::theme::Theme;
use datepick::calendar::{Grid, WeekdayExt, DAYS_IN_WEEK};
use datepick::locale::{LocaleNames, WeekdayStyle};
use datepick::{DateFilter, DatePicker};
use ratatui::{layout::Flex, prelude::*, widgets::*};
use time::Date;
use tracing::warn;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of a single month's grid
const MONTH_WIDTH: u16 = DAY_WIDTH * 7;

/// Columns between consecutive months
const MONTH_GAP: u16 = 3;

const TITLE_LINE: u16 = 0;
const WEEKDAY_LINE: u16 = 1;
const RULE_LINE: u16 = 2;
const FIRST_WEEK_LINE: u16 = 3;

/// Every grid has six weeks, whether or not the month needs them
const WEEK_LINES: u16 = 6;

/// Number of lines taken up by the calendar
pub(crate) const CALENDAR_HEIGHT: u16 = FIRST_WEEK_LINE + WEEK_LINES;

const ACS_HLINE: char = '─';

/// The shown months of a [`DatePicker`], side by side
#[derive(Debug)]
pub(crate) struct Calendar<'a, F> {
    pub(crate) picker: &'a DatePicker<F>,
    pub(crate) locale: &'a LocaleNames<'a>,
    pub(crate) theme: &'a Theme,
    /// The day the keyboard cursor is on
    pub(crate) cursor: Date,
}

impl<F> Calendar<'_, F> {
    fn total_width(months: usize) -> u16 {
        let months = u16::try_from(months).unwrap_or(u16::MAX);
        months
            .saturating_mul(MONTH_WIDTH + MONTH_GAP)
            .saturating_sub(MONTH_GAP)
    }
}

impl<F: DateFilter> Widget for Calendar<'_, F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grids = match self.picker.grids() {
            Ok(grids) => grids,
            Err(e) => {
                warn!(month = %self.picker.visible_month(), "cannot draw calendar: {e}");
                return;
            }
        };
        let [area] = Layout::horizontal([Self::total_width(grids.len())])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        let last = grids.len().saturating_sub(1);
        for (i, (left, grid)) in std::iter::zip(
            (0u16..).map(|i| i.saturating_mul(MONTH_WIDTH + MONTH_GAP)),
            &grids,
        )
        .enumerate()
        {
            if left >= area.width {
                break;
            }
            canvas.draw_title(left, self.title(grid), self.theme.title);
            if i == 0 {
                canvas.mvprint(TITLE_LINE, left, "<", Some(self.theme.title));
            }
            if i == last {
                let x = left.saturating_add(MONTH_WIDTH - 1);
                canvas.mvprint(TITLE_LINE, x, ">", Some(self.theme.title));
            }
            canvas.draw_weekdays(
                left,
                self.locale
                    .weekday_header(grid.first_weekday(), WeekdayStyle::Short),
                self.theme.weekday,
            );
            canvas.hline(RULE_LINE, left, ACS_HLINE, MONTH_WIDTH);
            self.draw_days(&mut canvas, left, grid);
        }
    }
}

impl<F: DateFilter> Calendar<'_, F> {
    fn title(&self, grid: &Grid) -> String {
        let month = grid.month();
        format!("{} {}", self.locale.month_name(month.month()), month.year())
    }

    fn draw_days(&self, canvas: &mut BufferCanvas<'_>, left: u16, grid: &Grid) {
        for (row, week) in std::iter::zip(0u16.., grid.weeks()) {
            for cell in week {
                let state = self.picker.day_state(*cell);
                let is_cursor = !cell.is_overflow && cell.date == self.cursor;
                let col = cell.date.weekday().column(grid.first_weekday());
                canvas.draw_day(
                    FIRST_WEEK_LINE + row,
                    left,
                    col,
                    show_day(cell.date, state.today),
                    self.theme.day_style(state, is_cursor),
                );
            }
        }
    }
}

fn show_day(date: Date, is_today: bool) -> String {
    if is_today {
        format!("[{:2}]", date.day())
    } else {
        format!(" {:2} ", date.day())
    }
}

/// Pad `s` to `width` columns by display width rather than by character
/// count, so names with combining marks stay centered
fn center(s: &str, width: u16) -> String {
    let pad = usize::from(width).saturating_sub(Line::raw(s).width());
    let before = pad / 2;
    let after = pad - before;
    format!("{:before$}{s}{:after$}", "", "")
}

#[derive(Debug)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, left: u16, title: String, style: Style) {
        let width = u16::try_from(Line::raw(title.as_str()).width()).unwrap_or(u16::MAX);
        let x = left.saturating_add(MONTH_WIDTH.saturating_sub(width) / 2);
        self.mvprint(TITLE_LINE, x, title, Some(style));
    }

    fn draw_weekdays(&mut self, left: u16, names: [&str; DAYS_IN_WEEK], style: Style) {
        for (col, name) in std::iter::zip(0u16.., names) {
            self.mvprint(
                WEEKDAY_LINE,
                left.saturating_add(col * DAY_WIDTH),
                center(name, DAY_WIDTH),
                Some(style),
            );
        }
    }

    fn draw_day(&mut self, y: u16, left: u16, col: usize, s: String, style: Style) {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        let x = left.saturating_add(col.saturating_mul(DAY_WIDTH));
        self.mvprint(y, x, s, Some(style));
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text running past the calendar's area, as
            // long as the Rect given to it lies entirely within the frame
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        assert_eq!(center("Mo", DAY_WIDTH), " Mo ");
        assert_eq!(center("Mer", DAY_WIDTH), "Mer ");
        assert_eq!(center("So", 5), " So  ");
        assert_eq!(center("Sunday", DAY_WIDTH), "Sunday");
    }

    #[test]
    fn test_center_combining_marks() {
        // "e" followed by a combining acute accent takes up one column
        assert_eq!(center("e\u{301}", DAY_WIDTH), " e\u{301}  ");
        assert_eq!(center("ne\u{301}", DAY_WIDTH), " ne\u{301} ");
    }
}
