//! Typed date entry: formats, masking, and validation.
//!
//! Parsing never yields a partially valid date.  Text either names a real
//! calendar day within the configured years or is rejected with a
//! [`DateTextError`] describing what is wrong with it.
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    Year,
    Month,
    Day,
}

impl Field {
    /// Number of digits the field takes when fully written out
    pub fn width(&self) -> usize {
        match self {
            Field::Year => 4,
            Field::Month | Field::Day => 2,
        }
    }

    /// Letter used for the field in placeholders
    pub fn placeholder(&self) -> char {
        match self {
            Field::Year => 'Y',
            Field::Month => 'M',
            Field::Day => 'D',
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

impl FieldOrder {
    pub fn fields(&self) -> [Field; 3] {
        match self {
            FieldOrder::MonthDayYear => [Field::Month, Field::Day, Field::Year],
            FieldOrder::DayMonthYear => [Field::Day, Field::Month, Field::Year],
            FieldOrder::YearMonthDay => [Field::Year, Field::Month, Field::Day],
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Separator {
    Slash,
    Dash,
    Dot,
    Space,
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Dash => '-',
            Separator::Dot => '.',
            Separator::Space => ' ',
        }
    }

    fn from_char(ch: char) -> Option<Separator> {
        match ch {
            '/' => Some(Separator::Slash),
            '-' => Some(Separator::Dash),
            '.' => Some(Separator::Dot),
            ' ' => Some(Separator::Space),
            _ => None,
        }
    }
}

/// The layout of a typed date: which field comes where and what separates
/// them
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateFormat {
    pub order: FieldOrder,
    pub separator: Separator,
}

impl DateFormat {
    /// `MM/DD/YYYY`
    pub const US: DateFormat = DateFormat {
        order: FieldOrder::MonthDayYear,
        separator: Separator::Slash,
    };

    /// `YYYY-MM-DD`
    pub const ISO: DateFormat = DateFormat {
        order: FieldOrder::YearMonthDay,
        separator: Separator::Dash,
    };

    pub fn fields(&self) -> [Field; 3] {
        self.order.fields()
    }

    /// Text to show in an empty input, e.g. `"MM/DD/YYYY"`
    pub fn placeholder(&self) -> String {
        let sep = self.separator.as_char().to_string();
        self.fields()
            .map(|f| f.placeholder().to_string().repeat(f.width()))
            .join(sep.as_str())
    }

    pub fn format(&self, date: Date) -> String {
        let sep = self.separator.as_char();
        let year = date.year();
        let month = u8::from(date.month());
        let day = date.day();
        match self.order {
            FieldOrder::MonthDayYear => format!("{month:02}{sep}{day:02}{sep}{year:04}"),
            FieldOrder::DayMonthYear => format!("{day:02}{sep}{month:02}{sep}{year:04}"),
            FieldOrder::YearMonthDay => format!("{year:04}{sep}{month:02}{sep}{day:02}"),
        }
    }

    /// Mask raw input for this format; see [`mask`]
    pub fn mask(&self, text: &str) -> String {
        mask(text, self.separator)
    }
}

impl Default for DateFormat {
    fn default() -> DateFormat {
        DateFormat::US
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.placeholder())
    }
}

impl FromStr for DateFormat {
    type Err = ParseFormatError;

    /// Parse a pattern such as `MM/DD/YYYY`, `d.m.yyyy`, or `YYYY-MM-DD`
    fn from_str(s: &str) -> Result<DateFormat, ParseFormatError> {
        let err = || ParseFormatError(s.to_owned());
        let mut separator = None;
        let mut letters = Vec::with_capacity(3);
        let mut prev_was_letter = false;
        for ch in s.trim().chars() {
            let ch = ch.to_ascii_uppercase();
            if matches!(ch, 'Y' | 'M' | 'D') {
                if !prev_was_letter {
                    letters.push(ch);
                } else if letters.last() != Some(&ch) {
                    return Err(err());
                }
                prev_was_letter = true;
            } else {
                let sep = Separator::from_char(ch).ok_or_else(err)?;
                if !prev_was_letter || separator.is_some_and(|s| s != sep) {
                    return Err(err());
                }
                separator = Some(sep);
                prev_was_letter = false;
            }
        }
        if !prev_was_letter {
            return Err(err());
        }
        let order = match letters.as_slice() {
            ['M', 'D', 'Y'] => FieldOrder::MonthDayYear,
            ['D', 'M', 'Y'] => FieldOrder::DayMonthYear,
            ['Y', 'M', 'D'] => FieldOrder::YearMonthDay,
            _ => return Err(err()),
        };
        Ok(DateFormat {
            order,
            separator: separator.ok_or_else(err)?,
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid date pattern {0:?}; expected something like \"MM/DD/YYYY\" or \"YYYY-MM-DD\"")]
pub struct ParseFormatError(String);

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DateTextError {
    #[error("invalid date format")]
    Malformed,
    #[error("month {0} is not between 1 and 12")]
    MonthOutOfRange(u32),
    #[error("day {day} is not between 1 and {max}")]
    DayOutOfRange { day: u32, max: u8 },
    #[error("year {year} is not between {min} and {max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

/// Replace every non-digit in `text` with `separator`, then collapse runs of
/// separators into one
pub fn mask(text: &str, separator: Separator) -> String {
    let sep = separator.as_char();
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if !out.ends_with(sep) {
            out.push(sep);
        }
    }
    out
}

/// Parses typed dates in one [`DateFormat`], restricted to a range of years
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateParser {
    format: DateFormat,
    years: RangeInclusive<i32>,
}

impl DateParser {
    pub const DEFAULT_YEARS: RangeInclusive<i32> = 1..=9999;

    pub fn new(format: DateFormat) -> DateParser {
        DateParser {
            format,
            years: DateParser::DEFAULT_YEARS,
        }
    }

    pub fn years(mut self, years: RangeInclusive<i32>) -> DateParser {
        self.years = years;
        self
    }

    pub fn format(&self) -> DateFormat {
        self.format
    }

    pub fn parse(&self, text: &str) -> Result<Date, DateTextError> {
        let mut parts = text.trim().split(self.format.separator.as_char());
        let (Some(a), Some(b), Some(c), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateTextError::Malformed);
        };
        let (y, m, d) = match self.format.order {
            FieldOrder::MonthDayYear => (c, a, b),
            FieldOrder::DayMonthYear => (c, b, a),
            FieldOrder::YearMonthDay => (a, b, c),
        };
        let year = digits(y)?;
        let month = digits(m)?;
        let day = digits(d)?;
        let year = i32::try_from(year).map_err(|_| DateTextError::Malformed)?;
        self.build(year, month, day)
    }

    fn build(&self, year: i32, month: u32, day: u32) -> Result<Date, DateTextError> {
        let year_err = || DateTextError::YearOutOfRange {
            year,
            min: *self.years.start(),
            max: *self.years.end(),
        };
        if !self.years.contains(&year) {
            return Err(year_err());
        }
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(DateTextError::MonthOutOfRange(month))?;
        let day_err = || DateTextError::DayOutOfRange {
            day,
            max: month.length(year),
        };
        let d = u8::try_from(day).map_err(|_| day_err())?;
        Date::from_calendar_date(year, month, d).map_err(|e| match e.name() {
            "day" => day_err(),
            _ => year_err(),
        })
    }
}

impl Default for DateParser {
    fn default() -> DateParser {
        DateParser::new(DateFormat::default())
    }
}

/// Formats tried in turn by [`parse_flexible`]
pub const FLEXIBLE_FORMATS: [DateFormat; 11] = {
    use FieldOrder::*;
    use Separator::*;
    [
        DateFormat { order: MonthDayYear, separator: Slash },
        DateFormat { order: MonthDayYear, separator: Dash },
        DateFormat { order: MonthDayYear, separator: Dot },
        DateFormat { order: DayMonthYear, separator: Space },
        DateFormat { order: DayMonthYear, separator: Slash },
        DateFormat { order: DayMonthYear, separator: Dash },
        DateFormat { order: DayMonthYear, separator: Dot },
        DateFormat { order: YearMonthDay, separator: Space },
        DateFormat { order: YearMonthDay, separator: Slash },
        DateFormat { order: YearMonthDay, separator: Dash },
        DateFormat { order: YearMonthDay, separator: Dot },
    ]
};

/// Parse a date written in any of the [`FLEXIBLE_FORMATS`], trying each in
/// order and returning the first valid date.
///
/// If no format accepts the text, the most specific error encountered is
/// returned.
pub fn parse_flexible(text: &str) -> Result<Date, DateTextError> {
    let mut error = DateTextError::Malformed;
    for format in FLEXIBLE_FORMATS {
        match DateParser::new(format).parse(text) {
            Ok(date) => return Ok(date),
            Err(DateTextError::Malformed) => (),
            Err(e) => {
                if error == DateTextError::Malformed {
                    error = e;
                }
            }
        }
    }
    Err(error)
}

/// Validate a year-less `MM-DD` date (with any [`Separator`]).  February 29
/// is accepted.
pub fn parse_month_day(text: &str, separator: Separator) -> Result<(Month, u8), DateTextError> {
    // Any leap year will do
    const LEAP_YEAR: i32 = 2000;
    let masked = mask(text, separator);
    let mut parts = masked
        .split(separator.as_char())
        .filter(|s| !s.is_empty());
    let (Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DateTextError::Malformed);
    };
    let date = DateParser::new(DateFormat::ISO).build(LEAP_YEAR, digits(m)?, digits(d)?)?;
    Ok((date.month(), date.day()))
}

/// Clamp `day` to the days of `month`, as when the month of a partially
/// entered date changes under an already chosen day
pub fn clamp_day(year: i32, month: Month, day: u8) -> u8 {
    day.clamp(1, month.length(year))
}

fn digits(s: &str) -> Result<u32, DateTextError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateTextError::Malformed);
    }
    s.parse::<u32>().map_err(|_| DateTextError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_format_patterns() {
        assert_eq!("MM/DD/YYYY".parse::<DateFormat>(), Ok(DateFormat::US));
        assert_eq!("yyyy-mm-dd".parse::<DateFormat>(), Ok(DateFormat::ISO));
        assert_eq!(
            "d.M.yyyy".parse::<DateFormat>(),
            Ok(DateFormat {
                order: FieldOrder::DayMonthYear,
                separator: Separator::Dot
            })
        );
        assert!("MM/DD-YYYY".parse::<DateFormat>().is_err());
        assert!("MM/DD".parse::<DateFormat>().is_err());
        assert!("MM/MM/YYYY".parse::<DateFormat>().is_err());
        assert!("MMDD/YYYY".parse::<DateFormat>().is_err());
        assert!("MM/DD/YYYY/".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(DateFormat::US.placeholder(), "MM/DD/YYYY");
        assert_eq!(DateFormat::ISO.to_string(), "YYYY-MM-DD");
    }

    #[test]
    fn test_format() {
        let d = date!(2024 - 03 - 09);
        assert_eq!(DateFormat::US.format(d), "03/09/2024");
        assert_eq!(DateFormat::ISO.format(d), "2024-03-09");
        let dmy = "DD.MM.YYYY".parse::<DateFormat>().unwrap();
        assert_eq!(dmy.format(d), "09.03.2024");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("03/09/2024", Separator::Slash), "03/09/2024");
        assert_eq!(mask("03-09--2024", Separator::Slash), "03/09/2024");
        assert_eq!(mask("03 .x 09 2024", Separator::Dash), "03-09-2024");
        assert_eq!(mask("", Separator::Dash), "");
    }

    #[test]
    fn test_parse_valid() {
        let parser = DateParser::new(DateFormat::US);
        assert_eq!(parser.parse("03/09/2024"), Ok(date!(2024 - 03 - 09)));
        assert_eq!(parser.parse("3/9/2024"), Ok(date!(2024 - 03 - 09)));
        assert_eq!(parser.parse(" 02/29/2024 "), Ok(date!(2024 - 02 - 29)));
    }

    #[test]
    fn test_parse_out_of_range() {
        let parser = DateParser::new(DateFormat::US);
        assert_eq!(
            parser.parse("13/01/2024"),
            Err(DateTextError::MonthOutOfRange(13))
        );
        assert_eq!(
            parser.parse("00/01/2024"),
            Err(DateTextError::MonthOutOfRange(0))
        );
        assert_eq!(
            parser.parse("02/29/2023"),
            Err(DateTextError::DayOutOfRange { day: 29, max: 28 })
        );
        assert_eq!(
            parser.parse("04/31/2024"),
            Err(DateTextError::DayOutOfRange { day: 31, max: 30 })
        );
        assert_eq!(
            parser.parse("04/00/2024"),
            Err(DateTextError::DayOutOfRange { day: 0, max: 30 })
        );
    }

    #[test]
    fn test_parse_malformed() {
        let parser = DateParser::new(DateFormat::US);
        assert_eq!(parser.parse("03-09-2024"), Err(DateTextError::Malformed));
        assert_eq!(parser.parse("03/09"), Err(DateTextError::Malformed));
        assert_eq!(parser.parse("03/09/2024/1"), Err(DateTextError::Malformed));
        assert_eq!(parser.parse("03//2024"), Err(DateTextError::Malformed));
        assert_eq!(parser.parse("O3/09/2024"), Err(DateTextError::Malformed));
        assert_eq!(parser.parse("+3/09/2024"), Err(DateTextError::Malformed));
        assert_eq!(parser.parse(""), Err(DateTextError::Malformed));
    }

    #[test]
    fn test_parse_year_bounds() {
        let parser = DateParser::new(DateFormat::ISO).years(1900..=2100);
        assert_eq!(parser.parse("2100-12-31"), Ok(date!(2100 - 12 - 31)));
        assert_eq!(
            parser.parse("1899-12-31"),
            Err(DateTextError::YearOutOfRange {
                year: 1899,
                min: 1900,
                max: 2100
            })
        );
    }

    #[test]
    fn test_parse_flexible() {
        assert_eq!(parse_flexible("3/4/2024"), Ok(date!(2024 - 03 - 04)));
        // Not a valid M/D/Y date, so D/M/Y is tried next
        assert_eq!(parse_flexible("25/12/2024"), Ok(date!(2024 - 12 - 25)));
        assert_eq!(parse_flexible("25 12 2024"), Ok(date!(2024 - 12 - 25)));
        assert_eq!(parse_flexible("2024.12.25"), Ok(date!(2024 - 12 - 25)));
        assert_eq!(parse_flexible("2024-02-29"), Ok(date!(2024 - 02 - 29)));
        assert_eq!(parse_flexible("yesterday"), Err(DateTextError::Malformed));
        assert_eq!(
            parse_flexible("31/31/2024"),
            Err(DateTextError::MonthOutOfRange(31))
        );
    }

    #[test]
    fn test_parse_month_day() {
        assert_eq!(
            parse_month_day("02-29", Separator::Dash),
            Ok((Month::February, 29))
        );
        assert_eq!(
            parse_month_day("12/25", Separator::Dash),
            Ok((Month::December, 25))
        );
        assert_eq!(
            parse_month_day("02-30", Separator::Dash),
            Err(DateTextError::DayOutOfRange { day: 30, max: 29 })
        );
        assert_eq!(
            parse_month_day("13-01", Separator::Dash),
            Err(DateTextError::MonthOutOfRange(13))
        );
        assert_eq!(
            parse_month_day("2024-02-03", Separator::Dash),
            Err(DateTextError::Malformed)
        );
    }

    #[test]
    fn test_clamp_day() {
        assert_eq!(clamp_day(2024, Month::February, 31), 29);
        assert_eq!(clamp_day(2023, Month::February, 30), 28);
        assert_eq!(clamp_day(2024, Month::April, 31), 30);
        assert_eq!(clamp_day(2024, Month::May, 31), 31);
        assert_eq!(clamp_day(2024, Month::May, 0), 1);
    }
}
