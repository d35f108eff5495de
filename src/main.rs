mod app;
mod entry;
mod help;
mod theme;
mod widget;
use crate::app::{describe, App};
use anyhow::Context;
use datepick::bounds::{ExcludedDates, Weekends};
use datepick::calendar::{first_weekday_from_index, month_count};
use datepick::input::{DateFormat, DateParser};
use datepick::locale::{builtin_codes, lookup, LocaleNames};
use datepick::selection::RangeNotify;
use datepick::{DateBounds, DateFilter, DatePicker, Mode, Selection};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::error::Error;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type BoxedError = Box<dyn Error + Send + Sync>;

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    dates: Vec<Date>,
    mode: Mode,
    first_weekday: Option<Weekday>,
    months: NonZeroUsize,
    min: Option<Date>,
    max: Option<Date>,
    exclusions: Exclusions,
    locale: String,
    format: DateFormat,
    notify: RangeNotify,
    log_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            dates: Vec::new(),
            mode: Mode::default(),
            first_weekday: None,
            months: NonZeroUsize::MIN,
            min: None,
            max: None,
            exclusions: Exclusions::default(),
            locale: String::from("en-US"),
            format: DateFormat::default(),
            notify: RangeNotify::default(),
            log_file: None,
        }
    }
}

/// Dates ruled out on the command line
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Exclusions {
    dates: ExcludedDates,
    weekends: bool,
}

impl DateFilter for Exclusions {
    fn is_excluded(&self, date: Date) -> bool {
        self.dates.is_excluded(date) || (self.weekends && Weekends.is_excluded(date))
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("mode") => opts.mode = parser.value()?.parse()?,
                Arg::Short('w') | Arg::Long("first-weekday") => {
                    opts.first_weekday = Some(parser.value()?.parse_with(parse_weekday)?);
                }
                Arg::Short('n') | Arg::Long("months") => {
                    opts.months = parser.value()?.parse_with(parse_months)?;
                }
                Arg::Long("min") => opts.min = Some(parser.value()?.parse_with(parse_ymd)?),
                Arg::Long("max") => opts.max = Some(parser.value()?.parse_with(parse_ymd)?),
                Arg::Short('x') | Arg::Long("exclude") => {
                    opts.exclusions
                        .dates
                        .insert(parser.value()?.parse_with(parse_ymd)?);
                }
                Arg::Long("no-weekends") => opts.exclusions.weekends = true,
                Arg::Short('l') | Arg::Long("locale") => opts.locale = parser.value()?.string()?,
                Arg::Short('f') | Arg::Long("format") => opts.format = parser.value()?.parse()?,
                Arg::Long("notify") => opts.notify = parser.value()?.parse()?,
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Value(value) => opts.dates.push(value.parse_with(parse_ymd)?),
                _ => return Err(arg.unexpected()),
            }
        }
        let limit = match opts.mode {
            Mode::Single => Some(1),
            Mode::Range => Some(2),
            Mode::Multiple => None,
        };
        if let Some(limit) = limit.filter(|&n| opts.dates.len() > n) {
            return Err(lexopt::Error::Custom(
                format!(
                    "{} mode takes at most {limit} initial date(s), got {}",
                    opts.mode,
                    opts.dates.len()
                )
                .into(),
            ));
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let format = opts.format;
                let app = opts.into_app(today)?;
                let value = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal).context("error running date picker")
                })?;
                match value {
                    Some(value) => {
                        info!(?value, "selection confirmed");
                        println!("{}", describe(&value, format));
                    }
                    None => info!("selection cancelled"),
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [<options>] [YYYY-MM-DD ...]");
                println!();
                println!("Pick a date, a range of dates, or several dates from a terminal calendar");
                println!("and print the selection.  Dates given as arguments are preselected.");
                println!();
                println!("Options:");
                println!("  -m, --mode <single|range|multiple>");
                println!("                    Selection mode [default: single]");
                println!("  -w, --first-weekday <0-6>");
                println!("                    Day weeks start on, with 0 = Sunday [default: from");
                println!("                    the locale]");
                println!("  -n, --months <N>  Number of months shown side by side [default: 1]");
                println!("      --min <YYYY-MM-DD>");
                println!("                    Earliest selectable date");
                println!("      --max <YYYY-MM-DD>");
                println!("                    Latest selectable date");
                println!("  -x, --exclude <YYYY-MM-DD>");
                println!("                    Make a date unselectable; may be given repeatedly");
                println!("      --no-weekends Make Saturdays and Sundays unselectable");
                println!("  -l, --locale <CODE>");
                println!(
                    "                    Month and weekday names to use ({}) [default: en-US]",
                    builtin_codes().collect::<Vec<_>>().join(", ")
                );
                println!("  -f, --format <PATTERN>");
                println!("                    How dates are typed and printed [default: MM/DD/YYYY]");
                println!("      --notify <complete|every>");
                println!("                    When a range reports changes [default: complete]");
                println!("      --log-file <PATH>");
                println!("                    Write logs to the given file");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Options {
    fn into_app(self, today: Date) -> anyhow::Result<App<Exclusions>> {
        let locale = match lookup(&self.locale) {
            Some(locale) => *locale,
            None => {
                warn!(code = %self.locale, "unknown locale; using en-US names");
                LocaleNames::default()
            }
        };
        let mut bounds = DateBounds::new().filter(self.exclusions);
        bounds.set_min(self.min);
        bounds.set_max(self.max);
        let picker = DatePicker::new(today, self.mode)
            .context("today's date is out of range")?
            .value(Selection::from_dates(self.mode, self.dates))
            .first_weekday(self.first_weekday.unwrap_or(locale.first_weekday))
            .months(self.months)
            .notify(self.notify)
            .bounds(bounds);
        info!(
            mode = %picker.mode(),
            month = %picker.visible_month(),
            locale = locale.code,
            "starting date picker"
        );
        Ok(App::new(picker, locale, DateParser::new(self.format)))
    }
}

fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

fn parse_weekday(s: &str) -> Result<Weekday, BoxedError> {
    Ok(first_weekday_from_index(s.parse::<u8>()?)?)
}

fn parse_months(s: &str) -> Result<NonZeroUsize, BoxedError> {
    Ok(month_count(s.parse::<usize>()?)?)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
    use std::ffi::OsString;
    use time::macros::date;

    fn parse_args(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Run(Options::default()));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(&["--mode", "range", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse_args(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_all_options() {
        let cmd = parse_args(&[
            "--mode=range",
            "--first-weekday",
            "1",
            "-n",
            "2",
            "--min",
            "2024-01-01",
            "--max",
            "2024-12-31",
            "-x",
            "2024-03-15",
            "--exclude",
            "2024-03-18",
            "--no-weekends",
            "--locale",
            "de-DE",
            "--format",
            "DD.MM.YYYY",
            "--notify",
            "every",
            "--log-file",
            "picker.log",
            "2024-03-10",
            "2024-03-05",
        ])
        .unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected Command::Run, got {cmd:?}");
        };
        assert_eq!(opts.mode, Mode::Range);
        assert_eq!(opts.first_weekday, Some(Weekday::Monday));
        assert_eq!(opts.months.get(), 2);
        assert_eq!(opts.min, Some(date!(2024 - 01 - 01)));
        assert_eq!(opts.max, Some(date!(2024 - 12 - 31)));
        assert!(opts.exclusions.weekends);
        assert!(opts.exclusions.is_excluded(date!(2024 - 03 - 15)));
        assert!(opts.exclusions.is_excluded(date!(2024 - 03 - 16)));
        assert!(!opts.exclusions.is_excluded(date!(2024 - 03 - 14)));
        assert_eq!(opts.locale, "de-DE");
        assert_eq!(opts.format, "DD.MM.YYYY".parse::<DateFormat>().unwrap());
        assert_eq!(opts.notify, RangeNotify::OnEveryClick);
        assert_eq!(opts.log_file, Some(PathBuf::from("picker.log")));
        assert_eq!(opts.dates, [date!(2024 - 03 - 10), date!(2024 - 03 - 05)]);
    }

    #[test]
    fn test_bad_values() {
        assert!(parse_args(&["--mode", "several"]).is_err());
        assert!(parse_args(&["--first-weekday", "7"]).is_err());
        assert!(parse_args(&["--months", "0"]).is_err());
        assert!(parse_args(&["2024-02-30"]).is_err());
        assert!(parse_args(&["--notify", "sometimes"]).is_err());
        assert!(parse_args(&["--bogus"]).is_err());
        assert!(parse_args(&["2024/03/01"]).is_err());
    }

    #[test]
    fn test_too_many_dates() {
        assert!(parse_args(&["2024-03-01", "2024-03-02"]).is_err());
        assert!(parse_args(&["2024-03-01", "2024-03-02", "2024-03-03", "-m", "range"]).is_err());
        let cmd = parse_args(&["-m", "range", "2024-03-01", "2024-03-02"]).unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected Command::Run, got {cmd:?}");
        };
        assert_eq!(opts.dates.len(), 2);
        let cmd =
            parse_args(&["-m", "multiple", "2024-03-01", "2024-03-02", "2024-03-03"]).unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected Command::Run, got {cmd:?}");
        };
        assert_eq!(opts.dates.len(), 3);
    }

    #[test]
    fn test_into_app() {
        let opts = Options {
            dates: vec![date!(2024 - 05 - 02)],
            locale: String::from("xx-XX"),
            ..Options::default()
        };
        assert!(opts.into_app(date!(2024 - 03 - 14)).is_ok());
    }

    #[test]
    fn test_into_app_drops_disabled_initial_date() {
        let opts = Options {
            dates: vec![date!(2024 - 03 - 01)],
            min: Some(date!(2024 - 03 - 10)),
            ..Options::default()
        };
        let mut app = opts.into_app(date!(2024 - 03 - 14)).unwrap();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&mut app).render(area, &mut buf);
        let text = buf
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(text.contains("No date selected"));
        assert!(!text.contains("03/01/2024"));
    }
}
