//! Month and weekday names.
//!
//! Name tables are plain data supplied by the host; nothing here loads or
//! waits for locale data.  Hosts whose locale is not (yet) available use
//! [`LocaleNames::default`], the `en-US` table.
use crate::calendar::{weekday_order, WeekdayExt, DAYS_IN_WEEK};
use time::{Month, Weekday};

const MONTHS_IN_YEAR: usize = 12;

/// How much of a weekday's name to show
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekdayStyle {
    Long,
    #[default]
    Short,
    Narrow,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LocaleNames<'a> {
    pub code: &'a str,
    pub months: [&'a str; MONTHS_IN_YEAR],
    pub months_short: [&'a str; MONTHS_IN_YEAR],
    /// Weekday names starting with Sunday
    pub weekdays: [&'a str; DAYS_IN_WEEK],
    pub weekdays_short: [&'a str; DAYS_IN_WEEK],
    pub weekdays_narrow: [&'a str; DAYS_IN_WEEK],
    /// The day weeks conventionally start on in this locale
    pub first_weekday: Weekday,
}

impl<'a> LocaleNames<'a> {
    pub fn month_name(&self, month: Month) -> &'a str {
        self.months[month_index(month)]
    }

    pub fn month_name_short(&self, month: Month) -> &'a str {
        self.months_short[month_index(month)]
    }

    pub fn weekday_name(&self, weekday: Weekday, style: WeekdayStyle) -> &'a str {
        let names = match style {
            WeekdayStyle::Long => &self.weekdays,
            WeekdayStyle::Short => &self.weekdays_short,
            WeekdayStyle::Narrow => &self.weekdays_narrow,
        };
        names[weekday.index0()]
    }

    /// Weekday names in column order for grids whose rows start on `first`
    pub fn weekday_header(&self, first: Weekday, style: WeekdayStyle) -> [&'a str; DAYS_IN_WEEK] {
        weekday_order(first).map(|wd| self.weekday_name(wd, style))
    }

    /// Look up a month by its full or abbreviated name
    pub fn month_from_name(&self, name: &str) -> Option<Month> {
        let i = self
            .months
            .iter()
            .position(|&m| m == name)
            .or_else(|| self.months_short.iter().position(|&m| m == name))?;
        u8::try_from(i + 1).ok().and_then(|m| Month::try_from(m).ok())
    }
}

impl Default for LocaleNames<'_> {
    fn default() -> Self {
        EN_US
    }
}

fn month_index(month: Month) -> usize {
    usize::from(u8::from(month)) - 1
}

pub const EN_US: LocaleNames<'static> = LocaleNames {
    code: "en-US",
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    weekdays_short: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
    weekdays_narrow: ["S", "M", "T", "W", "T", "F", "S"],
    first_weekday: Weekday::Sunday,
};

pub const EN_GB: LocaleNames<'static> = LocaleNames {
    code: "en-GB",
    first_weekday: Weekday::Monday,
    ..EN_US
};

pub const DE_DE: LocaleNames<'static> = LocaleNames {
    code: "de-DE",
    months: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    weekdays: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    weekdays_short: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    weekdays_narrow: ["S", "M", "D", "M", "D", "F", "S"],
    first_weekday: Weekday::Monday,
};

pub const FR_FR: LocaleNames<'static> = LocaleNames {
    code: "fr-FR",
    months: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    weekdays: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekdays_short: ["di", "lu", "ma", "me", "je", "ve", "sa"],
    weekdays_narrow: ["D", "L", "M", "M", "J", "V", "S"],
    first_weekday: Weekday::Monday,
};

pub const MR_IN: LocaleNames<'static> = LocaleNames {
    code: "mr-IN",
    months: [
        "जानेवारी",
        "फेब्रुवारी",
        "मार्च",
        "एप्रिल",
        "मे",
        "जून",
        "जुलै",
        "ऑगस्ट",
        "सप्टेंबर",
        "ऑक्टोबर",
        "नोव्हेंबर",
        "डिसेंबर",
    ],
    months_short: [
        "जाने", "फेब्रु", "मार्च", "एप्रि", "मे", "जून", "जुलै", "ऑग", "सप्टें", "ऑक्टो", "नोव्हें",
        "डिसें",
    ],
    weekdays: [
        "रविवार",
        "सोमवार",
        "मंगळवार",
        "बुधवार",
        "गुरूवार",
        "शुक्रवार",
        "शनिवार",
    ],
    weekdays_short: ["रवि", "सोम", "मंगळ", "बुध", "गुरू", "शुक्र", "शनि"],
    weekdays_narrow: ["र", "सो", "मं", "बु", "गु", "शु", "श"],
    first_weekday: Weekday::Sunday,
};

static BUILTIN: &[LocaleNames<'static>] = &[EN_US, EN_GB, DE_DE, FR_FR, MR_IN];

/// Find a built-in name table by its locale code (e.g., `"de-DE"`).
/// Matching ignores ASCII case and accepts `_` in place of `-`.
pub fn lookup(code: &str) -> Option<&'static LocaleNames<'static>> {
    let code = code.replace('_', "-");
    BUILTIN.iter().find(|l| l.code.eq_ignore_ascii_case(&code))
}

/// Like [`lookup`], but falls back to `en-US` for unknown codes
pub fn lookup_or_default(code: &str) -> &'static LocaleNames<'static> {
    lookup(code).unwrap_or(&BUILTIN[0])
}

/// Codes of all built-in tables
pub fn builtin_codes() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|l| l.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_header_from_sunday() {
        assert_eq!(
            EN_US.weekday_header(Weekday::Sunday, WeekdayStyle::Short),
            ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        );
    }

    #[test]
    fn test_weekday_header_from_monday() {
        assert_eq!(
            DE_DE.weekday_header(Weekday::Monday, WeekdayStyle::Short),
            ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"]
        );
        assert_eq!(
            EN_US.weekday_header(Weekday::Monday, WeekdayStyle::Narrow),
            ["M", "T", "W", "T", "F", "S", "S"]
        );
    }

    #[test]
    fn test_month_names() {
        assert_eq!(EN_US.month_name(Month::September), "September");
        assert_eq!(FR_FR.month_name_short(Month::February), "févr.");
        assert_eq!(MR_IN.month_name(Month::January), "जानेवारी");
        assert_eq!(MR_IN.weekday_name(Weekday::Thursday, WeekdayStyle::Long), "गुरूवार");
    }

    #[test]
    fn test_month_from_name() {
        assert_eq!(EN_US.month_from_name("March"), Some(Month::March));
        assert_eq!(DE_DE.month_from_name("Dez"), Some(Month::December));
        assert_eq!(EN_US.month_from_name("Marchember"), None);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("de-DE").map(|l| l.code), Some("de-DE"));
        assert_eq!(lookup("en_gb").map(|l| l.first_weekday), Some(Weekday::Monday));
        assert_eq!(lookup("xx-XX"), None);
        assert_eq!(lookup_or_default("xx-XX").code, "en-US");
        assert_eq!(builtin_codes().count(), 5);
    }

    #[test]
    fn test_host_supplied_table() {
        let months = [
            "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
        ]
        .map(String::from);
        let months = std::array::from_fn(|i| months[i].as_str());
        let names = LocaleNames {
            code: "x-roman",
            months,
            months_short: months,
            ..LocaleNames::default()
        };
        assert_eq!(names.month_name(Month::April), "IV");
        assert_eq!(names.weekday_name(Weekday::Friday, WeekdayStyle::Short), "Fr");
    }
}
