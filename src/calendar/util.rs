use super::locale::Lang;
use std::fmt;
use thiserror::Error;
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    Date, Month, OffsetDateTime, PrimitiveDateTime, UtcOffset, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// An ISO 8601 date and time without an offset; seconds and fractions of a
/// second may be left off
static LOCAL_DATETIME_FMT: &[FormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

/// As `LOCAL_DATETIME_FMT`, followed by a numeric offset
static OFFSET_DATETIME_FMT: &[FormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]][offset_hour sign:mandatory]:[offset_minute]"
);

/// A date as handed to the helpers in this module: either text to be parsed
/// or an already-structured [`Date`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DateInput<'a> {
    Text(&'a str),
    Date(Date),
}

impl DateInput<'_> {
    fn resolve(self) -> Option<Date> {
        match self {
            DateInput::Text(s) => parse_date(s),
            DateInput::Date(d) => Some(d),
        }
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(s: &'a str) -> DateInput<'a> {
        DateInput::Text(s)
    }
}

impl From<Date> for DateInput<'_> {
    fn from(date: Date) -> Self {
        DateInput::Date(date)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid date; expected YYYY-MM-DD or an RFC 3339 timestamp")]
pub(crate) struct InvalidDateError;

/// Parses a plain `YYYY-MM-DD` date or an ISO 8601 date and time.
///
/// Timestamps with an offset (including `Z`) are converted to UTC before
/// their date is taken.  Timestamps without one are taken at face value.
pub(crate) fn parse_date(s: &str) -> Option<Date> {
    let s = s.trim();
    if let Ok(date) = Date::parse(s, &YMD_FMT) {
        return Some(date);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(s, &OFFSET_DATETIME_FMT))
    {
        return dt
            .checked_to_offset(UtcOffset::UTC)
            .map(OffsetDateTime::date);
    }
    // `Z` is UTC already, so the date can be read off as written
    let local = s.strip_suffix(['Z', 'z']).unwrap_or(s);
    PrimitiveDateTime::parse(local, &LOCAL_DATETIME_FMT)
        .ok()
        .map(PrimitiveDateTime::date)
}

/// Renders `n` with at least two digits
pub(crate) fn pad2(n: u8) -> String {
    format!("{n:02}")
}

/// Formats a date as `YYYY-MM-DD`, the form handed back to the host
pub(crate) fn format_ymd(date: Date) -> String {
    format!(
        "{:04}-{}-{}",
        date.year(),
        pad2(u8::from(date.month())),
        pad2(date.day())
    )
}

/// Formats a date as `DD.MM.YYYY` (German) or `MM/DD/YYYY` (English).
///
/// With `short`, the year is left off when it is the same as that of
/// `today`.  Timestamps are read in UTC, so for text input `today` should be
/// the current UTC date.  Returns `None` if `input` is not a valid date.
pub(crate) fn format_date<'a, D: Into<DateInput<'a>>>(
    input: D,
    short: bool,
    lang: Lang,
    today: Date,
) -> Option<String> {
    let date = input.into().resolve()?;
    let day = pad2(date.day());
    let month = pad2(u8::from(date.month()));
    let year = date.year();
    let omit_year = short && year == today.year();
    Some(match lang {
        Lang::De if omit_year => format!("{day}.{month}."),
        Lang::De => format!("{day}.{month}.{year}"),
        Lang::En if omit_year => format!("{month}/{day}"),
        Lang::En => format!("{month}/{day}/{year}"),
    })
}

/// Returns the ISO 8601 week number (1 through 53) of `date`.
///
/// Weeks start on Monday, and week 1 is the week containing the year's first
/// Thursday.  The week's Thursday therefore decides which year the week
/// belongs to.
pub(crate) fn iso_week_number(date: Date) -> u8 {
    let thursday = date.to_julian_day() - i32::from(date.weekday().number_days_from_monday()) + 3;
    let Some(first_thursday) = Date::from_julian_day(thursday)
        .ok()
        .and_then(|th| first_thursday_of(th.year()))
    else {
        // Only reachable when the week's Thursday falls outside the range of
        // representable dates
        return date.iso_week();
    };
    let week = (thursday - first_thursday.to_julian_day()) / 7 + 1;
    u8::try_from(week).expect("ISO week number should be between 1 and 53")
}

fn first_thursday_of(year: i32) -> Option<Date> {
    let jan1 = Date::from_calendar_date(year, Month::January, 1).ok()?;
    let thursday = i32::from(Weekday::Thursday.number_days_from_monday());
    let ahead = (thursday - i32::from(jan1.weekday().number_days_from_monday()) + 7) % 7;
    Date::from_julian_day(jan1.to_julian_day() + ahead).ok()
}

/// How far a due date lies from today
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DueDateType {
    DueToday,
    Upcoming,
    Future,
    Overdue,
    LongOverdue,
    CriticallyOverdue,
    Unknown,
}

impl DueDateType {
    /// Classifies a signed day difference (`target - today`).  The ranges
    /// cover every integer, so [`DueDateType::Unknown`] never comes out of
    /// here.
    pub(crate) fn from_day_diff(days: i64) -> DueDateType {
        match days {
            0 => DueDateType::DueToday,
            1..=7 => DueDateType::Upcoming,
            8..=i64::MAX => DueDateType::Future,
            -3..=-1 => DueDateType::Overdue,
            -25..=-4 => DueDateType::LongOverdue,
            i64::MIN..=-26 => DueDateType::CriticallyOverdue,
        }
    }

    pub(crate) fn for_date(target: Date, today: Date) -> DueDateType {
        let diff = i64::from(target.to_julian_day()) - i64::from(today.to_julian_day());
        DueDateType::from_day_diff(diff)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            DueDateType::DueToday => "due-today",
            DueDateType::Upcoming => "upcoming",
            DueDateType::Future => "future",
            DueDateType::Overdue => "overdue",
            DueDateType::LongOverdue => "long-overdue",
            DueDateType::CriticallyOverdue => "critically-overdue",
            DueDateType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DueDateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets the date in `input` relative to `today`.  Input that cannot be
/// parsed as a date is [`DueDateType::Unknown`].
pub(crate) fn classify_due_date(input: &str, today: Date) -> DueDateType {
    match parse_date(input) {
        Some(target) => DueDateType::for_date(target, today),
        None => DueDateType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::successors;
    use time::{macros::date, Duration};

    fn shifted(today: Date, days: i64) -> String {
        format_ymd(today + Duration::days(days))
    }

    #[test]
    fn test_pad2() {
        assert_eq!(pad2(0), "00");
        assert_eq!(pad2(5), "05");
        assert_eq!(pad2(10), "10");
        assert_eq!(pad2(31), "31");
    }

    #[test]
    fn test_format_ymd() {
        assert_eq!(format_ymd(date!(2024 - 03 - 05)), "2024-03-05");
        assert_eq!(format_ymd(date!(2023 - 12 - 31)), "2023-12-31");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-05"), Some(date!(2024 - 03 - 05)));
        assert_eq!(parse_date(" 2024-03-05\n"), Some(date!(2024 - 03 - 05)));
        assert_eq!(
            parse_date("2024-03-05T23:30:00-02:00"),
            Some(date!(2024 - 03 - 06))
        );
        assert_eq!(
            parse_date("2024-03-05T10:00:00Z"),
            Some(date!(2024 - 03 - 05))
        );
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-03-05T"), None);
        assert_eq!(parse_date("2024-03-05T25:00"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_local_datetime() {
        assert_eq!(
            parse_date("2024-03-05T10:00:00"),
            Some(date!(2024 - 03 - 05))
        );
        assert_eq!(parse_date("2024-03-05T10:00"), Some(date!(2024 - 03 - 05)));
        assert_eq!(
            parse_date("2024-03-05T23:59:59.999"),
            Some(date!(2024 - 03 - 05))
        );
    }

    #[test]
    fn test_parse_datetime_without_seconds() {
        assert_eq!(parse_date("2024-03-05T10:00Z"), Some(date!(2024 - 03 - 05)));
        assert_eq!(
            parse_date("2024-03-05T23:30-02:00"),
            Some(date!(2024 - 03 - 06))
        );
        assert_eq!(
            parse_date("2024-03-06T00:30:00.5+01:00"),
            Some(date!(2024 - 03 - 05))
        );
    }

    #[test]
    fn test_datetimes_are_not_unknown() {
        let today = date!(2026 - 10 - 19);
        assert_eq!(
            classify_due_date("2026-10-19T08:00:00", today),
            DueDateType::DueToday
        );
        assert_eq!(
            classify_due_date("2026-10-20T08:00Z", today),
            DueDateType::Upcoming
        );
        assert_eq!(
            format_date("2024-03-05T10:00:00", false, Lang::De, today).as_deref(),
            Some("05.03.2024")
        );
    }

    #[test]
    fn test_short_year_follows_utc_date() {
        // 23:30 at UTC-2 on New Year's Eve is already the new year in UTC
        assert_eq!(
            format_date("2024-12-31T23:30:00-02:00", true, Lang::En, date!(2025 - 01 - 01))
                .as_deref(),
            Some("01/01")
        );
        assert_eq!(
            format_date("2024-12-31T23:30:00-02:00", true, Lang::En, date!(2024 - 12 - 31))
                .as_deref(),
            Some("01/01/2025")
        );
    }

    #[test]
    fn test_format_date() {
        let today = date!(2026 - 10 - 19);
        assert_eq!(
            format_date("2024-03-05", false, Lang::De, today).as_deref(),
            Some("05.03.2024")
        );
        assert_eq!(
            format_date("2024-03-05", false, Lang::En, today).as_deref(),
            Some("03/05/2024")
        );
        assert_eq!(format_date("not-a-date", false, Lang::En, today), None);
    }

    #[test]
    fn test_format_date_short() {
        let today = date!(2024 - 10 - 19);
        assert_eq!(
            format_date("2024-03-05", true, Lang::De, today).as_deref(),
            Some("05.03.")
        );
        assert_eq!(
            format_date("2024-03-05", true, Lang::En, today).as_deref(),
            Some("03/05")
        );
        assert_eq!(
            format_date("2023-03-05", true, Lang::De, today).as_deref(),
            Some("05.03.2023")
        );
        assert_eq!(
            format_date("2025-03-05", true, Lang::En, today).as_deref(),
            Some("03/05/2025")
        );
    }

    #[test]
    fn test_format_date_structured() {
        let today = date!(2026 - 10 - 19);
        assert_eq!(
            format_date(date!(2024 - 12 - 01), false, Lang::De, today).as_deref(),
            Some("01.12.2024")
        );
    }

    #[test]
    fn test_format_date_uses_utc() {
        let today = date!(2026 - 10 - 19);
        assert_eq!(
            format_date("2024-03-05T01:00:00+02:00", false, Lang::De, today).as_deref(),
            Some("04.03.2024")
        );
    }

    #[test]
    fn test_iso_week_number() {
        assert_eq!(iso_week_number(date!(2024 - 01 - 01)), 1);
        assert_eq!(iso_week_number(date!(2024 - 03 - 05)), 10);
        assert_eq!(iso_week_number(date!(2024 - 12 - 30)), 1);
        assert_eq!(iso_week_number(date!(2021 - 01 - 03)), 53);
        assert_eq!(iso_week_number(date!(2021 - 01 - 04)), 1);
        assert_eq!(iso_week_number(date!(2020 - 12 - 31)), 53);
        assert_eq!(iso_week_number(date!(2026 - 10 - 19)), 43);
        assert_eq!(iso_week_number(date!(2027 - 01 - 01)), 53);
    }

    #[test]
    fn test_iso_week_number_matches_time() {
        let start = date!(1999 - 12 - 01);
        for d in successors(Some(start), |d| d.next_day()).take(366 * 12) {
            let week = iso_week_number(d);
            assert!((1..=53).contains(&week), "week {week} of {d} out of range");
            assert_eq!(week, d.iso_week(), "wrong week for {d}");
            assert_eq!(week, iso_week_number(d));
        }
    }

    #[test]
    fn test_iso_week_number_at_edges() {
        assert_eq!(iso_week_number(Date::MIN), Date::MIN.iso_week());
        assert_eq!(iso_week_number(Date::MAX), Date::MAX.iso_week());
    }

    #[test]
    fn test_classify_due_date() {
        let today = date!(2026 - 10 - 19);
        assert_eq!(
            classify_due_date("2026-10-19", today),
            DueDateType::DueToday
        );
        assert_eq!(
            classify_due_date(&shifted(today, 3), today),
            DueDateType::Upcoming
        );
        assert_eq!(
            classify_due_date(&shifted(today, 10), today),
            DueDateType::Future
        );
        assert_eq!(
            classify_due_date(&shifted(today, -2), today),
            DueDateType::Overdue
        );
        assert_eq!(
            classify_due_date(&shifted(today, -10), today),
            DueDateType::LongOverdue
        );
        assert_eq!(
            classify_due_date(&shifted(today, -30), today),
            DueDateType::CriticallyOverdue
        );
        assert_eq!(
            classify_due_date("not-a-date", today),
            DueDateType::Unknown
        );
    }

    #[test]
    fn test_classify_due_date_thresholds() {
        let today = date!(2024 - 01 - 10);
        for (days, expected) in [
            (1, DueDateType::Upcoming),
            (7, DueDateType::Upcoming),
            (8, DueDateType::Future),
            (-1, DueDateType::Overdue),
            (-3, DueDateType::Overdue),
            (-4, DueDateType::LongOverdue),
            (-25, DueDateType::LongOverdue),
            (-26, DueDateType::CriticallyOverdue),
        ] {
            assert_eq!(
                classify_due_date(&shifted(today, days), today),
                expected,
                "wrong bucket for {days} days"
            );
        }
    }

    #[test]
    fn test_classify_timestamp_ignores_time_of_day() {
        let today = date!(2026 - 10 - 19);
        assert_eq!(
            classify_due_date("2026-10-19T23:59:59Z", today),
            DueDateType::DueToday
        );
    }

    #[test]
    fn test_due_date_type_tokens() {
        assert_eq!(DueDateType::DueToday.to_string(), "due-today");
        assert_eq!(DueDateType::LongOverdue.to_string(), "long-overdue");
        assert_eq!(
            DueDateType::CriticallyOverdue.to_string(),
            "critically-overdue"
        );
    }
}
