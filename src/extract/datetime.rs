//! Start date/time coercion
//!
//! Structured data carries ISO 8601 timestamps; page markup carries anything
//! from `datetime` attributes to "Saturday, June 1, 2025 6:00 PM EDT". Both
//! paths end in an [`EventStart`] holding a valid calendar date, or nothing.

use crate::config::TimezonePolicy;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Offset-bearing formats not covered by RFC 3339 (missing seconds, compact
/// offsets, space separator). `Z` is rewritten to `+00:00` before these run.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

static ISO_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?")
        .unwrap()
});

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b",
    )
    .unwrap()
});

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b",
    )
    .unwrap()
});

static TIME_12H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?::([0-5]\d))?\s*([ap])\.?m\b").unwrap());

static TIME_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").unwrap());

/// Event start: a valid calendar date and, when known, a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStart {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl EventStart {
    /// Date as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Time as 24-hour `HH:MM`, or empty when unknown
    pub fn time_string(&self) -> String {
        self.time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }

    fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            date: dt.date(),
            time: Some(dt.time()),
        }
    }

    fn from_offset(dt: DateTime<FixedOffset>, policy: TimezonePolicy) -> Self {
        match policy {
            TimezonePolicy::Source => Self::from_naive(dt.naive_local()),
            TimezonePolicy::Utc => Self::from_naive(dt.naive_utc()),
        }
    }
}

/// Parses an ISO 8601 start timestamp as found in JSON-LD `startDate`
///
/// # Examples
///
/// ```
/// use event_import::config::TimezonePolicy;
/// use event_import::extract::parse_start_date;
///
/// let start = parse_start_date("2025-06-01T18:00:00Z", TimezonePolicy::Source).unwrap();
/// assert_eq!(start.date_string(), "2025-06-01");
/// assert_eq!(start.time_string(), "18:00");
///
/// let start = parse_start_date("2025-06-01", TimezonePolicy::Source).unwrap();
/// assert_eq!(start.time_string(), "");
///
/// assert!(parse_start_date("2025-02-30T10:00:00Z", TimezonePolicy::Source).is_none());
/// ```
pub fn parse_start_date(raw: &str, policy: TimezonePolicy) -> Option<EventStart> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(EventStart::from_offset(dt, policy));
    }

    let zulu = match raw.strip_suffix(['Z', 'z']) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zulu, format) {
            return Some(EventStart::from_offset(dt, policy));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(EventStart::from_naive(dt));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| EventStart { date, time: None })
}

/// Best-effort parse of a human or machine date found in page markup
///
/// Tries, in order: the whole string as ISO 8601, an ISO timestamp embedded
/// in the text, then an English month-name date with an optional time of day
/// elsewhere in the text. Anything that does not yield a real calendar date
/// is rejected.
///
/// # Examples
///
/// ```
/// use event_import::config::TimezonePolicy;
/// use event_import::extract::parse_loose;
///
/// let start = parse_loose("Saturday, June 1, 2025 6:00 PM to 9:00 PM EDT", TimezonePolicy::Source).unwrap();
/// assert_eq!(start.date_string(), "2025-06-01");
/// assert_eq!(start.time_string(), "18:00");
///
/// assert!(parse_loose("Date to be announced", TimezonePolicy::Source).is_none());
/// ```
pub fn parse_loose(raw: &str, policy: TimezonePolicy) -> Option<EventStart> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(start) = parse_start_date(raw, policy) {
        return Some(start);
    }

    if let Some(m) = ISO_TIMESTAMP.find(raw) {
        if let Some(start) = parse_start_date(m.as_str(), policy) {
            return Some(start);
        }
    }

    let (date, span) = find_month_name_date(raw)?;
    let remainder = format!("{} {}", &raw[..span.0], &raw[span.1..]);

    Some(EventStart {
        date,
        time: find_time_of_day(&remainder),
    })
}

/// Finds a month-name date and returns it with its byte span in `text`
fn find_month_name_date(text: &str) -> Option<(NaiveDate, (usize, usize))> {
    if let Some(caps) = MONTH_DAY_YEAR.captures(text) {
        let whole = caps.get(0)?;
        let month = month_number(caps.get(1)?.as_str())?;
        let day = caps.get(2)?.as_str().parse().ok()?;
        let year = caps.get(3)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, (whole.start(), whole.end())));
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(text) {
        let whole = caps.get(0)?;
        let day = caps.get(1)?.as_str().parse().ok()?;
        let month = month_number(caps.get(2)?.as_str())?;
        let year = caps.get(3)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, (whole.start(), whole.end())));
    }

    None
}

/// First 12-hour time in the text, else the first 24-hour time
fn find_time_of_day(text: &str) -> Option<NaiveTime> {
    if let Some(caps) = TIME_12H.captures(text) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps
            .get(2)
            .map_or(Some(0), |m| m.as_str().parse().ok())?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = caps.get(3)?.as_str().eq_ignore_ascii_case("p");
        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    let caps = TIME_24H.captures(text)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
