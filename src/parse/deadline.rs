use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Sort key for a listing deadline.
///
/// `Unknown` orders after every parsed date, so postings whose deadline could
/// not be read end up at the bottom of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeadlineKey {
    At(NaiveDateTime),
    Unknown,
}

/// Status phrases the site shows in place of (or next to) a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusPhrase {
    OffersAccepted,
    AcceptingApplications,
    Filled,
    Withdrawn,
}

impl StatusPhrase {
    /// Every known phrase, in the order they are checked.
    pub const ALL: [StatusPhrase; 4] = [
        StatusPhrase::OffersAccepted,
        StatusPhrase::AcceptingApplications,
        StatusPhrase::Filled,
        StatusPhrase::Withdrawn,
    ];

    /// The lowercase text of the phrase as it appears on the site.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusPhrase::OffersAccepted => "offers accepted",
            StatusPhrase::AcceptingApplications => "accepting applications",
            StatusPhrase::Filled => "filled",
            StatusPhrase::Withdrawn => "withdrawn",
        }
    }
}

/// Calendar deadline of a posting, or the reason it has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    On(NaiveDate),
    /// The listing explicitly says "No deadline specified".
    NotSpecified,
    /// Only a status phrase such as "filled" was present.
    Status(StatusPhrase),
    /// No date-shaped text could be found.
    Unrecognized,
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Deadline::NotSpecified => write!(f, "no deadline"),
            Deadline::Status(phrase) => write!(f, "{}", phrase.as_str()),
            Deadline::Unrecognized => write!(f, "unrecognized deadline"),
        }
    }
}

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})\s+(\d{1,2}):(\d{2})\s*([AaPp][Mm])$")
            .expect("clock deadline pattern is valid")
    })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{4})/(\d{1,2})/(\d{1,2})").expect("date pattern is valid")
    })
}

/// Parses a listing deadline into a sort key.
///
/// Accepts `YYYY/MM/DD H:MMAM` (or `PM`), optionally preceded by the word
/// "deadline" and wrapped in the listing's `(...*)` decoration. Anything else
/// maps to `DeadlineKey::Unknown`; this never fails.
///
/// # Examples
///
/// ```rust
/// use postdoc_crawler::parse::{deadline_sort_key, DeadlineKey};
/// let early = deadline_sort_key("(deadline 2024/11/01 11:59PM*)");
/// let late = deadline_sort_key("2024/12/01 9:00AM");
/// assert!(early < late);
/// assert!(late < deadline_sort_key("filled"));
/// assert_eq!(deadline_sort_key("filled"), DeadlineKey::Unknown);
/// ```
pub fn deadline_sort_key(raw: &str) -> DeadlineKey {
    let text = match raw.split_once("deadline") {
        Some((_, rest)) => rest,
        None => raw,
    };
    let text = text.trim_matches(|c: char| c == '(' || c == ')' || c == '*' || c.is_whitespace());

    parse_clock(text)
        .map(DeadlineKey::At)
        .unwrap_or(DeadlineKey::Unknown)
}

fn parse_clock(text: &str) -> Option<NaiveDateTime> {
    let caps = clock_pattern().captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = caps[6].eq_ignore_ascii_case("pm");
    let hour = match (pm, hour) {
        (false, 12) => 0,
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, h) => h,
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}

/// Parses a listing deadline into a calendar date.
///
/// Surrounding parentheses, spaces and the word "deadline" are ignored.
/// "No deadline specified" and the known status phrases are recognised as
/// data rather than errors; a status phrase followed by a date still yields
/// the date. Text with no date in it is logged at `warn` level.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use postdoc_crawler::parse::{parse_deadline, Deadline};
/// assert_eq!(
///     parse_deadline("(deadline 2024/11/01 11:59PM*)"),
///     Deadline::On(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap())
/// );
/// assert_eq!(parse_deadline("No deadline specified"), Deadline::NotSpecified);
/// ```
pub fn parse_deadline(raw: &str) -> Deadline {
    let trimmed = raw
        .trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace())
        .to_lowercase();
    if trimmed == "no deadline specified" {
        return Deadline::NotSpecified;
    }
    let text = trimmed.replace("deadline ", "");

    let status = StatusPhrase::ALL
        .into_iter()
        .find(|phrase| text.contains(phrase.as_str()));
    let remaining = match status {
        Some(phrase) => text
            .replace(phrase.as_str(), "")
            .trim_matches(|c: char| c == ',' || c == ' ')
            .to_string(),
        None => text,
    };

    let Some(caps) = date_pattern().captures(&remaining) else {
        return match status {
            Some(phrase) => Deadline::Status(phrase),
            None => {
                warn!("No valid date found in deadline: {:?}", raw);
                Deadline::Unrecognized
            }
        };
    };

    let date = match (
        caps[1].parse::<i32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<u32>(),
    ) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    };
    match date {
        Some(date) => Deadline::On(date),
        None => {
            warn!("Could not parse date {:?} in deadline: {:?}", &caps[0], raw);
            Deadline::Unrecognized
        }
    }
}
