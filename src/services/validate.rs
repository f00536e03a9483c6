use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

/// 12-hour clock, minutes optional, optional space before the meridiem.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(0?[1-9]|1[0-2])(:[0-5][0-9])?\s?(AM|PM)$").expect("valid time regex")
});

static YES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(yes|yeah|yep|sure|ok|okay|y|definitely|absolutely|correct|right)$")
        .expect("valid yes regex")
});

static NO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(no|nope|nah|n|cancel|stop|wrong|incorrect)$").expect("valid no regex")
});

/// Non-ISO formats accepted by the date fallback path, day-first to match
/// the clinic's locale. Anything else is rejected rather than guessed.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

pub fn valid_name(input: &str) -> bool {
    input.trim().chars().count() >= 2
}

/// Digit-only form must have 10-15 digits; formatting is otherwise free.
pub fn valid_phone(input: &str) -> bool {
    let digits = input.chars().filter(char::is_ascii_digit).count();
    (10..=15).contains(&digits)
}

/// Resolve a date input to a concrete calendar date that is today or later.
/// "today"/"tomorrow" anywhere in the input win over everything else; then
/// the strict `YYYY-MM-DD` path; then the fallback formats. Past dates and
/// unparseable input yield `None`.
pub fn resolve_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();

    if lowered.contains("tomorrow") {
        return Some(today + Duration::days(1));
    }
    if lowered.contains("today") {
        return Some(today);
    }

    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().or_else(|| {
        FALLBACK_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
    })?;

    (parsed >= today).then_some(parsed)
}

pub fn valid_time(input: &str) -> bool {
    TIME_RE.is_match(input.trim())
}

/// Yes-token or anything containing "confirm".
pub fn is_affirmative(input: &str) -> bool {
    let trimmed = input.trim();
    YES_RE.is_match(trimmed) || trimmed.to_lowercase().contains("confirm")
}

/// No-token or anything containing "cancel".
pub fn is_negative(input: &str) -> bool {
    let trimmed = input.trim();
    NO_RE.is_match(trimmed) || trimmed.to_lowercase().contains("cancel")
}

/// Global cancellation, honored from any active booking state regardless of
/// that state's own validation.
pub fn is_cancellation(input: &str) -> bool {
    let lowered = input.trim().to_lowercase();
    lowered.contains("cancel") || lowered == "stop"
}
