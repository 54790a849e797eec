//! Calendar date extraction
//!
//! Looks for `D/M`, `D-M`, `D/M/YY` and `D/M/YYYY` tokens. Total: any
//! failure to find or build a real date falls back to "today".

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[/\-](\d{1,2})(?:[/\-](\d{2,4}))?").unwrap());

/// Extract a date from free text, defaulting to the current local date.
pub fn extract_date(text: &str) -> NaiveDate {
    extract_date_on(text, Local::now().date_naive())
}

/// Extract a date from free text against an explicit "today".
///
/// Two-digit years are widened with a fixed pivot: `< 50` lands in the
/// 2000s, anything else in the 1900s. Tokens that do not form a real
/// calendar date (e.g. "31/02") fall back to `today`.
pub fn extract_date_on(text: &str, today: NaiveDate) -> NaiveDate {
    let Some(caps) = DATE_TOKEN.captures(text) else {
        return today;
    };

    let day: u32 = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
    let month: u32 = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);

    let year = match caps.get(3).and_then(|m| m.as_str().parse::<i32>().ok()) {
        Some(y) if y < 50 => 2000 + y,
        Some(y) if y < 100 => 1900 + y,
        Some(y) => y,
        None => today.year(),
    };

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(today)
}

/// Remove all date-like tokens from the text.
pub(crate) fn strip_date_tokens(text: &str) -> String {
    DATE_TOKEN.replace_all(text, " ").into_owned()
}

/// Format a date in the `DD/MM/YYYY` convention used in replies.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
