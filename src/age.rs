//! Relative-age label parsing.
//!
//! Listing pages show how long ago a story was posted as free text
//! ("3 minutes ago", "just now", "2 days ago"). [`parse_age_minutes`] maps
//! such a label onto a single scale in minutes so adjacent rows can be
//! compared.
//!
//! Labels that are empty or don't match a known `<integer> <unit>` shape
//! are ranked as infinitely old. Several unparseable rows in a row never
//! register as out of order against each other, and one unparseable row
//! followed by a parseable one always does.

use once_cell::sync::Lazy;
use regex::Regex;

static AGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*(second|minute|hour|day|month|year)").unwrap());

/// Minutes per unit. Months are 30 days, years 365.
fn unit_minutes(unit: &str) -> f64 {
    match unit {
        "second" => 1.0 / 60.0,
        "minute" => 1.0,
        "hour" => 60.0,
        "day" => 60.0 * 24.0,
        "month" => 60.0 * 24.0 * 30.0,
        "year" => 60.0 * 24.0 * 365.0,
        _ => 1.0,
    }
}

/// Convert a relative-age label into minutes.
///
/// Matching is case-insensitive and ignores surrounding whitespace. The
/// first `<integer><unit>` occurrence anywhere in the label wins, so
/// `"2 hours ago"` and `"posted 2 hours ago by x"` both give `120.0`.
///
/// # Returns
///
/// - `0.0` for `"just now"`
/// - `f64::INFINITY` for `None`, empty labels, or labels with no match
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_age_minutes(Some("5 minutes ago")), 5.0);
/// assert_eq!(parse_age_minutes(Some("yesterday")), f64::INFINITY);
/// ```
pub fn parse_age_minutes(age_text: Option<&str>) -> f64 {
    let Some(text) = age_text else {
        return f64::INFINITY;
    };
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return f64::INFINITY;
    }
    if text == "just now" {
        return 0.0;
    }

    let Some(caps) = AGE_PATTERN.captures(&text) else {
        return f64::INFINITY;
    };
    // ASCII digits only; runs too long for f64 are clamped so they stay finite.
    let value: f64 = caps[1].parse().unwrap_or(f64::MAX);
    (value * unit_minutes(&caps[2])).min(f64::MAX)
}
