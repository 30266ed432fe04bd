//! Data models for scraped listing rows and validation results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawRecord`]: One row as extracted from a listing page
//! - [`EnrichedRecord`]: A row with its position and parsed age attached
//! - [`Collection`]: The deduplicated batch gathered across pages
//! - [`ViolationReport`] / [`Validation`]: The result of the ordering check
//! - [`Outcome`] / [`RunReport`]: What a single run concluded, for output

use serde::{Deserialize, Serialize};

/// A single story row as scraped from a listing page.
///
/// All fields are display strings exactly as the page shows them. Fields
/// the page did not provide are empty, except `points` which falls back
/// to `"0 points"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRecord {
    /// Stable identifier published by the source. Empty if extraction failed.
    pub id: String,
    /// The story title.
    pub title: String,
    /// Absolute URL the title links to. May be empty.
    pub link: String,
    /// Relative-age label, e.g. `"3 minutes ago"`.
    pub age_text: String,
    /// Score label, informational only.
    pub points: String,
    /// Submitter name, informational only.
    pub author: String,
}

impl RawRecord {
    /// Build a record with only the fields the ordering check cares about.
    pub fn new(id: impl Into<String>, title: impl Into<String>, age_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            link: String::new(),
            age_text: age_text.into(),
            points: "0 points".to_string(),
            author: String::new(),
        }
    }
}

/// A [`RawRecord`] with its 1-based position and parsed age in minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    /// 1-based position in the validated sequence.
    pub index: usize,
    /// The scraped row, serialized inline with its fields.
    #[serde(flatten)]
    pub record: RawRecord,
    /// Parsed age; `f64::INFINITY` when the label was empty or unparseable.
    /// Serialized as `null` in that case.
    pub age_minutes: f64,
}

/// Why the collector stopped pulling pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The target count was reached.
    TargetReached,
    /// The page source reported no further page.
    NoMorePages,
    /// The attempt budget ran out first.
    AttemptsExhausted,
}

/// The batch gathered by the collector.
///
/// `records` holds at most the target count; ids that are present are
/// pairwise distinct and appear in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub records: Vec<RawRecord>,
    /// Number of pages fetched.
    pub attempts: usize,
    pub stop_reason: StopReason,
}

/// The first adjacent pair found out of order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationReport {
    /// 1-based index of `first` in the sequence.
    pub position: usize,
    pub first: EnrichedRecord,
    pub second: EnrichedRecord,
}

/// Result of the ordering check.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Pass,
    Violation {
        report: ViolationReport,
        /// Up to six records surrounding the violation.
        context: Vec<EnrichedRecord>,
    },
}

impl Validation {
    pub fn is_pass(&self) -> bool {
        matches!(self, Validation::Pass)
    }
}

/// What a run concluded. Each variant maps to a distinct exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    OrderingViolation,
    InsufficientItems,
    UnexpectedError,
}

impl Outcome {
    /// Process exit code for this outcome.
    ///
    /// | Outcome | Code |
    /// |---------|------|
    /// | `Pass` | 0 |
    /// | `OrderingViolation` | 1 |
    /// | `InsufficientItems` | 2 |
    /// | `UnexpectedError` | 3 |
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Pass => 0,
            Outcome::OrderingViolation => 1,
            Outcome::InsufficientItems => 2,
            Outcome::UnexpectedError => 3,
        }
    }
}

/// Summary of a single run, written as the JSON report.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of when the run finished.
    pub checked_at: String,
    pub listing_url: String,
    pub target_count: usize,
    pub collected_count: usize,
    pub attempts: usize,
    pub stop_reason: StopReason,
    pub outcome: Outcome,
    pub violation: Option<ViolationReport>,
    pub context: Vec<EnrichedRecord>,
    /// Rows whose age label did not parse and were ranked as oldest.
    pub unparsed_ages: Vec<EnrichedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_defaults() {
        let record = RawRecord::new("42", "Title", "5 minutes ago");
        assert_eq!(record.id, "42");
        assert_eq!(record.points, "0 points");
        assert!(record.link.is_empty());
        assert!(record.author.is_empty());
    }

    #[test]
    fn test_raw_record_serialization() {
        let record = RawRecord::new("42", "Show HN: a thing", "just now");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"age_text\":\"just now\""));

        let back: RawRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(Outcome::Pass.exit_code(), 0);
        assert_eq!(Outcome::OrderingViolation.exit_code(), 1);
        assert_eq!(Outcome::InsufficientItems.exit_code(), 2);
        assert_eq!(Outcome::UnexpectedError.exit_code(), 3);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&Outcome::InsufficientItems).unwrap();
        assert_eq!(json, "\"insufficient_items\"");
        let json = serde_json::to_string(&StopReason::NoMorePages).unwrap();
        assert_eq!(json, "\"no_more_pages\"");
    }

    #[test]
    fn test_infinite_age_serializes_as_null() {
        let record = EnrichedRecord {
            index: 1,
            record: RawRecord::new("1", "t", ""),
            age_minutes: f64::INFINITY,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"age_minutes\":null"));
    }

    #[test]
    fn test_enriched_record_keeps_every_raw_field() {
        let mut raw = RawRecord::new("7", "Title", "3 hours ago");
        raw.link = "https://example.com/a".to_string();
        raw.points = "12 points".to_string();
        raw.author = "bob".to_string();
        let record = EnrichedRecord {
            index: 2,
            record: raw,
            age_minutes: 180.0,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["index"], 2);
        assert_eq!(value["id"], "7");
        assert_eq!(value["link"], "https://example.com/a");
        assert_eq!(value["points"], "12 points");
        assert_eq!(value["author"], "bob");
        assert_eq!(value["age_text"], "3 hours ago");
        assert_eq!(value["age_minutes"], 180.0);
    }
}
