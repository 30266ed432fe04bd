//! Newest-first ordering check.
//!
//! A batch is in order when the parsed age never decreases from one row
//! to the next. Equal ages are fine. The scan stops at the first
//! inversion and reports it together with the rows around it.

use crate::age::parse_age_minutes;
use crate::models::{EnrichedRecord, RawRecord, Validation, ViolationReport};
use tracing::{debug, instrument};

/// Number of rows shown around a violation.
pub const CONTEXT_WINDOW: usize = 6;

/// Attach 1-based positions and parsed ages to `records`.
pub fn enrich(records: &[RawRecord]) -> Vec<EnrichedRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| EnrichedRecord {
            index: i + 1,
            age_minutes: parse_age_minutes(Some(&record.age_text)),
            record: record.clone(),
        })
        .collect()
}

/// Up to [`CONTEXT_WINDOW`] rows starting three before the 1-based `position`.
pub fn context_window(enriched: &[EnrichedRecord], position: usize) -> &[EnrichedRecord] {
    let start = position.saturating_sub(3).min(enriched.len());
    let end = (start + CONTEXT_WINDOW).min(enriched.len());
    &enriched[start..end]
}

/// Check that `records` are ordered newest first.
///
/// The caller is expected to have confirmed the batch size already; this
/// function checks whatever it is given.
///
/// # Returns
///
/// [`Validation::Pass`], or [`Validation::Violation`] describing the first
/// adjacent pair whose ages decrease.
pub fn validate(records: &[RawRecord]) -> Validation {
    validate_enriched(&enrich(records))
}

/// [`validate`] over records that were already passed through [`enrich`].
#[instrument(level = "info", skip_all, fields(count = enriched.len()))]
pub fn validate_enriched(enriched: &[EnrichedRecord]) -> Validation {
    let Some(offset) = enriched
        .windows(2)
        .position(|pair| pair[0].age_minutes > pair[1].age_minutes)
    else {
        debug!("No ordering violation found");
        return Validation::Pass;
    };

    let position = offset + 1;
    let report = ViolationReport {
        position,
        first: enriched[offset].clone(),
        second: enriched[offset + 1].clone(),
    };
    debug!(
        position,
        first_age = report.first.age_minutes,
        second_age = report.second.age_minutes,
        "Ordering violation found"
    );

    Validation::Violation {
        report,
        context: context_window(enriched, position).to_vec(),
    }
}
