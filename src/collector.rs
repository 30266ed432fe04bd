//! Bounded, deduplicating collection across listing pages.
//!
//! The collector drives any [`PageSource`]: it reads the rows of the
//! current page, keeps the ones whose id it has not seen yet, and asks the
//! source to move on until it has the target count, the source runs out of
//! pages, or the attempt budget is spent.
//!
//! # Termination
//!
//! Every attempt fetches exactly one page, so at most `max_attempts` pages
//! are read. An empty page or a source with no next page are normal stops,
//! reported through [`StopReason`], never as errors. Errors returned by the
//! source itself are propagated unchanged and not retried.

use crate::models::{Collection, RawRecord, StopReason};
use std::collections::HashSet;
use std::error::Error;
use tracing::{debug, info, instrument};

/// A paginated listing the collector can read from.
///
/// Implementors hold the pagination cursor; the collector only ever reads
/// the current page and asks for the next one, never both at once.
pub trait PageSource {
    /// Rows visible on the current page, top to bottom.
    async fn fetch_page(&mut self) -> Result<Vec<RawRecord>, Box<dyn Error>>;

    /// Move to the next page.
    ///
    /// Returns `Ok(false)` when there is no further page or the move could
    /// not be completed.
    async fn advance_page(&mut self) -> Result<bool, Box<dyn Error>>;
}

/// Collect up to `target_count` distinct rows from `source`.
///
/// Rows keep first-seen order across pages. A row whose id was already
/// collected is skipped; an empty id counts as an id like any other.
///
/// # Arguments
///
/// * `source` - The page source to read from
/// * `target_count` - How many distinct rows to gather
/// * `max_attempts` - Maximum number of pages to fetch
///
/// # Returns
///
/// A [`Collection`] with at most `target_count` records. Fewer records is
/// a valid outcome; the caller decides whether that is a failure.
#[instrument(level = "info", skip(source))]
pub async fn collect<S: PageSource>(
    source: &mut S,
    target_count: usize,
    max_attempts: usize,
) -> Result<Collection, Box<dyn Error>> {
    let mut records: Vec<RawRecord> = Vec::with_capacity(target_count);
    let mut seen: HashSet<String> = HashSet::new();
    let mut attempts = 0usize;

    if target_count == 0 {
        return Ok(Collection {
            records,
            attempts,
            stop_reason: StopReason::TargetReached,
        });
    }

    let stop_reason = loop {
        if attempts >= max_attempts {
            break StopReason::AttemptsExhausted;
        }
        attempts += 1;

        let page = source.fetch_page().await?;
        let page_len = page.len();
        let mut added = 0usize;
        for row in page {
            if seen.insert(row.id.clone()) {
                records.push(row);
                added += 1;
                if records.len() >= target_count {
                    break;
                }
            }
        }
        debug!(attempt = attempts, rows = page_len, added, total = records.len(), "Read page");

        if records.len() >= target_count {
            break StopReason::TargetReached;
        }
        if attempts >= max_attempts {
            break StopReason::AttemptsExhausted;
        }
        if !source.advance_page().await? {
            break StopReason::NoMorePages;
        }
    };

    records.truncate(target_count);
    info!(
        collected = records.len(),
        target_count,
        attempts,
        ?stop_reason,
        "Collection finished"
    );

    Ok(Collection {
        records,
        attempts,
        stop_reason,
    })
}
