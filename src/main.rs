//! # Newest Order Check
//!
//! A correctness harness for paginated news listings that claim to be
//! sorted newest first. It collects a fixed batch of stories across
//! "More" pages, parses each story's relative-age label into minutes and
//! reports the first place where the ordering breaks.
//!
//! ## Usage
//!
//! ```sh
//! newest_order_check -n 100 -a 10 -j ./reports
//! ```
//!
//! ## Architecture
//!
//! 1. **Collecting**: Read listing pages until exactly N distinct stories
//!    are gathered, the listing runs out or the page budget is spent
//! 2. **Counting**: Anything other than exactly N stories stops the run
//! 3. **Validating**: Parse ages and scan for the first adjacent inversion
//! 4. **Output**: Console tables, an optional JSON report and an exit code
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Batch is ordered newest first |
//! | 1 | Ordering violation found |
//! | 2 | Fewer than N stories could be collected |
//! | 3 | Unexpected error (network, config, output) |

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod age;
mod cli;
mod collector;
mod config;
mod models;
mod outputs;
mod scrapers;
mod utils;
mod validator;

use cli::Cli;
use models::{Collection, EnrichedRecord, Outcome, RunReport, Validation};
use outputs::{json, table};
use scrapers::hn::HnListing;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newest_order_check starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let outcome = match run(&args).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "Unexpected error");
            eprintln!("Unexpected error: {e}");
            Outcome::UnexpectedError
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        ?outcome,
        exit_code = outcome.exit_code(),
        "Execution complete"
    );
    ExitCode::from(outcome.exit_code())
}

/// Everything the run concluded from one collection.
#[derive(Debug)]
struct Evaluation {
    outcome: Outcome,
    /// `None` when the batch was never validated because the count was off.
    validation: Option<Validation>,
    /// Records whose age label did not parse.
    unparsed: Vec<EnrichedRecord>,
}

/// Confirm the batch size, then validate the ordering.
fn evaluate(collection: &Collection, target_count: usize) -> Evaluation {
    if collection.records.len() != target_count {
        return Evaluation {
            outcome: Outcome::InsufficientItems,
            validation: None,
            unparsed: Vec::new(),
        };
    }

    let enriched = validator::enrich(&collection.records);
    let validation = validator::validate_enriched(&enriched);
    let unparsed: Vec<EnrichedRecord> = enriched
        .into_iter()
        .filter(|r| r.age_minutes.is_infinite())
        .collect();
    let outcome = if validation.is_pass() {
        Outcome::Pass
    } else {
        Outcome::OrderingViolation
    };

    Evaluation {
        outcome,
        validation: Some(validation),
        unparsed,
    }
}

/// Print the human-readable result of a run.
fn print_report(evaluation: &Evaluation, collection: &Collection, target_count: usize) {
    match &evaluation.validation {
        None => {
            eprintln!(
                "ERROR: Could only collect {} articles. Cannot validate EXACTLY {} articles.",
                collection.records.len(),
                target_count
            );
            println!("{}", table::collected_table(&collection.records));
        }
        Some(Validation::Pass) => {
            println!("Exactly {target_count} articles collected.");
            println!("PASS: The first {target_count} articles are sorted newest → oldest.");
        }
        Some(Validation::Violation { report, context }) => {
            println!("Exactly {target_count} articles collected.");
            eprintln!("FAIL: Sorting violation detected.");
            eprintln!("Violation at position: {}", report.position);
            println!(
                "{}",
                table::enriched_table(&[report.first.clone(), report.second.clone()])
            );
            println!("Nearby items:");
            println!("{}", table::enriched_table(context));
        }
    }
}

fn build_report(listing_url: &str, evaluation: &Evaluation, collection: &Collection, target_count: usize) -> RunReport {
    let (violation, context) = match &evaluation.validation {
        Some(Validation::Violation { report, context }) => (Some(report.clone()), context.clone()),
        _ => (None, Vec::new()),
    };
    RunReport {
        checked_at: Local::now().to_rfc3339(),
        listing_url: listing_url.to_string(),
        target_count,
        collected_count: collection.records.len(),
        attempts: collection.attempts,
        stop_reason: collection.stop_reason,
        outcome: evaluation.outcome,
        violation,
        context,
        unparsed_ages: evaluation.unparsed.clone(),
    }
}

#[instrument(level = "info", skip_all)]
async fn run(args: &Cli) -> Result<Outcome, Box<dyn Error>> {
    let config = config::resolve(args).await?;
    info!(
        listing_url = %config.listing_url,
        target_count = config.target_count,
        max_attempts = config.max_attempts,
        "Resolved configuration"
    );

    // Early check: ensure the report dir is writable before any scraping
    if let Some(dir) = &config.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    let mut listing = HnListing::new(&config.listing_url, config.request_timeout(), &config.user_agent)?;
    let collection = collector::collect(&mut listing, config.target_count, config.max_attempts).await?;
    info!(last_page = %listing.current_url(), "Finished reading listing");

    let evaluation = evaluate(&collection, config.target_count);
    match evaluation.outcome {
        Outcome::InsufficientItems => warn!(
            collected = collection.records.len(),
            target_count = config.target_count,
            stop_reason = ?collection.stop_reason,
            "Not enough articles collected"
        ),
        outcome => info!(?outcome, "Validation finished"),
    }
    for record in &evaluation.unparsed {
        warn!(
            index = record.index,
            id = %record.record.id,
            age_text = %record.record.age_text,
            "Age label not recognised; ranked as oldest"
        );
    }

    print_report(&evaluation, &collection, config.target_count);

    if let Some(dir) = &config.json_output_dir {
        let report = build_report(&config.listing_url, &evaluation, &collection, config.target_count);
        if let Err(e) = json::write_report(&report, dir, &Local::now()).await {
            error!(error = %e, "Failed to write JSON run report");
        }
    }

    Ok(evaluation.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRecord, StopReason};

    fn collection_of(ages: &[&str]) -> Collection {
        Collection {
            records: ages
                .iter()
                .enumerate()
                .map(|(i, age)| RawRecord::new(i.to_string(), format!("Story {i}"), *age))
                .collect(),
            attempts: 1,
            stop_reason: StopReason::TargetReached,
        }
    }

    #[test]
    fn test_evaluate_short_collection_is_insufficient() {
        let collection = collection_of(&["1 minute ago", "2 minutes ago"]);
        let evaluation = evaluate(&collection, 3);

        assert_eq!(evaluation.outcome, Outcome::InsufficientItems);
        assert!(evaluation.validation.is_none());
        assert_eq!(evaluation.outcome.exit_code(), 2);
    }

    #[test]
    fn test_evaluate_ordered_batch_passes() {
        let collection = collection_of(&["just now", "1 minute ago", "1 minute ago", "3 hours ago"]);
        let evaluation = evaluate(&collection, 4);

        assert_eq!(evaluation.outcome, Outcome::Pass);
        assert!(evaluation.unparsed.is_empty());
    }

    #[test]
    fn test_evaluate_inversion_is_violation() {
        let collection = collection_of(&["1 minute ago", "1 day ago", "2 hours ago"]);
        let evaluation = evaluate(&collection, 3);

        assert_eq!(evaluation.outcome, Outcome::OrderingViolation);
        assert_eq!(evaluation.outcome.exit_code(), 1);
        match evaluation.validation {
            Some(Validation::Violation { report, .. }) => assert_eq!(report.position, 2),
            other => panic!("unexpected validation: {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_collects_unparsed_ages() {
        let collection = collection_of(&["1 minute ago", "", "yesterday"]);
        let evaluation = evaluate(&collection, 3);

        assert_eq!(evaluation.outcome, Outcome::Pass);
        let indexes: Vec<usize> = evaluation.unparsed.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![2, 3]);
    }

    #[test]
    fn test_build_report_carries_violation() {
        let collection = collection_of(&["5 minutes ago", "1 minute ago"]);
        let evaluation = evaluate(&collection, 2);
        let report = build_report("https://news.ycombinator.com/newest", &evaluation, &collection, 2);

        assert_eq!(report.outcome, Outcome::OrderingViolation);
        assert_eq!(report.violation.as_ref().map(|v| v.position), Some(1));
        assert_eq!(report.context.len(), 2);
        assert_eq!(report.collected_count, 2);
    }

    #[test]
    fn test_evaluate_unparsed_and_violation_share_enrichment() {
        let mut collection = collection_of(&["3 minutes ago", "soon", "1 minute ago"]);
        collection.records[1].author = "dave".to_string();
        let evaluation = evaluate(&collection, 3);

        assert_eq!(evaluation.outcome, Outcome::OrderingViolation);
        assert_eq!(evaluation.unparsed.len(), 1);
        assert_eq!(evaluation.unparsed[0].index, 2);
        assert_eq!(evaluation.unparsed[0].record, collection.records[1]);
        match &evaluation.validation {
            Some(Validation::Violation { report, context }) => {
                assert_eq!(report.position, 2);
                assert_eq!(report.first, evaluation.unparsed[0]);
                assert_eq!(context.len(), 3);
            }
            other => panic!("unexpected validation: {other:?}"),
        }
    }
}
