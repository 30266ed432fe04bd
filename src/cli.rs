//! Command-line interface definitions.
//!
//! Every option is optional on the command line; unset options fall back
//! to the YAML config file given with `--config`, then to built-in
//! defaults (see [`crate::config::CheckConfig`]).

use clap::Parser;

/// Command-line arguments for the ordering check.
///
/// # Examples
///
/// ```sh
/// # Check the first 100 stories of the default listing
/// newest_order_check
///
/// # Smaller batch, with a JSON report
/// newest_order_check -n 30 -j ./reports
///
/// # Settings from a file
/// newest_order_check -c ./check.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing URL to check
    #[arg(short, long, env = "LISTING_URL")]
    pub url: Option<String>,

    /// Number of stories that must be collected and checked
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Maximum number of pages to read
    #[arg(short = 'a', long)]
    pub max_attempts: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with each request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to write the JSON run report into
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}
