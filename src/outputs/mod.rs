//! Report output for a finished check.
//!
//! # Submodules
//!
//! - [`table`]: Plain-text tables of records for the console
//! - [`json`]: Writes the [`crate::models::RunReport`] to disk
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 091500.json
//!     └── 143012.json
//! ```

pub mod json;
pub mod table;
