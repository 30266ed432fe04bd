//! Small helpers for text shortening and output directories.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Shorten `s` to at most `max` characters, ending with `…` when cut.
///
/// Counts characters, not bytes, so titles with non-ASCII text are never
/// split inside a code point.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("short", 10), "short");
/// assert_eq!(truncate_chars("abcdefgh", 5), "abcd…");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Format an age in minutes for display: whole numbers without decimals,
/// `∞` for ages that could not be parsed.
pub fn format_minutes(minutes: f64) -> String {
    if minutes.is_infinite() {
        "∞".to_string()
    } else if minutes.fract() == 0.0 {
        format!("{minutes:.0}")
    } else {
        format!("{minutes:.2}")
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and removes a
/// scratch file in it.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or written to.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let check_path = format!("{}/.write_check", path.trim_end_matches('/'));
    stdfs::File::create(&check_path)?;
    let _ = stdfs::remove_file(&check_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_string() {
        assert_eq!(truncate_chars("Hello, world!", 100), "Hello, world!");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_chars_long_string() {
        assert_eq!(truncate_chars("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let title = "Ünïcödé títlé wïth áccénts";
        let result = truncate_chars(title, 6);
        assert_eq!(result.chars().count(), 6);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(5.0), "5");
        assert_eq!(format_minutes(0.5), "0.50");
        assert_eq!(format_minutes(f64::INFINITY), "∞");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("reports").join("nested");

        ensure_writable_dir(dir.to_str().unwrap()).await.unwrap();
        assert!(dir.is_dir());
        // The scratch file is cleaned up again.
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }
}
