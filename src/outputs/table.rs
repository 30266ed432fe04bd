//! Plain-text tables for the console report.

use crate::models::{EnrichedRecord, RawRecord};
use crate::utils::{format_minutes, truncate_chars};
use itertools::Itertools;

/// Titles longer than this are shortened in tables.
const TITLE_WIDTH: usize = 60;

/// Render `rows` under `headers` as an aligned, pipe-separated table.
///
/// Column widths are measured in characters. Rows shorter than the header
/// are padded with empty cells.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        let padded = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).copied().unwrap_or("");
                let pad = width - cell.chars().count().min(*width);
                format!(" {cell}{} ", " ".repeat(pad))
            })
            .join("|");
        format!("|{padded}|")
    };
    let separator = format!("|{}|", widths.iter().map(|w| "-".repeat(w + 2)).join("|"));

    let mut out = vec![line(headers.to_vec()), separator];
    out.extend(rows.iter().map(|row| line(row.iter().map(String::as_str).collect())));
    out.join("\n")
}

/// Table of collected rows: index, id, title and age label.
pub fn collected_table(records: &[RawRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.id.clone(),
                truncate_chars(&r.title, TITLE_WIDTH),
                r.age_text.clone(),
            ]
        })
        .collect();
    render(&["index", "id", "title", "age"], &rows)
}

/// Table of enriched rows, including the parsed age in minutes.
pub fn enriched_table(records: &[EnrichedRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.index.to_string(),
                r.record.id.clone(),
                truncate_chars(&r.record.title, TITLE_WIDTH),
                r.record.age_text.clone(),
                format_minutes(r.age_minutes),
            ]
        })
        .collect();
    render(&["index", "id", "title", "age", "age_minutes"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::enrich;

    #[test]
    fn test_render_aligns_columns() {
        let table = render(
            &["a", "bb"],
            &[vec!["long".to_string(), "x".to_string()], vec!["y".to_string()]],
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "| a    | bb |");
        assert_eq!(lines[1], "|------|----|");
        assert_eq!(lines[2], "| long | x  |");
        assert_eq!(lines[3], "| y    |    |");
    }

    #[test]
    fn test_collected_table_lists_every_record() {
        let records = vec![
            RawRecord::new("10", "First", "1 minute ago"),
            RawRecord::new("11", "Second", "2 minutes ago"),
        ];
        let table = collected_table(&records);

        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("| 2     | 11 | Second | 2 minutes ago |"));
    }

    #[test]
    fn test_enriched_table_shows_minutes() {
        let enriched = enrich(&[
            RawRecord::new("1", "Now", "just now"),
            RawRecord::new("2", "Unknown", "yesterday"),
        ]);
        let table = enriched_table(&enriched);

        assert!(table.contains("age_minutes"));
        assert!(table.contains("∞"));
        assert!(table.lines().nth(2).unwrap().contains("| just now  | 0 "));
    }
}
