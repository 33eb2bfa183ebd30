use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::ItdashError;
use crate::model::Table;

/// Rebuild a table from header cells and the flat list of body cells.
///
/// DataTables renders the body as `tr/td` in row-major order, so every
/// `headers.len()` consecutive cells form one row. A trailing partial row
/// is dropped.
pub fn reshape(headers: Vec<String>, cells: Vec<String>) -> Result<Table, ItdashError> {
    let width = headers.len();
    if width == 0 {
        return Err(ItdashError::EmptyHeader);
    }

    let leftover = cells.len() % width;
    if leftover != 0 {
        warn!(
            cells = cells.len(),
            columns = width,
            "dropping {leftover} cell(s) of a partial last row"
        );
    }

    let rows = cells.chunks_exact(width).map(|row| row.to_vec()).collect();

    Ok(Table { headers, rows })
}

// "Showing 1 to 10 of 1,204 entries (filtered from 5,000 total entries)"
static TOTAL_ENTRIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"of\s+([\d,]+)\s+entries").expect("static regex"));

/// Row count reported by the DataTables info line, if it has one.
pub fn total_entries(info: &str) -> Option<usize> {
    let digits: String = TOTAL_ENTRIES
        .captures(info)?
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reshape_two_rows() {
        let table = reshape(strings(&["UII", "Title"]), strings(&["1", "Alpha", "2", "Beta"])).unwrap();
        assert_eq!(table.headers, vec!["UII", "Title"]);
        assert_eq!(table.rows, vec![vec!["1", "Alpha"], vec!["2", "Beta"]]);
    }

    #[test]
    fn test_rows_concatenate_back_to_body() {
        for width in 1..6 {
            let headers: Vec<String> = (0..width).map(|i| format!("h{i}")).collect();
            let body: Vec<String> = (0..width * 7).map(|i| format!("c{i}")).collect();
            let table = reshape(headers, body.clone()).unwrap();
            assert_eq!(table.rows.len(), 7);
            assert!(table.rows.iter().all(|r| r.len() == width));
            assert_eq!(table.rows.concat(), body);
        }
    }

    #[test]
    fn test_partial_row_dropped() {
        let table = reshape(strings(&["A", "B"]), strings(&["1", "2", "3"])).unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_empty_header_rejected() {
        assert!(matches!(
            reshape(vec![], strings(&["1"])),
            Err(ItdashError::EmptyHeader)
        ));
    }

    #[test]
    fn test_total_entries_from_info_line() {
        assert_eq!(total_entries("Showing 1 to 10 of 57 entries"), Some(57));
        assert_eq!(total_entries("Showing 1 to 1,204 of 1,204 entries"), Some(1204));
        assert_eq!(
            total_entries("Showing 1 to 5 of 5 entries (filtered from 57 total entries)"),
            Some(5)
        );
    }

    #[test]
    fn test_total_entries_absent() {
        assert_eq!(total_entries(""), None);
        assert_eq!(total_entries("Loading..."), None);
    }
}
