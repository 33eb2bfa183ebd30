//! xlsx persistence: one rectangular table per sheet, header row at A1.
//!
//! rust_xlsxwriter cannot edit an existing file, so appending a sheet reads
//! every sheet back with calamine and rewrites the whole workbook. Cell
//! values are text both ways.

use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ItdashError;
use crate::model::Table;

/// Longest sheet name produced by [`sheet_name`].
pub const SHEET_NAME_LEN: usize = 30;

const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// What to do when an appended sheet's name is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetCollision {
    #[default]
    Error,
    Replace,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Start a new workbook that holds only this sheet.
    Create,
    /// Add the sheet to the existing workbook (created if missing).
    Append(SheetCollision),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetWrite {
    Written,
    Replaced,
    Skipped,
}

/// Sheet name for an agency: forbidden characters dropped, capped at
/// [`SHEET_NAME_LEN`] characters.
pub fn sheet_name(raw: &str) -> String {
    let name: String = raw
        .trim()
        .chars()
        .filter(|c| !FORBIDDEN_SHEET_CHARS.contains(c))
        .take(SHEET_NAME_LEN)
        .collect();
    let name = name.trim_end().to_string();
    if name.is_empty() {
        "Agency".to_string()
    } else {
        name
    }
}

pub fn write_sheet(
    path: &Path,
    sheet: &str,
    table: &Table,
    mode: WriteMode,
) -> Result<SheetWrite, ItdashError> {
    let collision = match mode {
        WriteMode::Create => {
            info!(path = %path.display(), sheet, rows = table.len(), "writing new workbook");
            save(path, &[(sheet, table)])?;
            return Ok(SheetWrite::Written);
        }
        WriteMode::Append(collision) => collision,
    };

    let mut sheets = if path.exists() {
        read_all(path)?
    } else {
        Vec::new()
    };

    // Excel compares sheet names case-insensitively.
    let existing = sheets
        .iter()
        .position(|(name, _)| name.to_lowercase() == sheet.to_lowercase());

    let outcome = match (existing, collision) {
        (None, _) => {
            sheets.push((sheet.to_string(), table.clone()));
            SheetWrite::Written
        }
        (Some(_), SheetCollision::Error) => {
            return Err(ItdashError::SheetExists {
                sheet: sheet.to_string(),
                path: path.to_path_buf(),
            });
        }
        (Some(_), SheetCollision::Skip) => {
            warn!(path = %path.display(), sheet, "sheet already exists, leaving it untouched");
            return Ok(SheetWrite::Skipped);
        }
        (Some(idx), SheetCollision::Replace) => {
            sheets[idx] = (sheet.to_string(), table.clone());
            SheetWrite::Replaced
        }
    };

    info!(path = %path.display(), sheet, rows = table.len(), "appending sheet");
    let refs: Vec<(&str, &Table)> = sheets.iter().map(|(n, t)| (n.as_str(), t)).collect();
    save(path, &refs)?;
    Ok(outcome)
}

/// Read one sheet back. The first row is taken as the header row.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Table, ItdashError> {
    let mut workbook = open(path)?;
    if !workbook.sheet_names().iter().any(|n| n == sheet) {
        return Err(ItdashError::SheetNotFound {
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
        });
    }
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ItdashError::Spreadsheet(format!("failed to read sheet '{sheet}': {e}")))?;
    Ok(table_from_range(&range))
}

/// Every sheet in workbook order.
pub fn read_all(path: &Path) -> Result<Vec<(String, Table)>, ItdashError> {
    let mut workbook = open(path)?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ItdashError::Spreadsheet(format!("failed to read sheet '{name}': {e}")))?;
        sheets.push((name, table_from_range(&range)));
    }
    Ok(sheets)
}

pub fn sheet_names(path: &Path) -> Result<Vec<String>, ItdashError> {
    Ok(open(path)?.sheet_names())
}

fn open(path: &Path) -> Result<Xlsx<std::io::BufReader<std::fs::File>>, ItdashError> {
    open_workbook::<Xlsx<_>, _>(path).map_err(|e| {
        ItdashError::Spreadsheet(format!("failed to open {}: {e}", path.display()))
    })
}

fn save(path: &Path, sheets: &[(&str, &Table)]) -> Result<(), ItdashError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (name, table) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).map_err(xlsx_error)?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header.as_str(), &header_format)
                .map_err(xlsx_error)?;
        }
        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(row_idx as u32 + 1, col as u16, value.as_str())
                    .map_err(xlsx_error)?;
            }
        }
    }

    workbook.save(path).map_err(xlsx_error)
}

fn xlsx_error(e: XlsxError) -> ItdashError {
    ItdashError::Spreadsheet(e.to_string())
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(cell_text).collect(),
        None => return Table::default(),
    };

    let width = headers.len();
    let rows = rows
        .map(|cells| {
            let mut row: Vec<String> = cells.iter().map(cell_text).collect();
            row.resize(width.max(row.len()), String::new());
            row
        })
        .collect();

    Table { headers, rows }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_sheet_name_truncates_to_thirty_chars() {
        let name = sheet_name("Department of Health and Human Services");
        assert_eq!(name, "Department of Health and Human");
        assert_eq!(name.chars().count(), 30);
    }

    #[test]
    fn test_sheet_name_drops_forbidden_chars() {
        assert_eq!(sheet_name("Commerce: NOAA/NWS"), "Commerce NOAANWS");
        assert_eq!(sheet_name("[]"), "Agency");
    }

    #[test]
    fn test_create_then_append_keeps_both_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("output.xlsx");

        let agencies = table(&["Agency", "Amount"], &[&["Agency A", "$100"]]);
        let investments = table(&["UII", "Title"], &[&["001", "Alpha"], &["002", ""]]);

        write_sheet(&path, "Agencies", &agencies, WriteMode::Create).unwrap();
        let outcome = write_sheet(
            &path,
            "Agency A",
            &investments,
            WriteMode::Append(SheetCollision::Error),
        )
        .unwrap();
        assert_eq!(outcome, SheetWrite::Written);

        assert_eq!(sheet_names(&path).unwrap(), vec!["Agencies", "Agency A"]);
        assert_eq!(read_sheet(&path, "Agencies").unwrap(), agencies);
        assert_eq!(read_sheet(&path, "Agency A").unwrap(), investments);
    }

    #[test]
    fn test_create_discards_previous_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.xlsx");
        let t = table(&["A"], &[&["1"]]);

        write_sheet(&path, "Old", &t, WriteMode::Create).unwrap();
        write_sheet(&path, "New", &t, WriteMode::Create).unwrap();
        assert_eq!(sheet_names(&path).unwrap(), vec!["New"]);
    }

    #[test]
    fn test_append_collision_policies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.xlsx");
        let first = table(&["A"], &[&["1"]]);
        let second = table(&["A"], &[&["2"]]);

        write_sheet(&path, "Data", &first, WriteMode::Create).unwrap();

        let err = write_sheet(&path, "data", &second, WriteMode::Append(SheetCollision::Error))
            .unwrap_err();
        assert!(matches!(err, ItdashError::SheetExists { .. }));

        let skipped =
            write_sheet(&path, "Data", &second, WriteMode::Append(SheetCollision::Skip)).unwrap();
        assert_eq!(skipped, SheetWrite::Skipped);
        assert_eq!(read_sheet(&path, "Data").unwrap(), first);

        let replaced =
            write_sheet(&path, "Data", &second, WriteMode::Append(SheetCollision::Replace))
                .unwrap();
        assert_eq!(replaced, SheetWrite::Replaced);
        assert_eq!(read_sheet(&path, "Data").unwrap(), second);
        assert_eq!(sheet_names(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_sheet_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.xlsx");
        write_sheet(&path, "Agencies", &table(&["A"], &[]), WriteMode::Create).unwrap();

        let err = read_sheet(&path, "Nope").unwrap_err();
        assert!(matches!(err, ItdashError::SheetNotFound { .. }));
    }
}
