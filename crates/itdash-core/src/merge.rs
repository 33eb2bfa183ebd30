use std::collections::HashMap;

use crate::error::ItdashError;
use crate::model::Table;

/// Value used for identifiers that no downloaded PDF mentions.
pub const NOT_IN_PDF: &str = "Not in PDF";

/// Column holding the investment identifier in the agency sheet.
pub const UII_COLUMN: &str = "UII";

/// Column appended by [`merge_titles`].
pub const TITLE_COLUMN: &str = "Title in PDF";

/// Append `new_column` to `table`, looking each row's `uii_column` value up
/// in `titles`.
///
/// Every input row appears in the output, in order; rows whose identifier
/// has no PDF get [`NOT_IN_PDF`].
pub fn merge_titles(
    table: &Table,
    sheet: &str,
    uii_column: &str,
    titles: &HashMap<String, String>,
    new_column: &str,
) -> Result<Table, ItdashError> {
    let idx = table
        .column_index(uii_column)
        .ok_or_else(|| ItdashError::ColumnNotFound {
            column: uii_column.to_string(),
            sheet: sheet.to_string(),
        })?;

    let mut headers = table.headers.clone();
    headers.push(new_column.to_string());
    let width = headers.len();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let uii = row.get(idx).map(|s| s.trim()).unwrap_or("");
            let title = titles
                .get(uii)
                .cloned()
                .unwrap_or_else(|| NOT_IN_PDF.to_string());
            let mut out = row.clone();
            out.resize(width - 1, String::new());
            out.push(title);
            out
        })
        .collect();

    Ok(Table { headers, rows })
}
