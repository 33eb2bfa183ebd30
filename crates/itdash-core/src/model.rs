use serde::{Deserialize, Serialize};

/// One agency tile from the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    pub agency: String,
    /// Display text as rendered, e.g. "$1,234,567".
    pub amount: String,
}

/// A rectangular text table. Header order defines field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Values of one column, top to bottom. Short rows yield "".
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(|s| s.as_str()).unwrap_or(""))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&[ListingRow]> for Table {
    fn from(rows: &[ListingRow]) -> Self {
        Table {
            headers: vec!["Agency".into(), "Amount".into()],
            rows: rows
                .iter()
                .map(|r| vec![r.agency.clone(), r.amount.clone()])
                .collect(),
        }
    }
}

/// Fields recovered from the first page of a business case PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfRecord {
    pub uii: String,
    pub investment_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_rows_become_agency_amount_table() {
        let rows = vec![ListingRow {
            agency: "Agency A".into(),
            amount: "$100".into(),
        }];
        let table = Table::from(rows.as_slice());
        assert_eq!(table.headers, vec!["Agency", "Amount"]);
        assert_eq!(table.rows, vec![vec!["Agency A", "$100"]]);
    }

    #[test]
    fn test_column_pads_short_rows() {
        let table = Table {
            headers: vec!["UII".into(), "Title".into()],
            rows: vec![vec!["1".into(), "Alpha".into()], vec!["2".into()]],
        };
        assert_eq!(table.column("Title"), Some(vec!["Alpha", ""]));
        assert_eq!(table.column("Missing"), None);
    }
}
