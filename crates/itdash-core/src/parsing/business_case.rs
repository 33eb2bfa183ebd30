use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ItdashError;
use crate::model::PdfRecord;

// Section 1 of the business case: "1. Name of this Investment: <name>
// 2. Unique Investment Identifier (UII): <uii> Section B: ..."
static INVESTMENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Name of this Investment:\s*(.+?)\s*\d+\.\s*Unique Investment Identifier")
        .expect("static regex")
});

static UII: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Unique Investment Identifier \(UII\):\s*(.+?)\s*Section B").expect("static regex")
});

/// Pull the UII and investment name out of a business case's first page.
///
/// Line breaks from the text extractor are collapsed first, so a name that
/// wraps onto a second line is still captured whole.
pub fn parse_business_case(page_text: &str) -> Result<PdfRecord, ItdashError> {
    let text = normalize_ws(page_text);

    let investment_name = capture(&INVESTMENT_NAME, &text)
        .ok_or(ItdashError::FieldNotFound {
            field: "investment name",
        })?;
    let uii = capture(&UII, &text).ok_or(ItdashError::FieldNotFound { field: "UII" })?;

    Ok(PdfRecord {
        uii,
        investment_name,
    })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "\
Exhibit 300 (BY2022)
Section A: Overview & Summary Information
Date Investment First Submitted: 2019-09-09
1. Name of this Investment: Grants Management
   Modernization 2.0
2. Unique Investment Identifier (UII): 005-000000123
Section B: Investment Detail
";

    #[test]
    fn test_extracts_both_fields() {
        let record = parse_business_case(PAGE).unwrap();
        assert_eq!(record.uii, "005-000000123");
        assert_eq!(record.investment_name, "Grants Management Modernization 2.0");
    }

    #[test]
    fn test_missing_uii_label_is_field_not_found() {
        let page = "1. Name of this Investment: Thing 2. Unique Investment Identifier: 1";
        let err = parse_business_case(page).unwrap_err();
        assert!(matches!(err, ItdashError::FieldNotFound { field: "UII" }));
    }

    #[test]
    fn test_unrelated_document_is_field_not_found() {
        let err = parse_business_case("Quarterly report\nNothing to see").unwrap_err();
        assert!(matches!(
            err,
            ItdashError::FieldNotFound {
                field: "investment name"
            }
        ));
    }
}
