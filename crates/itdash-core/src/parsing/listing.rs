use crate::error::ItdashError;
use crate::model::ListingRow;

/// Pair a flat amount/name sequence into listing rows.
///
/// Even indices are amounts, odd indices are agency names, in DOM order:
/// `["$100", "Agency A", "$200", "Agency B"]`.
pub fn pair_alternating(texts: &[String]) -> Result<Vec<ListingRow>, ItdashError> {
    if texts.len() % 2 != 0 {
        return Err(ItdashError::UnpairedListing { len: texts.len() });
    }

    Ok(texts
        .chunks_exact(2)
        .map(|pair| ListingRow {
            amount: pair[0].trim().to_string(),
            agency: pair[1].trim().to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pairs_amounts_with_following_names() {
        let rows = pair_alternating(&strings(&["$100", "Agency A", "$200", "Agency B"])).unwrap();
        assert_eq!(
            rows,
            vec![
                ListingRow {
                    agency: "Agency A".into(),
                    amount: "$100".into()
                },
                ListingRow {
                    agency: "Agency B".into(),
                    amount: "$200".into()
                },
            ]
        );
    }

    #[test]
    fn test_even_input_yields_half_as_many_rows() {
        let texts: Vec<String> = (0..20).map(|i| format!("t{i}")).collect();
        let rows = pair_alternating(&texts).unwrap();
        assert_eq!(rows.len(), 10);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.amount, texts[2 * i]);
            assert_eq!(row.agency, texts[2 * i + 1]);
        }
    }

    #[test]
    fn test_empty_input_is_empty_listing() {
        assert!(pair_alternating(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_odd_input_is_rejected() {
        let err = pair_alternating(&strings(&["$100", "Agency A", "$200"])).unwrap_err();
        assert!(matches!(err, ItdashError::UnpairedListing { len: 3 }));
    }
}
