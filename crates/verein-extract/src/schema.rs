//! Header-row resolution against the column descriptor table.

use std::collections::BTreeMap;

use crate::columns::MemberField;
use crate::error::{ExtractError, Result};

/// Logical field to physical column index, built fresh per extraction call.
///
/// Never share a mapping across queries with different column sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMapping {
    indices: BTreeMap<MemberField, usize>,
}

impl SchemaMapping {
    pub fn index_of(&self, field: MemberField) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    pub fn is_mapped(&self, field: MemberField) -> bool {
        self.indices.contains_key(&field)
    }
}

/// Resolve a result header against the descriptor table.
///
/// Pure function of its inputs: matching is by literal, case-sensitive
/// column-label equality. A mandatory descriptor without a matching label
/// fails with [`ExtractError::SchemaMismatch`]; an optional descriptor
/// without a match is simply left unmapped.
pub fn map_header(headers: &[String]) -> Result<SchemaMapping> {
    let mut indices = BTreeMap::new();
    for field in MemberField::ALL {
        let label = field.column_label();
        match headers.iter().position(|header| header == label) {
            Some(index) => {
                indices.insert(field, index);
            }
            None if field.is_optional() => {}
            None => {
                return Err(ExtractError::SchemaMismatch {
                    column: label.to_string(),
                });
            }
        }
    }
    Ok(SchemaMapping { indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_header() -> Vec<String> {
        MemberField::ALL
            .iter()
            .map(|field| field.column_label().to_string())
            .collect()
    }

    #[test]
    fn test_maps_every_field_of_a_full_header() {
        let mapping = map_header(&full_header()).expect("map full header");
        for field in MemberField::ALL {
            assert!(mapping.is_mapped(field), "{field:?}");
        }
    }

    #[test]
    fn test_missing_mandatory_column_fails() {
        let headers: Vec<String> = full_header()
            .into_iter()
            .filter(|label| label != "Nachname")
            .collect();
        let err = map_header(&headers).unwrap_err();
        match err {
            ExtractError::SchemaMismatch { column } => assert_eq!(column, "Nachname"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_optional_column_is_unmapped() {
        let headers: Vec<String> = full_header()
            .into_iter()
            .filter(|label| label != "Beitrag")
            .collect();
        let mapping = map_header(&headers).expect("map header");
        assert!(!mapping.is_mapped(MemberField::Contribution));
        assert!(mapping.is_mapped(MemberField::Iban));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let headers: Vec<String> = full_header()
            .into_iter()
            .map(|label| {
                if label == "Vorname" {
                    "VORNAME".to_string()
                } else {
                    label
                }
            })
            .collect();
        assert!(matches!(
            map_header(&headers),
            Err(ExtractError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let headers = full_header();
        let first = map_header(&headers).expect("first mapping");
        let second = map_header(&headers).expect("second mapping");
        assert_eq!(first, second);
    }
}
