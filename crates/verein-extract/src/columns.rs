//! Static column metadata for the `Mitglieder` result table.
//!
//! Each logical field knows its physical column label, whether the column may
//! be absent from a query result, and how its text cells parse. The table is
//! defined once and never mutated at runtime.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use verein_model::parse_amount;

/// Logical fields of one member row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberField {
    MembershipNumber,
    Title,
    Prename,
    Lastname,
    Birthday,
    IsMale,
    IsActive,
    IsContributionFree,
    Street,
    HouseNumber,
    Postcode,
    Place,
    Iban,
    Bic,
    MandateSigned,
    MandateChanged,
    AccountHolderPrename,
    AccountHolderLastname,
    Contribution,
}

/// How a field's cells parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Amount,
    Date,
    Flag,
}

/// A parsed cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Text(String),
    Integer(u32),
    Amount(Decimal),
    Date(NaiveDate),
    Flag(bool),
}

#[derive(Debug, Error)]
pub enum CellParseError {
    #[error("not a number: {0:?}")]
    BadInteger(String),
    #[error("not an amount: {0:?}")]
    BadAmount(String),
    #[error("not a date: {0:?}")]
    BadDate(String),
    #[error("not a truth value: {0:?}")]
    BadFlag(String),
}

impl MemberField {
    pub const ALL: [MemberField; 19] = [
        MemberField::MembershipNumber,
        MemberField::Title,
        MemberField::Prename,
        MemberField::Lastname,
        MemberField::Birthday,
        MemberField::IsMale,
        MemberField::IsActive,
        MemberField::IsContributionFree,
        MemberField::Street,
        MemberField::HouseNumber,
        MemberField::Postcode,
        MemberField::Place,
        MemberField::Iban,
        MemberField::Bic,
        MemberField::MandateSigned,
        MemberField::MandateChanged,
        MemberField::AccountHolderPrename,
        MemberField::AccountHolderLastname,
        MemberField::Contribution,
    ];

    /// Physical column label, matching the persistence layer's naming.
    /// Mapping is by literal, case-sensitive equality.
    pub fn column_label(self) -> &'static str {
        match self {
            MemberField::MembershipNumber => "Mitgliedsnummer",
            MemberField::Title => "Titel",
            MemberField::Prename => "Vorname",
            MemberField::Lastname => "Nachname",
            MemberField::Birthday => "Geburtstag",
            MemberField::IsMale => "IstMaennlich",
            MemberField::IsActive => "IstAktiv",
            MemberField::IsContributionFree => "IstBeitragsfrei",
            MemberField::Street => "Strasse",
            MemberField::HouseNumber => "Hausnummer",
            MemberField::Postcode => "PLZ",
            MemberField::Place => "Ort",
            MemberField::Iban => "Iban",
            MemberField::Bic => "Bic",
            MemberField::MandateSigned => "MandatErstellt",
            MemberField::MandateChanged => "MandatGeaendert",
            MemberField::AccountHolderPrename => "KontoinhaberVorname",
            MemberField::AccountHolderLastname => "KontoinhaberNachname",
            MemberField::Contribution => "Beitrag",
        }
    }

    /// Whether a query result may omit this column entirely.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            MemberField::Title
                | MemberField::MandateChanged
                | MemberField::AccountHolderPrename
                | MemberField::AccountHolderLastname
                | MemberField::Contribution
        )
    }

    /// Whether a null cell is accepted silently.
    ///
    /// Fields where null is regular data (no account, no individual
    /// contribution, no title) differ from fields where null is a
    /// data-quality problem worth a row warning.
    pub fn value_optional(self) -> bool {
        self.is_optional()
            || matches!(
                self,
                MemberField::Iban | MemberField::Bic | MemberField::MandateSigned
            )
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            MemberField::MembershipNumber => ColumnKind::Integer,
            MemberField::Birthday | MemberField::MandateSigned => ColumnKind::Date,
            MemberField::IsMale
            | MemberField::IsActive
            | MemberField::IsContributionFree
            | MemberField::MandateChanged => ColumnKind::Flag,
            MemberField::Contribution => ColumnKind::Amount,
            _ => ColumnKind::Text,
        }
    }
}

/// Parse one non-null cell according to the field's kind.
pub fn parse_cell(kind: ColumnKind, raw: &str) -> Result<ColumnValue, CellParseError> {
    let trimmed = raw.trim();
    match kind {
        ColumnKind::Text => Ok(ColumnValue::Text(trimmed.to_string())),
        ColumnKind::Integer => trimmed
            .parse::<u32>()
            .map(ColumnValue::Integer)
            .map_err(|_| CellParseError::BadInteger(raw.to_string())),
        ColumnKind::Amount => parse_amount(trimmed)
            .map(ColumnValue::Amount)
            .map_err(|_| CellParseError::BadAmount(raw.to_string())),
        ColumnKind::Date => parse_date(trimmed)
            .map(ColumnValue::Date)
            .ok_or_else(|| CellParseError::BadDate(raw.to_string())),
        ColumnKind::Flag => parse_flag(trimmed)
            .map(ColumnValue::Flag)
            .ok_or_else(|| CellParseError::BadFlag(raw.to_string())),
    }
}

/// ISO dates as the database exports them, dotted dates as spreadsheets
/// re-save them.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d.%m.%Y"))
        .ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ if value.eq_ignore_ascii_case("true") => Some(true),
        _ if value.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = MemberField::ALL.iter().map(|f| f.column_label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), MemberField::ALL.len());
    }

    #[test]
    fn test_optional_columns_are_value_optional() {
        for field in MemberField::ALL {
            if field.is_optional() {
                assert!(field.value_optional(), "{field:?}");
            }
        }
    }

    #[test]
    fn test_parse_integer_cell() {
        assert_eq!(
            parse_cell(ColumnKind::Integer, "42").unwrap(),
            ColumnValue::Integer(42)
        );
        assert!(parse_cell(ColumnKind::Integer, "-1").is_err());
        assert!(parse_cell(ColumnKind::Integer, "x").is_err());
    }

    #[test]
    fn test_parse_date_cell_iso_and_dotted() {
        let expected = ColumnValue::Date(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert_eq!(parse_cell(ColumnKind::Date, "1990-05-17").unwrap(), expected);
        assert_eq!(parse_cell(ColumnKind::Date, "17.05.1990").unwrap(), expected);
        assert!(parse_cell(ColumnKind::Date, "05/17/1990").is_err());
    }

    #[test]
    fn test_parse_flag_cell() {
        assert_eq!(
            parse_cell(ColumnKind::Flag, "1").unwrap(),
            ColumnValue::Flag(true)
        );
        assert_eq!(
            parse_cell(ColumnKind::Flag, "FALSE").unwrap(),
            ColumnValue::Flag(false)
        );
        assert!(parse_cell(ColumnKind::Flag, "ja").is_err());
    }

    #[test]
    fn test_parse_amount_cell_accepts_decimal_comma() {
        assert_eq!(
            parse_cell(ColumnKind::Amount, "12,50").unwrap(),
            ColumnValue::Amount(rust_decimal::Decimal::new(1250, 2))
        );
    }
}
