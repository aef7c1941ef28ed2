//! Row-to-member conversion.
//!
//! Each row converts independently and side-effect-free, so conversion runs
//! across worker threads; results are merged into one collection keyed by
//! membership number afterwards. Per-row data problems degrade the affected
//! field and are recorded as warnings; they never abort the batch.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;

use verein_model::{AccountHolder, Address, DuplicatePolicy, Member, Person};

use crate::columns::{ColumnValue, MemberField, parse_cell};
use crate::error::{ExtractError, Result};
use crate::schema::SchemaMapping;
use crate::table::{ResultTable, is_null_cell};

/// A single-row data-quality problem. The batch continues past it.
#[derive(Debug, Clone)]
pub struct RowWarning {
    /// Zero-based data-row index (header excluded).
    pub row: usize,
    pub membership_number: Option<u32>,
    pub column: &'static str,
    pub message: String,
}

/// Everything one extraction pass produced.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub members: Vec<Member>,
    pub warnings: Vec<RowWarning>,
    /// Rows that could not be keyed and were dropped entirely.
    pub skipped_rows: usize,
}

/// Convert all data rows of a mapped result table into members.
///
/// Duplicate membership numbers are handled per `policy`: rejected with
/// [`ExtractError::DuplicateMember`], or last-row-wins with the conflict
/// recorded as a warning.
pub fn build_members(
    table: &ResultTable,
    mapping: &SchemaMapping,
    policy: DuplicatePolicy,
) -> Result<ExtractionReport> {
    let outcomes: Vec<RowOutcome> = table
        .rows
        .par_iter()
        .enumerate()
        .map(|(index, row)| convert_row(index, row, mapping))
        .collect();

    let mut members: BTreeMap<u32, Member> = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut skipped_rows = 0usize;
    for outcome in outcomes {
        let row = outcome.row;
        warnings.extend(outcome.warnings);
        let Some(member) = outcome.member else {
            skipped_rows += 1;
            continue;
        };
        let number = member.membership_number;
        match members.entry(number) {
            Entry::Vacant(entry) => {
                entry.insert(member);
            }
            Entry::Occupied(mut entry) => match policy {
                DuplicatePolicy::Reject => {
                    return Err(ExtractError::DuplicateMember { number });
                }
                DuplicatePolicy::KeepLast => {
                    warnings.push(RowWarning {
                        row,
                        membership_number: Some(number),
                        column: MemberField::MembershipNumber.column_label(),
                        message: format!("membership number {number} repeats, keeping last row"),
                    });
                    entry.insert(member);
                }
            },
        }
    }
    for warning in &warnings {
        warn!(
            row = warning.row,
            column = warning.column,
            "{}",
            warning.message
        );
    }
    Ok(ExtractionReport {
        members: members.into_values().collect(),
        warnings,
        skipped_rows,
    })
}

struct RowOutcome {
    row: usize,
    member: Option<Member>,
    warnings: Vec<RowWarning>,
}

fn convert_row(index: usize, row: &[String], mapping: &SchemaMapping) -> RowOutcome {
    let mut reader = RowReader {
        index,
        row,
        mapping,
        warnings: Vec::new(),
        membership_number: None,
    };

    let number = match reader.raw(MemberField::MembershipNumber) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(number) => number,
            Err(_) => {
                reader.skip_row(format!("row skipped: unparseable membership number {raw:?}"));
                return reader.into_outcome(None);
            }
        },
        None => {
            reader.skip_row("row skipped: membership number missing".to_string());
            return reader.into_outcome(None);
        }
    };
    reader.membership_number = Some(number);

    let person = Person {
        title: reader.text(MemberField::Title),
        prename: reader.text(MemberField::Prename).unwrap_or_default(),
        lastname: reader.text(MemberField::Lastname).unwrap_or_default(),
        birthday: reader.date(MemberField::Birthday),
        is_male: reader.flag(MemberField::IsMale).unwrap_or(false),
    };
    let address = Address {
        street: reader.text(MemberField::Street).unwrap_or_default(),
        house_number: reader.text(MemberField::HouseNumber).unwrap_or_default(),
        postcode: reader.text(MemberField::Postcode).unwrap_or_default(),
        place: reader.text(MemberField::Place).unwrap_or_default(),
    };
    // Account-holder names default to the member's own name.
    let account_holder = AccountHolder {
        prename: reader
            .text(MemberField::AccountHolderPrename)
            .unwrap_or_else(|| person.prename.clone()),
        lastname: reader
            .text(MemberField::AccountHolderLastname)
            .unwrap_or_else(|| person.lastname.clone()),
        iban: reader.text(MemberField::Iban).unwrap_or_default(),
        bic: reader.text(MemberField::Bic).unwrap_or_default(),
        mandate_signed: reader.date(MemberField::MandateSigned),
        mandate_changed: reader.flag(MemberField::MandateChanged).unwrap_or(false),
    };
    let member = Member {
        membership_number: number,
        is_active: reader.flag(MemberField::IsActive).unwrap_or(false),
        is_contribution_free: reader
            .flag(MemberField::IsContributionFree)
            .unwrap_or(false),
        contribution: reader.amount(MemberField::Contribution),
        person,
        address,
        account_holder,
    };
    reader.into_outcome(Some(member))
}

struct RowReader<'a> {
    index: usize,
    row: &'a [String],
    mapping: &'a SchemaMapping,
    warnings: Vec<RowWarning>,
    membership_number: Option<u32>,
}

impl<'a> RowReader<'a> {
    fn raw(&self, field: MemberField) -> Option<&'a str> {
        let Some(index) = self.mapping.index_of(field) else {
            // SchemaMapper guarantees mandatory fields are mapped.
            debug_assert!(
                field.is_optional(),
                "mandatory column {} unmapped",
                field.column_label()
            );
            return None;
        };
        self.row
            .get(index)
            .map(String::as_str)
            .filter(|value| !is_null_cell(value))
    }

    fn value(&mut self, field: MemberField) -> Option<ColumnValue> {
        let Some(raw) = self.raw(field) else {
            if !field.value_optional() && self.mapping.is_mapped(field) {
                self.push_warning(field, "mandatory value missing".to_string());
            }
            return None;
        };
        match parse_cell(field.kind(), raw) {
            Ok(value) => Some(value),
            Err(error) => {
                self.push_warning(field, error.to_string());
                None
            }
        }
    }

    fn text(&mut self, field: MemberField) -> Option<String> {
        match self.value(field) {
            Some(ColumnValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    fn flag(&mut self, field: MemberField) -> Option<bool> {
        match self.value(field) {
            Some(ColumnValue::Flag(value)) => Some(value),
            _ => None,
        }
    }

    fn date(&mut self, field: MemberField) -> Option<NaiveDate> {
        match self.value(field) {
            Some(ColumnValue::Date(value)) => Some(value),
            _ => None,
        }
    }

    fn amount(&mut self, field: MemberField) -> Option<Decimal> {
        match self.value(field) {
            Some(ColumnValue::Amount(value)) => Some(value),
            _ => None,
        }
    }

    fn push_warning(&mut self, field: MemberField, message: String) {
        self.warnings.push(RowWarning {
            row: self.index,
            membership_number: self.membership_number,
            column: field.column_label(),
            message,
        });
    }

    fn skip_row(&mut self, message: String) {
        self.push_warning(MemberField::MembershipNumber, message);
    }

    fn into_outcome(self, member: Option<Member>) -> RowOutcome {
        RowOutcome {
            row: self.index,
            member,
            warnings: self.warnings,
        }
    }
}
