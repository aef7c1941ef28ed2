//! Member aggregate built from one row of the `Mitglieder` result table.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Personal data of a member. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub title: Option<String>,
    pub prename: String,
    pub lastname: String,
    pub birthday: Option<NaiveDate>,
    pub is_male: bool,
}

/// Postal address value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub house_number: String,
    pub postcode: String,
    pub place: String,
}

/// Bank account data of the person the contribution is collected from.
///
/// An empty IBAN or BIC means the member cannot be collected; validity of a
/// non-empty IBAN is a separate concern (see the sepa crate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHolder {
    pub prename: String,
    pub lastname: String,
    pub iban: String,
    pub bic: String,
    pub mandate_signed: Option<NaiveDate>,
    pub mandate_changed: bool,
}

impl AccountHolder {
    pub fn has_iban(&self) -> bool {
        !self.iban.trim().is_empty()
    }

    pub fn has_bic(&self) -> bool {
        !self.bic.trim().is_empty()
    }

    /// Name rendered the way the debtor appears in a transaction.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prename, self.lastname)
            .trim()
            .to_string()
    }
}

/// One club member, unique by membership number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub membership_number: u32,
    pub person: Person,
    pub address: Address,
    pub account_holder: AccountHolder,
    pub is_active: bool,
    pub is_contribution_free: bool,
    /// Individual contribution override; the caller default applies when absent.
    pub contribution: Option<Decimal>,
}

impl Member {
    /// Display name used for reproducible ordering, `Lastname, Prename`.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.person.lastname, self.person.prename)
    }
}

impl Ord for Member {
    fn cmp(&self, other: &Self) -> Ordering {
        self.person
            .lastname
            .cmp(&other.person.lastname)
            .then_with(|| self.person.prename.cmp(&other.person.prename))
            .then_with(|| self.membership_number.cmp(&other.membership_number))
    }
}

impl PartialOrd for Member {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
