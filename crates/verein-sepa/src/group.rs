//! Partitioning validated members into payment groups.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use verein_model::{Member, PaymentGroup};

use crate::validate::is_valid_iban;

/// How each member's contribution amount is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionScheme {
    /// Every member is collected with the same amount.
    Uniform(Decimal),
    /// Each member's individual amount, with the default as fallback.
    PerMember { default: Decimal },
}

impl ContributionScheme {
    fn resolve(self, member: &Member) -> Decimal {
        match self {
            ContributionScheme::Uniform(amount) => amount,
            ContributionScheme::PerMember { default } => member.contribution.unwrap_or(default),
        }
    }
}

/// Why a member was left out of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingIban,
    InvalidIban,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingIban => f.write_str("no IBAN on file"),
            SkipReason::InvalidIban => f.write_str("IBAN fails its checksum"),
        }
    }
}

/// A member excluded from the collection, reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMember {
    pub membership_number: u32,
    pub name: String,
    pub reason: SkipReason,
}

/// Result of one grouping pass: the payment groups plus every exclusion.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub groups: Vec<PaymentGroup>,
    pub skipped: Vec<SkippedMember>,
}

impl Grouping {
    pub fn transaction_count(&self) -> usize {
        self.groups.iter().map(PaymentGroup::transaction_count).sum()
    }

    /// Document-level control sum over all included transactions.
    pub fn control_sum(&self) -> Decimal {
        self.groups.iter().map(PaymentGroup::control_sum).sum()
    }
}

#[derive(Debug, Error)]
pub enum GroupError {
    /// A non-positive amount would silently miscompute the control sum,
    /// so it is fatal to the grouping call.
    #[error("non-positive contribution {amount} for membership number {membership_number}")]
    NonPositiveAmount {
        membership_number: u32,
        amount: Decimal,
    },
}

/// Partition members into payment groups keyed by resolved contribution.
///
/// Members without a usable IBAN are excluded and reported, never silently
/// dropped. Groups are ordered by amount; members within a group by display
/// name; each group derives `<base_pmt_inf_id>-<index>` so two groups in one
/// document never collide.
pub fn group_members(
    members: &[Member],
    base_pmt_inf_id: &str,
    scheme: ContributionScheme,
) -> Result<Grouping, GroupError> {
    let mut skipped = Vec::new();
    let mut by_amount: BTreeMap<Decimal, Vec<Member>> = BTreeMap::new();

    for member in members {
        if !member.account_holder.has_iban() {
            skipped.push(skip(member, SkipReason::MissingIban));
            continue;
        }
        if !is_valid_iban(&member.account_holder.iban) {
            skipped.push(skip(member, SkipReason::InvalidIban));
            continue;
        }
        let mut amount = scheme.resolve(member);
        if amount <= Decimal::ZERO {
            return Err(GroupError::NonPositiveAmount {
                membership_number: member.membership_number,
                amount,
            });
        }
        // Normalize the grouping key so 10 and 10.00 land in one group and
        // render identically.
        amount.rescale(2);
        by_amount.entry(amount).or_default().push(member.clone());
    }

    let groups = by_amount
        .into_iter()
        .enumerate()
        .map(|(index, (amount, mut group_members))| {
            group_members.sort();
            debug!(
                amount = %amount,
                members = group_members.len(),
                "payment group assembled"
            );
            PaymentGroup {
                amount,
                members: group_members,
                pmt_inf_id: format!("{}-{}", base_pmt_inf_id, index + 1),
            }
        })
        .collect();

    Ok(Grouping { groups, skipped })
}

fn skip(member: &Member, reason: SkipReason) -> SkippedMember {
    SkippedMember {
        membership_number: member.membership_number,
        name: member.display_name(),
        reason,
    }
}
