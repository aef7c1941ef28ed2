//! Payment groups: members sharing one contribution amount.

use rust_decimal::Decimal;

use crate::member::Member;

/// One `PmtInf` block of the collection document.
///
/// Members are ordered by display name; the id is derived from the
/// originator's base payment-information id and is unique per document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentGroup {
    pub amount: Decimal,
    pub members: Vec<Member>,
    pub pmt_inf_id: String,
}

impl PaymentGroup {
    pub fn transaction_count(&self) -> usize {
        self.members.len()
    }

    /// Sum of all transactions in this group.
    pub fn control_sum(&self) -> Decimal {
        self.amount * Decimal::from(self.members.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use crate::member::{AccountHolder, Address, Person};

    use super::*;

    fn member(number: u32) -> Member {
        Member {
            membership_number: number,
            person: Person {
                title: None,
                prename: "Anna".to_string(),
                lastname: "Abel".to_string(),
                birthday: None,
                is_male: false,
            },
            address: Address {
                street: "Ringstrasse".to_string(),
                house_number: "4".to_string(),
                postcode: "54321".to_string(),
                place: "Musterstadt".to_string(),
            },
            account_holder: AccountHolder {
                prename: "Anna".to_string(),
                lastname: "Abel".to_string(),
                iban: "DE02100500000024290661".to_string(),
                bic: "BELADEBEXXX".to_string(),
                mandate_signed: None,
                mandate_changed: false,
            },
            is_active: true,
            is_contribution_free: false,
            contribution: None,
        }
    }

    #[test]
    fn test_control_sum_is_amount_times_members() {
        let group = PaymentGroup {
            amount: Decimal::new(1000, 2),
            members: vec![member(1), member(2), member(3)],
            pmt_inf_id: "Beitrag-1".to_string(),
        };
        assert_eq!(group.control_sum(), Decimal::new(3000, 2));
        assert_eq!(group.transaction_count(), 3);
    }
}
