//! The club's own SEPA identity, loaded from the collection profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Creditor-side identity and document identifiers for one collection run.
///
/// `message_id` must be unique within a 15-day window and `pmt_inf_id` within
/// a 3-month window; this model only carries the values, the caller owns the
/// temporal bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Originator {
    /// Party that creates the document (InitgPty).
    pub creator: String,
    /// Creditor name the collection is booked to (Cdtr).
    pub creditor: String,
    pub iban: String,
    pub bic: String,
    pub creditor_id: String,
    /// Unstructured remittance text shown to the debtor.
    pub purpose: String,
    pub message_id: String,
    /// Base payment-information identifier; groups derive a suffixed id from it.
    pub pmt_inf_id: String,
    /// Requested collection date (ReqdColltnDt).
    pub execution_date: NaiveDate,
}
