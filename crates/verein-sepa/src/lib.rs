pub mod document;
pub mod group;
pub mod validate;

pub use document::{DocumentOptions, assemble_document};
pub use group::{
    ContributionScheme, GroupError, Grouping, SkipReason, SkippedMember, group_members,
};
pub use validate::{
    OriginatorIssue, check_originator, format_sepa_date, is_valid_creditor_id, is_valid_iban,
    is_valid_message_id,
};
