//! Identifier validation for SEPA payloads.
//!
//! All checks are total functions: invalid input yields `false` or an issue
//! list, never a panic. Callers decide how to react.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use verein_model::Originator;

/// Two uppercase country letters followed by checksum and BBAN digits.
static IBAN_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}\d{2,32}$").expect("iban shape regex"));

/// Country code + check digits + at least one BBAN digit.
const IBAN_MIN_LEN: usize = 5;

/// SEPA identifiers carry at most 35 characters.
const IDENTIFIER_MAX_LEN: usize = 35;

/// Fixed business-code marker every creditor identifier carries.
const CREDITOR_BUSINESS_CODE: &str = "ZZZ";

/// Validate an IBAN: shape, length, and the mod-97 checksum over the
/// rearranged numeric encoding.
pub fn is_valid_iban(input: &str) -> bool {
    let stripped = strip_spaces(input);
    if stripped.len() < IBAN_MIN_LEN || !IBAN_SHAPE.is_match(&stripped) {
        return false;
    }
    // Move country code and check digits to the end, then require the
    // numeric encoding to leave remainder 1 modulo 97.
    let rearranged = format!("{}{}", &stripped[4..], &stripped[..4]);
    mod97(&rearranged) == Some(1)
}

/// Validate a creditor identifier: the `ZZZ` business code must be present;
/// the rest re-validates as an IBAN-shaped checksum string.
pub fn is_valid_creditor_id(input: &str) -> bool {
    let stripped = strip_spaces(input);
    if !stripped.contains(CREDITOR_BUSINESS_CODE) {
        return false;
    }
    is_valid_iban(&stripped.replacen(CREDITOR_BUSINESS_CODE, "", 1))
}

/// Validate a message or payment-information identifier: non-empty, at most
/// 35 characters, restricted SEPA character set.
pub fn is_valid_message_id(input: &str) -> bool {
    !input.is_empty()
        && input.chars().count() <= IDENTIFIER_MAX_LEN
        && input.chars().all(is_sepa_char)
}

fn is_sepa_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '/' | ' ' | '-' | '?' | ':' | '(' | ')' | '.' | ',' | '\'' | '+'
        )
}

/// Render a date-time the way pain.008 expects it, e.g. `2017-02-20T12:00:00`.
pub fn format_sepa_date(date_time: NaiveDateTime) -> String {
    date_time.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn strip_spaces(input: &str) -> String {
    input.chars().filter(|c| *c != ' ').collect()
}

/// Streaming remainder of the big decimal encoding modulo 97. Letters encode
/// as two digits (`A` = 10 … `Z` = 35). `None` for characters outside
/// `[0-9A-Z]`.
fn mod97(input: &str) -> Option<u32> {
    let mut remainder: u32 = 0;
    for c in input.chars() {
        remainder = match c {
            '0'..='9' => (remainder * 10 + (c as u32 - '0' as u32)) % 97,
            'A'..='Z' => (remainder * 100 + (c as u32 - 'A' as u32 + 10)) % 97,
            _ => return None,
        };
    }
    Some(remainder)
}

/// One problem with an originator profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginatorIssue {
    pub field: &'static str,
    pub message: String,
}

/// Unstructured remittance text carries at most 140 characters.
const PURPOSE_MAX_LEN: usize = 140;

/// Check every identifier the document will embed, returning all problems at
/// once so the caller can refuse a bad profile with each of them named.
pub fn check_originator(originator: &Originator) -> Vec<OriginatorIssue> {
    let mut issues = Vec::new();
    let mut push = |field: &'static str, message: String| {
        issues.push(OriginatorIssue { field, message });
    };
    if originator.creator.trim().is_empty() {
        push("creator", "creator name is empty".to_string());
    }
    if originator.creditor.trim().is_empty() {
        push("creditor", "creditor name is empty".to_string());
    }
    if !is_valid_iban(&originator.iban) {
        push("iban", format!("invalid IBAN {:?}", originator.iban));
    }
    if originator.bic.trim().is_empty() {
        push("bic", "BIC is empty".to_string());
    }
    if !is_valid_creditor_id(&originator.creditor_id) {
        push(
            "creditor_id",
            format!("invalid creditor identifier {:?}", originator.creditor_id),
        );
    }
    if !is_valid_message_id(&originator.message_id) {
        push(
            "message_id",
            format!("invalid message identifier {:?}", originator.message_id),
        );
    }
    if !is_valid_message_id(&originator.pmt_inf_id) {
        push(
            "pmt_inf_id",
            format!(
                "invalid payment information identifier {:?}",
                originator.pmt_inf_id
            ),
        );
    }
    if originator.purpose.chars().count() > PURPOSE_MAX_LEN {
        push(
            "purpose",
            format!("purpose exceeds {PURPOSE_MAX_LEN} characters"),
        );
    }
    issues
}
