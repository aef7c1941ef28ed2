//! Collection profile: originator identity plus run options.
//!
//! One profile struct is loaded at startup and passed down the pipeline;
//! there is no process-wide mutable configuration state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::originator::Originator;

/// How the record builder treats rows repeating a membership number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the extraction naming the duplicated number.
    #[default]
    Reject,
    /// Keep the last row and record the conflict as a row warning.
    KeepLast,
}

/// Run options carried by the profile file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOptions {
    /// Prefix the output with a UTF-8 byte-order mark.
    #[serde(default)]
    pub with_bom: bool,
    /// Contribution applied to members without an individual amount.
    #[serde(default)]
    pub default_contribution: Option<Decimal>,
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// Everything one collection run is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub originator: Originator,
    #[serde(default)]
    pub options: CollectionOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_from_empty_json() {
        let options: CollectionOptions = serde_json::from_str("{}").expect("parse options");
        assert!(!options.with_bom);
        assert_eq!(options.default_contribution, None);
        assert_eq!(options.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_duplicate_policy_kebab_case() {
        let policy: DuplicatePolicy = serde_json::from_str("\"keep-last\"").expect("parse policy");
        assert_eq!(policy, DuplicatePolicy::KeepLast);
    }
}
