//! Property tests for the identifier predicates.

use proptest::prelude::*;

use verein_sepa::{is_valid_iban, is_valid_message_id};

const VALID_IBANS: &[&str] = &[
    "DE02100500000024290661",
    "DE89370400440532013000",
    "DE12500105175407123456",
    "DE24200411110012345678",
];

proptest! {
    /// The mod-97 checksum catches every single-digit error.
    #[test]
    fn prop_single_digit_mutation_breaks_checksum(
        iban_index in 0..VALID_IBANS.len(),
        position in 2usize..22,
        replacement in 0u32..10,
    ) {
        let iban = VALID_IBANS[iban_index];
        let original = iban.as_bytes()[position] - b'0';
        prop_assume!(u32::from(original) != replacement);
        let mut mutated = iban.as_bytes().to_vec();
        mutated[position] = b'0' + replacement as u8;
        let mutated = String::from_utf8(mutated).unwrap();
        prop_assert!(is_valid_iban(iban));
        prop_assert!(!is_valid_iban(&mutated));
    }

    /// Total over arbitrary input: never panics, and anything over 35
    /// characters is rejected.
    #[test]
    fn prop_message_id_is_total(input in ".*") {
        let valid = is_valid_message_id(&input);
        if input.chars().count() > 35 {
            prop_assert!(!valid);
        }
    }

    /// Stripping or inserting blanks never changes an IBAN verdict.
    #[test]
    fn prop_iban_ignores_spaces(iban_index in 0..VALID_IBANS.len(), split in 1usize..21) {
        let iban = VALID_IBANS[iban_index];
        let spaced = format!("{} {}", &iban[..split], &iban[split..]);
        prop_assert!(is_valid_iban(&spaced));
    }
}
