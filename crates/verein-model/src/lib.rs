pub mod amount;
pub mod error;
pub mod member;
pub mod options;
pub mod originator;
pub mod payment;

pub use amount::{ensure_positive, format_amount, parse_amount};
pub use error::{ModelError, Result};
pub use member::{AccountHolder, Address, Member, Person};
pub use options::{CollectionOptions, DuplicatePolicy, Profile};
pub use originator::Originator;
pub use payment::PaymentGroup;
