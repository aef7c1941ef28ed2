use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid contribution amount: {0:?}")]
    InvalidAmount(String),
    #[error("contribution amount must be positive, got {0}")]
    NonPositiveAmount(rust_decimal::Decimal),
}

pub type Result<T> = std::result::Result<T, ModelError>;
