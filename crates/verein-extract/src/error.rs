use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// A mandatory logical column has no matching physical column. Fatal to
    /// the whole extraction; the caller cannot proceed without that data.
    #[error("mandatory column '{column}' missing from the result header")]
    SchemaMismatch { column: String },
    #[error("duplicate membership number {number}")]
    DuplicateMember { number: u32 },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
