//! Result types shared between pipeline, commands, and summary printing.

use std::path::PathBuf;

use rust_decimal::Decimal;

use verein_extract::RowWarning;
use verein_sepa::Grouping;

/// Outcome of one collection run.
#[derive(Debug)]
pub struct CollectionResult {
    /// Members built from the result table.
    pub members_built: usize,
    /// Members considered for collection after the activity filters.
    pub considered: usize,
    pub filtered_inactive: usize,
    pub filtered_contribution_free: usize,
    /// Rows dropped because they could not be keyed.
    pub skipped_rows: usize,
    pub warnings: Vec<RowWarning>,
    pub grouping: Grouping,
    pub control_sum: Decimal,
    pub transactions: usize,
    /// Where the document was written; `None` on a dry run.
    pub output: Option<PathBuf>,
}
