pub mod builder;
pub mod columns;
pub mod error;
pub mod schema;
pub mod table;

pub use builder::{ExtractionReport, RowWarning, build_members};
pub use columns::{CellParseError, ColumnKind, ColumnValue, MemberField, parse_cell};
pub use error::{ExtractError, Result};
pub use schema::{SchemaMapping, map_header};
pub use table::{ResultTable, is_null_cell, read_csv_table};
