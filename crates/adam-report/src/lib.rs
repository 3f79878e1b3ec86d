//! Report generation for resolved ADaM metadata.
//!
//! - **Display report**: multi-section text with a term table per codelist
//! - **Export rows**: flat rows (attribute, term, placeholder) for tabular output
//! - **CSV**: the export rows written with a fixed header

mod display;
mod error;
mod rows;
mod writer;

pub use display::{render_report, term_table};
pub use error::{ReportError, Result};
pub use rows::{
    AttributeParameter, AttributeRow, CODELIST_TERM_PARAMETER, CodelistContext, EXPORT_COLUMNS,
    ExportRow, NO_TERMS_PLACEHOLDER, PlaceholderRow, TermRow, VariableContext, export_rows,
};
pub use writer::{write_csv_file, write_rows};
