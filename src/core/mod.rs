pub mod filter;
pub mod label;
pub mod record;
pub mod summary;
pub mod uk;

// Flat public surface for domain types and functions.
pub use filter::filter_records;
pub use label::{tax_year_labels, Label};
pub use record::{NewEntry, Record, RecordAmount};
pub use summary::{format_amount, format_gbp, Summary};
pub use uk::TaxYear;
