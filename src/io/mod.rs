//! I/O module
//!
//! Handles the flat-file format, backups and text reports.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `backup` - Timestamped copies of the store file
//! - `report` - Statistics report and corporate invoice rendering

pub mod backup;
pub mod csv_format;
pub mod report;
pub mod sync_reader;

pub use backup::{backup_path, create_backup};
pub use csv_format::{convert_csv_record, customer_to_record, write_customers_csv, CsvRecord};
pub use report::{format_amount, render_corporate_invoice, render_report};
pub use sync_reader::CustomerReader;
