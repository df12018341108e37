//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over customers stored in a flat file.
//! Delegates format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! CustomerReader yields one `(line, Result<Customer, RegistryError>)` pair per
//! data row, so a bad row can be reported with its position while the caller
//! keeps going:
//!
//! ```no_run
//! use customer_registry::io::sync_reader::CustomerReader;
//! use std::path::Path;
//!
//! let reader = CustomerReader::open(Path::new("customers.csv")).unwrap();
//! for (line, result) in reader {
//!     match result {
//!         Ok(customer) => println!("{customer}"),
//!         Err(e) => eprintln!("line {line}: {e}"),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Failing to open the file or read its header is returned from `open()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - An I/O error while reading ends the iteration after it is yielded

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{Customer, RegistryError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over a customer flat file
#[derive(Debug)]
pub struct CustomerReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    row: StringRecord,
    finished: bool,
}

impl CustomerReader {
    /// Open a flat file and read its header row
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow rows with fewer columns than the header
    ///
    /// # Errors
    ///
    /// - `FileNotFound` when the path does not exist
    /// - `Io` / `Csv` when the file cannot be opened or its header read
    pub fn open(path: &Path) -> Result<Self, RegistryError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RegistryError::file_not_found(path),
            _ => RegistryError::from(e),
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            row: StringRecord::new(),
            finished: false,
        })
    }
}

impl Iterator for CustomerReader {
    type Item = (u64, Result<Customer, RegistryError>);

    /// Read and convert the next data row
    ///
    /// The line number is the 1-based line the row starts on, counting the
    /// header.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.read_record(&mut self.row) {
            Ok(false) => {
                self.finished = true;
                None
            }
            Ok(true) => {
                let line = self.row.position().map_or(0, |pos| pos.line());
                // missing trailing columns read as blanks
                for _ in self.row.len()..self.headers.len() {
                    self.row.push_field("");
                }
                let result = self
                    .row
                    .deserialize::<CsvRecord>(Some(&self.headers))
                    .map_err(RegistryError::from)
                    .and_then(|record| convert_csv_record(&record));
                Some((line, result))
            }
            Err(e) => {
                let line = e.position().map_or(0, |pos| pos.line());
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    self.finished = true;
                }
                Some((line, Err(e.into())))
            }
        }
    }
}
