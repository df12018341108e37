//! Customer store module
//!
//! This module provides the `CustomerStore` struct which owns the in-memory
//! collection of customers and every operation on it.
//!
//! The CustomerStore is responsible for:
//! - Enforcing one record per normalized email
//! - Lookup by exact email or name substring
//! - Field-driven updates and deletion
//! - Export to and import from the flat file, with a backup before import
//! - Aggregate statistics and the text report
//!
//! Every mutating operation and every failure is reported to the injected
//! [`AuditSink`]. Internal lookups (duplicate checks, resolving the target of
//! an update) are not audited.

use crate::core::audit::{AuditCategory, AuditEntry, TracingAuditSink};
use crate::core::traits::AuditSink;
use crate::io::backup::create_backup;
use crate::io::csv_format::write_customers_csv;
use crate::io::report::render_report;
use crate::io::sync_reader::CustomerReader;
use crate::types::{
    Customer, CustomerField, CustomerKind, ImportStats, RegistryError, Statistics,
};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Owns every customer record and reports each operation to an audit sink
///
/// Records keep insertion order. Lookups scan in that order and the first
/// match wins.
#[derive(Debug)]
pub struct CustomerStore<S = TracingAuditSink> {
    /// Records in insertion order
    customers: Vec<Customer>,
    /// Flat file written by `export_to_file` and read by `load`
    store_path: PathBuf,
    audit: S,
}

impl CustomerStore<TracingAuditSink> {
    /// Store whose audit entries go to `tracing`
    pub fn with_tracing(store_path: impl Into<PathBuf>) -> Self {
        Self::new(store_path, TracingAuditSink)
    }
}

impl<S: AuditSink> CustomerStore<S> {
    /// Create an empty store
    ///
    /// # Arguments
    ///
    /// * `store_path` - Flat file used for export, load and backups
    /// * `audit` - Receiver of one entry per mutating or failed operation
    pub fn new(store_path: impl Into<PathBuf>, audit: S) -> Self {
        CustomerStore {
            customers: Vec::new(),
            store_path: store_path.into(),
            audit,
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn audit_sink(&self) -> &S {
        &self.audit
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    fn log(&self, category: AuditCategory, message: impl Into<String>) {
        self.audit.record(AuditEntry::new(category, message));
    }

    /// Log `error` under ERROR and hand it back
    fn fail(&self, context: &str, error: RegistryError) -> RegistryError {
        self.log(AuditCategory::Error, format!("{context}: {error}"));
        error
    }

    /// Index of the record `query` resolves to
    ///
    /// The query is lowercased. An exact email match wins over a name
    /// substring match only when no earlier record matches by name.
    fn locate(&self, query: &str) -> Option<usize> {
        let query = query.to_lowercase();
        self.customers.iter().position(|customer| {
            customer.email() == query || customer.name().to_lowercase().contains(&query)
        })
    }

    /// Index of the record holding exactly `email`, skipping `except`
    fn holder_of(&self, email: &str, except: usize) -> Option<usize> {
        let email = email.trim().to_lowercase();
        self.customers
            .iter()
            .enumerate()
            .position(|(i, customer)| i != except && customer.email() == email)
    }

    /// Add a customer
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when a record already resolves to the customer's
    /// email. The store is left unchanged.
    pub fn add(&mut self, customer: Customer) -> Result<(), RegistryError> {
        if self.locate(customer.email()).is_some() {
            let error = RegistryError::already_exists(customer.email());
            return Err(self.fail("Add rejected", error));
        }

        self.log(
            AuditCategory::Add,
            format!("{} added: {}", customer.customer_type(), customer.email()),
        );
        self.customers.push(customer);

        Ok(())
    }

    /// Find a customer by email or name
    ///
    /// Returns the first record, in insertion order, whose email equals the
    /// lowercased query or whose name contains it case-insensitively. A name
    /// match can therefore shadow an exact email match on a later record.
    /// A miss is not an error.
    pub fn find(&self, query: &str) -> Option<&Customer> {
        let found = self.locate(query).map(|i| &self.customers[i]);
        match found {
            Some(customer) => self.log(
                AuditCategory::Lookup,
                format!("Lookup '{query}': {}", customer.email()),
            ),
            None => self.log(AuditCategory::Lookup, format!("Lookup '{query}': no match")),
        }
        found
    }

    /// Copy of every record in insertion order
    pub fn list(&self) -> Vec<Customer> {
        self.log(
            AuditCategory::Lookup,
            format!("Listed {} customers", self.customers.len()),
        );
        self.customers.clone()
    }

    /// Update fields of the record `email` resolves to
    ///
    /// Each pair names a field and its new text value. Pairs are applied in
    /// order through the field's validating setter. Names that are not
    /// fields, or are not fields of the record's variant, are skipped.
    ///
    /// # Returns
    ///
    /// The fields that were changed, in application order
    ///
    /// # Errors
    ///
    /// - `NotFound` when `email` resolves to no record
    /// - `AlreadyExists` when a new email is held by another record
    /// - Whatever validator rejects a value
    ///
    /// The first failure stops the remaining pairs; pairs applied before it
    /// stay applied.
    pub fn update<I, K, V>(
        &mut self,
        email: &str,
        updates: I,
    ) -> Result<Vec<CustomerField>, RegistryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let Some(index) = self.locate(email) else {
            return Err(self.fail("Update failed", RegistryError::not_found(email)));
        };

        let customer_type = self.customers[index].customer_type();
        let mut applied = Vec::new();

        for (name, value) in updates {
            let Some(field) = CustomerField::parse(name.as_ref()) else {
                tracing::debug!(field = name.as_ref(), "skipping unknown field");
                continue;
            };
            let Some(setter) = field.setter_for(customer_type) else {
                tracing::debug!(%field, %customer_type, "skipping field not held by variant");
                continue;
            };

            let value = value.as_ref();
            if field == CustomerField::Email && self.holder_of(value, index).is_some() {
                let error = RegistryError::already_exists(&value.trim().to_lowercase());
                return Err(self.fail("Update failed", error));
            }

            if let Err(error) = setter(&mut self.customers[index], value) {
                return Err(self.fail(&format!("Update of {field} failed"), error));
            }
            applied.push(field);
        }

        let names: Vec<&str> = applied.iter().map(|field| field.name()).collect();
        self.log(
            AuditCategory::Update,
            format!(
                "{} updated: [{}]",
                self.customers[index].email(),
                names.join(", ")
            ),
        );

        Ok(applied)
    }

    /// Remove the record `email` resolves to
    ///
    /// # Errors
    ///
    /// `NotFound` when no record matches.
    pub fn delete(&mut self, email: &str) -> Result<Customer, RegistryError> {
        let Some(index) = self.locate(email) else {
            return Err(self.fail("Delete failed", RegistryError::not_found(email)));
        };

        let removed = self.customers.remove(index);
        self.log(AuditCategory::Delete, format!("Deleted: {}", removed.email()));

        Ok(removed)
    }

    /// Run a variant behavior on a stored record
    ///
    /// `email` resolves the way [`find`](Self::find) does. If `f` fails, or
    /// leaves the record with an email another record holds, the record is
    /// restored to its previous state.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no record matches
    /// - `AlreadyExists` on an email collision
    /// - Whatever `f` returns
    pub fn with_customer_mut<T, F>(&mut self, email: &str, f: F) -> Result<T, RegistryError>
    where
        F: FnOnce(&mut Customer) -> Result<T, RegistryError>,
    {
        let Some(index) = self.locate(email) else {
            return Err(self.fail("Update failed", RegistryError::not_found(email)));
        };

        let before = self.customers[index].clone();
        let outcome = f(&mut self.customers[index]).and_then(|value| {
            let now = self.customers[index].email();
            if now != before.email() && self.holder_of(now, index).is_some() {
                return Err(RegistryError::already_exists(now));
            }
            Ok(value)
        });

        match outcome {
            Ok(value) => {
                self.log(
                    AuditCategory::Update,
                    format!("{} updated", self.customers[index].email()),
                );
                Ok(value)
            }
            Err(error) => {
                self.customers[index] = before;
                Err(self.fail("Update failed", error))
            }
        }
    }

    /// Write every record to the store file, overwriting it
    ///
    /// # Errors
    ///
    /// `Io` or `Csv` when the file cannot be written.
    pub fn export_to_file(&self) -> Result<(), RegistryError> {
        let written = File::create(&self.store_path)
            .map_err(RegistryError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                write_customers_csv(&self.customers, &mut writer)?;
                writer.flush()?;
                Ok(())
            });

        match written {
            Ok(()) => {
                self.log(
                    AuditCategory::Export,
                    format!(
                        "{} customers exported to {}",
                        self.customers.len(),
                        self.store_path.display()
                    ),
                );
                Ok(())
            }
            Err(error) => Err(self.fail("Export failed", error)),
        }
    }

    /// Import records from a flat file
    ///
    /// The store file is copied to a timestamped backup first; a failed
    /// backup is logged as a warning and the import goes ahead. Each row is
    /// then converted on its own: bad rows are counted as errors, rows whose
    /// email is already present are counted as duplicates, and neither stops
    /// the batch.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` when `path` does not exist
    /// - `Io` or `Csv` when the file's header cannot be read
    pub fn import_from_file(&mut self, path: &Path) -> Result<ImportStats, RegistryError> {
        if !path.exists() {
            return Err(self.fail("Import failed", RegistryError::file_not_found(path)));
        }

        match create_backup(&self.store_path, Local::now().naive_local()) {
            Ok(Some(backup)) => self.log(
                AuditCategory::Info,
                format!("Backup created: {}", backup.display()),
            ),
            Ok(None) => {}
            Err(error) => self.log(AuditCategory::Warning, format!("Backup failed: {error}")),
        }

        let stats = self.ingest(path)?;
        self.log(
            AuditCategory::Import,
            format!("Imported {}: {stats}", path.display()),
        );

        Ok(stats)
    }

    /// Read the store file into the collection without taking a backup
    ///
    /// A missing store file loads nothing.
    pub fn load(&mut self) -> Result<ImportStats, RegistryError> {
        if !self.store_path.is_file() {
            return Ok(ImportStats::default());
        }

        let path = self.store_path.clone();
        let stats = self.ingest(&path)?;
        self.log(
            AuditCategory::Import,
            format!("Loaded {}: {stats}", path.display()),
        );

        Ok(stats)
    }

    fn ingest(&mut self, path: &Path) -> Result<ImportStats, RegistryError> {
        let reader = CustomerReader::open(path).map_err(|e| self.fail("Import failed", e))?;
        let mut stats = ImportStats::default();

        for (line, result) in reader {
            stats.total += 1;
            match result {
                Ok(customer) => {
                    if self.locate(customer.email()).is_some() {
                        tracing::debug!(line, email = customer.email(), "duplicate row skipped");
                        stats.duplicates += 1;
                    } else {
                        self.customers.push(customer);
                        stats.succeeded += 1;
                    }
                }
                Err(error) => {
                    stats.errors += 1;
                    self.log(
                        AuditCategory::Error,
                        format!("{} line {line}: {error}", path.display()),
                    );
                }
            }
        }

        Ok(stats)
    }

    /// Counts per variant and the loyalty/discount leaders
    ///
    /// Ties go to the earliest-inserted record.
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics {
            total: self.customers.len(),
            ..Statistics::default()
        };
        let mut points_holder: Option<&str> = None;
        let mut discount_holder: Option<&str> = None;

        for customer in &self.customers {
            match customer.kind() {
                CustomerKind::Base => stats.base += 1,
                CustomerKind::Standard(standard) => {
                    stats.standard += 1;
                    let points = standard.loyalty_points();
                    if points_holder.is_none() || points > stats.max_loyalty_points {
                        stats.max_loyalty_points = points;
                        points_holder = Some(customer.name());
                    }
                }
                CustomerKind::Premium(premium) => {
                    stats.premium += 1;
                    let discount = premium.exclusive_discount();
                    if discount_holder.is_none() || discount > stats.max_discount {
                        stats.max_discount = discount;
                        discount_holder = Some(customer.name());
                    }
                }
                CustomerKind::Corporate(_) => stats.corporate += 1,
            }
        }

        if let Some(name) = points_holder {
            stats.max_loyalty_points_holder = name.to_string();
        }
        if let Some(name) = discount_holder {
            stats.max_discount_holder = name.to_string();
        }

        stats
    }

    /// Render the statistics report and write it to `path`, overwriting
    ///
    /// # Returns
    ///
    /// The report text
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be written.
    pub fn write_report(&self, path: &Path) -> Result<String, RegistryError> {
        let report = render_report(&self.statistics(), Local::now().naive_local());

        match fs::write(path, &report) {
            Ok(()) => {
                self.log(
                    AuditCategory::Export,
                    format!("Report written to {}", path.display()),
                );
                Ok(report)
            }
            Err(error) => Err(self.fail("Report failed", error.into())),
        }
    }
}
