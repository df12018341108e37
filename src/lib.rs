//! Customer Registry Library
//! # Overview
//!
//! This library manages customer records: validated construction of three
//! customer variants, an in-memory store with lookup/update/delete, flat-file
//! export and import (with a backup before import), and aggregate statistics.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Customer and its variants, errors, statistics)
//! - [`cli`] - CLI arguments parsing and the command runner
//! - [`core`] - Business logic components:
//!   - [`core::validation`] - Field validators and the national ID checksum
//!   - [`core::customer_store`] - The record store
//!   - [`core::audit`] - Audit entries and sinks
//! - [`io`] - Flat-file format, backups and text reports
//!
//! # Customer Variants
//!
//! Every customer carries a name, an email (the identity key, stored
//! lowercased), a phone and an address. On top of that a customer is one of:
//!
//! - **Base**: no extra fields
//! - **Standard**: loyalty points that can be accumulated and redeemed
//! - **Premium**: an exclusive discount in [0, 100] and a membership date
//! - **Corporate**: company name, checksum-validated company ID and a
//!   primary contact
//!
//! # Store Guarantees
//!
//! - At most one record per normalized email
//! - Insertion order is kept; lookups return the first match
//! - One audit entry per mutating operation and per failure
//! - Import never aborts on a bad row; only a missing file fails the batch

pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{AuditSink, CustomerStore, MemoryAuditSink, RegistryConfig, TracingAuditSink};
pub use io::write_customers_csv;
pub use types::{
    Contact, CorporateProfile, Customer, CustomerField, CustomerKind, CustomerType,
    ImportStats, PremiumProfile, RegistryError, StandardProfile, Statistics,
};
