//! Core business logic module
//!
//! This module contains the customer registry components:
//! - `validation` - Field validators and the national ID checksum
//! - `traits` - The audit sink abstraction
//! - `audit` - Audit entries plus tracing-backed and in-memory sinks
//! - `config` - File locations
//! - `customer_store` - The record store and all of its operations

pub mod audit;
pub mod config;
pub mod customer_store;
pub mod traits;
pub mod validation;

pub use audit::{AuditCategory, AuditEntry, MemoryAuditSink, Severity, TracingAuditSink};
pub use config::RegistryConfig;
pub use customer_store::CustomerStore;
pub use traits::AuditSink;
