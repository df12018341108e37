//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `customer`: the customer record and its variants
//! - `field`: field names accepted by updates
//! - `stats`: import and store statistics
//! - `error`: Error types for the registry

pub mod customer;
pub mod error;
pub mod field;
pub mod stats;

pub use customer::{
    Contact, CorporateProfile, Customer, CustomerKind, CustomerType, PremiumProfile,
    StandardProfile, TaxProfile, DEFAULT_PREMIUM_DISCOUNT,
};
pub use error::RegistryError;
pub use field::{CustomerField, FieldSetter};
pub use stats::{ImportStats, Statistics, NO_HOLDER};
