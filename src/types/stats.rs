//! Aggregate figures produced by the store

use rust_decimal::Decimal;
use std::fmt;

/// Placeholder name when no record of a variant exists
pub const NO_HOLDER: &str = "N/A";

/// Outcome of one import call
///
/// Ephemeral: produced per call and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportStats {
    /// Rows read from the file
    pub total: usize,
    /// Rows appended to the store
    pub succeeded: usize,
    /// Rows skipped because their email was already present
    pub duplicates: usize,
    /// Rows that failed to parse or validate
    pub errors: usize,
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={}, succeeded={}, duplicates={}, errors={}",
            self.total, self.succeeded, self.duplicates, self.errors
        )
    }
}

/// Snapshot of the store's composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    /// Records with no variant-specific fields
    pub base: usize,
    pub standard: usize,
    pub premium: usize,
    pub corporate: usize,
    /// Highest loyalty point balance among standard customers (0 when none)
    pub max_loyalty_points: u64,
    /// Earliest-inserted standard customer holding `max_loyalty_points`
    pub max_loyalty_points_holder: String,
    /// Highest discount among premium customers (0 when none)
    pub max_discount: Decimal,
    /// Earliest-inserted premium customer holding `max_discount`
    pub max_discount_holder: String,
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics {
            total: 0,
            base: 0,
            standard: 0,
            premium: 0,
            corporate: 0,
            max_loyalty_points: 0,
            max_loyalty_points_holder: NO_HOLDER.to_string(),
            max_discount: Decimal::ZERO,
            max_discount_holder: NO_HOLDER.to_string(),
        }
    }
}
