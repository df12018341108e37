//! Core traits
//!
//! The audit sink is the collaborator the store reports to. The store does
//! not prescribe where entries end up; it only guarantees one entry per
//! mutating operation and one per failure.

use crate::core::audit::AuditEntry;

/// Receiver of audit entries
///
/// Implementations take `&self` so lookups can be audited without requiring
/// mutable access to the store.
pub trait AuditSink {
    /// Record one entry
    fn record(&self, entry: AuditEntry);
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn record(&self, entry: AuditEntry) {
        (**self).record(entry);
    }
}
