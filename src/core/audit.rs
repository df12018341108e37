//! Audit entries and the bundled sinks
//!
//! - [`TracingAuditSink`] forwards every entry as a structured `tracing` event
//! - [`MemoryAuditSink`] keeps entries in memory so they can be inspected

use crate::core::traits::AuditSink;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Severity attached to an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// What kind of operation an entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditCategory {
    /// A record was added
    Add,
    /// A record was deleted
    Delete,
    /// A lookup or listing ran
    Lookup,
    /// A record was updated
    Update,
    /// An operation failed
    Error,
    /// Records or a report were written out
    Export,
    /// Records were read in
    Import,
    /// Informational note (backup created)
    Info,
    /// Non-fatal problem (backup failed)
    Warning,
}

impl AuditCategory {
    /// Label written to the audit trail
    pub fn as_str(self) -> &'static str {
        match self {
            AuditCategory::Add => "ALTA",
            AuditCategory::Delete => "BAJA",
            AuditCategory::Lookup => "CONSULTA",
            AuditCategory::Update => "ACTUALIZACIÓN",
            AuditCategory::Error => "ERROR",
            AuditCategory::Export => "EXPORTACIÓN",
            AuditCategory::Import => "IMPORTACIÓN",
            AuditCategory::Info => "INFORMACIÓN",
            AuditCategory::Warning => "ADVERTENCIA",
        }
    }

    /// Severity entries of this category are recorded at
    pub fn severity(self) -> Severity {
        match self {
            AuditCategory::Lookup => Severity::Debug,
            AuditCategory::Error => Severity::Error,
            AuditCategory::Warning => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (severity, category, message) tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub severity: Severity,
    pub category: AuditCategory,
    pub message: String,
}

impl AuditEntry {
    /// Entry at the category's default severity
    pub fn new(category: AuditCategory, message: impl Into<String>) -> Self {
        AuditEntry {
            severity: category.severity(),
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.category, self.message)
    }
}

/// Sink that emits each entry as a `tracing` event under the `audit` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: AuditEntry) {
        let category = entry.category.as_str();
        match entry.severity {
            Severity::Debug => tracing::debug!(target: "audit", category, "{}", entry.message),
            Severity::Info => tracing::info!(target: "audit", category, "{}", entry.message),
            Severity::Warning => tracing::warn!(target: "audit", category, "{}", entry.message),
            Severity::Error => tracing::error!(target: "audit", category, "{}", entry.message),
        }
    }
}

/// Sink that stores entries in memory
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every entry recorded so far
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries recorded in `category`
    pub fn count(&self, category: AuditCategory) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| entry.category == category)
            .count()
    }

    /// Number of entries recorded so far
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every recorded entry
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: AuditEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AuditCategory::Add, "ALTA", Severity::Info)]
    #[case(AuditCategory::Delete, "BAJA", Severity::Info)]
    #[case(AuditCategory::Lookup, "CONSULTA", Severity::Debug)]
    #[case(AuditCategory::Update, "ACTUALIZACIÓN", Severity::Info)]
    #[case(AuditCategory::Error, "ERROR", Severity::Error)]
    #[case(AuditCategory::Export, "EXPORTACIÓN", Severity::Info)]
    #[case(AuditCategory::Import, "IMPORTACIÓN", Severity::Info)]
    #[case(AuditCategory::Info, "INFORMACIÓN", Severity::Info)]
    #[case(AuditCategory::Warning, "ADVERTENCIA", Severity::Warning)]
    fn test_category_labels_and_severity(
        #[case] category: AuditCategory,
        #[case] label: &str,
        #[case] severity: Severity,
    ) {
        assert_eq!(category.as_str(), label);
        assert_eq!(AuditEntry::new(category, "x").severity, severity);
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemoryAuditSink::new();
        sink.record(AuditEntry::new(AuditCategory::Add, "first"));
        sink.record(AuditEntry::new(AuditCategory::Error, "second"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].to_string(), "ERROR - second");
        assert_eq!(sink.count(AuditCategory::Error), 1);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sink_through_reference() {
        let sink = MemoryAuditSink::new();
        let borrowed = &sink;
        borrowed.record(AuditEntry::new(AuditCategory::Lookup, "query"));
        assert_eq!(sink.len(), 1);
    }
}
