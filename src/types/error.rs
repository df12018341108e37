//! Error types for the customer registry
//!
//! This module defines every error that can surface from validation, entity
//! mutation, store operations and file handling. All of them are recoverable
//! by the caller; none is process-fatal.
//!
//! # Error Categories
//!
//! - **Field validation**: invalid email, phone, national ID or generic data
//! - **Store operations**: duplicate email, lookup miss, missing import source
//! - **Loyalty**: redemption beyond the available points
//! - **Plumbing**: I/O and CSV errors raised while reading or writing files

use thiserror::Error;

/// Main error type for the customer registry
///
/// Validators fail fast at the first violated rule, so a single value of this
/// type always describes exactly one problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// Email does not match `local@domain.tld`
    #[error("Invalid email '{value}'")]
    InvalidEmail {
        /// The rejected input, as supplied
        value: String,
    },

    /// Phone does not match either accepted mobile shape
    #[error("Invalid phone '{value}': use +56912345678 or 0912345678")]
    InvalidPhone {
        /// The rejected input, as supplied
        value: String,
    },

    /// National ID is malformed or carries the wrong check character
    #[error("Invalid national ID '{value}': {reason}")]
    InvalidId {
        /// The rejected input, as supplied
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Generic field validation failure
    #[error("Invalid value for '{field}': {message}")]
    DataInvalid {
        /// Name of the offending field
        field: String,
        /// Description of the violated rule
        message: String,
    },

    /// A record with the same normalized email is already stored
    #[error("Customer with email {email} already exists")]
    AlreadyExists {
        /// The conflicting (lowercased) email
        email: String,
    },

    /// No record matches the lookup used by update/delete
    #[error("Customer '{query}' not found")]
    NotFound {
        /// The query that produced no match
        query: String,
    },

    /// Import source does not exist
    ///
    /// The only batch-fatal condition of an import.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Redemption asked for more points than the customer holds
    #[error("Not enough points: available {available}, requested {requested}")]
    RedemptionFailure {
        /// Points currently held
        available: u64,
        /// Points the caller tried to redeem
        requested: u64,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing or writing error
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the CSV error
        message: String,
    },
}

impl From<std::io::Error> for RegistryError {
    fn from(error: std::io::Error) -> Self {
        RegistryError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for RegistryError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        RegistryError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl RegistryError {
    /// Create an InvalidEmail error
    pub fn invalid_email(value: &str) -> Self {
        RegistryError::InvalidEmail {
            value: value.to_string(),
        }
    }

    /// Create an InvalidPhone error
    pub fn invalid_phone(value: &str) -> Self {
        RegistryError::InvalidPhone {
            value: value.to_string(),
        }
    }

    /// Create an InvalidId error
    pub fn invalid_id(value: &str, reason: impl Into<String>) -> Self {
        RegistryError::InvalidId {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a DataInvalid error
    pub fn data_invalid(field: &str, message: impl Into<String>) -> Self {
        RegistryError::DataInvalid {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Create an AlreadyExists error
    pub fn already_exists(email: &str) -> Self {
        RegistryError::AlreadyExists {
            email: email.to_string(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(query: &str) -> Self {
        RegistryError::NotFound {
            query: query.to_string(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        RegistryError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a RedemptionFailure error
    pub fn redemption_failure(available: u64, requested: u64) -> Self {
        RegistryError::RedemptionFailure {
            available,
            requested,
        }
    }
}
