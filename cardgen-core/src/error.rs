// SPDX-License-Identifier: MIT
//
// Cardgen: Luhn-Valid Test Card Generator
// Copyright (c) 2025 Valer Bocan, PhD, CSSLP
// Email: valer.bocan@upt.ro
//
// Department of Computer and Information Technology
// Politehnica University of Timisoara
//
// https://github.com/vbocan/qrng-data-diode

//! Error types for card generation
//!
//! Provides a unified error taxonomy using `thiserror` for ergonomic error handling.

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for card generation operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export or copy action could not be carried out
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error was caused by bad user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Build a validation error for a named form field
    pub fn field(name: &str, reason: impl std::fmt::Display) -> Self {
        Error::Validation(format!("{}: {}", name, reason))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        assert!(Error::field("prefix", "must contain only digits").is_user_error());
        assert!(!Error::Config("bad".to_string()).is_user_error());
        assert!(!Error::Io(std::io::Error::other("denied")).is_user_error());
    }

    #[test]
    fn test_field_error_message() {
        let err = Error::field("cvv", "must be 3-4 digits");
        assert_eq!(err.to_string(), "Validation error: cvv: must be 3-4 digits");
    }
}
