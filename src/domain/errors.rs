// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when parsing, loading,
//! or accessing pipeline configuration values. All errors use `thiserror`.
//! Configuration loading has no transient failure modes, so none of these
//! errors is ever retried internally; every failure propagates to the caller
//! and is expected to abort pipeline startup.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when reading,
/// parsing, or accessing configuration values. It is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use clipcfg::domain::errors::ConfigError;
///
/// fn get_config_value() -> Result<String, ConfigError> {
///     Err(ConfigError::KeyNotFound {
///         key: "star.threads".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A line in the configuration file matched neither a section header,
    /// a key/value pair, a comment, nor a blank line.
    #[error("Malformed configuration at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// Description of what was wrong with the line
        message: String,
    },

    /// The requested section/key pair was not present in the document.
    #[error("Configuration key not found: {key}")]
    KeyNotFound {
        /// The key that was not found, as `section.key`
        key: String,
    },

    /// One or more required keys were absent from a section.
    ///
    /// All missing keys are listed, not just the first, so the user gets a
    /// complete diagnostic in a single pipeline startup failure.
    #[error("Section '{section}' is missing required keys: {}", .keys.join(", "))]
    MissingKeys {
        /// The section that was validated
        section: String,
        /// Every required key that was absent
        keys: Vec<String>,
    },

    /// Failed to convert a raw configuration value to the requested type.
    #[error("Failed to convert value for key '{key}' to type {target_type}: {source}")]
    TypeConversion {
        /// The key being converted, as `section.key`
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configuration file could not be read.
    #[error("Configuration source '{source_name}' error: {message}")]
    Source {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `TypeConversion` error from a `ParseIntError`.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a `TypeConversion` error from a `ParseFloatError`.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a `TypeConversion` error for a boolean that matched none of
    /// the recognized spellings.
    pub fn invalid_bool(key: String, value: &str) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "boolean".to_string(),
            source: format!("unrecognized boolean value '{value}'").into(),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
