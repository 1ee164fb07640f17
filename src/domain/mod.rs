// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the core domain types for the configuration crate:
//! the parsed document, keys, raw values, and errors. It is independent of
//! any file-format or filesystem concerns.

pub mod config_key;
pub mod config_value;
pub mod document;
pub mod errors;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use document::{ConfigDocument, ConfigSection};
pub use errors::{ConfigError, Result};
