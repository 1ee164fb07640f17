// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key type addressing an option inside a section.
//!
//! This module provides the `ConfigKey` type, which names a single option in
//! the configuration document by its section and key. Using a dedicated type
//! instead of bare strings prevents accidental mixing of section names and
//! option keys and makes error messages uniform (`section.key`).

use std::fmt;

/// The address of a configuration option: a section name plus an option key.
///
/// Displayed and reported in errors as `section.key`, e.g. `star.threads`.
///
/// # Examples
///
/// ```
/// use clipcfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::new("star", "threads");
/// assert_eq!(key.section(), "star");
/// assert_eq!(key.key(), "threads");
/// assert_eq!(key.to_string(), "star.threads");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    section: String,
    key: String,
}

impl ConfigKey {
    /// Creates a new `ConfigKey` from a section name and an option key.
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        ConfigKey {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Returns the section name.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the option key within the section.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl From<(&str, &str)> for ConfigKey {
    fn from((section, key): (&str, &str)) -> Self {
        ConfigKey::new(section, key)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}
