// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! This module provides the `ConfigValue` type, which wraps raw configuration
//! values and provides type-safe conversion methods to various Rust types.
//! The INI format carries no type annotations, so every value is stored as a
//! string and interpreted at the point of use.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A type-safe wrapper for raw configuration values.
///
/// `ConfigValue` stores configuration values as strings internally and
/// provides conversion methods to common Rust types. This lets the parser
/// return a uniform type while still providing type safety at the point of
/// use. Memory budget strings like `"1.9G"` stay verbatim via [`as_str`];
/// numeric options convert via [`as_u32`] and friends.
///
/// [`as_str`]: ConfigValue::as_str
/// [`as_u32`]: ConfigValue::as_u32
///
/// # Examples
///
/// ```
/// use clipcfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::new("12".to_string());
/// assert_eq!(value.as_str(), "12");
/// assert_eq!(value.as_u32("star.threads").unwrap(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the raw value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the value into a `String`.
    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    /// Returns `true` when the raw value is the empty string.
    ///
    /// Empty values are legal in the file format and represent an option that
    /// is present but unset, triggering whatever default the consumer applies.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes the following values (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use clipcfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("1");
    /// assert!(value.as_bool("general.strip_sequence").unwrap());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self.0.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            other => Err(ConfigError::invalid_bool(key.to_string(), other)),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.0
            .parse::<i32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipcfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("12");
    /// assert_eq!(value.as_u32("star.threads").unwrap(), 12);
    /// ```
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        self.0
            .parse::<u32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.0
            .parse::<u64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        self.0
            .parse::<f64>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }

    /// Interprets the value as a filesystem path.
    ///
    /// No existence check is performed; genome and annotation paths often
    /// point at shared cluster filesystems that are not mounted where the
    /// configuration is validated.
    pub fn as_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Splits a comma-separated value into its trimmed entries.
    ///
    /// Used for options documented as lists, such as the cluster
    /// `memory_resource` option. An empty raw value yields an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipcfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("mem_free, h_vmem");
    /// assert_eq!(value.as_list(), vec!["mem_free", "h_vmem"]);
    /// ```
    pub fn as_list(&self) -> Vec<String> {
        if self.0.trim().is_empty() {
            return Vec::new();
        }
        self.0.split(',').map(|s| s.trim().to_string()).collect()
    }

    /// Parses the value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipcfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("20");
    /// let n: usize = value.parse("reads.min_length").unwrap();
    /// assert_eq!(n, 20);
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.0
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversion {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_new() {
        let value = ConfigValue::new("hg19".to_string());
        assert_eq!(value.as_str(), "hg19");
    }

    #[test]
    fn test_config_value_display() {
        let value = ConfigValue::from("1.9G");
        assert_eq!(format!("{}", value), "1.9G");
    }

    #[test]
    fn test_as_bool_true_variants() {
        for val in ["true", "True", "TRUE", "yes", "Yes", "1", "on", "On"] {
            let value = ConfigValue::from(val);
            assert!(
                value.as_bool("test.key").unwrap(),
                "Failed for value: {}",
                val
            );
        }
    }

    #[test]
    fn test_as_bool_false_variants() {
        for val in ["false", "False", "FALSE", "no", "No", "0", "off", "Off"] {
            let value = ConfigValue::from(val);
            assert!(
                !value.as_bool("test.key").unwrap(),
                "Failed for value: {}",
                val
            );
        }
    }

    #[test]
    fn test_as_bool_invalid() {
        let value = ConfigValue::from("maybe");
        assert!(value.as_bool("test.key").is_err());
    }

    #[test]
    fn test_as_i32() {
        let value = ConfigValue::from("-42");
        assert_eq!(value.as_i32("test.key").unwrap(), -42);
    }

    #[test]
    fn test_as_u32() {
        let value = ConfigValue::from("12");
        assert_eq!(value.as_u32("star.threads").unwrap(), 12);
    }

    #[test]
    fn test_as_u32_invalid() {
        assert!(ConfigValue::from("-1").as_u32("test.key").is_err());
        assert!(ConfigValue::from("1.9G").as_u32("test.key").is_err());
    }

    #[test]
    fn test_as_u64() {
        let value = ConfigValue::from("18446744073709551615");
        assert_eq!(value.as_u64("test.key").unwrap(), 18446744073709551615);
    }

    #[test]
    fn test_as_f64() {
        let value = ConfigValue::from("1.9");
        assert_eq!(value.as_f64("test.key").unwrap(), 1.9);
    }

    #[test]
    fn test_as_f64_invalid() {
        let value = ConfigValue::from("1.9G");
        assert!(value.as_f64("test.key").is_err());
    }

    #[test]
    fn test_memory_budget_stays_verbatim() {
        // Memory budgets like "1.9G" are strings to the consumer, never numbers.
        let value = ConfigValue::from("1.9G");
        assert_eq!(value.as_str(), "1.9G");
    }

    #[test]
    fn test_as_path() {
        let value = ConfigValue::from("/shared/genomes/bowtie");
        assert_eq!(value.as_path(), PathBuf::from("/shared/genomes/bowtie"));
    }

    #[test]
    fn test_as_list() {
        let value = ConfigValue::from("mem_free,h_vmem");
        assert_eq!(value.as_list(), vec!["mem_free", "h_vmem"]);
    }

    #[test]
    fn test_as_list_trims_entries() {
        let value = ConfigValue::from(" mem_free , h_vmem ");
        assert_eq!(value.as_list(), vec!["mem_free", "h_vmem"]);
    }

    #[test]
    fn test_as_list_empty() {
        let value = ConfigValue::from("");
        assert!(value.as_list().is_empty());
    }

    #[test]
    fn test_as_list_single_entry() {
        let value = ConfigValue::from("mem_free");
        assert_eq!(value.as_list(), vec!["mem_free"]);
    }

    #[test]
    fn test_parse_custom_type() {
        let value = ConfigValue::from("20");
        let n: usize = value.parse("reads.min_length").unwrap();
        assert_eq!(n, 20);
    }

    #[test]
    fn test_parse_invalid() {
        let value = ConfigValue::from("twenty");
        let result: Result<usize> = value.parse("reads.min_length");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_empty() {
        assert!(ConfigValue::from("").is_empty());
        assert!(!ConfigValue::from("x").is_empty());
    }

    #[test]
    fn test_empty_string_preserved() {
        let value = ConfigValue::from("");
        assert_eq!(value.as_str(), "");
    }
}
