// SPDX-License-Identifier: MIT OR Apache-2.0

//! The parsed configuration document.
//!
//! This module provides `ConfigDocument`, an immutable mapping from section
//! names to sections of raw key/value options. The document is built once at
//! pipeline startup and only read afterwards; it has no interior mutability
//! and is safe to share across threads.

use crate::domain::config_key::ConfigKey;
use crate::domain::config_value::ConfigValue;
use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single named section: a mapping from option key to raw string value.
///
/// Keys are unique within a section. Sorted storage makes re-serialization
/// deterministic; option order carries no semantics in the file format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSection {
    options: BTreeMap<String, ConfigValue>,
}

impl ConfigSection {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.options.get(key)
    }

    /// Inserts an option, replacing any previous value for the same key.
    ///
    /// Last-wins replacement matches what the original pipeline's INI reader
    /// does with duplicate keys.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.options.insert(key.into(), value.into());
    }

    /// Returns `true` when the section holds no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Number of options in the section.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Iterates over `(key, value)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The root configuration entity: a mapping from section name to section.
///
/// Constructed once by the INI parser (or by [`merge`]-ing several parses),
/// then treated as read-only for the life of the process.
///
/// [`merge`]: ConfigDocument::merge
///
/// # Examples
///
/// ```
/// use clipcfg::domain::document::ConfigDocument;
/// use clipcfg::domain::config_key::ConfigKey;
///
/// let mut doc = ConfigDocument::new();
/// doc.insert("star", "threads", "12");
///
/// let value = doc.get(&ConfigKey::new("star", "threads")).unwrap();
/// assert_eq!(value.as_u32("star.threads").unwrap(), 12);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    sections: BTreeMap<String, ConfigSection>,
}

impl ConfigDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an option into `section`, creating the section if needed.
    ///
    /// Used by the parser while building the document; callers hold the
    /// finished document immutably.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key, value);
    }

    /// Returns the named section, if present.
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.get(name)
    }

    /// Iterates over `(section name, section)` pairs in sorted name order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &ConfigSection)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` when the document holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up the raw value at `key`.
    ///
    /// An absent section and an absent option are both reported as
    /// [`ConfigError::KeyNotFound`] with the full `section.key` address.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipcfg::domain::document::ConfigDocument;
    /// use clipcfg::domain::config_key::ConfigKey;
    ///
    /// let mut doc = ConfigDocument::new();
    /// doc.insert("star", "memory", "1.9G");
    ///
    /// let value = doc.get(&ConfigKey::new("star", "memory")).unwrap();
    /// assert_eq!(value.as_str(), "1.9G");
    ///
    /// assert!(doc.get(&ConfigKey::new("star", "missing_key")).is_err());
    /// ```
    pub fn get(&self, key: &ConfigKey) -> Result<&ConfigValue> {
        self.sections
            .get(key.section())
            .and_then(|section| section.get(key.key()))
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Looks up `key`, returning `default` when the key is absent.
    ///
    /// The default passes through unchanged; no type coercion is applied to it.
    pub fn get_or(&self, key: &ConfigKey, default: &str) -> ConfigValue {
        self.get(key)
            .cloned()
            .unwrap_or_else(|_| ConfigValue::from(default))
    }

    /// Returns `true` when `key` is present.
    pub fn has(&self, key: &ConfigKey) -> bool {
        self.get(key).is_ok()
    }

    /// Validates that every key in `keys` exists in `section`.
    ///
    /// All missing keys are collected into a single
    /// [`ConfigError::MissingKeys`] so a misconfigured pipeline fails startup
    /// with a complete diagnostic rather than one key at a time. An entirely
    /// absent section reports every requested key as missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipcfg::domain::document::ConfigDocument;
    ///
    /// let mut doc = ConfigDocument::new();
    /// doc.insert("bowtie", "executable", "bowtie");
    ///
    /// assert!(doc.require("bowtie", &["executable"]).is_ok());
    /// assert!(doc.require("bowtie", &["executable", "index_dir"]).is_err());
    /// ```
    pub fn require(&self, section: &str, keys: &[&str]) -> Result<()> {
        let missing: Vec<String> = match self.sections.get(section) {
            Some(sec) => keys
                .iter()
                .filter(|k| sec.get(k).is_none())
                .map(|k| k.to_string())
                .collect(),
            None => keys.iter().map(|k| k.to_string()).collect(),
        };

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingKeys {
                section: section.to_string(),
                keys: missing,
            })
        }
    }

    /// Overlays `other` onto this document.
    ///
    /// Options from `other` replace same-named options here; sections only
    /// present in one document are kept. This is how a search-path load
    /// combines several configuration files, later files winning.
    pub fn merge(&mut self, other: ConfigDocument) {
        for (name, section) in other.sections {
            let target = self.sections.entry(name).or_default();
            for (key, value) in section.options {
                target.options.insert(key, value);
            }
        }
    }

    /// Re-serializes the document in the INI file format.
    ///
    /// Sections and keys are emitted in sorted order. Parsing the output
    /// yields a document equal to this one (round-trip stability).
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for (name, section) in &self.sections {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for (key, value) in section.iter() {
                out.push_str(key);
                out.push('=');
                out.push_str(value.as_str());
                out.push('\n');
            }
        }
        out
    }
}
