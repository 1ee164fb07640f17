// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, the interface for turning
//! raw configuration text into a [`ConfigDocument`]. The pipeline ships with
//! an INI implementation; alternative formats only need a new implementation
//! of this trait.

use crate::domain::{ConfigDocument, Result};

/// A trait for parsing configuration file content.
///
/// Implementations convert the raw text of a configuration file into a
/// sectioned [`ConfigDocument`]. Parsing is pure: no filesystem access, no
/// side effects.
///
/// # Examples
///
/// ```rust
/// use clipcfg::ports::ConfigParser;
/// use clipcfg::domain::{ConfigDocument, Result};
///
/// struct MyParser;
///
/// impl ConfigParser for MyParser {
///     fn parse(&self, content: &str) -> Result<ConfigDocument> {
///         Ok(ConfigDocument::new())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["myformat"]
///     }
/// }
/// ```
pub trait ConfigParser {
    /// Parses configuration content into a document.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw content of the configuration file
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigDocument)` - The parsed document
    /// * `Err(ConfigError)` - A line could not be interpreted
    fn parse(&self, content: &str) -> Result<ConfigDocument>;

    /// Returns the file extensions supported by this parser.
    ///
    /// Extensions are listed without the leading dot and let callers select
    /// the appropriate parser from a file name.
    fn supported_extensions(&self) -> &[&str];
}
