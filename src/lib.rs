// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed INI configuration loading for an iCLIP sequencing pipeline.
//!
//! This crate parses the `pipeline.ini` file that parametrizes an iCLIP
//! analysis pipeline (genome and annotation paths, mapper selection, thread
//! and memory budgets, adapter sequences, cluster submission settings) into
//! an immutable, queryable document, and optionally into a fully typed
//! schema validated in one pass at startup.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigDocument`, `ConfigKey`,
//!   `ConfigValue`, errors)
//! - **Ports**: The `ConfigParser` trait
//! - **Adapters**: The INI parser and file-backed loader
//! - **Schema**: The typed pipeline configuration with upfront validation
//!
//! # Failure semantics
//!
//! Loading happens once, early in process lifetime. Every failure (malformed
//! line, missing required key, uncoercible value) is surfaced synchronously
//! as a typed [`domain::ConfigError`]; nothing is retried and there is no
//! partial or degraded mode. After loading, the document is immutable and
//! safe to read from any number of threads.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clipcfg::prelude::*;
//!
//! # fn main() -> clipcfg::domain::Result<()> {
//! let adapter = IniFileAdapter::from_search_paths(&[
//!     "pipeline_iclip.ini",
//!     "../pipeline.ini",
//!     "pipeline.ini",
//! ])?;
//!
//! // Raw, stringly-typed access
//! let threads = adapter
//!     .document()
//!     .get(&ConfigKey::new("star", "threads"))?
//!     .as_u32("star.threads")?;
//!
//! // Or validate everything upfront into a typed structure
//! let config = PipelineConfig::from_document(adapter.document())?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod schema;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::adapters::{IniFileAdapter, IniParser};
    pub use crate::domain::{
        ConfigDocument, ConfigError, ConfigKey, ConfigSection, ConfigValue, Result,
    };
    pub use crate::ports::ConfigParser;
    pub use crate::schema::{Mapper, PipelineConfig};
}
