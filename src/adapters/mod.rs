// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the file-format and filesystem implementations.
//!
//! This module contains the concrete INI parser and the file-backed loader
//! that together implement the ports defined in the ports layer.

pub mod ini_file;

pub use ini_file::{IniFileAdapter, IniParser};
