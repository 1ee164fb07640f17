// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI file configuration adapter.
//!
//! This module provides the line-based INI parser used for `pipeline.ini`
//! files and a file-backed loader with explicit-path, search-path, and
//! OS-default-location construction.

use crate::domain::{ConfigDocument, ConfigError, Result};
use crate::ports::ConfigParser;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for INI configuration files (1MB).
/// Pipeline configuration files are a few KB; anything larger is a mistake.
const MAX_INI_FILE_SIZE: u64 = 1024 * 1024;

/// Source name used in error reporting.
const SOURCE_NAME: &str = "ini-file";

fn is_valid_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// INI parser implementation.
///
/// Grammar:
///
/// ```text
/// document   := (blank_line | comment | section)*
/// section    := "[" name "]" (blank_line | comment | option)*
/// option     := key "=" value
/// comment    := "#" ...
/// ```
///
/// Section names and keys are alphanumeric plus `_`, case-sensitive. The
/// value is everything after the first `=` with surrounding whitespace
/// trimmed, and may be empty. There is no quoting, escaping, or line
/// continuation.
///
/// # Examples
///
/// ```rust
/// use clipcfg::adapters::IniParser;
/// use clipcfg::ports::ConfigParser;
/// use clipcfg::domain::ConfigKey;
///
/// let parser = IniParser::new();
/// let doc = parser.parse("[star]\nthreads=12\n").unwrap();
/// assert_eq!(doc.get(&ConfigKey::new("star", "threads")).unwrap().as_str(), "12");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IniParser;

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }
}

impl ConfigParser for IniParser {
    fn parse(&self, content: &str) -> Result<ConfigDocument> {
        let mut document = ConfigDocument::new();
        let mut current_section: Option<String> = None;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| ConfigError::Parse {
                    line: line_no,
                    message: format!("unterminated section header '{raw_line}'"),
                })?;
                let name = name.trim();
                if !is_valid_name(name) {
                    return Err(ConfigError::Parse {
                        line: line_no,
                        message: format!("invalid section name '{name}'"),
                    });
                }
                current_section = Some(name.to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                if !is_valid_name(key) {
                    return Err(ConfigError::Parse {
                        line: line_no,
                        message: format!("invalid option key '{key}'"),
                    });
                }
                let section = current_section.as_deref().ok_or_else(|| ConfigError::Parse {
                    line: line_no,
                    message: format!("option '{key}' appears before any section header"),
                })?;
                document.insert(section, key, value.trim());
                continue;
            }

            return Err(ConfigError::Parse {
                line: line_no,
                message: format!("expected section header or 'key=value', found '{line}'"),
            });
        }

        Ok(document)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ini"]
    }
}

/// File-backed configuration loader.
///
/// Reads and parses an INI file once at construction. The resulting
/// [`ConfigDocument`] is immutable for the rest of the process; readers on
/// any thread may share it freely.
///
/// # Examples
///
/// ```rust,no_run
/// use clipcfg::adapters::IniFileAdapter;
///
/// // Load from an explicit path
/// let adapter = IniFileAdapter::from_file("pipeline.ini").unwrap();
///
/// // Load following the pipeline's search order, later files overriding
/// let adapter = IniFileAdapter::from_search_paths(&[
///     "pipeline_iclip.ini",
///     "../pipeline.ini",
///     "pipeline.ini",
/// ]).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct IniFileAdapter {
    /// Paths of the files that contributed to the document
    file_paths: Vec<PathBuf>,
    /// Parsed configuration document
    document: ConfigDocument,
}

impl IniFileAdapter {
    /// Loads a single configuration file.
    ///
    /// The path is canonicalized and the file size is checked against a 1MB
    /// cap before reading.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (canonical_path, document) = load_one(path.as_ref())?;
        Ok(Self {
            file_paths: vec![canonical_path],
            document,
        })
    }

    /// Loads every existing file in `paths`, merging them in order.
    ///
    /// Options from later files replace options from earlier files, matching
    /// how the pipeline layers a local `pipeline.ini` over shared defaults.
    /// Fails when none of the paths exists.
    pub fn from_search_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut file_paths = Vec::new();
        let mut document = ConfigDocument::new();

        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "skipping absent configuration file");
                continue;
            }
            let (canonical_path, parsed) = load_one(path)?;
            document.merge(parsed);
            file_paths.push(canonical_path);
        }

        if file_paths.is_empty() {
            return Err(ConfigError::Source {
                source_name: SOURCE_NAME.to_string(),
                message: format!(
                    "no configuration file found in search paths ({} candidates)",
                    paths.len()
                ),
                source: None,
            });
        }

        Ok(Self {
            file_paths,
            document,
        })
    }

    /// Loads `pipeline.ini` from the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "iclip")
    /// * `qualifier` - The organization/qualifier (e.g., "org.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::Source {
                source_name: SOURCE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        let config_file = proj_dirs.config_dir().join("pipeline.ini");
        Self::from_file(config_file)
    }

    /// Returns the parsed configuration document.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Consumes the adapter, returning the parsed document.
    pub fn into_document(self) -> ConfigDocument {
        self.document
    }

    /// Returns the canonical paths of the loaded files, in merge order.
    pub fn file_paths(&self) -> &[PathBuf] {
        &self.file_paths
    }
}

/// Reads, size-checks, and parses one file.
fn load_one(path: &Path) -> Result<(PathBuf, ConfigDocument)> {
    let canonical_path = path.canonicalize().map_err(|e| ConfigError::Source {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Invalid or inaccessible path: {}", path.display()),
        source: Some(Box::new(e)),
    })?;

    let metadata = fs::metadata(&canonical_path).map_err(|e| ConfigError::Source {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read file metadata: {}", canonical_path.display()),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_INI_FILE_SIZE {
        return Err(ConfigError::Source {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_INI_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(&canonical_path).map_err(|e| ConfigError::Source {
        source_name: SOURCE_NAME.to_string(),
        message: format!(
            "Failed to read configuration file: {}",
            canonical_path.display()
        ),
        source: Some(Box::new(e)),
    })?;

    let document = IniParser::new().parse(&content)?;
    tracing::debug!(
        path = %canonical_path.display(),
        sections = document.sections().count(),
        "loaded configuration file"
    );

    Ok((canonical_path, document))
}
