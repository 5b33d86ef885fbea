//! Format adapters
//!
//! One parse/serialize pair per on-disk syntax, all speaking the canonical
//! value model. Format selection goes by explicit override first, then file
//! extension; an unrecognized extension with no override is an error rather
//! than a silent fallback.

pub mod ini;
pub mod json;
pub mod yaml;

use crate::error::{ConfigError, Result};
use crate::value::Map;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The supported configuration syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Ini,
}

/// File extensions probed during search-path discovery, highest priority
/// first.
pub const KNOWN_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "ini", "cfg", "conf"];

impl Format {
    /// Infer the format from a file extension, if recognized.
    pub fn from_extension(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "ini" | "cfg" | "conf" => Some(Format::Ini),
            _ => None,
        }
    }

    /// Resolve the effective format for `path`: explicit override wins,
    /// then the extension; otherwise the format is unknown.
    pub fn resolve(path: &Path, explicit: Option<Format>) -> Result<Format> {
        explicit
            .or_else(|| Format::from_extension(path))
            .ok_or_else(|| ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            })
    }

    /// Parse `text` into a nested mapping.
    pub fn parse(self, text: &str) -> Result<Map> {
        match self {
            Format::Yaml => yaml::parse(text),
            Format::Json => json::parse(text),
            Format::Ini => ini::parse(text),
        }
    }

    /// Render `map` in this format.
    pub fn serialize(self, map: &Map) -> Result<String> {
        match self {
            Format::Yaml => yaml::serialize(map),
            Format::Json => json::serialize(map),
            Format::Ini => ini::serialize(map),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "YAML"),
            Format::Json => write!(f, "JSON"),
            Format::Ini => write!(f, "INI"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "ini" => Ok(Format::Ini),
            other => Err(format!("unknown format '{other}' (expected yaml, json, or ini)")),
        }
    }
}
