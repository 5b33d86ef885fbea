//! Error types for configuration loading and manipulation
//!
//! Everything fallible in the library surfaces as a [`ConfigError`]. The
//! variants group into four classes (file, format, validation, misuse);
//! [`ConfigError::exit_code`] maps each class to a distinct CLI exit status.

use crate::format::Format;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed at the I/O level.
    #[error("error accessing config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly given config path does not exist.
    #[error("config file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// No file was found and neither defaults nor an env prefix were given.
    #[error("no config file found and no defaults or environment prefix to fall back on")]
    NoSource,

    /// The input could not be parsed in the selected format.
    #[error("invalid {format} config: {message}")]
    Parse { format: Format, message: String },

    /// The value tree could not be rendered in the selected format.
    #[error("cannot serialize to {format}: {message}")]
    Serialize { format: Format, message: String },

    /// The target format cannot represent part of the value tree.
    #[error("{format} cannot represent {reason} at '{path}'")]
    Unrepresentable {
        format: Format,
        path: String,
        reason: String,
    },

    /// No explicit format and the file extension is not recognized.
    #[error("cannot determine config format for {}", path.display())]
    UnknownFormat { path: PathBuf },

    /// One or more required keys are absent from the merged config.
    #[error("missing required configuration keys: {}", missing.join(", "))]
    MissingKeys { missing: Vec<String> },

    /// Strict navigation reached a key that does not exist.
    #[error("key not found: {path}")]
    KeyNotFound { path: String },

    /// `save` was called with no target path and no originating file.
    #[error("no config path available for saving")]
    NoSavePath,
}

impl ConfigError {
    /// Full list of missing keys for validation failures, `None` otherwise.
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            ConfigError::MissingKeys { missing } => Some(missing),
            _ => None,
        }
    }

    /// Process exit status for the CLI: file errors 2, format errors 3,
    /// validation errors 4, everything else 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigError::Io { .. } | ConfigError::FileNotFound { .. } | ConfigError::NoSource => 2,
            ConfigError::Parse { .. }
            | ConfigError::Serialize { .. }
            | ConfigError::Unrepresentable { .. }
            | ConfigError::UnknownFormat { .. } => 3,
            ConfigError::MissingKeys { .. } => 4,
            ConfigError::KeyNotFound { .. } | ConfigError::NoSavePath => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_message_lists_all() {
        let err = ConfigError::MissingKeys {
            missing: vec!["a.b".to_string(), "c".to_string()],
        };
        assert_eq!(err.to_string(), "missing required configuration keys: a.b, c");
        assert_eq!(err.missing_keys(), Some(&["a.b".to_string(), "c".to_string()][..]));
    }

    #[test]
    fn test_exit_codes_distinct_per_class() {
        let file = ConfigError::FileNotFound { path: "x.yaml".into() };
        let format = ConfigError::UnknownFormat { path: "x.dat".into() };
        let validation = ConfigError::MissingKeys { missing: vec![] };
        let misuse = ConfigError::NoSavePath;
        assert_eq!(file.exit_code(), 2);
        assert_eq!(format.exit_code(), 3);
        assert_eq!(validation.exit_code(), 4);
        assert_eq!(misuse.exit_code(), 1);
    }
}
