//! confstack: layered configuration resolution
//!
//! Loads structured configuration from YAML, JSON, or INI files, layers
//! environment-variable overrides and programmatic defaults on top in a
//! fixed precedence order (defaults < file < environment), and exposes the
//! merged result through dot-path addressing. The merged tree can be
//! serialized back to any supported format.
//!
//! ```no_run
//! use confstack::ConfigTree;
//!
//! let tree = ConfigTree::builder()
//!     .path("config.yaml")
//!     .env_prefix("APP_")
//!     .required(["server.port"])
//!     .load()?;
//! let port = tree.get("server.port");
//! # Ok::<(), confstack::ConfigError>(())
//! ```

pub mod cli;
pub mod env;
pub mod error;
pub mod format;
pub mod merge;
pub mod path;
pub mod tree;
pub mod validate;
pub mod value;

pub use error::{ConfigError, Result};
pub use format::Format;
pub use tree::{ConfigLoader, ConfigTree, NodeView};
pub use value::{Map, Value};
