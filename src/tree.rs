//! Merged configuration tree and its loader
//!
//! [`ConfigLoader`] is a builder over every construction input: file path,
//! in-memory defaults, environment prefix, search directories, explicit
//! format, required keys. [`ConfigTree`] owns the merged result and exposes
//! dot-path accessors, in-place mutation, save, and reload. Reload re-runs
//! the whole pipeline against the originally resolved file, discarding any
//! in-memory edits.

use crate::env;
use crate::error::{ConfigError, Result};
use crate::format::{Format, KNOWN_EXTENSIONS};
use crate::merge;
use crate::path::{self, DotPath};
use crate::validate;
use crate::value::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Base file names probed in each search directory, in priority order.
const SEARCH_BASE_NAMES: &[&str] = &["config", "settings", "app_config"];

/// Builder collecting the inputs a [`ConfigTree`] is constructed from.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    defaults: Map,
    env_prefix: Option<String>,
    search_paths: Vec<PathBuf>,
    format: Option<Format>,
    required: Vec<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit config file path. Skips search-path discovery.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Programmatic defaults, the lowest-precedence layer.
    pub fn defaults(mut self, defaults: Map) -> Self {
        self.defaults = defaults;
        self
    }

    /// Environment variable prefix, e.g. `APP_`. Highest-precedence layer.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Directories to probe for a config file when no explicit path is set.
    pub fn search_paths<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Force a format instead of inferring it from the file extension.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Dot-paths that must be present in the merged result.
    pub fn required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Run the pipeline: resolve the file, parse it, collect env overrides,
    /// merge all layers, and validate required keys.
    pub fn load(self) -> Result<ConfigTree> {
        let resolved = match self.path.clone() {
            Some(path) => Some(path),
            None => discover(&self.search_paths),
        };

        if resolved.is_none()
            && !self.search_paths.is_empty()
            && self.defaults.is_empty()
            && self.env_prefix.is_none()
        {
            return Err(ConfigError::NoSource);
        }

        let mut file_map = None;
        let mut used_format = None;
        if let Some(ref file) = resolved {
            let format = Format::resolve(file, self.format)?;
            let text = fs::read_to_string(file).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::FileNotFound { path: file.clone() },
                _ => ConfigError::Io {
                    path: file.clone(),
                    source: e,
                },
            })?;
            debug!("parsing {} as {format}", file.display());
            file_map = Some(format.parse(&text)?);
            used_format = Some(format);
            info!("loaded config from {}", file.display());
        }

        let overrides = match &self.env_prefix {
            Some(prefix) => env::collect(std::env::vars(), prefix),
            None => Vec::new(),
        };

        let root = merge::merge_sources(Some(&self.defaults), file_map.as_ref(), &overrides);

        if !self.required.is_empty() {
            validate::validate(&root, &self.required)?;
        }

        Ok(ConfigTree {
            root,
            path: resolved,
            format: used_format,
            inputs: self,
        })
    }
}

fn discover(search_paths: &[PathBuf]) -> Option<PathBuf> {
    for dir in search_paths {
        for base in SEARCH_BASE_NAMES {
            for ext in KNOWN_EXTENSIONS {
                let candidate = dir.join(format!("{base}.{ext}"));
                if candidate.is_file() {
                    info!("found config file at {}", candidate.display());
                    return Some(candidate);
                }
            }
        }
    }
    if !search_paths.is_empty() {
        warn!("no config file found in search paths");
    }
    None
}

/// The merged configuration: one owned value tree plus the metadata needed
/// to save it back and reload it.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: Value,
    path: Option<PathBuf>,
    format: Option<Format>,
    inputs: ConfigLoader,
}

impl ConfigTree {
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load from a single file with no other layers.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().path(path).load()
    }

    /// Build from an in-memory mapping alone.
    pub fn from_value(defaults: Map) -> Self {
        ConfigTree {
            root: Value::Mapping(defaults.clone()),
            path: None,
            format: None,
            inputs: ConfigLoader::new().defaults(defaults),
        }
    }

    /// Build from environment variables alone.
    pub fn from_env(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let overrides = env::collect(std::env::vars(), &prefix);
        ConfigTree {
            root: merge::merge_sources(None, None, &overrides),
            path: None,
            format: None,
            inputs: ConfigLoader::new().env_prefix(prefix),
        }
    }

    /// Forgiving lookup: `None` when the path is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        path::get(&self.root, &DotPath::parse(key))
    }

    /// Forgiving lookup with a fallback value.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Write `value` at `key`, creating intermediate mappings as needed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        path::set(&mut self.root, &DotPath::parse(key), value.into());
    }

    /// Deep-merge `mapping` into the tree at `prefix` (or at the root).
    pub fn update(&mut self, mapping: Map, prefix: Option<&str>) {
        let at = DotPath::parse(prefix.unwrap_or(""));
        let merged = match path::get(&self.root, &at).cloned() {
            Some(existing) => merge::deep_merge(existing, Value::Mapping(mapping)),
            None => Value::Mapping(mapping),
        };
        path::set(&mut self.root, &at, merged);
    }

    /// Key/value pairs of the top level, or of one named top-level section.
    /// Pairs are copied out fresh on every call, not a live view.
    pub fn items(&self, section: Option<&str>) -> Vec<(String, Value)> {
        match section {
            None => collect_pairs(Some(&self.root)),
            Some(name) => self.section_items(name),
        }
    }

    /// Key/value pairs of the mapping at a dotted section path; empty when
    /// the path is absent or not a mapping.
    pub fn section_items(&self, section_path: &str) -> Vec<(String, Value)> {
        collect_pairs(path::get(&self.root, &DotPath::parse(section_path)))
    }

    /// Strict navigation entry point; see [`NodeView`].
    pub fn view(&self) -> NodeView<'_> {
        NodeView {
            value: &self.root,
            trail: String::new(),
        }
    }

    /// Serialize the current state.
    ///
    /// Without arguments the originating path and format are reused. With a
    /// `path`, the format override wins, else the target extension must be
    /// recognized. Parent directories are created.
    pub fn save(&self, path: Option<&Path>, format: Option<Format>) -> Result<()> {
        let target: PathBuf = path
            .map(Path::to_path_buf)
            .or_else(|| self.path.clone())
            .ok_or(ConfigError::NoSavePath)?;

        let chosen = match (format, path) {
            (Some(chosen), _) => chosen,
            (None, Some(explicit)) => Format::resolve(explicit, None)?,
            (None, None) => self
                .format
                .or_else(|| Format::from_extension(&target))
                .ok_or_else(|| ConfigError::UnknownFormat {
                    path: target.clone(),
                })?,
        };

        let map = self.root.as_mapping().ok_or_else(|| ConfigError::Unrepresentable {
            format: chosen,
            path: String::new(),
            reason: format!("a top-level {}", self.root.type_name()),
        })?;
        let rendered = chosen.serialize(map)?;

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                    path: target.clone(),
                    source: e,
                })?;
            }
        }
        fs::write(&target, rendered).map_err(|e| ConfigError::Io {
            path: target.clone(),
            source: e,
        })?;
        info!("saved config to {}", target.display());
        Ok(())
    }

    /// Re-run the construction pipeline, discarding in-memory edits.
    ///
    /// The file resolved at construction time stays pinned: discovery is not
    /// repeated, so a tree keeps reloading the same file it first found.
    pub fn reload(&mut self) -> Result<()> {
        let mut inputs = self.inputs.clone();
        if inputs.path.is_none() {
            inputs.path = self.path.clone();
        }
        let fresh = inputs.load()?;
        self.root = fresh.root;
        self.path = fresh.path;
        self.format = fresh.format;
        Ok(())
    }

    /// The file this tree was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The format the tree was loaded with, if it came from a file.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}

fn collect_pairs(value: Option<&Value>) -> Vec<(String, Value)> {
    value
        .and_then(Value::as_mapping)
        .map(|map| {
            map.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Strict, step-at-a-time navigation over the tree.
///
/// Where [`ConfigTree::get`] answers absence with `None`, `key` fails with
/// [`ConfigError::KeyNotFound`] naming the full dotted path reached so far.
/// A view borrows the tree; it is never a parallel copy of the data.
#[derive(Debug, Clone)]
pub struct NodeView<'a> {
    value: &'a Value,
    trail: String,
}

impl<'a> NodeView<'a> {
    /// Descend one mapping key, strictly.
    pub fn key(&self, name: &str) -> Result<NodeView<'a>> {
        let full = if self.trail.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.trail)
        };
        let child = self
            .value
            .as_mapping()
            .and_then(|map| map.get(name))
            .ok_or(ConfigError::KeyNotFound { path: full.clone() })?;
        Ok(NodeView {
            value: child,
            trail: full,
        })
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }
}
