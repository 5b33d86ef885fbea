//! Dot-path addressing over nested mappings
//!
//! A [`DotPath`] names a location in a value tree by its mapping keys, one
//! segment per level. `get` is non-destructive and signals absence with
//! `None` (distinct from a present null); `set` creates intermediate
//! mappings on the way down, overwriting any non-mapping it runs into.

use crate::value::{Map, Value};
use std::fmt;

/// A parsed dot-separated key like `server.port`.
///
/// Zero segments address the root itself. Empty segments (doubled dots,
/// leading/trailing dots) are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPath {
    segments: Vec<String>,
}

impl DotPath {
    /// Split `key` on `.` into path segments.
    pub fn parse(key: &str) -> Self {
        Self::from_segments(key.split('.').map(str::to_string))
    }

    /// Build a path from pre-split segments, dropping empty ones.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
        Self { segments }
    }

    /// True when the path addresses the root mapping itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Look up `path` in `root`. Returns `None` when any segment is absent or
/// an intermediate node is not a mapping; a stored null is `Some(&Null)`.
pub fn get<'a>(root: &'a Value, path: &DotPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}

/// True when `path` resolves to a present value (null included).
pub fn has(root: &Value, path: &DotPath) -> bool {
    get(root, path).is_some()
}

/// Write `value` at `path`, creating intermediate mappings as needed.
///
/// An intermediate node that exists but is not a mapping is overwritten
/// with an empty mapping before descending. The empty path replaces the
/// root wholesale.
pub fn set(root: &mut Value, path: &DotPath, value: Value) {
    let Some((last, parents)) = path.segments().split_last() else {
        *root = value;
        return;
    };

    let mut current = root;
    for segment in parents {
        let map = ensure_mapping(current);
        current = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Mapping(Map::new()));
    }
    ensure_mapping(current).insert(last.clone(), value);
}

fn ensure_mapping(value: &mut Value) -> &mut Map {
    if !matches!(value, Value::Mapping(_)) {
        *value = Value::Mapping(Map::new());
    }
    match value {
        Value::Mapping(map) => map,
        _ => unreachable!("node was just replaced with a mapping"),
    }
}
