//! Required-key validation
//!
//! Checks presence, not truthiness: a key holding null is still present.
//! Every required path is checked before failing so the error reports the
//! complete missing set in the order the caller listed it.

use crate::error::{ConfigError, Result};
use crate::path::{self, DotPath};
use crate::value::Value;

/// Verify every path in `required` resolves in `root`.
pub fn validate(root: &Value, required: &[String]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| !path::has(root, &DotPath::parse(key)))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingKeys { missing })
    }
}
