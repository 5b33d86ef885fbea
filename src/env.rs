//! Environment variable overrides
//!
//! Variables whose name starts with the caller-supplied prefix are turned
//! into dot-path overrides: the remainder of the name is lower-cased and
//! split on `__`, and the raw value is coerced to the closest scalar type.
//! Matches are sorted lexicographically by variable name so that the order
//! overrides apply in never depends on how the host enumerates its
//! environment.

use crate::path::DotPath;
use crate::value::Value;
use tracing::debug;

/// One pending override: where it goes and the coerced value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvOverride {
    pub path: DotPath,
    pub value: Value,
}

/// Collect overrides from `vars` (usually `std::env::vars()`).
///
/// The prefix match is case-sensitive. A variable whose name is exactly the
/// prefix has no path segments and is skipped.
pub fn collect<I>(vars: I, prefix: &str) -> Vec<EnvOverride>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut matched: Vec<(String, String)> = vars
        .into_iter()
        .filter(|(name, _)| name.starts_with(prefix))
        .collect();
    matched.sort_by(|a, b| a.0.cmp(&b.0));

    matched
        .into_iter()
        .filter_map(|(name, raw)| {
            let remainder = name[prefix.len()..].to_lowercase();
            let path = DotPath::from_segments(remainder.split("__"));
            if path.is_root() {
                debug!("ignoring env var {name}: no key after prefix");
                return None;
            }
            let value = coerce(&raw);
            debug!("env override {name} -> {path} = {value}");
            Some(EnvOverride { path, value })
        })
        .collect()
}

/// Coerce a raw string to the closest scalar type.
///
/// Precedence: `true`/`false` (any case) as booleans, then integers
/// (optional leading `-`, digits only), then anything `f64` accepts as a
/// float, else the string unmodified.
pub fn coerce(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if is_integer_literal(raw) {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
    }
    if let Ok(x) = raw.parse::<f64>() {
        return Value::Float(x);
    }
    Value::String(raw.to_string())
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce("true"), Value::Bool(true));
        assert_eq!(coerce("TRUE"), Value::Bool(true));
        assert_eq!(coerce("False"), Value::Bool(false));
        // only true/false are booleans; yes/no/1/0 are not
        assert_eq!(coerce("yes"), Value::from("yes"));
        assert_eq!(coerce("1"), Value::Int(1));
        assert_eq!(coerce("0"), Value::Int(0));
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce("42"), Value::Int(42));
        assert_eq!(coerce("-7"), Value::Int(-7));
        assert_eq!(coerce("3.14"), Value::Float(3.14));
        assert_eq!(coerce("-0.5"), Value::Float(-0.5));
        assert_eq!(coerce("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn test_coerce_strings() {
        assert_eq!(coerce("hello"), Value::from("hello"));
        assert_eq!(coerce("12abc"), Value::from("12abc"));
        assert_eq!(coerce(""), Value::from(""));
        assert_eq!(coerce("-"), Value::from("-"));
    }

    #[test]
    fn test_collect_splits_on_double_underscore() {
        let overrides = collect(vars(&[("APP_SERVER__PORT", "9000")]), "APP_");
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].path, DotPath::parse("server.port"));
        assert_eq!(overrides[0].value, Value::Int(9000));
    }

    #[test]
    fn test_collect_single_underscore_is_not_a_separator() {
        let overrides = collect(vars(&[("APP_LOG_LEVEL", "debug")]), "APP_");
        assert_eq!(overrides[0].path, DotPath::parse("log_level"));
        assert_eq!(overrides[0].value, Value::from("debug"));
    }

    #[test]
    fn test_collect_prefix_is_case_sensitive() {
        let overrides = collect(
            vars(&[("app_x", "1"), ("APP_X", "2"), ("OTHER_Y", "3")]),
            "APP_",
        );
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].path, DotPath::parse("x"));
        assert_eq!(overrides[0].value, Value::Int(2));
    }

    #[test]
    fn test_collect_orders_lexicographically() {
        let overrides = collect(
            vars(&[("APP_B", "2"), ("APP_A", "1"), ("APP_C", "3")]),
            "APP_",
        );
        let paths: Vec<String> = overrides.iter().map(|o| o.path.to_string()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_collect_skips_bare_prefix() {
        let overrides = collect(vars(&[("APP_", "x")]), "APP_");
        assert!(overrides.is_empty());
    }
}
