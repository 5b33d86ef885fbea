//! Deep merge of configuration layers
//!
//! Mappings merge recursively, key by key; everything else (scalars,
//! sequences, nulls) is replaced wholesale by the higher-precedence side.
//! Sequences are never merged element-wise.

use crate::env::EnvOverride;
use crate::path;
use crate::value::{Map, Value};

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// Existing keys keep their position in `base`; keys only present in
/// `overlay` are appended, so merge output order is stable.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let base_value = std::mem::replace(slot, Value::Null);
                        *slot = deep_merge(base_value, overlay_value);
                    }
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
            Value::Mapping(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge the three configuration sources in fixed precedence order:
/// defaults, then the file mapping, then the environment overrides.
///
/// The env overrides are applied last as individual dot-path writes, each
/// fully replacing whatever was at its path. Inputs are copied; the result
/// shares no data with them.
pub fn merge_sources(
    defaults: Option<&Map>,
    file: Option<&Map>,
    overrides: &[EnvOverride],
) -> Value {
    let mut merged = Value::Mapping(defaults.cloned().unwrap_or_default());

    if let Some(file_map) = file {
        merged = deep_merge(merged, Value::Mapping(file_map.clone()));
    }

    for over in overrides {
        path::set(&mut merged, &over.path, over.value.clone());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env;
    use crate::format::json;
    use crate::path::DotPath;

    fn parse(text: &str) -> Map {
        json::parse(text).expect("fixture json")
    }

    #[test]
    fn test_merge_simple_mappings() {
        let base = Value::Mapping(parse(r#"{"a": 1, "b": 2}"#));
        let overlay = Value::Mapping(parse(r#"{"b": 3, "c": 4}"#));
        let result = deep_merge(base, overlay);
        assert_eq!(result, Value::Mapping(parse(r#"{"a": 1, "b": 3, "c": 4}"#)));
    }

    #[test]
    fn test_merge_nested_mappings() {
        let base = Value::Mapping(parse(
            r#"{"server": {"host": "localhost", "port": 8080}, "debug": true}"#,
        ));
        let overlay = Value::Mapping(parse(r#"{"server": {"port": 9000}}"#));
        let result = deep_merge(base, overlay);
        assert_eq!(
            result,
            Value::Mapping(parse(
                r#"{"server": {"host": "localhost", "port": 9000}, "debug": true}"#
            ))
        );
    }

    #[test]
    fn test_sequences_replaced_not_merged() {
        let base = Value::Mapping(parse(r#"{"items": [1, 2, 3]}"#));
        let overlay = Value::Mapping(parse(r#"{"items": [4, 5]}"#));
        let result = deep_merge(base, overlay);
        assert_eq!(result, Value::Mapping(parse(r#"{"items": [4, 5]}"#)));
    }

    #[test]
    fn test_overlay_null_replaces_base() {
        let base = Value::Mapping(parse(r#"{"a": 1}"#));
        let overlay = Value::Mapping(parse(r#"{"a": null}"#));
        let result = deep_merge(base, overlay);
        assert_eq!(result, Value::Mapping(parse(r#"{"a": null}"#)));
    }

    #[test]
    fn test_overlay_replaces_mapping_with_scalar_and_back() {
        let base = Value::Mapping(parse(r#"{"value": {"nested": true}}"#));
        let overlay = Value::Mapping(parse(r#"{"value": 42}"#));
        assert_eq!(
            deep_merge(base, overlay),
            Value::Mapping(parse(r#"{"value": 42}"#))
        );

        let base = Value::Mapping(parse(r#"{"value": 42}"#));
        let overlay = Value::Mapping(parse(r#"{"value": {"nested": true}}"#));
        assert_eq!(
            deep_merge(base, overlay),
            Value::Mapping(parse(r#"{"value": {"nested": true}}"#))
        );
    }

    #[test]
    fn test_precedence_defaults_file_env() {
        let defaults = parse(r#"{"key": "from-defaults"}"#);
        let file = parse(r#"{"key": "from-file"}"#);
        let overrides = env::collect(
            vec![("APP_KEY".to_string(), "from-env".to_string())],
            "APP_",
        );

        let all = merge_sources(Some(&defaults), Some(&file), &overrides);
        assert_eq!(
            path::get(&all, &DotPath::parse("key")),
            Some(&Value::from("from-env"))
        );

        let no_env = merge_sources(Some(&defaults), Some(&file), &[]);
        assert_eq!(
            path::get(&no_env, &DotPath::parse("key")),
            Some(&Value::from("from-file"))
        );

        let only_defaults = merge_sources(Some(&defaults), None, &[]);
        assert_eq!(
            path::get(&only_defaults, &DotPath::parse("key")),
            Some(&Value::from("from-defaults"))
        );
    }

    #[test]
    fn test_layered_scenario() {
        let defaults = parse(r#"{"server": {"port": 8080}}"#);
        let file = parse(r#"{"server": {"host": "0.0.0.0"}}"#);
        let overrides = env::collect(
            vec![("PREFIX_SERVER__PORT".to_string(), "9000".to_string())],
            "PREFIX_",
        );

        let merged = merge_sources(Some(&defaults), Some(&file), &overrides);
        assert_eq!(
            path::get(&merged, &DotPath::parse("server.host")),
            Some(&Value::from("0.0.0.0"))
        );
        assert_eq!(
            path::get(&merged, &DotPath::parse("server.port")),
            Some(&Value::Int(9000))
        );

        // the override arrives as an integer, not the raw env string
        let rendered = json::serialize(merged.as_mapping().expect("mapping root")).expect("serialize");
        assert!(rendered.contains("9000"));
        assert!(!rendered.contains("\"9000\""));
    }

    #[test]
    fn test_all_sources_optional() {
        let merged = merge_sources(None, None, &[]);
        assert_eq!(merged, Value::Mapping(Map::new()));
    }
}
