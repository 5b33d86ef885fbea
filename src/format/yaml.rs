//! YAML adapter
//!
//! Parses through `serde_yaml::Value` so syntax errors surface with the
//! parser's own message, then converts into the canonical model. Mapping
//! keys must be strings; an empty document parses as an empty mapping.

use crate::error::{ConfigError, Result};
use crate::format::Format;
use crate::value::{Map, Value};

pub fn parse(text: &str) -> Result<Map> {
    let raw: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
        format: Format::Yaml,
        message: e.to_string(),
    })?;

    match raw {
        serde_yaml::Value::Null => Ok(Map::new()),
        serde_yaml::Value::Mapping(mapping) => mapping_from_yaml(mapping),
        other => Err(ConfigError::Parse {
            format: Format::Yaml,
            message: format!("top level must be a mapping, got {}", yaml_type_name(&other)),
        }),
    }
}

pub fn serialize(map: &Map) -> Result<String> {
    let doc = serde_yaml::Value::Mapping(mapping_to_yaml(map));
    serde_yaml::to_string(&doc).map_err(|e| ConfigError::Serialize {
        format: Format::Yaml,
        message: e.to_string(),
    })
}

fn from_yaml(value: serde_yaml::Value) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(from_yaml).collect::<Result<_>>()?)
        }
        serde_yaml::Value::Mapping(mapping) => Value::Mapping(mapping_from_yaml(mapping)?),
        // Tags carry no meaning in this model; keep the underlying value.
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn mapping_from_yaml(mapping: serde_yaml::Mapping) -> Result<Map> {
    let mut map = Map::with_capacity(mapping.len());
    for (key, value) in mapping {
        let serde_yaml::Value::String(key) = key else {
            return Err(ConfigError::Parse {
                format: Format::Yaml,
                message: format!("mapping keys must be strings, got {}", yaml_type_name(&key)),
            });
        };
        map.insert(key, from_yaml(value)?);
    }
    Ok(map)
}

fn to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Int(i) => serde_yaml::Value::Number((*i).into()),
        Value::Float(x) => serde_yaml::Value::Number(serde_yaml::Number::from(*x)),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Sequence(items) => {
            serde_yaml::Value::Sequence(items.iter().map(to_yaml).collect())
        }
        Value::Mapping(map) => serde_yaml::Value::Mapping(mapping_to_yaml(map)),
    }
}

fn mapping_to_yaml(map: &Map) -> serde_yaml::Mapping {
    map.iter()
        .map(|(key, value)| (serde_yaml::Value::String(key.clone()), to_yaml(value)))
        .collect()
}

fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let map = parse("server:\n  host: localhost\n  port: 8080\ndebug: true\n").expect("parse");
        let server = map["server"].as_mapping().expect("server mapping");
        assert_eq!(server["host"], Value::from("localhost"));
        assert_eq!(server["port"], Value::Int(8080));
        assert_eq!(map["debug"], Value::Bool(true));
    }

    #[test]
    fn test_parse_empty_document_is_empty_mapping() {
        assert!(parse("").expect("parse").is_empty());
        assert!(parse("# only a comment\n").expect("parse").is_empty());
    }

    #[test]
    fn test_parse_scalar_top_level_fails() {
        let err = parse("just a string").expect_err("should fail");
        assert!(err.to_string().contains("top level must be a mapping"));
    }

    #[test]
    fn test_parse_rejects_non_string_keys() {
        let err = parse("8080: x\n").expect_err("should fail");
        assert!(err.to_string().contains("keys must be strings"));
    }

    #[test]
    fn test_parse_invalid_syntax_fails() {
        assert!(parse("key: [unclosed\n").is_err());
    }

    #[test]
    fn test_round_trip_preserves_types_and_order() {
        let source = "b: 1\na:\n  nested: [1, 2.5, x, null, true]\nc: 3.0\n";
        let map = parse(source).expect("parse");
        let rendered = serialize(&map).expect("serialize");
        let reparsed = parse(&rendered).expect("reparse");
        assert_eq!(map, reparsed);

        let keys: Vec<&String> = reparsed.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(reparsed["c"], Value::Float(3.0));
    }
}
