//! INI adapter
//!
//! INI is exactly two levels deep: top-level keys are section names and
//! section values are flat mappings of scalars. Values on disk are untyped
//! strings, so parsing runs every value through the same coercion rules as
//! environment overrides. Keys appearing before any section header land
//! under the implicit `default` section.

use crate::env::coerce;
use crate::error::{ConfigError, Result};
use crate::format::Format;
use crate::value::{Map, Value};
use ini::Ini;

/// Section name given to keys that appear before any `[section]` header.
pub const DEFAULT_SECTION: &str = "default";

pub fn parse(text: &str) -> Result<Map> {
    let doc = Ini::load_from_str(text).map_err(|e| ConfigError::Parse {
        format: Format::Ini,
        message: e.to_string(),
    })?;

    let mut root = Map::new();
    for (section, props) in doc.iter() {
        let name = section.unwrap_or(DEFAULT_SECTION);
        if section.is_none() && props.iter().next().is_none() {
            continue;
        }
        let slot = root
            .entry(name.to_string())
            .or_insert_with(|| Value::Mapping(Map::new()));
        if let Value::Mapping(entries) = slot {
            for (key, raw) in props.iter() {
                entries.insert(key.to_string(), coerce(raw));
            }
        }
    }
    Ok(root)
}

pub fn serialize(map: &Map) -> Result<String> {
    let mut doc = Ini::new();
    for (section, value) in map {
        let entries = value.as_mapping().ok_or_else(|| ConfigError::Unrepresentable {
            format: Format::Ini,
            path: section.clone(),
            reason: format!("a top-level {} (INI only has sections)", value.type_name()),
        })?;

        doc.entry(Some(section.clone())).or_insert(ini::Properties::new());
        for (key, scalar) in entries {
            match scalar {
                Value::Mapping(_) | Value::Sequence(_) => {
                    return Err(ConfigError::Unrepresentable {
                        format: Format::Ini,
                        path: format!("{section}.{key}"),
                        reason: format!("a nested {}", scalar.type_name()),
                    });
                }
                Value::Null => doc.set_to(Some(section.as_str()), key.clone(), String::new()),
                other => doc.set_to(Some(section.as_str()), key.clone(), other.to_string()),
            }
        }
    }

    let mut buf = Vec::new();
    doc.write_to(&mut buf).map_err(|e| ConfigError::Serialize {
        format: Format::Ini,
        message: e.to_string(),
    })?;
    String::from_utf8(buf).map_err(|e| ConfigError::Serialize {
        format: Format::Ini,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_with_coercion() {
        let map = parse("[server]\nhost = localhost\nport = 8080\nratio = 0.5\ntls = true\n")
            .expect("parse");
        let server = map["server"].as_mapping().expect("server section");
        assert_eq!(server["host"], Value::from("localhost"));
        assert_eq!(server["port"], Value::Int(8080));
        assert_eq!(server["ratio"], Value::Float(0.5));
        assert_eq!(server["tls"], Value::Bool(true));
    }

    #[test]
    fn test_parse_flat_file_uses_default_section() {
        let map = parse("name = app\nport = 80\n").expect("parse");
        let section = map[DEFAULT_SECTION].as_mapping().expect("default section");
        assert_eq!(section["name"], Value::from("app"));
        assert_eq!(section["port"], Value::Int(80));
    }

    #[test]
    fn test_serialize_rejects_scalar_top_level() {
        let mut map = Map::new();
        map.insert("lonely".to_string(), Value::Int(1));
        let err = serialize(&map).expect_err("should fail");
        assert!(err.to_string().contains("lonely"));
    }

    #[test]
    fn test_serialize_rejects_nested_structures() {
        let map = crate::format::json::parse(r#"{"outer": {"inner": {"deep": 1}}}"#)
            .expect("fixture");
        let err = serialize(&map).expect_err("should fail");
        assert!(err.to_string().contains("outer.inner"));

        let map = crate::format::json::parse(r#"{"outer": {"list": [1, 2]}}"#).expect("fixture");
        assert!(serialize(&map).is_err());
    }

    #[test]
    fn test_round_trip_two_level_mapping() {
        let map = crate::format::json::parse(
            r#"{"server": {"host": "localhost", "port": 8080, "ratio": 2.0, "tls": false},
                "app": {"name": "demo"}}"#,
        )
        .expect("fixture");

        let rendered = serialize(&map).expect("serialize");
        let reparsed = parse(&rendered).expect("reparse");
        assert_eq!(map, reparsed);
    }

    #[test]
    fn test_round_trip_preserves_section_order() {
        let rendered = serialize(
            &crate::format::json::parse(r#"{"zeta": {"k": 1}, "alpha": {"k": 2}}"#)
                .expect("fixture"),
        )
        .expect("serialize");
        let reparsed = parse(&rendered).expect("reparse");
        let sections: Vec<&String> = reparsed.keys().collect();
        assert_eq!(sections, vec!["zeta", "alpha"]);
    }
}
