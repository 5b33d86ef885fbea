//! JSON adapter
//!
//! JSON object keys are strings by construction, so only floats need a
//! representability check: JSON has no literal for non-finite numbers.

use crate::error::{ConfigError, Result};
use crate::format::Format;
use crate::value::{Map, Value};

pub fn parse(text: &str) -> Result<Map> {
    let raw: serde_json::Value = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
        format: Format::Json,
        message: e.to_string(),
    })?;

    match raw {
        serde_json::Value::Object(object) => Ok(object
            .into_iter()
            .map(|(key, value)| (key, from_json(value)))
            .collect()),
        other => Err(ConfigError::Parse {
            format: Format::Json,
            message: format!("top level must be an object, got {}", json_type_name(&other)),
        }),
    }
}

pub fn serialize(map: &Map) -> Result<String> {
    let mut trail = Vec::new();
    let doc = mapping_to_json(map, &mut trail)?;
    let rendered = serde_json::to_string_pretty(&doc).map_err(|e| ConfigError::Serialize {
        format: Format::Json,
        message: e.to_string(),
    })?;
    Ok(rendered + "\n")
}

fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(object) => Value::Mapping(
            object
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

fn to_json(value: &Value, trail: &mut Vec<String>) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map(serde_json::Value::Number)
            .ok_or_else(|| ConfigError::Unrepresentable {
                format: Format::Json,
                path: trail.join("."),
                reason: format!("non-finite float {x}"),
            })?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                trail.push(i.to_string());
                array.push(to_json(item, trail)?);
                trail.pop();
            }
            serde_json::Value::Array(array)
        }
        Value::Mapping(map) => serde_json::Value::Object(mapping_to_json(map, trail)?),
    })
}

fn mapping_to_json(
    map: &Map,
    trail: &mut Vec<String>,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut object = serde_json::Map::with_capacity(map.len());
    for (key, value) in map {
        trail.push(key.clone());
        object.insert(key.clone(), to_json(value, trail)?);
        trail.pop();
    }
    Ok(object)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
