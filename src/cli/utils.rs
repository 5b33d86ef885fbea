//! Shared CLI utilities.

use crate::format::Format;
use crate::value::Value;
use anyhow::Result;

/// Render a value for terminal output: through the chosen format adapter,
/// or as a plain indented key/value listing when no format is requested.
/// Scalars and sequences print bare regardless of format.
pub fn render(value: &Value, format: Option<Format>) -> Result<String> {
    match (format, value) {
        (Some(format), Value::Mapping(map)) => {
            Ok(format.serialize(map)?.trim_end().to_string())
        }
        (_, other) => Ok(render_plain(other, 0)),
    }
}

/// Indented `key: value` listing, two spaces per nesting level.
pub fn render_plain(value: &Value, indent: usize) -> String {
    match value {
        Value::Mapping(map) => {
            let mut lines = Vec::new();
            for (key, child) in map {
                match child {
                    Value::Mapping(_) => {
                        lines.push(format!("{:indent$}{key}:", ""));
                        lines.push(render_plain(child, indent + 2));
                    }
                    _ => lines.push(format!("{:indent$}{key}: {child}", "")),
                }
            }
            lines.join("\n")
        }
        other => other.to_string(),
    }
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace
/// and discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::json;

    #[test]
    fn test_render_plain_nests_with_indent() {
        let map = json::parse(r#"{"server": {"port": 8080, "tls": {"enabled": true}}, "name": "demo"}"#)
            .expect("fixture");
        let rendered = render_plain(&Value::Mapping(map), 0);
        assert_eq!(
            rendered,
            "server:\n  port: 8080\n  tls:\n    enabled: true\nname: demo"
        );
    }

    #[test]
    fn test_render_scalar_ignores_format() {
        let rendered = render(&Value::Int(42), Some(Format::Json)).expect("render");
        assert_eq!(rendered, "42");
    }

    #[test]
    fn test_parse_csv() {
        assert_eq!(
            parse_csv(&Some("a.b, c ,,d".to_string())),
            Some(vec!["a.b".to_string(), "c".to_string(), "d".to_string()])
        );
        assert_eq!(parse_csv(&None), None);
    }
}
