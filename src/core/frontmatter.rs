//! Front-matter handling for markdown documents.

use serde_yaml::{Mapping, Value};

/// Split a document into its front-matter YAML and body.
///
/// Front matter is a `---` line at the very top, closed by the next `---`
/// line. Returns `(None, text)` when there is none.
pub fn split(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, text)
}

/// Parse a document's front matter into a mapping.
pub fn parse(text: &str) -> Option<Mapping> {
    let (yaml, _) = split(text);
    match serde_yaml::from_str::<Value>(yaml?) {
        Ok(Value::Mapping(map)) => Some(map),
        _ => None,
    }
}

/// Document body with front matter removed.
pub fn strip(text: &str) -> &str {
    split(text).1
}

/// Render a front-matter value as plain text.
///
/// Scalars print as-is, sequences join with `, `; nulls and nested
/// mappings render as nothing.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Sequence(items) => items
            .iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Tagged(tagged) => value_to_string(&tagged.value),
        Value::Null | Value::Mapping(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let text = "---\ntitle: Plan\n---\n# Body\n";
        let (yaml, body) = split(text);
        assert_eq!(yaml, Some("title: Plan\n"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        assert_eq!(split("# Body"), (None, "# Body"));
        // Unterminated front matter is treated as body text
        assert_eq!(split("---\ntitle: x\n"), (None, "---\ntitle: x\n"));
    }

    #[test]
    fn test_parse_mapping() {
        let map = parse("---\ntitle: Plan\ntags: [a, b]\n---\nbody").unwrap();
        assert_eq!(map.get("title"), Some(&Value::String("Plan".into())));
        assert_eq!(value_to_string(map.get("tags").unwrap()), "a, b");
    }

    #[test]
    fn test_parse_rejects_scalars() {
        assert!(parse("---\njust text\n---\n").is_none());
        assert!(parse("no front matter").is_none());
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip("---\na: 1\n---\nhello"), "hello");
        assert_eq!(strip("hello"), "hello");
    }
}
