use std::path::Path;

use anyhow::Context;
use leaf_core::fields::WriteMode;
use serde_json::Value;

/// Parse a `--data` argument: inline JSON, or `@path` to a JSON file.
pub fn parse_payload(raw: &str) -> anyhow::Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read payload file {path}"))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).context("--data is not valid JSON")
}

/// Map the `--partial` flag onto a write mode.
#[must_use]
pub const fn write_mode(partial: bool) -> WriteMode {
    if partial {
        WriteMode::Partial
    } else {
        WriteMode::Full
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use leaf_core::fields::WriteMode;
    use serde_json::json;

    use super::{parse_payload, write_mode};

    #[test]
    fn inline_json() {
        let value = parse_payload(r#"{"location": "Pond"}"#).expect("should parse");
        assert_eq!(value, json!({"location": "Pond"}));
    }

    #[test]
    fn payload_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"habitat": "Bog"}}"#).expect("write");
        let arg = format!("@{}", file.path().display());

        let value = parse_payload(&arg).expect("should parse");
        assert_eq!(value["habitat"], "Bog");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = parse_payload("{not json").expect_err("should fail");
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_payload("@/nonexistent/payload.json").is_err());
    }

    #[test]
    fn partial_flag_maps_to_mode() {
        assert_eq!(write_mode(true), WriteMode::Partial);
        assert_eq!(write_mode(false), WriteMode::Full);
    }
}
