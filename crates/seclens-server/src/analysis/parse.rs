// crates/seclens-server/src/analysis/parse.rs
// Lenient parsing of the model's free-text reply into an AnalysisResult

use seclens_types::AnalysisResult;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SeclensError};

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Intermediate schema: both keys optional and untyped. Shape checks and
/// defaults are applied in [`RawAnalysis::normalize`].
#[derive(Debug, Default, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    vulnerabilities: Option<Value>,
    #[serde(default, rename = "fixedCode")]
    fixed_code: Option<Value>,
}

impl RawAnalysis {
    fn normalize(self) -> AnalysisResult {
        let vulnerabilities = match self.vulnerabilities {
            Some(Value::Array(items)) => items.into_iter().map(element_text).collect(),
            _ => Vec::new(),
        };
        let fixed_code = match self.fixed_code {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        AnalysisResult {
            vulnerabilities,
            fixed_code,
        }
    }
}

/// Array elements are not validated: strings pass through, anything else
/// keeps its JSON text.
fn element_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Find the first block fenced as ```` ```json ```` and return its trimmed
/// contents. An empty block counts as no block.
pub fn extract_fenced_json(raw: &str) -> Option<&str> {
    let start = raw.find(JSON_FENCE)? + JSON_FENCE.len();
    let rest = raw[start..].trim_start();
    let end = rest.find(FENCE)?;
    let block = rest[..end].trim_end();
    (!block.is_empty()).then_some(block)
}

/// Parse the model's reply.
///
/// Prefers a ```` ```json ```` fenced block; without one the whole reply is
/// parsed. Invalid JSON is a [`SeclensError::Parse`]. Missing or mistyped
/// keys fall back to `[]` and `""`.
pub fn parse_reply(raw: &str) -> Result<AnalysisResult> {
    let candidate = extract_fenced_json(raw).unwrap_or(raw).trim();

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| SeclensError::Parse(format!("model reply is not valid JSON: {}", e)))?;

    match value {
        Value::Object(map) => {
            let raw: RawAnalysis = serde_json::from_value(Value::Object(map))?;
            Ok(raw.normalize())
        }
        Value::Null => Err(SeclensError::Parse("model reply is JSON null".to_string())),
        _ => Ok(RawAnalysis::default().normalize()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // extract_fenced_json
    // ========================================================================

    #[test]
    fn test_extract_fenced_block_in_prose() {
        let raw = "Here is the analysis:\n```json\n{\"a\": 1}\n```\nHope this helps.";
        assert_eq!(extract_fenced_json(raw), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_ignores_untagged_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_fenced_json(raw), None);
    }

    #[test]
    fn test_extract_takes_first_json_block() {
        let raw = "```json\n{\"first\": true}\n```\n```json\n{\"second\": true}\n```";
        assert_eq!(extract_fenced_json(raw), Some("{\"first\": true}"));
    }

    #[test]
    fn test_extract_unterminated_fence() {
        assert_eq!(extract_fenced_json("```json\n{\"a\": 1}"), None);
    }

    #[test]
    fn test_extract_empty_block_is_none() {
        assert_eq!(extract_fenced_json("```json\n   \n```"), None);
    }

    #[test]
    fn test_extract_same_line() {
        assert_eq!(extract_fenced_json("```json{\"a\":1}```"), Some("{\"a\":1}"));
    }

    // ========================================================================
    // parse_reply
    // ========================================================================

    #[test]
    fn test_parse_fenced_reply_wrapped_in_prose() {
        let raw = "Sure! Here you go:\n```json\n{\"vulnerabilities\":[],\"fixedCode\":\"x\"}\n```\nLet me know.";
        let result = parse_reply(raw).unwrap();
        assert!(result.vulnerabilities.is_empty());
        assert_eq!(result.fixed_code, "x");
    }

    #[test]
    fn test_parse_bare_json_reply() {
        let raw = r#"{"vulnerabilities":["sql injection"],"fixedCode":"y"}"#;
        let result = parse_reply(raw).unwrap();
        assert_eq!(result.vulnerabilities, vec!["sql injection".to_string()]);
        assert_eq!(result.fixed_code, "y");
    }

    #[test]
    fn test_parse_not_json_is_parse_error() {
        let err = parse_reply("not json at all").unwrap_err();
        assert!(matches!(err, SeclensError::Parse(_)));
        assert!(err.is_upstream());
    }

    #[test]
    fn test_parse_empty_reply_is_parse_error() {
        assert!(matches!(parse_reply(""), Err(SeclensError::Parse(_))));
    }

    #[test]
    fn test_parse_invalid_fenced_block_does_not_fall_back() {
        // The fenced block wins even when the rest of the reply would parse
        let raw = "```json\n{broken\n```";
        assert!(matches!(parse_reply(raw), Err(SeclensError::Parse(_))));
    }

    #[test]
    fn test_parse_missing_keys_default() {
        let result = parse_reply("{}").unwrap();
        assert!(result.vulnerabilities.is_empty());
        assert_eq!(result.fixed_code, "");
    }

    #[test]
    fn test_parse_wrong_shapes_default() {
        let raw = r#"{"vulnerabilities": "just one", "fixedCode": 42}"#;
        let result = parse_reply(raw).unwrap();
        assert!(result.vulnerabilities.is_empty());
        assert_eq!(result.fixed_code, "");
    }

    #[test]
    fn test_parse_null_fields_default() {
        let raw = r#"{"vulnerabilities": null, "fixedCode": null}"#;
        let result = parse_reply(raw).unwrap();
        assert!(result.vulnerabilities.is_empty());
        assert_eq!(result.fixed_code, "");
    }

    #[test]
    fn test_parse_keeps_non_string_elements() {
        let raw = r#"{"vulnerabilities": ["xss", 7, {"k": "v"}], "fixedCode": "z"}"#;
        let result = parse_reply(raw).unwrap();
        assert_eq!(result.vulnerabilities, vec!["xss", "7", r#"{"k":"v"}"#]);
    }

    #[test]
    fn test_parse_non_object_json_defaults() {
        let result = parse_reply("[1, 2, 3]").unwrap();
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_parse_null_json_is_parse_error() {
        assert!(matches!(parse_reply("null"), Err(SeclensError::Parse(_))));
    }

    #[test]
    fn test_parse_ignores_extra_keys() {
        let raw = r#"{"vulnerabilities": [], "fixedCode": "a", "severity": "high"}"#;
        let result = parse_reply(raw).unwrap();
        assert_eq!(result.fixed_code, "a");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "```json\n{\"vulnerabilities\":[\"a\"],\"fixedCode\":\"b\"}\n```";
        assert_eq!(parse_reply(raw).unwrap(), parse_reply(raw).unwrap());
    }
}
