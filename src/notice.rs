//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`, `omitted_input_notice`.
//! Role: Shared contract helper for CLI diagnostics (non-error events).
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub input: String,
    pub message: String,
    pub details: Map<String, Value>,
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("input".to_string(), json!(notice.input));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Notice for an input left out of the decoded list because its value shape is unknown.
pub fn omitted_input_notice(cmd: &str, input: &str, index: usize, time: String) -> Notice {
    let mut details = Map::new();
    details.insert("index".to_string(), json!(index));
    Notice {
        kind: "omitted_input".to_string(),
        time,
        cmd: cmd.to_string(),
        input: input.to_string(),
        message: "input value has no recognized shape".to_string(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, notice_json, omitted_input_notice};
    use serde_json::{Map, Value};

    #[test]
    fn notice_json_has_required_fields() {
        let mut details = Map::new();
        details.insert("index".to_string(), Value::from(3));

        let notice = Notice {
            kind: "omitted_input".to_string(),
            time: "2026-02-01T00:00:00Z".to_string(),
            cmd: "decode".to_string(),
            input: "dem".to_string(),
            message: "input value has no recognized shape".to_string(),
            details,
        };

        let value = notice_json(&notice);
        let obj = value
            .get("notice")
            .and_then(|v| v.as_object())
            .expect("notice object");

        assert_eq!(obj.get("kind").and_then(|v| v.as_str()), Some("omitted_input"));
        assert_eq!(
            obj.get("time").and_then(|v| v.as_str()),
            Some("2026-02-01T00:00:00Z")
        );
        assert_eq!(obj.get("cmd").and_then(|v| v.as_str()), Some("decode"));
        assert_eq!(obj.get("input").and_then(|v| v.as_str()), Some("dem"));
        assert!(obj.get("details").and_then(|v| v.as_object()).is_some());
    }

    #[test]
    fn omitted_input_notice_records_index() {
        let notice = omitted_input_notice("decode", "dem", 4, "t".to_string());
        assert_eq!(notice.kind, "omitted_input");
        assert_eq!(notice.details.get("index"), Some(&Value::from(4)));
    }
}
