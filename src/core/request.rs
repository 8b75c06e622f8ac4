//! Purpose: Wire types for the JSON execute request document.
//! Exports: `ExecuteRequest`, `Input`, `Output`, `RequestFormat`, `TransmissionMode`,
//! `ExecuteMode`, `ResponseMode`.
//! Role: Serde boundary; shapes the document, leaves value decoding to the mapper.
//! Invariants: Enumerated tokens never fail to deserialize; unknown tokens become `Other`.
//! Invariants: Missing lists and objects take their defaults instead of erroring.
//! Invariants: Output descriptor members of the wrong JSON type are tolerated, not rejected.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const MIME_TYPE_KEY: &str = "mimeType";
const ENCODING_KEY: &str = "encoding";
const SCHEMA_KEY: &str = "schema";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub mode: ExecuteMode,
    #[serde(default)]
    pub response: ResponseMode,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

/// One request input. `input` is the free-form node carrying `value`, `format` and `bbox`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub id: String,
    #[serde(default)]
    pub input: Value,
}

impl Input {
    pub fn new(id: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            input,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub id: String,
    #[serde(default, deserialize_with = "format_object")]
    pub format: Option<RequestFormat>,
    #[serde(default)]
    pub transmission_mode: TransmissionMode,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFormat {
    #[serde(default, deserialize_with = "scalar_member")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_member")]
    pub encoding: Option<String>,
    #[serde(default, deserialize_with = "scalar_member")]
    pub schema: Option<String>,
}

impl RequestFormat {
    /// Read `mimeType`/`encoding`/`schema` from a free-form format node.
    pub fn from_node(node: &Value) -> Self {
        Self {
            mime_type: node.get(MIME_TYPE_KEY).and_then(member_text),
            encoding: node.get(ENCODING_KEY).and_then(member_text),
            schema: node.get(SCHEMA_KEY).and_then(member_text),
        }
    }
}

/// Text of a format member. Strings, numbers and booleans keep their text;
/// null and containers count as absent.
pub fn member_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalar_member<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| member_text(&value))
}

// A `format` that is not an object is treated as missing.
fn format_object<'de, D>(deserializer: D) -> Result<Option<RequestFormat>, D::Error>
where
    D: Deserializer<'de>,
{
    let node = Value::deserialize(deserializer)?;
    Ok(node.is_object().then(|| RequestFormat::from_node(&node)))
}

fn token_text(value: Value) -> Option<String> {
    match value {
        Value::String(token) => Some(token),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Option<String>")]
pub enum TransmissionMode {
    Value,
    #[default]
    Reference,
    Other(String),
}

impl From<Value> for TransmissionMode {
    fn from(token: Value) -> Self {
        Self::from(token_text(token))
    }
}

impl From<Option<String>> for TransmissionMode {
    fn from(token: Option<String>) -> Self {
        match token {
            Some(token) if token.eq_ignore_ascii_case("value") => TransmissionMode::Value,
            Some(token) if token.eq_ignore_ascii_case("reference") => TransmissionMode::Reference,
            Some(token) => TransmissionMode::Other(token),
            None => TransmissionMode::Reference,
        }
    }
}

impl From<TransmissionMode> for Option<String> {
    fn from(mode: TransmissionMode) -> Self {
        Some(match mode {
            TransmissionMode::Value => "value".to_string(),
            TransmissionMode::Reference => "reference".to_string(),
            TransmissionMode::Other(token) => token,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Option<String>")]
pub enum ExecuteMode {
    Sync,
    Async,
    #[default]
    Auto,
    Other(String),
}

impl From<Value> for ExecuteMode {
    fn from(token: Value) -> Self {
        Self::from(token_text(token))
    }
}

impl From<Option<String>> for ExecuteMode {
    fn from(token: Option<String>) -> Self {
        match token {
            Some(token) if token.eq_ignore_ascii_case("sync") => ExecuteMode::Sync,
            Some(token) if token.eq_ignore_ascii_case("async") => ExecuteMode::Async,
            Some(token) if token.eq_ignore_ascii_case("auto") => ExecuteMode::Auto,
            Some(token) => ExecuteMode::Other(token),
            None => ExecuteMode::Auto,
        }
    }
}

impl From<ExecuteMode> for Option<String> {
    fn from(mode: ExecuteMode) -> Self {
        Some(match mode {
            ExecuteMode::Sync => "sync".to_string(),
            ExecuteMode::Async => "async".to_string(),
            ExecuteMode::Auto => "auto".to_string(),
            ExecuteMode::Other(token) => token,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Option<String>")]
pub enum ResponseMode {
    Raw,
    #[default]
    Document,
    Other(String),
}

impl From<Value> for ResponseMode {
    fn from(token: Value) -> Self {
        Self::from(token_text(token))
    }
}

impl From<Option<String>> for ResponseMode {
    fn from(token: Option<String>) -> Self {
        match token {
            Some(token) if token.eq_ignore_ascii_case("raw") => ResponseMode::Raw,
            Some(token) if token.eq_ignore_ascii_case("document") => ResponseMode::Document,
            Some(token) => ResponseMode::Other(token),
            None => ResponseMode::Document,
        }
    }
}

impl From<ResponseMode> for Option<String> {
    fn from(mode: ResponseMode) -> Self {
        Some(match mode {
            ResponseMode::Raw => "raw".to_string(),
            ResponseMode::Document => "document".to_string(),
            ResponseMode::Other(token) => token,
        })
    }
}
