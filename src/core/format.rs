//! Purpose: Describe the data format (MIME type, encoding, schema) of process data.
//! Exports: `Format`, `TEXT_PLAIN`, `APPLICATION_JSON`.
//! Role: Value type attached to every decoded input and requested output.
//! Invariants: Empty strings are stored as absent; `Format::default()` has no members set.

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Format {
    mime_type: Option<String>,
    encoding: Option<String>,
    schema: Option<String>,
}

impl Format {
    pub fn new(
        mime_type: Option<impl Into<String>>,
        encoding: Option<impl Into<String>>,
        schema: Option<impl Into<String>>,
    ) -> Self {
        Self {
            mime_type: non_empty(mime_type),
            encoding: non_empty(encoding),
            schema: non_empty(schema),
        }
    }

    pub fn mime(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: non_empty(Some(mime_type)),
            encoding: None,
            schema: None,
        }
    }

    pub fn text_plain() -> Self {
        Self::mime(TEXT_PLAIN)
    }

    pub fn application_json() -> Self {
        Self::mime(APPLICATION_JSON)
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.mime_type.is_none() && self.encoding.is_none() && self.schema.is_none()
    }
}

fn non_empty(value: Option<impl Into<String>>) -> Option<String> {
    value.map(Into::into).filter(|value| !value.is_empty())
}
