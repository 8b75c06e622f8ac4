//! Purpose: Provide the JSON codec used to read request documents and re-encode values.
//! Exports: `JsonCodec`, `ParseFailureCategory`, `categorize_error`, `categorize_message`,
//! `hint_for_error`.
//! Role: Parser/serializer boundary that centralizes serde_json usage details.
//! Invariants: The codec holds no per-call state; one instance serves every request.
//! Invariants: `encode` is compact (no whitespace) so re-encoded values are stable.
//! Invariants: Object key order and number text survive a decode/encode cycle.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec {
    _private: (),
}

impl JsonCodec {
    pub fn new() -> Self {
        Self { _private: () }
    }

    pub fn decode<T: DeserializeOwned>(&self, input: &str) -> Result<T, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string(value)
    }

    pub fn encode_pretty<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Truncated,
    Shape,
    NumericRange,
    DepthLimit,
    Io,
    Unknown,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Truncated => "truncated",
            ParseFailureCategory::Shape => "shape",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Io => "io",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Eof => ParseFailureCategory::Truncated,
            Category::Data => ParseFailureCategory::Shape,
            Category::Io => ParseFailureCategory::Io,
        },
        category => category,
    }
}

pub fn categorize_message(message: &str) -> ParseFailureCategory {
    let message = message.to_ascii_lowercase();
    if message.contains("number out of range") {
        ParseFailureCategory::NumericRange
    } else if message.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else {
        ParseFailureCategory::Unknown
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    let advice = match category {
        ParseFailureCategory::Syntax => "Check the document is valid JSON.",
        ParseFailureCategory::Truncated => "The document ended early; check it was fully written.",
        ParseFailureCategory::Shape => {
            "Check field types: `inputs` and `outputs` must be arrays of objects with an `id`."
        }
        ParseFailureCategory::NumericRange => "A number is out of range.",
        ParseFailureCategory::DepthLimit => "The document nests too deeply.",
        ParseFailureCategory::Io => "The document could not be read.",
        ParseFailureCategory::Unknown => "Check the document is a JSON execute request.",
    };
    format!(
        "{advice} (parse category: {}; line {}, column {}; context: {context})",
        category.label(),
        err.line(),
        err.column()
    )
}
