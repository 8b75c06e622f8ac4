//! Purpose: Typed domain records produced by decoding an execute request.
//! Exports: `OwsCode`, `DataTransmissionMode`, `OutputDefinition`, `ProcessData`,
//! `ExecutionMode`, `ResponseType`, `ExecuteOrder`.
//! Role: Hand-off model consumed by whatever executes the process.
//! Invariants: Every record carries an identifier; records are immutable after construction.
//! Invariants: `ProcessData` holds exactly one payload kind (inline text or URI reference).
use std::fmt;

use url::Url;

use crate::core::format::Format;

/// Identifier with an optional code space, as used for process inputs and outputs.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OwsCode {
    value: String,
    code_space: Option<Url>,
}

impl OwsCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            code_space: None,
        }
    }

    pub fn with_code_space(mut self, code_space: Url) -> Self {
        self.code_space = Some(code_space);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn code_space(&self) -> Option<&Url> {
        self.code_space.as_ref()
    }
}

impl fmt::Display for OwsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code_space {
            Some(space) => write!(f, "{space}:{}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DataTransmissionMode {
    Value,
    #[default]
    Reference,
}

impl DataTransmissionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DataTransmissionMode::Value => "value",
            DataTransmissionMode::Reference => "reference",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputDefinition {
    id: OwsCode,
    format: Format,
    transmission_mode: DataTransmissionMode,
}

impl OutputDefinition {
    pub fn new(id: OwsCode, format: Format, transmission_mode: DataTransmissionMode) -> Self {
        Self {
            id,
            format,
            transmission_mode,
        }
    }

    pub fn id(&self) -> &OwsCode {
        &self.id
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn transmission_mode(&self) -> DataTransmissionMode {
        self.transmission_mode
    }
}

/// A decoded process input: either carried inline as text or referenced by URI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProcessData {
    StringValue {
        id: OwsCode,
        format: Format,
        value: String,
    },
    Reference {
        id: OwsCode,
        format: Format,
        uri: Url,
    },
}

impl ProcessData {
    pub fn string_value(id: OwsCode, format: Format, value: impl Into<String>) -> Self {
        ProcessData::StringValue {
            id,
            format,
            value: value.into(),
        }
    }

    pub fn reference(id: OwsCode, format: Format, uri: Url) -> Self {
        ProcessData::Reference { id, format, uri }
    }

    pub fn id(&self) -> &OwsCode {
        match self {
            ProcessData::StringValue { id, .. } | ProcessData::Reference { id, .. } => id,
        }
    }

    pub fn format(&self) -> &Format {
        match self {
            ProcessData::StringValue { format, .. } | ProcessData::Reference { format, .. } => {
                format
            }
        }
    }

    pub fn as_string_value(&self) -> Option<&str> {
        match self {
            ProcessData::StringValue { value, .. } => Some(value),
            ProcessData::Reference { .. } => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Url> {
        match self {
            ProcessData::Reference { uri, .. } => Some(uri),
            ProcessData::StringValue { .. } => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ProcessData::Reference { .. })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ExecutionMode {
    Sync,
    Async,
    #[default]
    Auto,
}

impl ExecutionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Sync => "sync",
            ExecutionMode::Async => "async",
            ExecutionMode::Auto => "auto",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ResponseType {
    Raw,
    #[default]
    Document,
}

impl ResponseType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Raw => "raw",
            ResponseType::Document => "document",
        }
    }
}

/// Decoded execute request. `inputs` keeps one slot per request input; a `None`
/// slot marks an input whose value shape was not recognized.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecuteOrder {
    pub mode: ExecutionMode,
    pub response: ResponseType,
    pub inputs: Vec<Option<ProcessData>>,
    pub outputs: Vec<OutputDefinition>,
}

impl ExecuteOrder {
    pub fn omitted_inputs(&self) -> usize {
        self.inputs.iter().filter(|slot| slot.is_none()).count()
    }
}
