//! Purpose: Structured error model shared by the mapper, codec, and CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Single error type so every failure carries a kind plus optional context.
//! Invariants: Exit codes per kind are stable once published.
//! Invariants: Context is attached with `with_*` builders; kinds never change after construction.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Serialization,
    UriSyntax,
    Unsupported,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    input: Option<String>,
    index: Option<usize>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            input: None,
            index: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Identifier of the input or output descriptor being decoded when the error occurred.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Zero-based position of that descriptor in the request list.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(input) = &self.input {
            write!(f, " (input: {input})")?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {index})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Serialization => 3,
        ErrorKind::UriSyntax => 4,
        ErrorKind::Unsupported => 5,
        ErrorKind::Io => 6,
    }
}
