//! Purpose: Define the stable public Rust API boundary for wpsexec.
//! Exports: Request wire types, the decoded model, the codec, and `ExecuteDeserializer`.
//! Role: Public, additive-only surface used by the CLI and embedding services.
//! Invariants: Callers reach the mapper only through this module.
//! Invariants: Internal helpers (text forms, token mapping) remain private.

mod execute;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::format::{APPLICATION_JSON, Format, TEXT_PLAIN};
pub use crate::core::model::{
    DataTransmissionMode, ExecuteOrder, ExecutionMode, OutputDefinition, OwsCode, ProcessData,
    ResponseType,
};
pub use crate::core::request::{
    ExecuteMode, ExecuteRequest, Input, Output, RequestFormat, ResponseMode, TransmissionMode,
};
pub use crate::json::codec::JsonCodec;
pub use execute::ExecuteDeserializer;
