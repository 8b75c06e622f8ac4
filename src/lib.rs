//! Purpose: Library crate backing the `wpsexec` CLI and services that embed the mapper.
//! Exports: `api` (public surface), `core` (model, wire types, errors), `json`, `notice`.
//! Role: Decode execute request documents into typed process inputs and output definitions.
//! Invariants: Decoding is synchronous and holds no global state.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
pub mod json;
pub mod notice;
