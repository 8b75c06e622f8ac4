//! Purpose: JSON codec boundary shared by the mapper and the CLI.
//! Exports: `codec` module with the explicitly constructed `JsonCodec` and parse diagnostics.
//! Role: Single seam for serde_json so callsites avoid ad hoc decode logic.
//! Invariants: Request documents and re-encoded values go through `JsonCodec`.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod codec;
