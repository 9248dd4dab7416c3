//! Purpose: Shared core library crate used by the `tokenstage` CLI and tests.
//! Exports: `core` (mapping loaders, copy/fallback engine, reporting, errors).
//! Role: Internal library backing the binary; not a stable public SDK.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
//! Invariants: Filesystem paths resolve against an injected workspace root.
pub mod core;
