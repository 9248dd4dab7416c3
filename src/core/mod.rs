//! Purpose: Core staging pipeline: load mappings, resolve and copy, report.
//! Exports: `error`, `mapping`, `stage`, `report` plus their main types.
//! Role: Everything the binary does lives here so tests can drive it directly.
//! Invariants: No module holds state past a single `stage` run.

pub mod error;
pub mod mapping;
pub mod report;
pub mod stage;

pub use error::{Error, ErrorKind, to_exit_code};
pub use mapping::{RoleEntry, load_character_mapping, load_token_mapping};
pub use report::{ACTION_TAIL, render_report};
pub use stage::{Action, StageConfig, StageOutcome, stage};
