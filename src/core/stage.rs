//! Purpose: Resolve each character's token image and copy it into place.
//! Exports: `StageConfig`, `Action`, `StageOutcome`, `stage`.
//! Role: The copy/fallback engine; owns all filesystem mutation in the crate.
//! Invariants: Characters are processed in sorted id order.
//! Invariants: Every character entry yields exactly one `Action`.
//! Invariants: A destination's parent directory is created only when a file
//! is about to be written into it; skip branches touch nothing.
//! Invariants: Copies preserve content, permissions, and file times.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tracing::debug;

use super::error::{Error, ErrorKind};
use super::mapping::{load_character_mapping, load_token_mapping};

const TOKENS_MANIFEST: &str = "tokens.json";
const CHARACTERS_MANIFEST: &str = "characters.json";
const PLACEHOLDER_IMAGE: &str = "assets/img/token-BqDQdWeO.webp";

/// Where the manifests, images, and placeholder live. All paths are
/// absolute; relative paths inside the manifests resolve under `workspace`.
#[derive(Clone, Debug)]
pub struct StageConfig {
    pub workspace: PathBuf,
    pub tokens_path: PathBuf,
    pub characters_path: PathBuf,
    pub placeholder: PathBuf,
}

impl StageConfig {
    /// Fixed manifest and placeholder locations under a workspace root.
    pub fn for_workspace(root: impl Into<PathBuf>) -> Self {
        let workspace = root.into();
        Self {
            tokens_path: workspace.join(TOKENS_MANIFEST),
            characters_path: workspace.join(CHARACTERS_MANIFEST),
            placeholder: workspace.join(PLACEHOLDER_IMAGE),
            workspace,
        }
    }
}

/// Outcome for one character id, in manifest-relative path terms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Copied { src: String, dst: String },
    MissingUsedPlaceholder { src: String, dst: String },
    MissingSkipped { src: String, dst: String },
    NoSourceUsedPlaceholder { id: String, dst: String },
    NoSourceSkipped { id: String, dst: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Copied { src, dst } => write!(f, "COPIED {src} -> {dst}"),
            Action::MissingUsedPlaceholder { src, dst } => {
                write!(f, "MISSING {src}; USED PLACEHOLDER -> {dst}")
            }
            Action::MissingSkipped { src, dst } => {
                write!(f, "MISSING {src}; SKIPPED -> {dst}")
            }
            Action::NoSourceUsedPlaceholder { id, dst } => {
                write!(f, "NO SRC for id={id}; USED PLACEHOLDER -> {dst}")
            }
            Action::NoSourceSkipped { id, dst } => {
                write!(f, "NO SRC for id={id}; SKIPPED -> {dst}")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct StageOutcome {
    pub total: u64,
    pub copied: u64,
    pub used_placeholder: u64,
    pub missing: u64,
    pub actions: Vec<Action>,
}

/// Run one staging pass: load both manifests, then copy or substitute for
/// every character in sorted id order.
pub fn stage(config: &StageConfig) -> Result<StageOutcome, Error> {
    let tokens = load_token_mapping(&config.tokens_path)?;
    let characters = load_character_mapping(&config.characters_path)?;
    let placeholder_exists = config.placeholder.is_file();

    let mut outcome = StageOutcome {
        total: characters.len() as u64,
        ..StageOutcome::default()
    };

    for (id, dst_rel) in &characters {
        let dst_abs = resolve(&config.workspace, dst_rel);
        let action = match tokens.get(id) {
            None => {
                if placeholder_exists {
                    copy_with_times(&config.placeholder, &dst_abs)?;
                    outcome.used_placeholder += 1;
                    Action::NoSourceUsedPlaceholder {
                        id: id.clone(),
                        dst: dst_rel.clone(),
                    }
                } else {
                    outcome.missing += 1;
                    Action::NoSourceSkipped {
                        id: id.clone(),
                        dst: dst_rel.clone(),
                    }
                }
            }
            Some(src_rel) => {
                let src_abs = resolve(&config.workspace, src_rel);
                if src_abs.is_file() {
                    copy_with_times(&src_abs, &dst_abs)?;
                    outcome.copied += 1;
                    Action::Copied {
                        src: src_rel.clone(),
                        dst: dst_rel.clone(),
                    }
                } else if placeholder_exists {
                    copy_with_times(&config.placeholder, &dst_abs)?;
                    outcome.used_placeholder += 1;
                    Action::MissingUsedPlaceholder {
                        src: src_rel.clone(),
                        dst: dst_rel.clone(),
                    }
                } else {
                    outcome.missing += 1;
                    Action::MissingSkipped {
                        src: src_rel.clone(),
                        dst: dst_rel.clone(),
                    }
                }
            }
        };
        debug!(%id, %action, "staged");
        outcome.actions.push(action);
    }

    Ok(outcome)
}

// Manifest paths may carry a leading separator; they are still relative to
// the workspace root.
fn resolve(workspace: &Path, rel: &str) -> PathBuf {
    workspace.join(rel.trim_start_matches('/'))
}

fn copy_with_times(src: &Path, dst: &Path) -> Result<(), Error> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to create destination directory")
                .with_path(parent)
                .with_source(err)
        })?;
    }
    fs::copy(src, dst).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to copy image")
            .with_path(dst)
            .with_source(err)
    })?;

    let meta = fs::metadata(src).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read source metadata")
            .with_path(src)
            .with_source(err)
    })?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, atime, mtime).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to set destination file times")
            .with_path(dst)
            .with_source(err)
    })
}
