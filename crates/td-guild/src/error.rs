//! Error types for guild state.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for guild state operations.
pub type GuildResult<T> = Result<T, GuildError>;

/// Errors from loading, validating or persisting guild state.
#[derive(Debug, Error)]
pub enum GuildError {
    /// Reading or writing a backing file failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A backing file could not be encoded or decoded.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The file exists but could not be loaded, so it is never overwritten.
    #[error("refusing to overwrite {0}: it could not be loaded")]
    ReadOnly(PathBuf),

    /// Removing the only developer would leave admin commands unreachable.
    #[error("cannot remove the last developer")]
    LastDeveloper,

    /// A rules value was rejected.
    #[error("invalid rules: {0}")]
    Rules(#[from] td_dice::RulesError),

    /// No skill matched a lookup.
    #[error("skill not found: {0}")]
    SkillNotFound(String),

    /// A required field was blank.
    #[error("missing field: {0}")]
    MissingField(&'static str),
}
