//! Error types for the engine.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from configuration, persistence and world setup.
///
/// None of these reach the player; the session turns every failure into
/// in-world text.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is unusable.
    #[error("invalid config: {0}")]
    Config(String),

    /// Save file written by a newer version.
    #[error("save version {found} is newer than supported version {supported}")]
    IncompatibleSave {
        /// Version in the file.
        found: u32,
        /// Highest version this build reads.
        supported: u32,
    },

    /// World setup failed.
    #[error("world error: {0}")]
    World(#[from] cabin_world::WorldError),
}

/// Failures of the remote interpretation call.
///
/// The interpreter catches all of them and falls back to the rule resolver.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network or client failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("remote returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// No reply within the configured bound.
    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),

    /// Reply carried no message content.
    #[error("reply had no content")]
    EmptyReply,

    /// Reply content is not a JSON object.
    #[error("malformed reply: {0}")]
    Malformed(String),
}
