//! Error types for the world model.

use thiserror::Error;

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur while building or navigating the world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Room ID not present in the map.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// An exit points at a room that does not exist.
    #[error("exit '{direction}' in {room} leads to unknown room {target}")]
    DanglingExit {
        /// Room holding the exit.
        room: String,
        /// Exit direction.
        direction: String,
        /// Missing target room.
        target: String,
    },
}
