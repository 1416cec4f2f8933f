//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No source is loaded in the transport
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The audio source could not be loaded
    #[error("Could not load audio source: {0}")]
    Load(String),

    /// The platform declined to start playback
    #[error("Playback rejected: {0}")]
    Rejected(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
