//! Core types for playback management

use serde::{Deserialize, Serialize};
use songbox_core::{RepeatMode, SongId};
use std::time::Duration;

/// Session state as seen by the sequencing engine
///
/// Whether audio is actually running is a transport concern: a paused
/// transport still belongs to a `Playing` session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    /// Nothing is selected
    Idle,

    /// A song is selected as now playing
    Playing(&'a SongId),
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Elapsed time after which "previous" restarts the current track
    /// instead of stepping back (default: 3000 ms)
    pub restart_threshold_ms: u64,

    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Shuffle for a fresh state with nothing persisted (default: false)
    pub shuffle: bool,

    /// Repeat mode for a fresh state with nothing persisted (default: Off)
    pub repeat: RepeatMode,
}

impl PlaybackConfig {
    /// Restart threshold as a `Duration`
    pub fn restart_threshold(&self) -> Duration {
        Duration::from_millis(self.restart_threshold_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            restart_threshold_ms: 3000,
            volume: 80,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}
