/// Persisted library, queue and session state
use crate::types::{Song, SongId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,
    /// Loop the entire queue
    All,
    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "all" => Some(Self::All),
            "one" => Some(Self::One),
            _ => None,
        }
    }

    /// Next mode in the `Off -> All -> One -> Off` cycle
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot written to and read from the persistence slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryState {
    /// Every song in the library, newest first
    pub songs: Vec<Song>,

    /// Queue order as song references
    pub queue_ids: Vec<SongId>,

    /// Song the session points at, if any
    pub now_playing_id: Option<SongId>,

    /// Whether shuffle is enabled
    pub shuffle: bool,

    /// Repeat mode
    pub repeat: RepeatMode,
}

impl LibraryState {
    /// Drop songs whose source did not survive the previous session
    ///
    /// Returns `true` if anything was removed. Dangling references are left
    /// for [`LibraryState::sanitize`].
    pub fn drop_ephemeral(&mut self) -> bool {
        let before = self.songs.len();
        self.songs.retain(|song| !song.ephemeral);
        self.songs.len() != before
    }

    /// Restore referential integrity between songs, queue and session
    ///
    /// - queue ids that do not resolve to a song are dropped
    /// - a now-playing id that does not resolve is reset to none
    /// - a valid now-playing id missing from the queue is appended to it
    ///
    /// Returns `true` if the state changed.
    pub fn sanitize(&mut self) -> bool {
        let known: HashSet<&SongId> = self.songs.iter().map(|s| &s.id).collect();

        let queue_before = self.queue_ids.len();
        self.queue_ids.retain(|id| known.contains(id));
        let mut changed = self.queue_ids.len() != queue_before;

        if let Some(id) = self.now_playing_id.take() {
            if known.contains(&id) {
                if !self.queue_ids.contains(&id) {
                    self.queue_ids.push(id.clone());
                    changed = true;
                }
                self.now_playing_id = Some(id);
            } else {
                changed = true;
            }
        }

        changed
    }
}
