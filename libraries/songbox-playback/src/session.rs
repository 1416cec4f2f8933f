//! Playback session and track selection
//!
//! The session holds the now-playing pointer plus shuffle/repeat modes and
//! decides which track comes next or before. It never touches the transport;
//! the [`Player`](crate::Player) carries out whatever the session decides.

use crate::queue::Queue;
use crate::types::SessionState;
use rand::seq::SliceRandom;
use rand::Rng;
use songbox_core::{RepeatMode, SongId};
use std::time::Duration;

/// Outcome of asking for the next track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// No song is selected, nothing to advance from
    Idle,

    /// Repeat-one after a natural end: play the same track again from zero
    RestartCurrent,

    /// Switch to this song (may equal the current one, e.g. a shuffle
    /// self-repick or a one-track queue wrapping around)
    Play(SongId),

    /// Nothing follows the current track
    EndOfQueue,
}

/// Outcome of asking for the previous track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retreat {
    /// No song is selected
    Idle,

    /// Far enough into the track: rewind instead of stepping back
    RestartCurrent,

    /// Step back to this song
    Play(SongId),

    /// The current track is first in the queue (or not queued)
    NoPrevious,
}

/// Now-playing pointer and playback modes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSession {
    now_playing: Option<SongId>,
    shuffle: bool,
    repeat: RepeatMode,
}

impl PlaybackSession {
    /// Create an idle session with the given modes
    pub fn new(shuffle: bool, repeat: RepeatMode) -> Self {
        Self {
            now_playing: None,
            shuffle,
            repeat,
        }
    }

    /// Restore a session from persisted fields
    pub fn restore(now_playing: Option<SongId>, shuffle: bool, repeat: RepeatMode) -> Self {
        Self {
            now_playing,
            shuffle,
            repeat,
        }
    }

    /// Current state of the session
    pub fn state(&self) -> SessionState<'_> {
        match &self.now_playing {
            Some(id) => SessionState::Playing(id),
            None => SessionState::Idle,
        }
    }

    /// Song currently selected as now playing
    pub fn now_playing(&self) -> Option<&SongId> {
        self.now_playing.as_ref()
    }

    /// Whether `id` is the now-playing song
    pub fn is_now_playing(&self, id: &SongId) -> bool {
        self.now_playing.as_ref() == Some(id)
    }

    /// Select `id` as now playing, returning the previous selection
    pub fn set_now_playing(&mut self, id: SongId) -> Option<SongId> {
        self.now_playing.replace(id)
    }

    /// Drop the selection, returning it
    pub fn clear_now_playing(&mut self) -> Option<SongId> {
        self.now_playing.take()
    }

    /// Whether shuffle is enabled
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Decide what follows the current track
    ///
    /// `user_initiated` distinguishes a manual skip from a natural end of
    /// track; only the latter honors repeat-one.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        queue: &Queue,
        user_initiated: bool,
        rng: &mut R,
    ) -> Advance {
        let Some(current) = self.now_playing.as_ref() else {
            return Advance::Idle;
        };

        if self.repeat == RepeatMode::One && !user_initiated {
            return Advance::RestartCurrent;
        }

        let mut successor = if queue.is_empty() {
            None
        } else if self.shuffle {
            let pool: Vec<&SongId> = queue.ids().iter().filter(|id| *id != current).collect();
            if pool.is_empty() {
                Some(current.clone())
            } else {
                pool.choose(rng).map(|id| (*id).clone())
            }
        } else {
            queue
                .position(current)
                .and_then(|idx| queue.get(idx + 1))
                .cloned()
        };

        if successor.is_none() && self.repeat == RepeatMode::All {
            successor = queue.first().cloned();
        }

        successor.map_or(Advance::EndOfQueue, Advance::Play)
    }

    /// Decide what "previous" means at `elapsed` into the current track
    ///
    /// Past `restart_threshold` the current track is rewound; otherwise the
    /// entry before the first occurrence of the current track is selected.
    pub fn retreat(&self, queue: &Queue, elapsed: Duration, restart_threshold: Duration) -> Retreat {
        let Some(current) = self.now_playing.as_ref() else {
            return Retreat::Idle;
        };

        if elapsed > restart_threshold {
            return Retreat::RestartCurrent;
        }

        match queue.position(current) {
            Some(idx) if idx > 0 => queue
                .get(idx - 1)
                .cloned()
                .map_or(Retreat::NoPrevious, Retreat::Play),
            _ => Retreat::NoPrevious,
        }
    }
}
