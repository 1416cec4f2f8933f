//! Player Events
//!
//! Event-based communication for UI synchronization. The player queues
//! events as it mutates state; frontends drain them after each call:
//! - Track changes and restarts
//! - Queue and mode changes
//! - Duration reported by the transport
//! - Notices (short advisory messages shown to the user)

use serde::{Deserialize, Serialize};
use songbox_core::{RepeatMode, SongId};
use std::fmt;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A different song became now playing
    TrackChanged {
        /// ID of the new (current) song
        song_id: SongId,
        /// ID of the previous song (if any)
        previous_song_id: Option<SongId>,
    },

    /// The current song was started again from zero
    TrackRestarted {
        /// ID of the restarted song
        song_id: SongId,
    },

    /// The session went idle (now-playing deleted, dequeued or reset)
    Stopped,

    /// Queue changed (songs added/removed/reordered)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle or repeat changed
    ModeChanged {
        /// Whether shuffle is on
        shuffle: bool,
        /// Current repeat mode
        repeat: RepeatMode,
    },

    /// The transport reported the loaded source's duration
    DurationChanged {
        /// Duration in seconds
        seconds: f64,
    },

    /// Advisory message for the user
    Notice(Notice),
}

/// Short advisory messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Playback started
    Playing,
    /// The song has no playable source
    NoAudioSource,
    /// The transport refused to start
    PlaybackFailed,
    /// The transport refused to resume
    PlaybackBlocked,
    /// Nothing follows the current song
    EndOfQueue,
    /// Nothing precedes the current song
    NoPreviousTrack,
    /// Play requested with an empty library
    AddSongFirst,
    /// The transport failed to load the source
    AudioFailed,
    /// A song was added
    Added,
    /// A session-only song was added
    AddedTemporary,
    /// A song was edited
    Saved,
    /// A song was queued
    AddedToQueue,
    /// The queue was emptied
    QueueCleared,
    /// Shuffle switched
    Shuffle(bool),
    /// Repeat mode switched
    Repeat(RepeatMode),
    /// A song was deleted
    Deleted,
    /// Songs were imported
    Imported,
    /// An import contained no songs
    NoSongsFound,
    /// Everything was cleared
    Reset,
    /// Sample songs were added
    SamplesAdded,
    /// Persisting state failed; the message is the underlying error
    SaveFailed(String),
}

impl Notice {
    /// Whether the notice reports a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::NoAudioSource
                | Notice::PlaybackFailed
                | Notice::PlaybackBlocked
                | Notice::AudioFailed
                | Notice::NoSongsFound
                | Notice::SaveFailed(_)
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Playing => f.write_str("Playing"),
            Notice::NoAudioSource => {
                f.write_str("This track has no audio URL (local files are temporary).")
            }
            Notice::PlaybackFailed => f.write_str("Could not start playback"),
            Notice::PlaybackBlocked => f.write_str("Playback blocked"),
            Notice::EndOfQueue => f.write_str("End of queue"),
            Notice::NoPreviousTrack => f.write_str("No previous track"),
            Notice::AddSongFirst => f.write_str("Add a song first"),
            Notice::AudioFailed => f.write_str("Audio failed to load"),
            Notice::Added => f.write_str("Added"),
            Notice::AddedTemporary => f.write_str("Added (local file is temporary)"),
            Notice::Saved => f.write_str("Saved"),
            Notice::AddedToQueue => f.write_str("Added to queue"),
            Notice::QueueCleared => f.write_str("Queue cleared"),
            Notice::Shuffle(true) => f.write_str("Shuffle on"),
            Notice::Shuffle(false) => f.write_str("Shuffle off"),
            Notice::Repeat(mode) => write!(f, "Repeat: {}", mode),
            Notice::Deleted => f.write_str("Deleted"),
            Notice::Imported => f.write_str("Imported"),
            Notice::NoSongsFound => f.write_str("No songs found in JSON"),
            Notice::Reset => f.write_str("Reset"),
            Notice::SamplesAdded => f.write_str("Added sample songs"),
            Notice::SaveFailed(reason) => write!(f, "Could not save library: {}", reason),
        }
    }
}
