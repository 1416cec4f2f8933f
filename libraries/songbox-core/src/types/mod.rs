//! Domain types: songs, IDs and the persisted library state

mod ids;
mod playback_state;
mod song;

pub use ids::SongId;
pub use playback_state::{LibraryState, RepeatMode};
pub use song::{Song, SongDraft, SongPatch, UNTITLED};
