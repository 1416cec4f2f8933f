//! Songbox - Playback Management
//!
//! Platform-agnostic queue sequencing for Songbox.
//!
//! This crate provides:
//! - Play queue (ordered song references, duplicates allowed)
//! - Playback session (now playing, shuffle, repeat Off/All/One)
//! - Next/previous selection with restart threshold
//! - Volume control (0-100%, mute/unmute)
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `songbox-playback` never renders audio and never touches the disk:
//! - Audio output is abstracted by the [`Transport`] trait
//! - Persistence is abstracted by [`songbox_core::StateStore`]
//!
//! [`Player`] owns all mutable state; every handler takes `&mut self`, so
//! operations never interleave.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use songbox_core::{LibraryState, SongDraft, StateStore};
//! use songbox_playback::{PlaybackConfig, Player, Transport};
//! use std::time::Duration;
//!
//! # #[derive(Default)]
//! # struct Silent { url: Option<String>, paused: bool }
//! # impl Transport for Silent {
//! #     fn load(&mut self, url: &str) -> songbox_playback::Result<()> { self.url = Some(url.into()); Ok(()) }
//! #     fn unload(&mut self) { self.url = None; }
//! #     fn play(&mut self) -> songbox_playback::Result<()> { self.paused = false; Ok(()) }
//! #     fn pause(&mut self) { self.paused = true; }
//! #     fn is_paused(&self) -> bool { self.paused }
//! #     fn seek_to(&mut self, _: Duration) -> songbox_playback::Result<()> { Ok(()) }
//! #     fn current_time(&self) -> Duration { Duration::ZERO }
//! #     fn duration(&self) -> Option<Duration> { None }
//! #     fn loaded_url(&self) -> Option<&str> { self.url.as_deref() }
//! #     fn set_volume(&mut self, _: f32) {}
//! # }
//! # struct Discard;
//! # impl StateStore for Discard {
//! #     fn load(&self) -> songbox_core::Result<Option<LibraryState>> { Ok(None) }
//! #     fn save(&mut self, _: &LibraryState) -> songbox_core::Result<()> { Ok(()) }
//! # }
//! let mut player = Player::new(Silent::default(), Discard, PlaybackConfig::default());
//!
//! let id = player
//!     .add_song(
//!         SongDraft {
//!             title: "Intro".to_string(),
//!             audio_url: "https://example.com/intro.mp3".to_string(),
//!             ..SongDraft::default()
//!         },
//!         false,
//!     )
//!     .unwrap();
//!
//! // Idle: starts the newest song
//! player.toggle_play_pause();
//! assert_eq!(player.session().now_playing(), Some(&id));
//! assert_eq!(player.queue().len(), 1);
//!
//! for event in player.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

mod error;
mod events;
mod player;
mod queue;
mod session;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{Notice, PlayerEvent};
pub use player::Player;
pub use queue::Queue;
pub use session::{Advance, PlaybackSession, Retreat};
pub use transport::Transport;
pub use types::{PlaybackConfig, SessionState};
pub use volume::Volume;
