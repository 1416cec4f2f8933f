//! Songbox Core
//!
//! Platform-agnostic core types, traits, and error handling for Songbox.
//!
//! This crate provides the foundational building blocks shared by the
//! playback engine, the storage layer and the CLI.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, `RepeatMode`, `LibraryState`
//! - **Library Store**: `Library` (catalog CRUD, search and sort)
//! - **Core Traits**: `StateStore` (durable snapshot slot)
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use songbox_core::{Library, SongDraft};
//!
//! let mut library = Library::new();
//! let id = library.add(SongDraft {
//!     title: "  Intro ".to_string(),
//!     audio_url: "https://example.com/intro.mp3".to_string(),
//!     ..SongDraft::default()
//! });
//!
//! let song = library.get(&id).unwrap();
//! assert_eq!(song.title, "Intro");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod library;
pub mod time;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use library::{Library, LibraryQuery, SortKey, SortOrder};
pub use traits::StateStore;
pub use types::{LibraryState, RepeatMode, Song, SongDraft, SongId, SongPatch};
