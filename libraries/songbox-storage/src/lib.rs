//! Songbox Storage
//!
//! File-based persistence for the Songbox library.
//!
//! This crate provides the durable slot the player writes its state to,
//! plus the JSON documents used to move a library between machines.
//!
//! # Architecture
//!
//! - **Single Snapshot**: The whole state is one JSON document, rewritten
//!   atomically on every change
//! - **Lenient Reads**: Old or hand-edited files load as far as they can
//! - **Vertical Slicing**: Each feature owns its own module
//!
//! # Example
//!
//! ```rust,no_run
//! use songbox_core::StateStore;
//! use songbox_storage::JsonFileStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("/tmp/songbox/state.json");
//!
//! // Missing or unreadable files load as "no state"
//! let state = store.load()?.unwrap_or_default();
//! println!("{} songs", state.songs.len());
//! # Ok(())
//! # }
//! ```

mod codec;
mod error;

// Vertical slices
pub mod memory;
pub mod state_file;
pub mod transfer;

pub use codec::{decode_song, decode_songs, decode_state};
pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use state_file::JsonFileStore;
pub use transfer::{parse_import, ExportDocument};
