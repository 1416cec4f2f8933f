//! Core traits for Songbox
use crate::error::Result;
use crate::types::LibraryState;

/// Durable slot holding the combined library/queue/session snapshot
///
/// Implementers persist the whole [`LibraryState`] on every `save` (there is
/// no incremental update and no batching). `load` returns `Ok(None)` when the
/// slot is empty or its content cannot be understood; it only fails when the
/// slot itself cannot be read.
pub trait StateStore {
    /// Load the last saved snapshot, if any
    ///
    /// # Errors
    /// Returns an error if the underlying slot cannot be read
    fn load(&self) -> Result<Option<LibraryState>>;

    /// Replace the stored snapshot with `state`
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be encoded or written
    fn save(&mut self, state: &LibraryState) -> Result<()>;
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn load(&self) -> Result<Option<LibraryState>> {
        (**self).load()
    }

    fn save(&mut self, state: &LibraryState) -> Result<()> {
        (**self).save(state)
    }
}
