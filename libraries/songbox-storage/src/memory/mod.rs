//! In-memory state slot

use songbox_core::{LibraryState, StateStore};

/// State store that keeps the last snapshot in memory
///
/// Used for dry runs and tests; nothing outlives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Option<LibraryState>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `state`
    pub fn with_state(state: Option<LibraryState>) -> Self {
        Self { state, writes: 0 }
    }

    /// Last saved snapshot
    pub fn state(&self) -> Option<&LibraryState> {
        self.state.as_ref()
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> songbox_core::Result<Option<LibraryState>> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &LibraryState) -> songbox_core::Result<()> {
        self.state = Some(state.clone());
        self.writes += 1;
        Ok(())
    }
}
