//! Play queue
//!
//! An ordered list of song references. The same song may be queued more than
//! once; lookups by ID always resolve to the first occurrence.

use songbox_core::SongId;

/// Ordered, mutable sequence of song IDs
///
/// The queue never validates IDs against the library; the player does that
/// before enqueuing and purges IDs when songs are deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    ids: Vec<SongId>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from an existing order
    pub fn from_ids(ids: Vec<SongId>) -> Self {
        Self { ids }
    }

    /// Append to the end
    pub fn enqueue(&mut self, id: SongId) {
        self.ids.push(id);
    }

    /// Remove the ID at `index`
    ///
    /// Returns the removed ID, or `None` if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<SongId> {
        if index >= self.ids.len() {
            return None;
        }
        Some(self.ids.remove(index))
    }

    /// Move the ID at `from` so it ends up at `to`
    ///
    /// No-op (returns `false`) if the indices are equal or either is out of
    /// range. Relative order of all other IDs is preserved.
    pub fn move_to(&mut self, from: usize, to: usize) -> bool {
        let len = self.ids.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let id = self.ids.remove(from);
        self.ids.insert(to, id);
        true
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Remove every occurrence of `id`
    ///
    /// Returns how many entries were removed.
    pub fn purge(&mut self, id: &SongId) -> usize {
        let before = self.ids.len();
        self.ids.retain(|queued| queued != id);
        before - self.ids.len()
    }

    /// Index of the first occurrence of `id`
    pub fn position(&self, id: &SongId) -> Option<usize> {
        self.ids.iter().position(|queued| queued == id)
    }

    /// Whether `id` is queued at least once
    pub fn contains(&self, id: &SongId) -> bool {
        self.ids.contains(id)
    }

    /// Get ID at index
    pub fn get(&self, index: usize) -> Option<&SongId> {
        self.ids.get(index)
    }

    /// First ID in the queue
    pub fn first(&self) -> Option<&SongId> {
        self.ids.first()
    }

    /// All IDs in queue order
    pub fn ids(&self) -> &[SongId] {
        &self.ids
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
