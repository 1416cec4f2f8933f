//! Library store
//!
//! Owns the song catalog. Songs are kept newest first; the queue and the
//! playback session only ever hold [`SongId`] references into it.

use crate::types::{Song, SongDraft, SongId, SongPatch};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sort key for library listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Creation time
    #[default]
    Recent,
    /// Title, case-insensitive
    Title,
    /// Artist, case-insensitive
    Artist,
    /// Album, case-insensitive
    Album,
    /// Known duration; unknown durations sort first
    Duration,
}

/// Sort direction for library listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

/// Search and ordering applied to a library listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryQuery {
    /// Case-insensitive substring matched against title, artist and album
    pub search: String,
    /// Field to order by
    pub sort: SortKey,
    /// Direction of the ordering
    pub order: SortOrder,
}

/// The song catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    songs: Vec<Song>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list of songs (kept in the given order)
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Normalize `draft` and insert it as the newest song
    pub fn add(&mut self, draft: SongDraft) -> SongId {
        let song = draft.normalize();
        let id = song.id.clone();
        self.songs.insert(0, song);
        id
    }

    /// Merge a patch into an existing song
    ///
    /// Returns `false` if `id` is unknown.
    pub fn update(&mut self, id: &SongId, patch: SongPatch) -> bool {
        match self.songs.iter_mut().find(|s| &s.id == id) {
            Some(song) => {
                song.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Remove a song, returning it if it existed
    pub fn remove(&mut self, id: &SongId) -> Option<Song> {
        let idx = self.songs.iter().position(|s| &s.id == id)?;
        Some(self.songs.remove(idx))
    }

    /// Look up a song by ID
    pub fn get(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == id)
    }

    /// Whether `id` resolves to a song
    pub fn contains(&self, id: &SongId) -> bool {
        self.get(id).is_some()
    }

    /// All songs in library order (newest first)
    pub fn all(&self) -> &[Song] {
        &self.songs
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Most recently added song; on equal timestamps the one listed first wins
    pub fn most_recent(&self) -> Option<&Song> {
        self.songs.iter().rev().max_by_key(|s| s.created_at)
    }

    /// Remove every song
    pub fn clear(&mut self) {
        self.songs.clear();
    }

    /// Merge imported songs by ID (imported entries win), newest first
    pub fn merge(&mut self, imported: Vec<Song>) {
        let mut order: Vec<SongId> = self.songs.iter().map(|s| s.id.clone()).collect();
        let mut by_id: HashMap<SongId, Song> = self
            .songs
            .drain(..)
            .map(|s| (s.id.clone(), s))
            .collect();

        for song in imported {
            if !by_id.contains_key(&song.id) {
                order.push(song.id.clone());
            }
            by_id.insert(song.id.clone(), song);
        }

        self.songs = order
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .collect();
        self.songs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    /// Filter and sort the catalog for display
    pub fn query(&self, query: &LibraryQuery) -> Vec<&Song> {
        let needle = query.search.trim().to_lowercase();
        let mut items: Vec<&Song> = self
            .songs
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || format!("{} {} {}", s.title, s.artist, s.album)
                        .to_lowercase()
                        .contains(&needle)
            })
            .collect();

        items.sort_by(|a, b| {
            let ord = compare_by(query.sort, a, b);
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        items
    }
}

fn compare_by(key: SortKey, a: &Song, b: &Song) -> Ordering {
    match key {
        SortKey::Recent => a.created_at.cmp(&b.created_at),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Artist => a.artist.to_lowercase().cmp(&b.artist.to_lowercase()),
        SortKey::Album => a.album.to_lowercase().cmp(&b.album.to_lowercase()),
        SortKey::Duration => {
            let da = a.duration_sec.unwrap_or(-1.0);
            let db = b.duration_sec.unwrap_or(-1.0);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        }
    }
}

/// Songs offered to a fresh library
pub fn sample_songs() -> Vec<SongDraft> {
    vec![
        SongDraft {
            title: "Sample Track".to_string(),
            artist: "Edit me".to_string(),
            album: "Your library".to_string(),
            audio_url: "https://www.kozco.com/tech/piano2-CoolEdit.mp3".to_string(),
            notes: "Replace the URL with your own track.".to_string(),
            ..SongDraft::default()
        },
        SongDraft {
            title: "Ambient Sample".to_string(),
            artist: "Edit me".to_string(),
            audio_url: "https://www.kozco.com/tech/organfinale.mp3".to_string(),
            ..SongDraft::default()
        },
    ]
}
