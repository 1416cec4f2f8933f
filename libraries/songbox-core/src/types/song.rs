/// Song domain type
use crate::error::{CoreError, Result};
use crate::types::SongId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Title given to songs saved without one
pub const UNTITLED: &str = "Untitled";

/// A catalog entry: display metadata plus an audio source reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title (never empty after normalization)
    pub title: String,

    /// Artist name (empty when unknown)
    pub artist: String,

    /// Album name (empty when unknown)
    pub album: String,

    /// Cover art URL (empty when absent)
    pub cover_url: String,

    /// Audio source URL; empty means there is nothing to play
    pub audio_url: String,

    /// Duration in seconds, `None` when unknown
    pub duration_sec: Option<f64>,

    /// Free-form notes
    pub notes: String,

    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,

    /// Source is only valid for the current session
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ephemeral: bool,
}

impl Song {
    /// Whether the song has a source the transport can load
    pub fn is_playable(&self) -> bool {
        !self.audio_url.is_empty()
    }

    /// Whether the song may leave the device in an export
    pub fn is_exportable(&self) -> bool {
        self.is_playable() && !self.ephemeral
    }

    /// Secondary display line: artist (or "Unknown artist") and album
    pub fn subtitle(&self) -> String {
        let artist = if self.artist.is_empty() {
            "Unknown artist"
        } else {
            self.artist.as_str()
        };

        if self.album.is_empty() {
            artist.to_string()
        } else {
            format!("{} • {}", artist, self.album)
        }
    }

    /// Single upper-cased character standing in for missing cover art
    pub fn badge(&self) -> String {
        self.title
            .trim()
            .chars()
            .next()
            .map_or_else(|| "♪".to_string(), |c| c.to_uppercase().collect())
    }

    /// Apply `patch` and re-normalize, keeping `id` and `created_at`
    pub fn apply(&mut self, patch: SongPatch) {
        let draft = SongDraft {
            id: Some(self.id.clone()),
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            artist: patch.artist.unwrap_or_else(|| self.artist.clone()),
            album: patch.album.unwrap_or_else(|| self.album.clone()),
            cover_url: patch.cover_url.unwrap_or_else(|| self.cover_url.clone()),
            audio_url: patch.audio_url.unwrap_or_else(|| self.audio_url.clone()),
            duration_sec: patch.duration_sec.unwrap_or(self.duration_sec),
            notes: patch.notes.unwrap_or_else(|| self.notes.clone()),
            created_at: Some(self.created_at),
            ephemeral: self.ephemeral,
        };
        *self = draft.normalize();
    }
}

/// Raw, unvalidated song fields as entered by a user or found in a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongDraft {
    /// Existing ID to keep (imports); generated when absent
    pub id: Option<SongId>,
    /// Title; blank becomes "Untitled"
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Album name
    pub album: String,
    /// Cover art URL
    pub cover_url: String,
    /// Audio source URL
    pub audio_url: String,
    /// Duration in seconds
    pub duration_sec: Option<f64>,
    /// Free-form notes
    pub notes: String,
    /// Existing creation time to keep; set to now when absent
    pub created_at: Option<i64>,
    /// Source is only valid for the current session
    pub ephemeral: bool,
}

impl SongDraft {
    /// Check that the draft can become a playable song
    pub fn validate(&self) -> Result<()> {
        if self.audio_url.trim().is_empty() {
            return Err(CoreError::invalid_input(
                "a song needs an audio URL or a local file",
            ));
        }
        Ok(())
    }

    /// Normalize into a `Song`
    ///
    /// Text is trimmed, a blank title becomes "Untitled", negative or
    /// non-finite durations become unknown.
    pub fn normalize(self) -> Song {
        let title = self.title.trim();
        Song {
            id: self
                .id
                .filter(|id| !id.as_str().is_empty())
                .unwrap_or_else(SongId::generate),
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            artist: self.artist.trim().to_string(),
            album: self.album.trim().to_string(),
            cover_url: self.cover_url.trim().to_string(),
            audio_url: self.audio_url.trim().to_string(),
            duration_sec: self.duration_sec.filter(|d| d.is_finite() && *d >= 0.0),
            notes: self.notes.trim().to_string(),
            created_at: self
                .created_at
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
            ephemeral: self.ephemeral,
        }
    }
}

/// Partial update for an existing song; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongPatch {
    /// New title
    pub title: Option<String>,
    /// New artist
    pub artist: Option<String>,
    /// New album
    pub album: Option<String>,
    /// New cover art URL
    pub cover_url: Option<String>,
    /// New audio source URL
    pub audio_url: Option<String>,
    /// `Some(None)` clears a known duration
    pub duration_sec: Option<Option<f64>>,
    /// New notes
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, url: &str) -> SongDraft {
        SongDraft {
            title: title.to_string(),
            audio_url: url.to_string(),
            ..SongDraft::default()
        }
    }

    #[test]
    fn normalize_trims_and_defaults_title() {
        let song = SongDraft {
            artist: "  Nina  ".to_string(),
            ..draft("   ", " https://x/a.mp3 ")
        }
        .normalize();

        assert_eq!(song.title, UNTITLED);
        assert_eq!(song.artist, "Nina");
        assert_eq!(song.audio_url, "https://x/a.mp3");
        assert!(!song.id.as_str().is_empty());
        assert!(song.created_at > 0);
    }

    #[test]
    fn normalize_drops_invalid_durations() {
        let negative = SongDraft {
            duration_sec: Some(-4.0),
            ..draft("a", "u")
        }
        .normalize();
        let nan = SongDraft {
            duration_sec: Some(f64::NAN),
            ..draft("a", "u")
        }
        .normalize();
        let ok = SongDraft {
            duration_sec: Some(215.0),
            ..draft("a", "u")
        }
        .normalize();

        assert_eq!(negative.duration_sec, None);
        assert_eq!(nan.duration_sec, None);
        assert_eq!(ok.duration_sec, Some(215.0));
    }

    #[test]
    fn normalize_keeps_existing_identity() {
        let song = SongDraft {
            id: Some(SongId::new("keep-me")),
            created_at: Some(42),
            ..draft("a", "u")
        }
        .normalize();

        assert_eq!(song.id.as_str(), "keep-me");
        assert_eq!(song.created_at, 42);
    }

    #[test]
    fn validate_requires_audio_source() {
        assert!(draft("a", "  ").validate().is_err());
        assert!(draft("a", "https://x/a.mp3").validate().is_ok());
    }

    #[test]
    fn apply_patch_keeps_id_and_creation_time() {
        let mut song = SongDraft {
            created_at: Some(7),
            ..draft("Old", "u")
        }
        .normalize();
        let id = song.id.clone();

        song.apply(SongPatch {
            title: Some("  New ".to_string()),
            duration_sec: Some(None),
            ..SongPatch::default()
        });

        assert_eq!(song.id, id);
        assert_eq!(song.created_at, 7);
        assert_eq!(song.title, "New");
        assert_eq!(song.audio_url, "u");
        assert_eq!(song.duration_sec, None);
    }

    #[test]
    fn subtitle_and_badge() {
        let mut song = draft("hello", "u").normalize();
        assert_eq!(song.subtitle(), "Unknown artist");
        assert_eq!(song.badge(), "H");

        song.artist = "Band".to_string();
        song.album = "Record".to_string();
        assert_eq!(song.subtitle(), "Band • Record");
    }

    #[test]
    fn ephemeral_songs_are_not_exportable() {
        let mut song = draft("a", "u").normalize();
        assert!(song.is_exportable());

        song.ephemeral = true;
        assert!(!song.is_exportable());

        song.ephemeral = false;
        song.audio_url.clear();
        assert!(!song.is_exportable());
    }
}
