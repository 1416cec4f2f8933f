//! Lenient JSON decoding
//!
//! Saved state and import files may come from older versions or be edited
//! by hand. Decoding keeps whatever is usable: wrongly typed fields fall back
//! to their defaults instead of failing the whole document.

use crate::error::{Result, StorageError};
use serde_json::{Map, Value};
use songbox_core::{LibraryState, RepeatMode, Song, SongDraft, SongId};

/// Decode a persisted state snapshot
///
/// Fails only if the text is not JSON or has no `songs` array.
pub fn decode_state(text: &str) -> Result<LibraryState> {
    let root: Value = serde_json::from_str(text).map_err(StorageError::InvalidJson)?;

    let songs = root
        .get("songs")
        .and_then(Value::as_array)
        .ok_or_else(|| StorageError::malformed("missing songs array"))?;

    let queue_ids = root
        .get("queueIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(SongId::new)
                .collect()
        })
        .unwrap_or_default();

    Ok(LibraryState {
        songs: decode_songs(songs),
        queue_ids,
        now_playing_id: root
            .get("nowPlayingId")
            .and_then(Value::as_str)
            .map(SongId::new),
        shuffle: root.get("shuffle").is_some_and(truthy),
        repeat: root
            .get("repeat")
            .and_then(Value::as_str)
            .and_then(RepeatMode::from_str)
            .unwrap_or_default(),
    })
}

/// Loose truthiness: `false`, `null`, `0`, `NaN` and `""` are false
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decode every object in `values` as a song, skipping anything else
pub fn decode_songs(values: &[Value]) -> Vec<Song> {
    values
        .iter()
        .filter_map(Value::as_object)
        .map(decode_song)
        .collect()
}

/// Decode one song object
pub fn decode_song(obj: &Map<String, Value>) -> Song {
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    SongDraft {
        id: obj.get("id").and_then(Value::as_str).map(SongId::new),
        title: text("title"),
        artist: text("artist"),
        album: text("album"),
        cover_url: text("coverUrl"),
        audio_url: text("audioUrl"),
        duration_sec: obj.get("durationSec").and_then(Value::as_f64),
        notes: text("notes"),
        created_at: obj
            .get("createdAt")
            .and_then(Value::as_f64)
            .filter(|ms| ms.is_finite())
            .map(|ms| ms as i64),
        ephemeral: obj
            .get("ephemeral")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
    .normalize()
}
