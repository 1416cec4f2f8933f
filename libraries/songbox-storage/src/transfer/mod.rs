//! Library import and export documents

use crate::codec::decode_songs;
use crate::error::{Result, StorageError};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use songbox_core::Song;

/// Current export document version
pub const EXPORT_VERSION: u32 = 1;

/// Portable library export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Document format version
    pub version: u32,
    /// RFC 3339 timestamp of the export
    pub exported_at: String,
    /// Exported songs
    pub songs: Vec<Song>,
}

impl ExportDocument {
    /// Build an export of `songs`, dropping any that cannot be exported
    pub fn new(songs: impl IntoIterator<Item = Song>) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            songs: songs.into_iter().filter(Song::is_exportable).collect(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StorageError::SerializationError(e.to_string()))
    }
}

/// Parse an import file
///
/// Accepts `{ "songs": [...] }` or a bare array. Entries are decoded
/// leniently; non-object entries are skipped.
pub fn parse_import(text: &str) -> Result<Vec<Song>> {
    let root: Value = serde_json::from_str(text).map_err(StorageError::InvalidJson)?;

    let entries = match &root {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => obj
            .get("songs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    let songs = decode_songs(entries);
    if songs.is_empty() {
        return Err(StorageError::NoSongs);
    }
    Ok(songs)
}
