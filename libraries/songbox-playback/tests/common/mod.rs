//! Shared helpers for player integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use songbox_core::{CoreError, LibraryState, RepeatMode, Song, SongDraft, SongId, StateStore};
use songbox_playback::{Notice, PlaybackConfig, PlaybackError, Player, PlayerEvent, Transport};
use std::time::Duration;

pub type TestPlayer = Player<MockTransport, RecordingStore>;

/// Transport that records what the player asked it to do
#[derive(Debug, Default)]
pub struct MockTransport {
    pub url: Option<String>,
    pub paused: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub gain: f32,
    pub loads: usize,
    pub plays: usize,
    pub fail_load: bool,
    pub reject_play: bool,
}

impl Transport for MockTransport {
    fn load(&mut self, url: &str) -> songbox_playback::Result<()> {
        self.loads += 1;
        self.position = Duration::ZERO;
        self.paused = true;
        if self.fail_load {
            self.url = None;
            return Err(PlaybackError::Load(url.to_string()));
        }
        self.url = Some(url.to_string());
        Ok(())
    }

    fn unload(&mut self) {
        self.url = None;
        self.paused = true;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    fn play(&mut self) -> songbox_playback::Result<()> {
        if self.url.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if self.reject_play {
            return Err(PlaybackError::Rejected("autoplay blocked".to_string()));
        }
        self.plays += 1;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn seek_to(&mut self, position: Duration) -> songbox_playback::Result<()> {
        self.position = position;
        Ok(())
    }

    fn current_time(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn loaded_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain;
    }
}

/// In-memory store that counts writes and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub state: Option<LibraryState>,
    pub saves: usize,
    pub fail: bool,
}

impl RecordingStore {
    pub fn with_state(state: LibraryState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}

impl StateStore for RecordingStore {
    fn load(&self) -> songbox_core::Result<Option<LibraryState>> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &LibraryState) -> songbox_core::Result<()> {
        if self.fail {
            return Err(CoreError::storage("disk full"));
        }
        self.saves += 1;
        self.state = Some(state.clone());
        Ok(())
    }
}

pub fn id(raw: &str) -> SongId {
    SongId::new(raw)
}

pub fn url(raw: &str) -> String {
    format!("https://example.com/{}.mp3", raw)
}

/// Song whose `created_at` grows with its position in `songs(..)`
pub fn song(raw: &str, created_at: i64) -> Song {
    SongDraft {
        id: Some(id(raw)),
        title: raw.to_uppercase(),
        audio_url: url(raw),
        created_at: Some(created_at),
        ..SongDraft::default()
    }
    .normalize()
}

pub fn songs(raws: &[&str]) -> Vec<Song> {
    raws.iter()
        .enumerate()
        .map(|(i, raw)| song(raw, 1_000 + i as i64))
        .collect()
}

pub fn state(
    library: &[&str],
    queue: &[&str],
    now_playing: Option<&str>,
    repeat: RepeatMode,
) -> LibraryState {
    LibraryState {
        songs: songs(library),
        queue_ids: queue.iter().map(|raw| id(raw)).collect(),
        now_playing_id: now_playing.map(id),
        shuffle: false,
        repeat,
    }
}

pub fn player_from(state: LibraryState) -> TestPlayer {
    Player::restore(
        MockTransport::default(),
        RecordingStore::with_state(state),
        PlaybackConfig::default(),
    )
    .with_rng(StdRng::seed_from_u64(42))
}

/// Player with `library`, `queue` and `current` already started
pub fn playing(library: &[&str], queue: &[&str], current: &str, repeat: RepeatMode) -> TestPlayer {
    let mut player = player_from(state(library, queue, None, repeat));
    assert!(player.play_by_id(&id(current)));
    player.drain_events();
    player
}

pub fn saves(player: &TestPlayer) -> usize {
    player.store().saves
}

pub fn now_playing(player: &TestPlayer) -> Option<&str> {
    player.session().now_playing().map(SongId::as_str)
}

pub fn queue_ids(player: &TestPlayer) -> Vec<&str> {
    player.queue().ids().iter().map(SongId::as_str).collect()
}

pub fn notices(events: &[PlayerEvent]) -> Vec<Notice> {
    events
        .iter()
        .filter_map(|event| match event {
            PlayerEvent::Notice(notice) => Some(notice.clone()),
            _ => None,
        })
        .collect()
}
