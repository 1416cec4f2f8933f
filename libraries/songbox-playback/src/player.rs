//! Player - main state owner
//!
//! Owns the library, queue and session, drives a [`Transport`] and writes a
//! full snapshot to a [`StateStore`] after every state mutation.

use crate::{
    error::{PlaybackError, Result},
    events::{Notice, PlayerEvent},
    queue::Queue,
    session::{Advance, PlaybackSession, Retreat},
    transport::Transport,
    types::{PlaybackConfig, SessionState},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use songbox_core::library::sample_songs;
use songbox_core::{
    Library, LibraryQuery, LibraryState, RepeatMode, Song, SongDraft, SongId, SongPatch,
    StateStore,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Music library player
///
/// Every method that changes library, queue or session state persists the
/// combined state exactly once before returning. Pure transport actions
/// (pause, resume, rewind, seek, volume) are not persisted.
///
/// Invariant: when a song is now playing, it is in the queue.
pub struct Player<T: Transport, S: StateStore> {
    library: Library,
    queue: Queue,
    session: PlaybackSession,
    transport: T,
    store: S,
    config: PlaybackConfig,
    volume: Volume,
    rng: Box<dyn RngCore + Send>,

    // Bumped whenever playback (re)starts or the position moves
    epoch: u64,
    ended_epoch: Option<u64>,
    errored_epoch: Option<u64>,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<T: Transport, S: StateStore> Player<T, S> {
    /// Create a player with an empty library
    ///
    /// Nothing is read from `store`; use [`Player::restore`] for that.
    pub fn new(mut transport: T, store: S, config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume);
        transport.set_volume(volume.gain());

        Self {
            library: Library::new(),
            queue: Queue::new(),
            session: PlaybackSession::new(config.shuffle, config.repeat),
            transport,
            store,
            config,
            volume,
            rng: Box::new(StdRng::from_entropy()),
            epoch: 0,
            ended_epoch: None,
            errored_epoch: None,
            pending_events: Vec::new(),
        }
    }

    /// Create a player from the snapshot in `store`
    ///
    /// Unreadable state is logged and treated as absent. Session-only songs
    /// are dropped and dangling references repaired; if that changed
    /// anything the repaired state is written back.
    pub fn restore(transport: T, store: S, config: PlaybackConfig) -> Self {
        let loaded = match store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Could not load saved state, starting fresh");
                None
            }
        };

        let mut player = Self::new(transport, store, config);

        if let Some(mut state) = loaded {
            let changed = state.drop_ephemeral() | state.sanitize();
            player.library = Library::from_songs(state.songs);
            player.queue = Queue::from_ids(state.queue_ids);
            player.session =
                PlaybackSession::restore(state.now_playing_id, state.shuffle, state.repeat);

            info!(
                songs = player.library.len(),
                queued = player.queue.len(),
                "Restored library"
            );

            if changed {
                debug!("Saved state needed repair, writing it back");
                player.persist();
            }
        }

        player
    }

    /// Replace the random source used by shuffle
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // ===== Library =====

    /// Add a song to the front of the library
    ///
    /// With `play_now` the song is queued and started immediately.
    pub fn add_song(&mut self, draft: SongDraft, play_now: bool) -> songbox_core::Result<SongId> {
        draft.validate()?;

        let ephemeral = draft.ephemeral;
        let id = self.library.add(draft);
        debug!(song = %id, "Added song");

        self.notify(if ephemeral {
            Notice::AddedTemporary
        } else {
            Notice::Added
        });

        if play_now {
            self.start(&id);
        }

        self.persist();
        Ok(id)
    }

    /// Edit a song
    ///
    /// Returns `false` (and changes nothing) if `id` is unknown.
    pub fn update_song(&mut self, id: &SongId, patch: SongPatch) -> bool {
        if !self.library.update(id, patch) {
            return false;
        }

        self.notify(Notice::Saved);
        self.persist();
        true
    }

    /// Delete a song
    ///
    /// Removes it from the library and every queue position. If it was now
    /// playing the session goes idle and the transport is unloaded.
    pub fn remove_song(&mut self, id: &SongId) -> Option<Song> {
        let removed = self.library.remove(id)?;

        if self.queue.purge(id) > 0 {
            self.emit_queue_changed();
        }

        if self.session.is_now_playing(id) {
            self.stop();
        }

        info!(song = %id, "Deleted song");
        self.notify(Notice::Deleted);
        self.persist();
        Some(removed)
    }

    /// Add the bundled sample songs
    pub fn seed_samples(&mut self) {
        for draft in sample_songs() {
            self.library.add(draft);
        }

        self.notify(Notice::SamplesAdded);
        self.persist();
    }

    /// Merge imported songs into the library
    ///
    /// Songs with a known ID replace the existing entry. Returns the number
    /// of songs imported; an empty import changes nothing.
    pub fn import_songs(&mut self, songs: Vec<Song>) -> usize {
        if songs.is_empty() {
            self.notify(Notice::NoSongsFound);
            return 0;
        }

        let count = songs.len();
        self.library.merge(songs);
        self.repair();

        info!(count, total = self.library.len(), "Imported songs");
        self.notify(Notice::Imported);
        self.persist();
        count
    }

    /// Songs worth exporting (persistent and playable), in library order
    pub fn export_songs(&self) -> Vec<Song> {
        self.library
            .all()
            .iter()
            .filter(|song| song.is_exportable())
            .cloned()
            .collect()
    }

    /// Clear library, queue and session; reset modes to defaults
    pub fn reset(&mut self) {
        self.library.clear();
        self.queue.clear();
        if self.session.now_playing().is_some() {
            self.stop();
        } else {
            self.transport.unload();
        }
        self.session = PlaybackSession::default();

        self.emit_queue_changed();
        self.emit_mode_changed();
        info!("Reset library");
        self.notify(Notice::Reset);
        self.persist();
    }

    // ===== Queue =====

    /// Append a song to the queue
    ///
    /// Returns `false` if `id` is not in the library.
    pub fn enqueue(&mut self, id: &SongId) -> bool {
        if !self.library.contains(id) {
            return false;
        }

        self.queue.enqueue(id.clone());
        self.emit_queue_changed();
        self.notify(Notice::AddedToQueue);
        self.persist();
        true
    }

    /// Remove the queue entry at `index`
    ///
    /// Removing the last occurrence of the now-playing song ends the session.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<SongId> {
        let removed = self.queue.remove_at(index)?;

        if self.session.is_now_playing(&removed) && !self.queue.contains(&removed) {
            self.stop();
        }

        self.emit_queue_changed();
        self.persist();
        Some(removed)
    }

    /// Move the queue entry at `from` to `to`
    ///
    /// Returns `false` for equal or out-of-range indices.
    pub fn move_in_queue(&mut self, from: usize, to: usize) -> bool {
        if !self.queue.move_to(from, to) {
            return false;
        }

        self.emit_queue_changed();
        self.persist();
        true
    }

    /// Move the entry at `index` one position toward the head
    pub fn move_up(&mut self, index: usize) -> bool {
        self.move_in_queue(index, index.saturating_sub(1))
    }

    /// Move the entry at `index` one position toward the tail
    pub fn move_down(&mut self, index: usize) -> bool {
        let last = self.queue.len().saturating_sub(1);
        self.move_in_queue(index, (index + 1).min(last))
    }

    /// Empty the queue; a now-playing song goes with it
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        if self.session.now_playing().is_some() {
            self.stop();
        }

        self.emit_queue_changed();
        self.notify(Notice::QueueCleared);
        self.persist();
    }

    // ===== Playback Control =====

    /// Make `id` the now-playing song and start it
    ///
    /// Queues the song if it is not queued yet. Unknown IDs are ignored and
    /// return `false`. Load and start failures are reported as notices; the
    /// selection is persisted either way.
    pub fn play_by_id(&mut self, id: &SongId) -> bool {
        if !self.start(id) {
            return false;
        }

        self.persist();
        true
    }

    /// Skip to the next track
    ///
    /// `user_initiated` is `false` for a natural end of track, which honors
    /// repeat-one. When nothing follows, the transport is paused and the
    /// now-playing song is kept.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, user_initiated: bool) {
        match self
            .session
            .advance(&self.queue, user_initiated, &mut *self.rng)
        {
            Advance::Idle => {}
            Advance::RestartCurrent => self.restart_current(),
            Advance::Play(id) => {
                if self.session.is_now_playing(&id) {
                    self.rewind();
                    self.emit_restarted(&id);
                }
                self.start(&id);
                self.persist();
            }
            Advance::EndOfQueue => {
                debug!("Reached end of queue");
                self.transport.pause();
                self.notify(Notice::EndOfQueue);
            }
        }
    }

    /// Go to the previous track
    ///
    /// Past the configured restart threshold the current track is rewound
    /// instead.
    pub fn previous(&mut self) {
        let elapsed = self.transport.current_time();
        let threshold = self.config.restart_threshold();

        match self.session.retreat(&self.queue, elapsed, threshold) {
            Retreat::Idle => {}
            Retreat::RestartCurrent => {
                self.rewind();
                if let Some(id) = self.session.now_playing().cloned() {
                    self.emit_restarted(&id);
                }
            }
            Retreat::Play(id) => {
                self.start(&id);
                self.persist();
            }
            Retreat::NoPrevious => self.notify(Notice::NoPreviousTrack),
        }
    }

    /// Play or pause
    ///
    /// When idle, starts the queue head, else the newest song. When the
    /// transport does not hold the current song (e.g. right after restore),
    /// the song is loaded and started.
    pub fn toggle_play_pause(&mut self) {
        let Some(current) = self.session.now_playing().cloned() else {
            let first = self
                .queue
                .first()
                .cloned()
                .or_else(|| self.library.most_recent().map(|song| song.id.clone()));

            match first {
                Some(id) => {
                    self.play_by_id(&id);
                }
                None => self.notify(Notice::AddSongFirst),
            }
            return;
        };

        if !self.transport_holds(&current) {
            self.play_by_id(&current);
            return;
        }

        if self.transport.is_paused() {
            self.epoch += 1;
            if let Err(e) = self.transport.play() {
                warn!(error = %e, "Transport refused to resume");
                self.notify(Notice::PlaybackBlocked);
            }
        } else {
            self.transport.pause();
        }
    }

    // ===== Modes =====

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, on: bool) {
        self.session.set_shuffle(on);
        self.emit_mode_changed();
        self.notify(Notice::Shuffle(on));
        self.persist();
    }

    /// Flip shuffle
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.session.shuffle());
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.session.set_repeat(mode);
        self.emit_mode_changed();
        self.notify(Notice::Repeat(mode));
        self.persist();
    }

    /// Advance repeat mode: Off → All → One → Off
    pub fn cycle_repeat(&mut self) {
        self.set_repeat(self.session.repeat().cycle());
    }

    // ===== Transport Notifications =====

    /// The transport finished the current source
    ///
    /// Acts like a non-user [`next`](Player::next). Repeated reports for the
    /// same playback start are ignored.
    pub fn on_ended(&mut self) {
        if self.ended_epoch == Some(self.epoch) {
            debug!(epoch = self.epoch, "Ignoring repeated end of track");
            return;
        }

        self.ended_epoch = Some(self.epoch);
        self.next(false);
    }

    /// The transport failed to load or decode the current source
    pub fn on_error(&mut self) {
        if self.errored_epoch == Some(self.epoch) {
            return;
        }

        self.errored_epoch = Some(self.epoch);
        warn!(song = ?self.session.now_playing(), "Audio failed to load");
        self.notify(Notice::AudioFailed);
    }

    /// The transport learned the loaded source's duration
    ///
    /// Fills in the now-playing song's duration if it was unknown.
    pub fn on_duration_change(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            return;
        }

        self.pending_events
            .push(PlayerEvent::DurationChanged { seconds });

        let Some(id) = self.session.now_playing().cloned() else {
            return;
        };

        let unknown = self
            .library
            .get(&id)
            .is_some_and(|song| song.duration_sec.is_none());

        if unknown {
            let patch = SongPatch {
                duration_sec: Some(Some(seconds)),
                ..SongPatch::default()
            };
            self.library.update(&id, patch);
            self.persist();
        }
    }

    // ===== Seek =====

    /// Seek in the loaded source, clamped to its duration
    pub fn seek_to(&mut self, position: Duration) -> Result<()> {
        if self.transport.loaded_url().is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let position = match self.transport.duration() {
            Some(duration) => position.min(duration),
            None => position,
        };

        self.epoch += 1;
        self.transport.seek_to(position)
    }

    /// Seek by fraction of the duration (0.0 to 1.0, clamped)
    pub fn seek_to_percent(&mut self, percent: f32) -> Result<()> {
        let percent = percent.clamp(0.0, 1.0);

        match self.transport.duration() {
            Some(duration) => self.seek_to(duration.mul_f32(percent)),
            None => Err(PlaybackError::NoTrackLoaded),
        }
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.transport.set_volume(self.volume.gain());
    }

    /// Get volume (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Mute
    pub fn mute(&mut self) {
        self.volume.mute();
        self.transport.set_volume(self.volume.gain());
    }

    /// Unmute
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.transport.set_volume(self.volume.gain());
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.transport.set_volume(self.volume.gain());
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== State Queries =====

    /// The song catalog
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Search and sort the library
    pub fn query(&self, query: &LibraryQuery) -> Vec<&Song> {
        self.library.query(query)
    }

    /// The play queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Now-playing pointer and modes
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Session state
    pub fn state(&self) -> SessionState<'_> {
        self.session.state()
    }

    /// The now-playing song
    pub fn now_playing_song(&self) -> Option<&Song> {
        self.session
            .now_playing()
            .and_then(|id| self.library.get(id))
    }

    /// Configuration the player was built with
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// The driven transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport (for hosts feeding it time updates)
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The persistence slot
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the persisted state
    pub fn snapshot(&self) -> LibraryState {
        LibraryState {
            songs: self.library.all().to_vec(),
            queue_ids: self.queue.ids().to_vec(),
            now_playing_id: self.session.now_playing().cloned(),
            shuffle: self.session.shuffle(),
            repeat: self.session.repeat(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns events in the order they were emitted.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// Select and start `id` without persisting
    ///
    /// Returns `false` if `id` is not in the library.
    fn start(&mut self, id: &SongId) -> bool {
        let Some(song) = self.library.get(id) else {
            return false;
        };
        let url = song.audio_url.clone();

        let previous = self.session.set_now_playing(id.clone());
        if !self.queue.contains(id) {
            self.queue.enqueue(id.clone());
            self.emit_queue_changed();
        }

        self.epoch += 1;
        if previous.as_ref() != Some(id) {
            debug!(song = %id, previous = ?previous, "Track changed");
            self.pending_events.push(PlayerEvent::TrackChanged {
                song_id: id.clone(),
                previous_song_id: previous,
            });
        }

        if url.is_empty() {
            self.transport.unload();
            self.notify(Notice::NoAudioSource);
            return true;
        }

        if self.transport.loaded_url() != Some(url.as_str()) {
            if let Err(e) = self.transport.load(&url) {
                warn!(song = %id, error = %e, "Could not load audio source");
                self.errored_epoch = Some(self.epoch);
                self.notify(Notice::AudioFailed);
                return true;
            }
        }

        match self.transport.play() {
            Ok(()) => {
                info!(song = %id, "Playing");
                self.notify(Notice::Playing);
            }
            Err(e) => {
                warn!(song = %id, error = %e, "Transport refused to start playback");
                self.transport.pause();
                self.notify(Notice::PlaybackFailed);
            }
        }

        true
    }

    /// Play the current track again from zero (repeat-one)
    fn restart_current(&mut self) {
        let Some(id) = self.session.now_playing().cloned() else {
            return;
        };

        self.rewind();
        self.emit_restarted(&id);
        if let Err(e) = self.transport.play() {
            warn!(song = %id, error = %e, "Transport refused to restart track");
            self.transport.pause();
            self.notify(Notice::PlaybackFailed);
        }
    }

    fn rewind(&mut self) {
        self.epoch += 1;
        if let Err(e) = self.transport.rewind() {
            debug!(error = %e, "Rewind failed");
        }
    }

    /// Drop the now-playing selection and unload the transport
    fn stop(&mut self) {
        self.session.clear_now_playing();
        self.transport.unload();
        self.pending_events.push(PlayerEvent::Stopped);
        debug!("Session stopped");
    }

    /// Re-establish referential integrity after a bulk change
    fn repair(&mut self) {
        let mut state = self.snapshot();
        if !state.sanitize() {
            return;
        }

        let had_session = self.session.now_playing().is_some();
        self.queue = Queue::from_ids(state.queue_ids);
        self.emit_queue_changed();

        match state.now_playing_id {
            Some(id) => {
                self.session.set_now_playing(id);
            }
            None if had_session => self.stop(),
            None => {}
        }
    }

    fn transport_holds(&self, id: &SongId) -> bool {
        match self.library.get(id) {
            Some(song) if !song.audio_url.is_empty() => {
                self.transport.loaded_url() == Some(song.audio_url.as_str())
            }
            _ => false,
        }
    }

    /// Write the full state; failures become a notice
    fn persist(&mut self) {
        let state = self.snapshot();
        if let Err(e) = self.store.save(&state) {
            warn!(error = %e, "Could not save library state");
            self.notify(Notice::SaveFailed(e.to_string()));
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.pending_events.push(PlayerEvent::Notice(notice));
    }

    fn emit_restarted(&mut self, id: &SongId) {
        self.pending_events.push(PlayerEvent::TrackRestarted {
            song_id: id.clone(),
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_mode_changed(&mut self) {
        self.pending_events.push(PlayerEvent::ModeChanged {
            shuffle: self.session.shuffle(),
            repeat: self.session.repeat(),
        });
    }
}
