//! Headless transport
//!
//! The CLI renders no audio. This transport keeps the bookkeeping a real
//! renderer would (loaded URL, paused flag, position) so the player behaves
//! the same way it does in a graphical frontend.

use songbox_playback::{PlaybackError, Result, Transport};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HeadlessTransport {
    url: Option<String>,
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
    gain: f32,
}

impl HeadlessTransport {
    pub fn new() -> Self {
        Self {
            url: None,
            paused: true,
            position: Duration::ZERO,
            duration: None,
            gain: 1.0,
        }
    }

    /// Current output gain
    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl Default for HeadlessTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HeadlessTransport {
    fn load(&mut self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(PlaybackError::Load("empty source".to_string()));
        }
        debug!(url, "Loading source");
        self.url = Some(url.to_string());
        self.paused = true;
        self.position = Duration::ZERO;
        self.duration = None;
        Ok(())
    }

    fn unload(&mut self) {
        self.url = None;
        self.paused = true;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    fn play(&mut self) -> Result<()> {
        if self.url.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        if self.url.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
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
        self.gain = gain.clamp(0.0, 1.0);
    }
}
