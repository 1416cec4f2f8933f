//! Platform-agnostic transport trait
//!
//! Abstracts the audio renderer (a browser media element, a native output
//! stream, a headless stand-in) so the player can drive any of them.

use crate::error::Result;
use std::time::Duration;

/// Audio rendering capability the player drives
///
/// Implementors render one source at a time. Notifications flow the other
/// way: the host calls [`Player::on_ended`](crate::Player::on_ended),
/// [`Player::on_error`](crate::Player::on_error) and
/// [`Player::on_duration_change`](crate::Player::on_duration_change) when
/// the renderer reports them.
pub trait Transport {
    /// Load a source by URL, replacing whatever was loaded
    ///
    /// # Returns
    /// * `Ok(())` - Source accepted (it may still fail later via `on_error`)
    /// * `Err(_)` - Source could not be loaded at all
    fn load(&mut self, url: &str) -> Result<()>;

    /// Drop the loaded source
    fn unload(&mut self);

    /// Start or resume rendering
    ///
    /// # Returns
    /// * `Ok(())` - Rendering started
    /// * `Err(_)` - The platform refused (e.g. autoplay policy)
    fn play(&mut self) -> Result<()>;

    /// Pause rendering, keeping position
    fn pause(&mut self);

    /// Whether rendering is paused (true when nothing is loaded)
    fn is_paused(&self) -> bool;

    /// Seek to position in the loaded source
    fn seek_to(&mut self, position: Duration) -> Result<()>;

    /// Current position in the loaded source
    fn current_time(&self) -> Duration;

    /// Duration of the loaded source, if known
    fn duration(&self) -> Option<Duration>;

    /// URL of the loaded source
    fn loaded_url(&self) -> Option<&str>;

    /// Set output gain (0.0 to 1.0)
    fn set_volume(&mut self, gain: f32);

    /// Rewind to the start
    ///
    /// Equivalent to `seek_to(Duration::ZERO)`
    fn rewind(&mut self) -> Result<()> {
        self.seek_to(Duration::ZERO)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn load(&mut self, url: &str) -> Result<()> {
        (**self).load(url)
    }

    fn unload(&mut self) {
        (**self).unload()
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        (**self).seek_to(position)
    }

    fn current_time(&self) -> Duration {
        (**self).current_time()
    }

    fn duration(&self) -> Option<Duration> {
        (**self).duration()
    }

    fn loaded_url(&self) -> Option<&str> {
        (**self).loaded_url()
    }

    fn set_volume(&mut self, gain: f32) {
        (**self).set_volume(gain)
    }
}
