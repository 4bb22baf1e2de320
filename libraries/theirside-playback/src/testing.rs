//! Recording media backend for tests
//!
//! `FakeMediaBackend` implements `MediaBackend` without producing sound. It
//! records every call so tests can assert what the store asked for, and can
//! be told to fail. Clones share the same recording.

use crate::{
    backend::{MediaBackend, MediaSource},
    error::{PlaybackError, Result},
};
use std::cell::RefCell;
use std::rc::Rc;

/// One call received by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    /// `load` with this source URL
    Load(String),
    /// `play`
    Play,
    /// `pause`
    Pause,
    /// `set_current_time`
    SetCurrentTime(f64),
    /// `set_muted`
    SetMuted(bool),
    /// `set_volume`
    SetVolume(f64),
    /// `set_playback_rate`
    SetPlaybackRate(f64),
}

#[derive(Debug, Default)]
struct FakeInner {
    calls: Vec<MediaCall>,
    current_time: f64,
    duration: Option<f64>,
    play_failure: Option<String>,
    reject_sources: bool,
}

/// Media backend that records calls instead of playing audio
#[derive(Debug, Clone, Default)]
pub struct FakeMediaBackend {
    inner: Rc<RefCell<FakeInner>>,
}

impl FakeMediaBackend {
    /// Create a fake that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<MediaCall> {
        self.inner.borrow().calls.clone()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Make the next `play` fail with `message`
    pub fn fail_next_play(&self, message: impl Into<String>) {
        self.inner.borrow_mut().play_failure = Some(message.into());
    }

    /// Make every `load` fail
    pub fn reject_sources(&self) {
        self.inner.borrow_mut().reject_sources = true;
    }

    /// Set what `duration` reports
    pub fn set_reported_duration(&self, duration: Option<f64>) {
        self.inner.borrow_mut().duration = duration;
    }
}

impl MediaBackend for FakeMediaBackend {
    fn load(&mut self, source: &MediaSource) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(MediaCall::Load(source.src.clone()));
        if inner.reject_sources {
            return Err(PlaybackError::UnsupportedSource(source.src.clone()));
        }
        inner.current_time = 0.0;
        inner.duration = None;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(MediaCall::Play);
        match inner.play_failure.take() {
            Some(message) => Err(PlaybackError::Backend(message)),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().calls.push(MediaCall::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(MediaCall::SetCurrentTime(seconds));
        inner.current_time = seconds;
    }

    fn current_time(&self) -> f64 {
        self.inner.borrow().current_time
    }

    fn duration(&self) -> Option<f64> {
        self.inner.borrow().duration
    }

    fn set_muted(&mut self, muted: bool) {
        self.inner.borrow_mut().calls.push(MediaCall::SetMuted(muted));
    }

    fn set_volume(&mut self, gain: f64) {
        self.inner.borrow_mut().calls.push(MediaCall::SetVolume(gain));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().calls.push(MediaCall::SetPlaybackRate(rate));
    }
}
