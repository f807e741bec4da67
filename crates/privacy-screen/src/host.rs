//! Host seam for the cover surface.
//!
//! These traits abstract the windowing layer, allowing the overlay state
//! machine to remain pure and testable without a running shell.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::CoverError;

/// Frame for the cover surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CoverRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A frame at the origin with the given size.
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Provider of the actual cover surface.
///
/// The manager calls `show_cover` synchronously from within the lifecycle
/// callback; implementations must not defer the work to a later event-loop
/// turn, or a frame of content could slip through before the cover lands.
pub trait CoverHost {
    /// Measure the live window the cover must obscure.
    ///
    /// Returns `None` when the hierarchy cannot be measured right now;
    /// the manager then falls back to device-profile dimensions or a
    /// host-maximal cover.
    fn window_frame(&self) -> Option<CoverRect>;

    /// Show the cover at maximum stacking order.
    ///
    /// `frame` is `None` when no measurement was possible - the host
    /// should cover everything it can (typically the whole screen).
    /// The cover must be interaction-opaque: it accepts all input so
    /// nothing reaches the content underneath.
    fn show_cover(&mut self, frame: Option<CoverRect>) -> Result<(), CoverError>;

    /// Hide the cover. Must be safe to call when the cover was never shown.
    fn hide_cover(&mut self);
}

/// Host for targets with no reachable window hierarchy.
///
/// Every show attempt reports the hierarchy as unavailable, which keeps
/// the manager in its retry path instead of pretending content is covered.
pub struct NullCoverHost;

impl CoverHost for NullCoverHost {
    fn window_frame(&self) -> Option<CoverRect> {
        None
    }

    fn show_cover(&mut self, _frame: Option<CoverRect>) -> Result<(), CoverError> {
        Err(CoverError::WindowUnavailable(
            "no cover surface on this host".into(),
        ))
    }

    fn hide_cover(&mut self) {}
}

/// A host call captured by [`RecordingCoverHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverCall {
    Show(Option<CoverRect>),
    Hide,
}

#[derive(Default)]
struct RecordingInner {
    calls: Vec<CoverCall>,
    frame: Option<CoverRect>,
    failures: u32,
}

/// In-memory host for testing.
///
/// Captures every show/hide call for later inspection and can be told to
/// fail the next N show attempts to exercise the retry path. Clones share
/// the same journal, so a test can keep one clone while the manager owns
/// another.
#[derive(Clone, Default)]
pub struct RecordingCoverHost {
    inner: Arc<Mutex<RecordingInner>>,
}

impl RecordingCoverHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recording host whose window can be measured as `frame`.
    pub fn with_frame(frame: CoverRect) -> Self {
        let host = Self::default();
        host.set_frame(Some(frame));
        host
    }

    /// Set (or clear) the measurable window frame.
    pub fn set_frame(&self, frame: Option<CoverRect>) {
        self.inner.lock().unwrap().frame = frame;
    }

    /// Make the next `n` show attempts fail with a construction error.
    pub fn fail_next_shows(&self, n: u32) {
        self.inner.lock().unwrap().failures = n;
    }

    /// All captured calls, in order.
    pub fn calls(&self) -> Vec<CoverCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of show attempts captured, failed ones included.
    pub fn shows(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| matches!(c, CoverCall::Show(_)))
            .count()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().calls.clear();
    }
}

impl CoverHost for RecordingCoverHost {
    fn window_frame(&self) -> Option<CoverRect> {
        self.inner.lock().unwrap().frame
    }

    fn show_cover(&mut self, frame: Option<CoverRect>) -> Result<(), CoverError> {
        let mut inner = self.inner.lock().unwrap();
        // The attempt is journaled even when it is made to fail, so tests
        // can count retries.
        inner.calls.push(CoverCall::Show(frame));
        if inner.failures > 0 {
            inner.failures -= 1;
            return Err(CoverError::Construction("injected failure".into()));
        }
        Ok(())
    }

    fn hide_cover(&mut self) {
        self.inner.lock().unwrap().calls.push(CoverCall::Hide);
    }
}
