//! Error types for the privacy cover.

use thiserror::Error;

/// Errors that can occur while managing the cover surface.
///
/// None of these are fatal: the manager logs them and retries on the
/// next lifecycle transition rather than leaving content exposed by
/// giving up silently.
#[derive(Debug, Error)]
pub enum CoverError {
    /// The window hierarchy could not be reached (no tracked window,
    /// no monitor). Transient - retried on the next transition.
    #[error("window hierarchy unavailable: {0}")]
    WindowUnavailable(String),

    /// The host failed to build or manipulate the cover surface.
    #[error("cover construction failed: {0}")]
    Construction(String),
}
