//! Privacy cover core for shade.
//!
//! Keeps sensitive window content out of OS task-switcher snapshots by
//! presenting an opaque cover the moment the app resigns active and
//! tearing it down when the app becomes active again.
//!
//! # Design
//!
//! - **Synchronous transitions**: the cover is up before the lifecycle
//!   callback returns, so the system snapshot never sees live content.
//! - **Host seam**: [`OverlayManager`] holds the policy; the windowing
//!   layer implements [`CoverHost`], which keeps this crate free of any
//!   UI toolkit and fully testable off-device.
//! - **Fail-open UI**: hiding is infallible and always attempted on
//!   foregrounding; a failed show is retried, never trusted.
//!
//! # Example
//!
//! ```ignore
//! use shade_privacy_screen::{CoverHost, OverlayManager};
//!
//! let mut overlay = OverlayManager::new(my_host);
//! overlay.set_enabled(true);
//!
//! // Wire these to the platform lifecycle notifications:
//! overlay.on_will_resign_active();
//! overlay.on_did_become_active();
//! ```

mod error;
mod host;
mod manager;
mod profile;
mod state;

pub use error::CoverError;
pub use host::{CoverCall, CoverHost, CoverRect, NullCoverHost, RecordingCoverHost};
pub use manager::OverlayManager;
pub use profile::DeviceProfile;
pub use state::{LifecyclePhase, OverlayState};
