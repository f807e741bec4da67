//! Web content focus patch for shade.
//!
//! Hybrid UI flows (command palette, inline editors) call `focus()` from
//! script and expect the field to focus and the keyboard to appear. The
//! web engine only honors that for real user gestures. This crate
//! rewrites the two engine gates involved so the app-owned web surface
//! treats programmatic focus like a tap.
//!
//! # Design
//!
//! - **At most once per process**: the rewrite is class-level, so a
//!   process-wide latch makes repeat installs no-ops.
//! - **Resolved, not hardcoded**: the engine's private content view is
//!   found by walking a live web view, and every needed method is looked
//!   up before anything is touched.
//! - **Silent degrade**: if resolution fails, the web view keeps stock
//!   focus behavior and the app carries on.
//!
//! # Example
//!
//! ```ignore
//! use shade_webview_focus::install_for_web_view;
//!
//! // With a live WKWebView pointer, once any web view is ready:
//! let outcome = unsafe { install_for_web_view(web_view_ptr) };
//! ```

mod decorator;
mod error;
mod guard;
mod installer;
mod platform;

pub use decorator::{allow_keyboard_display, qualify_focus_gesture};
pub use error::PatchError;
pub use guard::{PatchGuard, INSTALL_GUARD};
pub use installer::{
    install_once, install_once_with, is_installed, ContentViewPatch, InstallOutcome, NullPatch,
    NullSurface, SurfaceIntrospection,
};

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use platform::wk::{install_for_web_view, WkContentViewPatch, WkSurface};
