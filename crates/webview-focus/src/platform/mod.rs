//! Platform backends for the focus patch.
//!
//! Only Apple platforms carry a patchable engine; everywhere else the
//! caller falls back to [`crate::NullSurface`].

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub mod wk;
