//! Patch installation, kept independent of any web engine.
//!
//! The engine-specific work (finding the content view, rewriting its
//! methods) sits behind two traits so the install flow and its guard
//! semantics can be exercised with fakes on any platform.

use crate::error::PatchError;
use crate::guard::{PatchGuard, INSTALL_GUARD};

/// What an install attempt amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// This call performed the rewrite.
    Installed,
    /// Another call already claimed the install slot.
    AlreadyInstalled,
    /// The surface could not be patched; stock behavior remains.
    Unavailable,
}

/// Handle onto the engine's internal content view class, resolved from a
/// live web view.
pub trait ContentViewPatch {
    /// Runtime name of the resolved class, for logging.
    fn class_name(&self) -> &str;

    /// Rewrite the element-focus gate to treat every focus request as
    /// user-initiated while still delegating to the engine.
    fn force_gesture_qualification(&mut self) -> Result<(), PatchError>;

    /// Rewrite the keyboard gate to always allow the keyboard.
    fn force_keyboard_display(&mut self) -> Result<(), PatchError>;
}

/// A web surface the patch can introspect.
pub trait SurfaceIntrospection {
    type Patch: ContentViewPatch;

    /// Resolve the engine's content view and everything needed to
    /// rewrite it. Must not mutate anything; a surface that cannot be
    /// fully resolved is reported here, before any rewrite begins.
    fn content_view(&self) -> Result<Self::Patch, PatchError>;
}

/// Surface for platforms without a patchable web engine.
pub struct NullSurface;

pub struct NullPatch;

impl ContentViewPatch for NullPatch {
    fn class_name(&self) -> &str {
        "NullContentView"
    }

    fn force_gesture_qualification(&mut self) -> Result<(), PatchError> {
        Err(PatchError::Unsupported)
    }

    fn force_keyboard_display(&mut self) -> Result<(), PatchError> {
        Err(PatchError::Unsupported)
    }
}

impl SurfaceIntrospection for NullSurface {
    type Patch = NullPatch;

    fn content_view(&self) -> Result<NullPatch, PatchError> {
        Err(PatchError::Unsupported)
    }
}

/// Whether the process-wide patch is in place.
pub fn is_installed() -> bool {
    INSTALL_GUARD.is_installed()
}

/// Install the focus patch at most once per process.
///
/// Safe to call for every web view the app creates; all calls after the
/// first are no-ops. Failure is silent apart from logging: the web view
/// keeps stock focus behavior.
pub fn install_once<S: SurfaceIntrospection>(surface: &S) -> InstallOutcome {
    install_once_with(&INSTALL_GUARD, surface)
}

/// [`install_once`] against an explicit guard.
///
/// Guard semantics on failure differ by phase: a surface that fails to
/// *resolve* releases the slot so a later web view can retry, but a
/// failure while *rewriting* keeps the slot claimed, because the class
/// state is no longer known and a second rewrite could stack on top of
/// a half-applied first one.
pub fn install_once_with<S: SurfaceIntrospection>(
    guard: &PatchGuard,
    surface: &S,
) -> InstallOutcome {
    if !guard.try_claim() {
        return InstallOutcome::AlreadyInstalled;
    }

    let mut patch = match surface.content_view() {
        Ok(patch) => patch,
        Err(err) => {
            guard.release();
            match err {
                PatchError::Unsupported => {
                    tracing::debug!("web focus patch has no backend on this platform");
                }
                other => {
                    tracing::warn!(error = %other, "web focus patch unavailable; keeping stock behavior");
                }
            }
            return InstallOutcome::Unavailable;
        }
    };

    if let Err(err) = patch
        .force_gesture_qualification()
        .and_then(|()| patch.force_keyboard_display())
    {
        tracing::warn!(
            class = patch.class_name(),
            error = %err,
            "web focus patch failed mid-rewrite; not retrying"
        );
        return InstallOutcome::Unavailable;
    }

    tracing::debug!(class = patch.class_name(), "web focus patch installed");
    InstallOutcome::Installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeInner {
        resolutions: u32,
        fail_resolution: bool,
        fail_gesture_rewrite: bool,
        gesture_forced: u32,
        keyboard_forced: u32,
    }

    #[derive(Clone, Default)]
    struct FakeSurface {
        inner: Arc<Mutex<FakeInner>>,
    }

    struct FakePatch {
        inner: Arc<Mutex<FakeInner>>,
    }

    impl FakeSurface {
        fn failing_resolution() -> Self {
            let surface = Self::default();
            surface.inner.lock().unwrap().fail_resolution = true;
            surface
        }

        fn failing_rewrite() -> Self {
            let surface = Self::default();
            surface.inner.lock().unwrap().fail_gesture_rewrite = true;
            surface
        }

        fn heal(&self) {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_resolution = false;
            inner.fail_gesture_rewrite = false;
        }

        fn counts(&self) -> (u32, u32, u32) {
            let inner = self.inner.lock().unwrap();
            (inner.resolutions, inner.gesture_forced, inner.keyboard_forced)
        }
    }

    impl SurfaceIntrospection for FakeSurface {
        type Patch = FakePatch;

        fn content_view(&self) -> Result<FakePatch, PatchError> {
            let mut inner = self.inner.lock().unwrap();
            inner.resolutions += 1;
            if inner.fail_resolution {
                return Err(PatchError::ContentViewNotFound);
            }
            Ok(FakePatch {
                inner: self.inner.clone(),
            })
        }
    }

    impl ContentViewPatch for FakePatch {
        fn class_name(&self) -> &str {
            "FakeContentView"
        }

        fn force_gesture_qualification(&mut self) -> Result<(), PatchError> {
            let mut inner = self.inner.lock().unwrap();
            if inner.fail_gesture_rewrite {
                return Err(PatchError::SelectorNotFound("_elementDidFocus"));
            }
            inner.gesture_forced += 1;
            Ok(())
        }

        fn force_keyboard_display(&mut self) -> Result<(), PatchError> {
            self.inner.lock().unwrap().keyboard_forced += 1;
            Ok(())
        }
    }

    #[test]
    fn test_first_install_rewrites_both_gates() {
        let guard = PatchGuard::new();
        let surface = FakeSurface::default();
        assert_eq!(
            install_once_with(&guard, &surface),
            InstallOutcome::Installed
        );
        assert_eq!(surface.counts(), (1, 1, 1));
        assert!(guard.is_installed());
    }

    #[test]
    fn test_second_install_is_a_noop() {
        let guard = PatchGuard::new();
        let surface = FakeSurface::default();
        install_once_with(&guard, &surface);
        assert_eq!(
            install_once_with(&guard, &surface),
            InstallOutcome::AlreadyInstalled
        );
        // The surface must not even be resolved again.
        assert_eq!(surface.counts(), (1, 1, 1));
    }

    #[test]
    fn test_resolution_failure_releases_the_slot() {
        let guard = PatchGuard::new();
        let surface = FakeSurface::failing_resolution();
        assert_eq!(
            install_once_with(&guard, &surface),
            InstallOutcome::Unavailable
        );
        assert!(!guard.is_installed());

        // A later surface (say, a second web view) can still install.
        surface.heal();
        assert_eq!(
            install_once_with(&guard, &surface),
            InstallOutcome::Installed
        );
    }

    #[test]
    fn test_rewrite_failure_latches_the_slot() {
        let guard = PatchGuard::new();
        let surface = FakeSurface::failing_rewrite();
        assert_eq!(
            install_once_with(&guard, &surface),
            InstallOutcome::Unavailable
        );
        assert!(guard.is_installed(), "half-applied rewrite must not rerun");

        surface.heal();
        assert_eq!(
            install_once_with(&guard, &surface),
            InstallOutcome::AlreadyInstalled
        );
        assert_eq!(surface.counts(), (1, 0, 0));
    }

    #[test]
    fn test_null_surface_degrades_silently() {
        let guard = PatchGuard::new();
        assert_eq!(
            install_once_with(&guard, &NullSurface),
            InstallOutcome::Unavailable
        );
        assert!(!guard.is_installed());
    }

    #[test]
    fn test_racing_installs_rewrite_exactly_once() {
        let guard = Arc::new(PatchGuard::new());
        let surface = FakeSurface::default();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = guard.clone();
                let surface = surface.clone();
                std::thread::spawn(move || install_once_with(&guard, &surface))
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let installs = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, InstallOutcome::Installed))
            .count();
        assert_eq!(installs, 1);
        assert!(outcomes
            .iter()
            .all(|outcome| !matches!(outcome, InstallOutcome::Unavailable)));
        assert_eq!(surface.counts(), (1, 1, 1));
    }
}
