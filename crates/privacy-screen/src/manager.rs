//! Lifecycle-driven overlay state machine.
//!
//! [`OverlayManager`] owns the policy: *when* the cover must be visible.
//! The [`CoverHost`] it wraps owns the mechanism: *how* a cover is shown.
//! All transitions are synchronous so the cover is in place before the
//! platform snapshots the window for the app switcher.

use crate::host::{CoverHost, CoverRect};
use crate::profile::DeviceProfile;
use crate::state::{LifecyclePhase, OverlayState};

pub struct OverlayManager<H: CoverHost> {
    host: H,
    state: OverlayState,
    phase: LifecyclePhase,
    profile: Option<DeviceProfile>,
}

impl<H: CoverHost> OverlayManager<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: OverlayState::default(),
            phase: LifecyclePhase::default(),
            profile: None,
        }
    }

    /// Attach a device profile used to size the cover when the host
    /// cannot measure the live window.
    pub fn with_profile(host: H, profile: DeviceProfile) -> Self {
        let mut manager = Self::new(host);
        manager.profile = Some(profile);
        manager
    }

    /// Toggle protection. Takes effect immediately: enabling while the
    /// app is already backgrounded presents the cover before returning,
    /// disabling removes any cover that is up.
    pub fn set_enabled(&mut self, enabled: bool) -> OverlayState {
        self.state.enabled = enabled;
        tracing::debug!(enabled, "privacy cover toggled");
        if enabled {
            if self.phase.is_inactive() && !self.state.visible {
                self.show_cover();
            }
        } else if self.state.visible {
            self.host.hide_cover();
            self.state.visible = false;
        }
        self.state
    }

    /// The app is about to leave the foreground. Present the cover now,
    /// synchronously, while the window can still be drawn into.
    pub fn on_will_resign_active(&mut self) -> OverlayState {
        self.phase = LifecyclePhase::Inactive;
        if self.state.enabled && !self.state.visible {
            self.show_cover();
        }
        self.state
    }

    /// The app is foreground again. The cover is always dismissed here,
    /// even when bookkeeping says none is up, so a half-failed show can
    /// never leave the UI blocked.
    pub fn on_did_become_active(&mut self) -> OverlayState {
        self.phase = LifecyclePhase::Active;
        self.host.hide_cover();
        self.state.visible = false;
        self.state
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    // On failure `visible` stays false, so the next enable call or
    // lifecycle transition retries the show.
    fn show_cover(&mut self) {
        let frame = self.cover_frame();
        match self.host.show_cover(frame) {
            Ok(()) => {
                self.state.visible = true;
                tracing::debug!("privacy cover presented");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to present privacy cover; will retry");
            }
        }
    }

    /// Measured window frame when the host has one, device-profile frame
    /// as a fallback, `None` to let the host cover everything it owns.
    fn cover_frame(&self) -> Option<CoverRect> {
        self.host
            .window_frame()
            .or_else(|| self.profile.map(|profile| profile.cover_rect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CoverCall, RecordingCoverHost};

    fn manager() -> OverlayManager<RecordingCoverHost> {
        OverlayManager::new(RecordingCoverHost::new())
    }

    #[test]
    fn test_enable_alone_shows_nothing() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        let state = manager.set_enabled(true);
        assert!(state.enabled);
        assert!(!state.visible);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_resign_active_presents_cover_when_enabled() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        manager.set_enabled(true);
        let state = manager.on_will_resign_active();
        assert!(state.visible);
        assert_eq!(host.calls(), vec![CoverCall::Show(None)]);
    }

    #[test]
    fn test_resign_active_is_inert_when_disabled() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        let state = manager.on_will_resign_active();
        assert!(!state.visible);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_duplicate_resign_events_present_once() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        manager.set_enabled(true);
        manager.on_will_resign_active();
        manager.on_will_resign_active();
        assert_eq!(host.shows(), 1);
    }

    #[test]
    fn test_become_active_always_dismisses() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        manager.set_enabled(true);
        manager.on_will_resign_active();
        let state = manager.on_did_become_active();
        assert!(!state.visible);
        assert!(state.enabled);
        assert_eq!(
            host.calls(),
            vec![CoverCall::Show(None), CoverCall::Hide]
        );
    }

    #[test]
    fn test_become_active_dismisses_even_without_bookkept_cover() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        manager.on_did_become_active();
        assert_eq!(host.calls(), vec![CoverCall::Hide]);
    }

    #[test]
    fn test_enable_while_backgrounded_presents_immediately() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        manager.on_will_resign_active();
        let state = manager.set_enabled(true);
        assert!(state.visible);
        assert_eq!(host.shows(), 1);
    }

    #[test]
    fn test_disable_removes_cover_immediately() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        manager.set_enabled(true);
        manager.on_will_resign_active();
        let state = manager.set_enabled(false);
        assert!(!state.visible);
        assert_eq!(
            host.calls(),
            vec![CoverCall::Show(None), CoverCall::Hide]
        );
    }

    #[test]
    fn test_disable_without_cover_leaves_host_untouched() {
        let host = RecordingCoverHost::new();
        let mut manager = OverlayManager::new(host.clone());
        manager.set_enabled(true);
        manager.set_enabled(false);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_failed_show_is_retried_on_next_enable() {
        let host = RecordingCoverHost::new();
        host.fail_next_shows(1);
        let mut manager = OverlayManager::new(host.clone());
        manager.set_enabled(true);
        let state = manager.on_will_resign_active();
        assert!(!state.visible);

        // Still backgrounded; a repeated enable call retries the show.
        let state = manager.set_enabled(true);
        assert!(state.visible);
        assert_eq!(host.shows(), 2);
    }

    #[test]
    fn test_failed_show_does_not_leak_into_foreground() {
        let host = RecordingCoverHost::new();
        host.fail_next_shows(1);
        let mut manager = OverlayManager::new(host.clone());
        manager.set_enabled(true);
        manager.on_will_resign_active();
        manager.on_did_become_active();
        // The retry flag must not trigger a show while active.
        let state = manager.set_enabled(true);
        assert!(!state.visible);
        assert_eq!(host.shows(), 1);
    }

    #[test]
    fn test_host_frame_wins_over_profile() {
        let host = RecordingCoverHost::with_frame(CoverRect::new(10, 20, 300, 500));
        let mut manager =
            OverlayManager::with_profile(host.clone(), DeviceProfile::classify(768, 1024));
        manager.set_enabled(true);
        manager.on_will_resign_active();
        assert_eq!(
            host.calls(),
            vec![CoverCall::Show(Some(CoverRect::new(10, 20, 300, 500)))]
        );
    }

    #[test]
    fn test_profile_frame_used_when_host_cannot_measure() {
        let host = RecordingCoverHost::new();
        let mut manager =
            OverlayManager::with_profile(host.clone(), DeviceProfile::classify(375, 667));
        manager.set_enabled(true);
        manager.on_will_resign_active();
        assert_eq!(
            host.calls(),
            vec![CoverCall::Show(Some(CoverRect::sized(375, 667)))]
        );
    }

    #[test]
    fn test_state_snapshot_tracks_transitions() {
        let mut manager = manager();
        assert_eq!(manager.state(), OverlayState::default());
        manager.set_enabled(true);
        assert!(manager.is_enabled());
        assert!(!manager.is_visible());
        manager.on_will_resign_active();
        assert!(manager.phase().is_inactive());
        assert!(manager.is_visible());
    }
}
