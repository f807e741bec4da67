//! Tauri plugin wiring for the privacy cover.
//!
//! Maps window focus transitions onto the lifecycle events of
//! [`shade_privacy_screen::OverlayManager`] and exposes the toggle to the
//! frontend as commands. State changes are broadcast so every UI surface
//! can stay in sync.

use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use shade_privacy_screen::{DeviceProfile, OverlayManager, OverlayState};
use tauri::{
    plugin::{Builder, TauriPlugin},
    AppHandle, Emitter, Manager, Runtime, WindowEvent,
};

mod commands;
mod cover;

use cover::CoverWindowHost;

const PLUGIN_NAME: &str = "shade-privacy-screen";

/// Label of the cover window owned by this plugin.
pub const COVER_WINDOW_LABEL: &str = "privacy-cover";

/// Emitted with the new [`OverlayState`] whenever it changes.
pub const STATE_CHANGED_EVENT: &str = "privacy-screen:state-changed";

/// Static configuration under `plugins > shade-privacy-screen` in the
/// Tauri config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacyScreenConfig {
    /// Start with protection already on.
    pub enabled: bool,
    /// CSS color filling the cover.
    pub cover_color: String,
    /// Label of the window the cover protects.
    pub window: String,
}

impl Default for PrivacyScreenConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cover_color: "#000000".to_string(),
            window: "main".to_string(),
        }
    }
}

pub struct PrivacyScreen<R: Runtime> {
    manager: Mutex<OverlayManager<CoverWindowHost<R>>>,
    tracked_window: String,
}

impl<R: Runtime> PrivacyScreen<R> {
    /// Current overlay state.
    pub fn state(&self) -> OverlayState {
        self.manager
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    /// Toggle protection and broadcast the state if it changed.
    pub fn set_enabled(&self, app: &AppHandle<R>, enabled: bool) -> OverlayState {
        let mut manager = self.manager.lock().unwrap_or_else(PoisonError::into_inner);
        let before = manager.state();
        let after = manager.set_enabled(enabled);
        drop(manager);
        self.broadcast_change(app, before, after);
        after
    }

    fn on_focus_changed(&self, app: &AppHandle<R>, focused: bool) {
        let mut manager = self.manager.lock().unwrap_or_else(PoisonError::into_inner);
        let before = manager.state();
        let after = if focused {
            manager.on_did_become_active()
        } else {
            manager.on_will_resign_active()
        };
        drop(manager);
        self.broadcast_change(app, before, after);
    }

    fn broadcast_change(&self, app: &AppHandle<R>, before: OverlayState, after: OverlayState) {
        if after != before {
            if let Err(err) = app.emit(STATE_CHANGED_EVENT, after) {
                tracing::warn!(error = %err, "failed to broadcast privacy screen state");
            }
        }
    }
}

pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::<R, Option<PrivacyScreenConfig>>::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::enable,
            commands::disable,
            commands::set_enabled,
            commands::status,
        ])
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();

            // Size fallback for hosts that cannot measure their window.
            let profile = app.primary_monitor().ok().flatten().map(|monitor| {
                let size = monitor.size().to_logical::<f64>(monitor.scale_factor());
                DeviceProfile::classify(size.width.round() as u32, size.height.round() as u32)
            });

            let host = CoverWindowHost::new(
                app.clone(),
                config.window.clone(),
                config.cover_color.clone(),
            );
            let mut manager = match profile {
                Some(profile) => OverlayManager::with_profile(host, profile),
                None => OverlayManager::new(host),
            };
            if config.enabled {
                manager.set_enabled(true);
            }

            app.manage(PrivacyScreen {
                manager: Mutex::new(manager),
                tracked_window: config.window.clone(),
            });
            tracing::debug!(window = %config.window, "privacy screen ready");
            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Focused(focused) = event {
                let app = window.app_handle();
                if let Some(screen) = app.try_state::<PrivacyScreen<R>>() {
                    // Only the tracked window drives the lifecycle; the
                    // cover window's own focus events must not feed back.
                    if window.label() == screen.tracked_window {
                        screen.on_focus_changed(app, *focused);
                    }
                }
            }
        })
        .build()
}
