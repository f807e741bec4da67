use shade_privacy_screen::OverlayState;
use tauri::{command, AppHandle, Runtime, State};

use crate::PrivacyScreen;

// Synchronous: runs on the main thread, like the focus-event handler.
#[command]
pub fn enable<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, PrivacyScreen<R>>,
) -> Result<OverlayState, String> {
    Ok(state.set_enabled(&app, true))
}

#[command]
pub fn disable<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, PrivacyScreen<R>>,
) -> Result<OverlayState, String> {
    Ok(state.set_enabled(&app, false))
}

#[command]
pub fn set_enabled<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, PrivacyScreen<R>>,
    enabled: bool,
) -> Result<OverlayState, String> {
    Ok(state.set_enabled(&app, enabled))
}

#[command]
pub fn status<R: Runtime>(state: State<'_, PrivacyScreen<R>>) -> Result<OverlayState, String> {
    Ok(state.state())
}
