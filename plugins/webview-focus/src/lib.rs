//! Tauri plugin wiring for the web content focus patch.
//!
//! Hooks webview creation and installs the process-wide patch from the
//! first live web view, so script-driven `focus()` raises the keyboard
//! like a tap would. Repeat webviews are no-ops; unsupported platforms
//! degrade silently to stock behavior.

use serde::Serialize;
use tauri::{
    command,
    plugin::{Builder, TauriPlugin},
    Runtime, Webview,
};

const PLUGIN_NAME: &str = "shade-webview-focus";

/// Answer to the `status` command.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FocusPatchStatus {
    pub installed: bool,
}

#[command]
fn status() -> Result<FocusPatchStatus, String> {
    Ok(FocusPatchStatus {
        installed: shade_webview_focus::is_installed(),
    })
}

pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![status])
        .on_webview_ready(|webview| {
            attach(&webview);
        })
        .build()
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn attach<R: Runtime>(webview: &Webview<R>) {
    use shade_webview_focus::{install_for_web_view, InstallOutcome};

    let label = webview.label().to_string();
    let result = webview.with_webview(move |platform| {
        // Runs on the main thread with the live engine handle.
        let outcome = unsafe { install_for_web_view(platform.inner().cast()) };
        match outcome {
            InstallOutcome::Installed => {
                tracing::info!(webview = %label, "web focus patch installed");
            }
            InstallOutcome::AlreadyInstalled => {
                tracing::debug!(webview = %label, "web focus patch already in place");
            }
            InstallOutcome::Unavailable => {
                tracing::warn!(webview = %label, "web focus patch unavailable; keeping stock behavior");
            }
        }
    });
    if let Err(err) = result {
        tracing::warn!(error = %err, "could not reach platform web view");
    }
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
fn attach<R: Runtime>(_webview: &Webview<R>) {
    use shade_webview_focus::{install_once, NullSurface};

    // Always Unavailable here; the installer logs the degraded mode.
    let _ = install_once(&NullSurface);
}
