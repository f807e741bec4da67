//! Cover window backend for the overlay manager.
//!
//! The cover is a plain always-on-top window filled with an opaque color,
//! created lazily on first use and then shown/hidden in place. Geometry
//! is worked in logical coordinates to stay DPI-safe.

use shade_privacy_screen::{CoverError, CoverHost, CoverRect};
use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Manager, Runtime, Url, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};

use crate::COVER_WINDOW_LABEL;

pub(crate) struct CoverWindowHost<R: Runtime> {
    app: AppHandle<R>,
    tracked_window: String,
    cover_color: String,
}

impl<R: Runtime> CoverWindowHost<R> {
    pub(crate) fn new(app: AppHandle<R>, tracked_window: String, cover_color: String) -> Self {
        Self {
            app,
            tracked_window,
            cover_color,
        }
    }

    fn ensure_cover_window(&self) -> Result<WebviewWindow<R>, CoverError> {
        if let Some(window) = self.app.get_webview_window(COVER_WINDOW_LABEL) {
            return Ok(window);
        }

        let url = Url::parse(&cover_page_url(&self.cover_color))
            .map_err(|err| CoverError::Construction(err.to_string()))?;

        WebviewWindowBuilder::new(&self.app, COVER_WINDOW_LABEL, WebviewUrl::External(url))
            .title("privacy-cover")
            .decorations(false)
            // shadow would offset the cover from the frame it hides
            .shadow(false)
            .resizable(false)
            .focused(false)
            .visible(false)
            .always_on_top(true)
            .skip_taskbar(true)
            .build()
            .map_err(|err| CoverError::Construction(err.to_string()))
    }

    /// Full bounds of the primary monitor, for covering when the tracked
    /// window cannot be measured.
    fn primary_monitor_frame(&self) -> Option<CoverRect> {
        let monitor = self.app.primary_monitor().ok().flatten()?;
        let scale = monitor.scale_factor();
        let position = monitor.position().to_logical::<f64>(scale);
        let size = monitor.size().to_logical::<f64>(scale);
        Some(CoverRect::new(
            position.x.round() as i32,
            position.y.round() as i32,
            size.width.round() as u32,
            size.height.round() as u32,
        ))
    }
}

impl<R: Runtime> CoverHost for CoverWindowHost<R> {
    fn window_frame(&self) -> Option<CoverRect> {
        let window = self.app.get_webview_window(&self.tracked_window)?;
        let scale = window.scale_factor().ok()?;
        let position = window.outer_position().ok()?.to_logical::<f64>(scale);
        let size = window.outer_size().ok()?.to_logical::<f64>(scale);
        Some(CoverRect::new(
            position.x.round() as i32,
            position.y.round() as i32,
            size.width.round() as u32,
            size.height.round() as u32,
        ))
    }

    fn show_cover(&mut self, frame: Option<CoverRect>) -> Result<(), CoverError> {
        let window = self.ensure_cover_window()?;

        match frame.or_else(|| self.primary_monitor_frame()) {
            Some(frame) => {
                // Best effort: a cover at stale geometry still beats none.
                if let Err(err) =
                    window.set_position(LogicalPosition::new(frame.x as f64, frame.y as f64))
                {
                    tracing::warn!(error = %err, "failed to position privacy cover");
                }
                if let Err(err) = window.set_size(LogicalSize::new(
                    frame.width as f64,
                    frame.height as f64,
                )) {
                    tracing::warn!(error = %err, "failed to size privacy cover");
                }
            }
            None => {
                tracing::warn!("no geometry available for privacy cover; showing as-is");
            }
        }

        window
            .show()
            .map_err(|err| CoverError::WindowUnavailable(err.to_string()))
    }

    fn hide_cover(&mut self) {
        if let Some(window) = self.app.get_webview_window(COVER_WINDOW_LABEL) {
            if let Err(err) = window.hide() {
                tracing::warn!(error = %err, "failed to hide privacy cover");
            }
        }
    }
}

/// Inline page for the cover: an opaque body, nothing else.
fn cover_page_url(color: &str) -> String {
    // '#' would start the URL fragment; escape it.
    let color = color.replace('#', "%23");
    format!(
        "data:text/html,<body style=\"margin:0;background:{}\"></body>",
        color
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_page_escapes_hex_colors() {
        let url = cover_page_url("#1a2b3c");
        assert!(url.starts_with("data:text/html,"));
        assert!(url.contains("background:%231a2b3c"));
        assert!(!url.contains('#'));
    }

    #[test]
    fn test_cover_page_keeps_named_colors() {
        assert!(cover_page_url("black").contains("background:black"));
    }

    #[test]
    fn test_cover_page_parses_as_url() {
        assert!(Url::parse(&cover_page_url("#000000")).is_ok());
    }
}
