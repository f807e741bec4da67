//! Example: Run the focus-patch install flow and print each outcome.
//!
//! Run with: cargo run -p shade-webview-focus --example install_flow

use shade_webview_focus::{install_once, is_installed, NullSurface};

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter("shade_webview_focus=debug")
        .init();

    println!("=== Focus Patch Install Example ===\n");

    // Without a live web view there is nothing to introspect; the flow
    // degrades and leaves stock behavior in place.
    let outcome = install_once(&NullSurface);
    println!("First attempt:  {:?}", outcome);

    let outcome = install_once(&NullSurface);
    println!("Second attempt: {:?}", outcome);

    println!("Installed: {}", is_installed());
}
