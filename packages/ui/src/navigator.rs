//! `window.location`-backed navigator for the web platform.

use api::Navigator;

/// Navigates by assigning `window.location.href`, so the login page is a full
/// page load and no stale in-memory state survives it.
#[derive(Clone, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn hostname(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().hostname().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::error!("Failed to navigate to {}: {:?}", path, e);
            }
        }
    }
}
