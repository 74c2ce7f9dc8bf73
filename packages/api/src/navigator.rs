//! Page navigation seam used by the gateway.
//!
//! The gateway never touches `window.location` itself; it asks a [`Navigator`]
//! for the current hostname (for base-address resolution) and to move to the
//! login page. The browser implementation lives in the `ui` crate.

use std::sync::{Arc, Mutex, MutexGuard};

/// Entry point the user is sent to when the session is missing or rejected.
pub const LOGIN_PATH: &str = "/login";

pub trait Navigator {
    /// Hostname the app is currently served from (`""` when unknown).
    fn hostname(&self) -> String;

    /// Move to `path` within the app.
    fn navigate(&self, path: &str);
}

/// Navigator for native targets and tests: fixed hostname, navigations are
/// logged and recorded.
#[derive(Clone, Debug, Default)]
pub struct HeadlessNavigator {
    hostname: String,
    visits: Arc<Mutex<Vec<String>>>,
}

impl HeadlessNavigator {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            visits: Arc::default(),
        }
    }

    /// A navigator reporting `localhost`.
    pub fn localhost() -> Self {
        Self::new("localhost")
    }

    fn visits_mut(&self) -> MutexGuard<'_, Vec<String>> {
        self.visits.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every path navigated to, oldest first.
    pub fn visits(&self) -> Vec<String> {
        self.visits_mut().clone()
    }

    pub fn last_visit(&self) -> Option<String> {
        self.visits_mut().last().cloned()
    }
}

impl Navigator for HeadlessNavigator {
    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn navigate(&self, path: &str) {
        tracing::info!("navigate to {}", path);
        self.visits_mut().push(path.to_string());
    }
}
