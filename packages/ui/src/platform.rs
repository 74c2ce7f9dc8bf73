//! Shared session store and gateway constructors for all platforms.
//!
//! Returns a [`store::SessionStore`] backed by the appropriate
//! [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via `store::LocalStore`
//! - **Desktop / Mobile** (native): filesystem via `store::FileStore`
//!
//! Navigation follows the same split: `BrowserNavigator` on the web, a
//! [`api::HeadlessNavigator`] reporting `localhost` elsewhere.

use std::sync::Arc;

use api::{ApiConfig, Gateway};
use store::SessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

#[cfg(target_arch = "wasm32")]
pub type PlatformNavigator = crate::BrowserNavigator;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformNavigator = api::HeadlessNavigator;

/// The process-wide gateway type handed out through context.
pub type AppGateway = Gateway<PlatformStore, PlatformNavigator>;

/// Directory name under the platform data dir.
#[cfg(not(target_arch = "wasm32"))]
pub const APP_DIR: &str = "taskboard";

/// Where native builds keep the session file.
#[cfg(not(target_arch = "wasm32"))]
pub fn session_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(APP_DIR)
}

/// Create the platform-appropriate session store.
pub fn make_session_store() -> Arc<SessionStore<PlatformStore>> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    let durable = store::LocalStore::new();
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    let durable = store::MemoryStore::new();
    #[cfg(not(target_arch = "wasm32"))]
    let durable = store::FileStore::new(session_dir());

    Arc::new(SessionStore::new(durable))
}

/// Create the gateway every page shares.
pub fn make_gateway(config: ApiConfig) -> AppGateway {
    #[cfg(target_arch = "wasm32")]
    let navigator = crate::BrowserNavigator;
    #[cfg(not(target_arch = "wasm32"))]
    let navigator = api::HeadlessNavigator::localhost();

    Gateway::new(config, make_session_store(), navigator)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_session_dir_is_app_scoped() {
        assert!(session_dir().ends_with(APP_DIR));
    }

    #[test]
    fn test_gateway_resolves_local_backend() {
        let gateway = make_gateway(ApiConfig::default());
        assert_eq!(gateway.base_url().unwrap(), "http://localhost:8000");
    }
}
