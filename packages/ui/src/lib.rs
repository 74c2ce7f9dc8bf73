//! This crate contains the shared auth glue for the Taskboard frontends.

mod platform;
pub use platform::{make_gateway, make_session_store, AppGateway, PlatformNavigator, PlatformStore};

#[cfg(target_arch = "wasm32")]
mod navigator;
#[cfg(target_arch = "wasm32")]
pub use navigator::BrowserNavigator;

mod auth;
pub use auth::{
    guard_session, refresh_user, session_state, sign_out, use_auth, use_gateway, AuthProvider, AuthState,
    LogoutButton, ProtectedRoute,
};

mod error_message;
pub use error_message::ErrorMessage;
