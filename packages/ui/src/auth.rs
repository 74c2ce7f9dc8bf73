//! Authentication context and hooks for the UI.
//!
//! [`AuthState`] is a read-through view of the session store, never an
//! independent cache: every update comes from [`refresh_user`], which re-reads
//! the store. The component logic lives in plain functions over any
//! [`Gateway`] so it can run without a renderer.

use api::{ApiConfig, Gateway, Navigator, LOGIN_PATH};
use dioxus::prelude::*;
use store::{KeyValueStore, User};

use crate::platform::{make_gateway, AppGateway};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// Settled state for `user`.
    pub fn from_user(user: Option<User>) -> Self {
        Self {
            user,
            loading: false,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the shared API gateway.
pub fn use_gateway() -> AppGateway {
    use_context::<AppGateway>()
}

/// The auth state the session store currently implies.
pub fn session_state<S: KeyValueStore, N: Navigator>(gateway: &Gateway<S, N>) -> AuthState {
    AuthState::from_user(gateway.sessions().read().map(|session| session.user))
}

/// Re-read the session store into `auth`.
pub fn refresh_user<S: KeyValueStore, N: Navigator>(
    gateway: &Gateway<S, N>,
    mut auth: Signal<AuthState>,
) {
    auth.set(session_state(gateway));
}

/// Check for a session, sending the user to login when there is none.
pub fn guard_session<S: KeyValueStore, N: Navigator>(gateway: &Gateway<S, N>) -> AuthState {
    if gateway.require_session().is_err() {
        return AuthState::from_user(None);
    }
    session_state(gateway)
}

/// Destroy the session and send the user to login.
pub fn sign_out<S: KeyValueStore, N: Navigator>(gateway: &Gateway<S, N>) -> AuthState {
    gateway.sessions().destroy();
    gateway.navigator().navigate(LOGIN_PATH);
    session_state(gateway)
}

/// Provider component that owns the gateway and authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: ApiConfig, children: Element) -> Element {
    let gateway = use_context_provider(|| make_gateway(config.clone()));
    let auth_state = use_signal(AuthState::default);

    // Restore a prior login on mount
    use_effect(move || refresh_user(&gateway, auth_state));

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Renders its children only when a session exists; otherwise sends the
/// user to the login page and shows a link there in case navigation is not
/// handled by the host.
#[component]
pub fn ProtectedRoute(children: Element) -> Element {
    let gateway = use_gateway();
    let mut auth = use_auth();
    let mut allowed = use_signal(|| None::<bool>);

    use_effect(move || {
        let state = guard_session(&gateway);
        allowed.set(Some(state.user.is_some()));
        auth.set(state);
    });

    match allowed() {
        None => rsx! {
            div { class: "auth-loading", "Loading..." }
        },
        Some(false) => rsx! {
            div { class: "auth-required",
                a { href: LOGIN_PATH, "Sign in to continue" }
            }
        },
        Some(true) => rsx! {
            {children}
        },
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let gateway = use_gateway();
    let mut auth_state = use_auth();

    let onclick = move |_| {
        auth_state.set(sign_out(&gateway));
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
