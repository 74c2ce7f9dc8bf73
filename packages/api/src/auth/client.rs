//! # Sign-up / sign-in client
//!
//! [`AuthClient`] talks to the two public auth endpoints and, on success,
//! writes the returned identity and token into the [`store::SessionStore`].
//! It goes through [`Gateway::post_public`] because no token exists yet.
//!
//! | Method | Endpoint | Fallback message |
//! |--------|----------|------------------|
//! | [`register`](AuthClient::register) | `POST /api/auth/register` | "Registration failed" |
//! | [`login`](AuthClient::login) | `POST /api/auth/login` | "Login failed" |
//!
//! Both send `{email, password}` and expect `{user: {id, email}, accessToken}`.
//! Error bodies carry `{detail}`, which is surfaced verbatim.

use serde::{Deserialize, Serialize};
use store::{KeyValueStore, Session, User};

use crate::auth::validation::{validate_email, validate_password};
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::navigator::Navigator;
use crate::response::{check, read_json};

pub const REGISTER_ENDPOINT: &str = "/api/auth/register";
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    user: User,
    access_token: String,
}

pub struct AuthClient<S: KeyValueStore, N: Navigator> {
    gateway: Gateway<S, N>,
}

impl<S: KeyValueStore, N: Navigator> Clone for AuthClient<S, N> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<S: KeyValueStore, N: Navigator> AuthClient<S, N> {
    pub fn new(gateway: Gateway<S, N>) -> Self {
        Self { gateway }
    }

    /// Create an account and sign in as it.
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let email = validate_email(email)?;
        let problems = validate_password(password);
        if !problems.is_empty() {
            return Err(ApiError::Validation(problems));
        }
        self.authenticate(REGISTER_ENDPOINT, &email, password, "Registration failed")
            .await
    }

    /// Sign in with an existing account.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.authenticate(LOGIN_ENDPOINT, email.trim(), password, "Login failed")
            .await
    }

    /// Sign out locally. The backend keeps no session to revoke.
    pub fn logout(&self) {
        self.gateway.sessions().destroy();
    }

    /// The signed-in user, read through from the session store.
    pub fn current_user(&self) -> Option<User> {
        self.gateway.sessions().read().map(|session| session.user)
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
        fallback: &str,
    ) -> Result<Session, ApiError> {
        let response = self
            .gateway
            .post_public(endpoint, &Credentials { email, password })
            .await?;
        let response = check(response, fallback).await?;
        let body: AuthResponse = read_json(response, endpoint).await?;

        self.gateway
            .sessions()
            .create(body.user, body.access_token)
            .ok_or_else(|| ApiError::Decode {
                endpoint: endpoint.to_string(),
                source: <serde_json::Error as serde::de::Error>::custom("empty accessToken"),
            })
    }
}
