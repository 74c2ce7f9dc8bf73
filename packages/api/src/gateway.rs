//! # Authenticated request gateway
//!
//! Every authenticated API call goes through [`Gateway::request`]:
//!
//! 1. Read the session from the [`SessionStore`]. None → navigate to
//!    [`LOGIN_PATH`] and fail with [`ApiError::Unauthenticated`] without
//!    touching the network.
//! 2. Resolve the base address through [`ApiConfig::resolve`].
//! 3. Send the caller's method, headers and body, with `Authorization: Bearer
//!    <token>` and `Content-Type: application/json` forced over whatever the
//!    caller supplied for those two keys.
//! 4. No response → [`ApiError::Connection`] naming the base address.
//! 5. 401 → destroy the session, navigate to login, [`ApiError::Unauthorized`].
//! 6. Anything else is returned untouched; see [`crate::response`].
//!
//! Sign-in and sign-up use [`Gateway::post_public`] instead: no token exists
//! yet, and a 401 there means "wrong password", not "session expired".
//!
//! There is no retry, no timeout of our own, and no cancellation.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use store::{KeyValueStore, Session, SessionStore};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::navigator::{Navigator, LOGIN_PATH};

const JSON: &str = "application/json";

/// Transport options supplied by the caller of [`Gateway::request`].
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

struct Inner<S: KeyValueStore, N: Navigator> {
    http: reqwest::Client,
    config: ApiConfig,
    sessions: Arc<SessionStore<S>>,
    navigator: N,
}

/// Dispatches API calls with credential attachment and 401 teardown.
///
/// Cloning is cheap; clones share the HTTP client, config, session store and
/// navigator.
pub struct Gateway<S: KeyValueStore, N: Navigator> {
    inner: Arc<Inner<S, N>>,
}

impl<S: KeyValueStore, N: Navigator> Clone for Gateway<S, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore, N: Navigator> Gateway<S, N> {
    pub fn new(config: ApiConfig, sessions: Arc<SessionStore<S>>, navigator: N) -> Self {
        Self::with_client(reqwest::Client::new(), config, sessions, navigator)
    }

    pub fn with_client(
        http: reqwest::Client,
        config: ApiConfig,
        sessions: Arc<SessionStore<S>>,
        navigator: N,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                config,
                sessions,
                navigator,
            }),
        }
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.inner.sessions
    }

    pub fn navigator(&self) -> &N {
        &self.inner.navigator
    }

    /// Resolve the API base address for the current page.
    pub fn base_url(&self) -> Result<String, ApiError> {
        let hostname = self.inner.navigator.hostname();
        let resolved = self.inner.config.resolve(&hostname)?;
        tracing::trace!(rule = ?resolved.rule, url = %resolved.url, "resolved API base");
        Ok(resolved.url)
    }

    /// Current session, or navigate to login and fail with `Unauthenticated`.
    pub fn require_session(&self) -> Result<Session, ApiError> {
        match self.sessions().read() {
            Some(session) => Ok(session),
            None => Err(self.send_to_login("no session")),
        }
    }

    /// Send an authenticated request to `path` (relative to the API base).
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Response, ApiError> {
        let session = self.require_session()?;
        let base_url = self.base_url()?;

        let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", session.access_token)) else {
            self.sessions().destroy();
            return Err(self.send_to_login("stored token is not a valid header value"));
        };

        let RequestOptions {
            method,
            mut headers,
            body,
        } = options;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));

        let response = self.dispatch(&base_url, path, method, headers, body).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.sessions().destroy();
            return Err(self.reject_credential(path));
        }

        Ok(response)
    }

    /// Unauthenticated JSON POST, used by sign-in and sign-up.
    ///
    /// Status codes are not interpreted.
    pub async fn post_public<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        let base_url = self.base_url()?;
        let body = serde_json::to_string(body)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));

        self.dispatch(&base_url, path, Method::POST, headers, Some(body))
            .await
    }

    async fn dispatch(
        &self,
        base_url: &str,
        path: &str,
        method: Method,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<Response, ApiError> {
        let url = join_url(base_url, path);

        let mut builder = self
            .inner
            .http
            .request(method.clone(), &url)
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|source| {
            tracing::warn!("{} {} failed: {}", method, url, source);
            ApiError::Connection {
                base_url: base_url.to_string(),
                source,
            }
        })?;

        tracing::debug!(%method, path, status = response.status().as_u16(), "api request");
        Ok(response)
    }

    fn send_to_login(&self, reason: &str) -> ApiError {
        tracing::info!("redirecting to login: {}", reason);
        self.inner.navigator.navigate(LOGIN_PATH);
        ApiError::Unauthenticated
    }

    fn reject_credential(&self, path: &str) -> ApiError {
        tracing::info!(path, "credential rejected, session cleared");
        self.inner.navigator.navigate(LOGIN_PATH);
        ApiError::Unauthorized
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000", "/api/1/tasks"),
            "http://localhost:8000/api/1/tasks"
        );
        assert_eq!(
            join_url("http://localhost:8000", "api/1/tasks"),
            "http://localhost:8000/api/1/tasks"
        );
    }

    #[test]
    fn test_request_options_builders() {
        let options = RequestOptions::patch()
            .json(&serde_json::json!({"completed": true}))
            .unwrap()
            .header(AUTHORIZATION, HeaderValue::from_static("Bearer caller"));
        assert_eq!(options.method, Method::PATCH);
        assert_eq!(options.body.as_deref(), Some(r#"{"completed":true}"#));
        assert_eq!(options.headers.len(), 1);
        assert_eq!(RequestOptions::default().method, Method::GET);
    }
}
