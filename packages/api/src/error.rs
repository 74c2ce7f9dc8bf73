//! Error taxonomy for API calls.
//!
//! | Variant | Raised when | Side effects |
//! |---------|-------------|--------------|
//! | [`ApiError::Unauthenticated`] | no session stored locally | navigation to login, network untouched |
//! | [`ApiError::Unauthorized`] | server answered 401 | session destroyed, navigation to login |
//! | [`ApiError::Connection`] | no response at all | none |
//! | [`ApiError::Application`] | any other non-2xx, decoded by a typed client | none |
//! | [`ApiError::Decode`] | 2xx body does not match the expected shape | none |
//! | [`ApiError::Validation`] | client-side form checks failed | none |
//!
//! A malformed stored session is not an error: the session store purges it and
//! reports "no session".

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Cannot connect to server at {base_url}: {source}")]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{detail}")]
    Application { status: u16, detail: String },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("failed to encode request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Whether this error already sent the user to the login page.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Unauthorized)
    }

    /// HTTP status of an application error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}
