//! Helpers for interpreting gateway responses.
//!
//! The gateway hands back raw responses. Callers that want typed results run
//! them through [`check`] (non-2xx → [`ApiError::Application`]) and
//! [`read_json`] (body → `T`, mismatch → [`ApiError::Decode`]).

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Pass 2xx responses through; turn anything else into an application error
/// carrying the server's `detail` (or `fallback`).
pub async fn check(response: Response, fallback: &str) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Application {
        status,
        detail: detail_message(&body, fallback),
    })
}

/// Decode a JSON body, naming `endpoint` on failure.
pub async fn read_json<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
) -> Result<T, ApiError> {
    let base_url = response.url().origin().ascii_serialization();
    let body = response
        .text()
        .await
        .map_err(|source| ApiError::Connection { base_url, source })?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Extract the human-readable `detail` from an error body.
///
/// `detail` is either a string or, for request validation failures, a list of
/// objects with a `msg` field.
pub fn detail_message(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback.to_string();
    };

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.trim().is_empty() => detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                fallback.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        assert_eq!(
            detail_message(r#"{"detail": "Email already registered"}"#, "Registration failed"),
            "Email already registered"
        );
    }

    #[test]
    fn test_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "field required"}, {"msg": "too short"}]}"#;
        assert_eq!(detail_message(body, "x"), "field required; too short");
    }

    #[test]
    fn test_detail_fallbacks() {
        assert_eq!(detail_message("<html>502</html>", "Login failed"), "Login failed");
        assert_eq!(detail_message(r#"{"detail": ""}"#, "Login failed"), "Login failed");
        assert_eq!(detail_message(r#"{"error": "x"}"#, "Login failed"), "Login failed");
        assert_eq!(detail_message(r#"{"detail": []}"#, "Login failed"), "Login failed");
    }
}
