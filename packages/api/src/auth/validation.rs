//! Client-side checks run before a registration request leaves the browser.

use crate::error::ApiError;

const MIN_PASSWORD_LEN: usize = 8;

/// Every rule `password` breaks, in display order. Empty means acceptable.
pub fn validate_password(password: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        problems.push(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one number".to_string());
    }
    problems
}

/// Trim `email` and reject obviously malformed input.
pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation(vec![
            "Please enter a valid email".to_string(),
        ]));
    }
    Ok(email.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliant_password() {
        assert!(validate_password("Secret123").is_empty());
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(
            validate_password("abc"),
            vec![
                "Password must be at least 8 characters",
                "Password must contain at least one uppercase letter",
                "Password must contain at least one number",
            ]
        );
        assert_eq!(
            validate_password("ALLCAPS123"),
            vec!["Password must contain at least one lowercase letter"]
        );
        assert_eq!(validate_password("").len(), 4);
    }

    #[test]
    fn test_email() {
        assert_eq!(validate_email("  a@b.com ").unwrap(), "a@b.com");
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
    }
}
