use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::RegisterRequest;
use crate::error::{ApiError, ApiResult};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Shape checks before anything touches the store or the hasher.
pub(crate) fn validate_registration(req: &RegisterRequest) -> ApiResult<()> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".into()));
    }
    if !is_valid_email(&req.email) {
        return Err(ApiError::Validation("invalid email".into()));
    }
    if req.password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ann@x.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ann"));
        assert!(!is_valid_email("ann@"));
        assert!(!is_valid_email("ann@x"));
        assert!(!is_valid_email("ann @x.com"));
    }

    fn req(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn validates_registration_shape() {
        assert!(validate_registration(&req("Ann", "ann@x.com", "long-enough")).is_ok());
        assert!(matches!(
            validate_registration(&req("", "ann@x.com", "long-enough")),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_registration(&req("Ann", "nope", "long-enough")),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_registration(&req("Ann", "ann@x.com", "short")),
            Err(ApiError::Validation(_))
        ));
    }
}
