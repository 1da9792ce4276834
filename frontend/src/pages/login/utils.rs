use crate::api::{ApiError, LoginRequest};

pub fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(())
}

pub fn build_login_request(email: &str, password: &str) -> Result<LoginRequest, ApiError> {
    validate_credentials(email, password)?;
    Ok(LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_fields() {
        assert_eq!(
            validate_credentials(" ", "x").unwrap_err().error,
            "Email is required"
        );
        assert_eq!(
            validate_credentials("a@b.com", "").unwrap_err().code,
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn trims_email_but_not_password() {
        let request = build_login_request(" a@b.com ", " x ").unwrap();
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.password, " x ");
    }
}
