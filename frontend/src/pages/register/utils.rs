use crate::api::{ApiError, RegisterRequest};

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful!";

pub fn build_register_request(
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if email.trim().is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(RegisterRequest {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}
