use crate::api::{ApiClient, ApiError, AuthResponse, LoginRequest, RegisterRequest};
use std::rc::Rc;

/// Credential exchange shared by the login and register pages.
#[derive(Clone)]
pub struct AuthRepository {
    client: Rc<ApiClient>,
}

impl Default for AuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.client.login(request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.client.register(request).await
    }
}
