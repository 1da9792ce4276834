use super::{
    client::{decode, ApiClient, RequestOptions},
    types::{ApiError, AuthResponse, LoginRequest, RegisterRequest},
};
use crate::utils::query::with_query;

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let value = self
            .call_unauthenticated("/api/auth/token/", RequestOptions::post().json(request)?)
            .await?;
        decode(value)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let value = self
            .call_unauthenticated("/api/auth/register/", RequestOptions::post().json(request)?)
            .await?;
        decode(value)
    }

    /// Exchanges a refresh token for a new token pair. The token travels as a query parameter.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        let path = with_query("/api/auth/refresh/", &[("token", refresh_token.to_string())]);
        let value = self
            .call_unauthenticated(&path, RequestOptions::post())
            .await?;
        decode(value)
    }
}
