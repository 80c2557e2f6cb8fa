//! Auth endpoints.

use contracts::api::ApiEnvelope;
use contracts::system::auth::{AuthData, LoginCredentials, User};

use crate::shared::api::{ApiClient, ApiError};

pub async fn login(
    client: &ApiClient,
    credentials: &LoginCredentials,
) -> Result<ApiEnvelope<AuthData>, ApiError> {
    client.post_json("/auth/login", credentials).await
}

pub async fn logout(client: &ApiClient) -> Result<ApiEnvelope<serde_json::Value>, ApiError> {
    client
        .post_json("/auth/logout", &serde_json::json!({}))
        .await
}

pub async fn fetch_me(client: &ApiClient) -> Result<ApiEnvelope<User>, ApiError> {
    client.get("/auth/me", &[]).await
}
