//! Wrappers for the `/auth` endpoints.
//!
//! Responses use the standard envelope: login and registration return an
//! [`AuthPayload`] in `data`, profile reads and writes return the [`User`].

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{AuthPayload, Credentials, PasswordChange, ProfileUpdate, Registration, User};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn login(&self, credentials: &Credentials) -> ClientResult<AuthPayload> {
        self.api.post("/auth/login", credentials).await?.into_data()
    }

    pub async fn register(&self, registration: &Registration) -> ClientResult<AuthPayload> {
        let envelope = self.api.post("/auth/register", registration).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn current_user(&self) -> ClientResult<User> {
        self.api.get("/auth/me", &[]).await?.into_data()
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.api.put("/auth/profile", update).await?.into_data()
    }

    /// Returns the server's acknowledgement message.
    pub async fn change_password(&self, change: &PasswordChange) -> ClientResult<String> {
        let envelope = self
            .api
            .put::<_, serde_json::Value>("/auth/password", change)
            .await?;
        Ok(envelope.message.unwrap_or_default())
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.api
            .post::<_, serde_json::Value>("/auth/logout", &serde_json::json!({}))
            .await?;
        Ok(())
    }
}
