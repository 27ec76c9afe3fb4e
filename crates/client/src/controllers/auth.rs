//! Session state: the signed-in user and the persisted token.

use std::sync::Arc;

use super::{failure_message, Phase};
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthPayload, Credentials, PasswordChange, ProfileUpdate, Registration, User};
use crate::services::AuthService;
use crate::session::TokenStore;

pub const FETCH_USER_FAILED: &str = "Failed to fetch user data";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const PROFILE_FAILED: &str = "Failed to update profile";
pub const PASSWORD_FAILED: &str = "Failed to change password";

pub struct AuthController {
    service: AuthService,
    tokens: Arc<dyn TokenStore>,
    user: Option<User>,
    phase: Phase,
    error: Option<String>,
}

impl AuthController {
    pub fn new(service: AuthService, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            service,
            tokens,
            user: None,
            phase: Phase::Idle,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Restore the session from a stored token. Does nothing without one;
    /// a token the server rejects is discarded.
    pub async fn hydrate(&mut self) -> ClientResult<()> {
        let Some(token) = self.tokens.load()? else {
            return Ok(());
        };
        self.service.api().set_token(Some(token)).await;
        self.fetch_current_user().await
    }

    pub async fn login(&mut self, credentials: &Credentials) -> ClientResult<AuthPayload> {
        self.begin();

        let payload = match self.service.login(credentials).await {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail(err, LOGIN_FAILED)),
        };
        let Some(token) = payload.token.as_deref() else {
            let err = ClientError::UnexpectedResponse("login response had no token".into());
            return Err(self.fail(err, LOGIN_FAILED));
        };

        if let Err(err) = self.store_token(token).await {
            return Err(self.fail(err, LOGIN_FAILED));
        }
        self.fetch_current_user().await?;
        Ok(payload)
    }

    /// Register a new account. When the server returns a token the new
    /// account is signed in straight away.
    pub async fn register(&mut self, registration: &Registration) -> ClientResult<AuthPayload> {
        self.begin();

        let payload = match self.service.register(registration).await {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail(err, REGISTER_FAILED)),
        };

        match payload.token.as_deref() {
            Some(token) => {
                if let Err(err) = self.store_token(token).await {
                    return Err(self.fail(err, REGISTER_FAILED));
                }
                self.fetch_current_user().await?;
            }
            None => self.phase = Phase::Success,
        }
        Ok(payload)
    }

    /// Forget the session locally. The server is not contacted.
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.tokens.clear()?;
        self.service.api().set_token(None).await;
        self.user = None;
        self.error = None;
        self.phase = Phase::Idle;
        tracing::debug!("Signed out");
        Ok(())
    }

    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> ClientResult<User> {
        self.begin();

        match self.service.update_profile(update).await {
            Ok(user) => {
                self.user = Some(user.clone());
                self.phase = Phase::Success;
                Ok(user)
            }
            Err(err) => Err(self.fail(err, PROFILE_FAILED)),
        }
    }

    pub async fn change_password(&mut self, change: &PasswordChange) -> ClientResult<String> {
        self.begin();

        match self.service.change_password(change).await {
            Ok(message) => {
                self.phase = Phase::Success;
                Ok(message)
            }
            Err(err) => Err(self.fail(err, PASSWORD_FAILED)),
        }
    }

    async fn fetch_current_user(&mut self) -> ClientResult<()> {
        self.begin();

        match self.service.current_user().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Loaded current user");
                self.user = Some(user);
                self.phase = Phase::Success;
                Ok(())
            }
            Err(err) => {
                self.user = None;
                self.service.api().set_token(None).await;
                if let Err(clear_err) = self.tokens.clear() {
                    tracing::warn!(error = %clear_err, "Could not discard rejected token");
                }
                Err(self.fail(err, FETCH_USER_FAILED))
            }
        }
    }

    async fn store_token(&mut self, token: &str) -> ClientResult<()> {
        self.tokens.save(token)?;
        self.service.api().set_token(Some(token.to_string())).await;
        Ok(())
    }

    fn begin(&mut self) {
        self.phase = Phase::Loading;
        self.error = None;
    }

    fn fail(&mut self, err: ClientError, fallback: &str) -> ClientError {
        let message = failure_message(&err, fallback);
        tracing::debug!(error = %err, %message, "Auth request failed");
        self.error = Some(message);
        self.phase = Phase::Error;
        err
    }
}
