//! HTTP transport shared by every service.
//!
//! Every endpoint answers with the same envelope (`success`, `data`,
//! `message`, `count`, `errors`). Success bodies are handed back as
//! [`Envelope`]; error bodies become [`ClientError::Api`] carrying the
//! server's message.

use std::sync::Arc;

use bugtrack_core::bug::FieldError;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{ClientError, ClientResult};

/// Response body shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub count: Option<usize>,
}

impl<T> Envelope<T> {
    /// The `data` member, which the endpoint promised to send.
    pub fn into_data(self) -> ClientResult<T> {
        if !self.success {
            return Err(ClientError::UnexpectedResponse(
                "response was not marked successful".into(),
            ));
        }
        self.data.ok_or_else(|| {
            ClientError::UnexpectedResponse("response did not include data".into())
        })
    }
}

impl<T> Envelope<Vec<T>> {
    /// List data, checked against the `count` the server reported.
    pub fn into_list(self) -> ClientResult<Vec<T>> {
        let count = self.count;
        let items = self.into_data()?;
        match count {
            Some(count) if count != items.len() => Err(ClientError::UnexpectedResponse(format!(
                "response reported {count} items but carried {}",
                items.len()
            ))),
            _ => Ok(items),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

/// Cheap to clone; clones share the connection pool and the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_token(self, token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Envelope<T>> {
        let request = self.request(Method::GET, path).await.query(query);
        self.send(request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await.json(body);
        self.send(request).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).await.json(body);
        self.send(request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Envelope<T>> {
        let request = self.request(Method::DELETE, path).await;
        self.send(request).await
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Sending request");

        let builder = self.http.request(method, url);
        match self.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET an endpoint whose body is not wrapped in the envelope.
    pub async fn get_plain<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path).await;
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }

        tracing::debug!(status = status.as_u16(), "Request succeeded");
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Build the error for a non-success response. Bodies that are not the
/// JSON error envelope fall back to the status reason.
fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default();

    tracing::debug!(status = status.as_u16(), %message, "Request failed");

    ClientError::Api {
        status: status.as_u16(),
        message,
        errors: parsed.errors,
    }
}
