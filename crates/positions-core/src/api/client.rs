//! API client for the position-management REST API.
//!
//! All traffic goes through [`ApiClient::request`], which resolves the URL
//! against the configured base, attaches the current bearer token and parses
//! the JSON body. The typed helpers below are thin wrappers around it.

use std::sync::Arc;

use reqwest::{header, Client, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::auth::TokenStore;
use crate::models::{AuthRequest, PositionInput};

use super::{ApiError, ApiResponse};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const POSITIONS_PATH: &str = "/positions";

/// API client for the position-management service.
///
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling,
/// and the token store is shared. The token is never cached on the client:
/// every request reads it from the store, so a logout or a new login is seen
/// by the very next call.
///
/// There is no timeout and no retry. A request runs until the server answers
/// or the connection fails.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new API client for the given base address
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(credential) = self.store.read() {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", credential.token))
                .map_err(|_| ApiError::InvalidToken)?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Issue a request and return the parsed body with its status.
    ///
    /// A non-success status is returned as `Ok`; only a missing response or
    /// an unparseable body is an error.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .headers(self.auth_headers()?);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%method, %url, %status, bytes = text.len(), "API response");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|_| {
                ApiError::InvalidResponse(format!(
                    "Status {}: {}",
                    status,
                    ApiError::truncate_body(&text)
                ))
            })?
        };

        Ok(ApiResponse::new(status, body))
    }

    pub async fn login(&self, credentials: &AuthRequest) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, LOGIN_PATH, Some(credentials)).await
    }

    pub async fn register(&self, credentials: &AuthRequest) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, REGISTER_PATH, Some(credentials)).await
    }

    pub async fn list_positions(&self) -> Result<ApiResponse, ApiError> {
        self.request::<()>(Method::GET, POSITIONS_PATH, None).await
    }

    pub async fn create_position(&self, input: &PositionInput) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, POSITIONS_PATH, Some(input)).await
    }

    pub async fn update_position(
        &self,
        position_id: i64,
        input: &PositionInput,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("{}/{}", POSITIONS_PATH, position_id);
        self.request(Method::PUT, &path, Some(input)).await
    }

    pub async fn delete_position(&self, position_id: i64) -> Result<ApiResponse, ApiError> {
        let path = format!("{}/{}", POSITIONS_PATH, position_id);
        self.request::<()>(Method::DELETE, &path, None).await
    }
}
