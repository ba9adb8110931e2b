//! HTTP client adapter.
//!
//! [`ApiClient`] wraps a single [`reqwest::Client`] configured with the
//! resolved base URL and a default `Content-Type: application/json`
//! header. Every request goes through one code path that logs the failure
//! (response body when the server answered, transport message otherwise)
//! and hands the error back unchanged. There is no retry and no
//! transformation of the payload.
//!
//! Resource-specific calls live in [`crate::api`]; this module only knows
//! about paths, query pairs and bodies.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{multipart, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;

/// Query parameters, sent in the order given.
pub type Query<'a> = [(&'a str, String)];

/// Failure of a single API call.
///
/// The backend's error payload is carried verbatim in
/// [`ApiError::Status::body`]; there are no domain-specific kinds.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying `reqwest::Client` could not be constructed (TLS
    /// backend initialization). Base URLs are validated earlier by
    /// [`Config`], so there is no separate invalid-URL kind.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} {path} failed: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },

    #[error("{method} {path} returned an unreadable body: {source}")]
    Decode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// A configured connection to the Brief Assistant API.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Resolve the base URL from `config` for `hostname` and build a client.
    pub fn from_config(config: &Config, hostname: &str) -> anyhow::Result<Self> {
        let base_url = config.resolve_base_url(hostname)?;
        tracing::debug!("API base URL: {}", base_url);
        Ok(Self::new(base_url)?)
    }

    /// Build a client for an already resolved base URL (e.g.
    /// `http://localhost:8001/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, query: &Query<'_>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        if query.is_empty() {
            builder
        } else {
            builder.query(query)
        }
    }

    /// Send a request and return the raw body of a successful response.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Vec<u8>, ApiError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                tracing::error!(%method, path, "API error: {}", source);
                return Err(ApiError::Transport {
                    method,
                    path: path.to_string(),
                    source,
                });
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => {
                tracing::error!(%method, path, "API error: {}", source);
                return Err(ApiError::Transport {
                    method,
                    path: path.to_string(),
                    source,
                });
            }
        };

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!(%method, path, status = status.as_u16(), "API error: {}", body);
            return Err(ApiError::Status {
                method,
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }

    fn decode<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &[u8],
    ) -> Result<T, ApiError> {
        serde_json::from_slice(body).map_err(|source| {
            tracing::error!(%method, path, "API error: {}", source);
            ApiError::Decode {
                method,
                path: path.to_string(),
                source,
            }
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute(method.clone(), path, builder).await?;
        // 204 and other empty bodies decode as JSON null, i.e. `()` or `None`.
        if body.is_empty() {
            return self.decode(method, path, b"null");
        }
        self.decode(method, path, &body)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path, query);
        self.call(Method::GET, path, builder).await
    }

    /// `POST` with an optional JSON body. `None` sends no body at all.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        query: &Query<'_>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(Method::POST, path, query);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.call(Method::POST, path, builder).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path, &[]).json(body);
        self.call(Method::PUT, path, builder).await
    }

    /// `DELETE`; any response body is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path, &[]);
        self.execute(Method::DELETE, path, builder).await?;
        Ok(())
    }

    /// `GET` returning the raw response bytes (exports).
    pub async fn get_bytes(&self, path: &str, query: &Query<'_>) -> Result<Vec<u8>, ApiError> {
        let builder = self.request(Method::GET, path, query);
        self.execute(Method::GET, path, builder).await
    }

    /// `POST` a multipart form. The form's boundary header replaces the
    /// default JSON content type for this request.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
        form: multipart::Form,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path, query).multipart(form);
        self.call(Method::POST, path, builder).await
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json("/health", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base() {
        let client = ApiClient::new("http://localhost:8001/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8001/api");
        assert_eq!(client.url("/briefs/"), "http://localhost:8001/api/briefs/");
    }

    #[test]
    fn status_error_message_carries_body() {
        let err = ApiError::Status {
            method: Method::GET,
            path: "/briefs/x".to_string(),
            status: 404,
            body: r#"{"detail":"Brief not found"}"#.to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            r#"GET /briefs/x returned 404: {"detail":"Brief not found"}"#
        );
    }
}
