//! REST API client.
//!
//! One thin wrapper around `reqwest` that every resource module goes
//! through. It owns the base URL, the request timeout, status checking and
//! body decoding; resource-specific typing stays in the domain modules.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors produced by the API client.
///
/// Callers are responsible for user-facing fallback; nothing is retried
/// automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection failure, timeout, redirect
    /// loop.
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status {
        status: StatusCode,
        body: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Whether this error is a 404 from the server.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }
}

/// Response envelope: the backend answers either with the bare value or with
/// `{ "data": ... }`. All consumers accept both shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{ "data": ... }`
    Wrapped { data: T },
    /// The bare value.
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwraps to the carried value regardless of shape.
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(value) => value,
        }
    }
}

/// HTTP client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g.
    /// `http://localhost:8082/api`) with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// The host the API lives on, with any trailing `/api` segment removed.
    /// Relative image paths are resolved against this.
    pub fn base_host(&self) -> String {
        let lower = self.base_url.to_ascii_lowercase();

        match lower.strip_suffix("/api") {
            Some(host) => self.base_url.chars().take(host.chars().count()).collect(),
            None => self.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET {base}{path}` decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;

        decode(response).await
    }

    /// `GET {base}{path}?{query}` decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).query(query).send().await?;

        decode(response).await
    }

    /// `POST {base}{path}` with a JSON body, decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;

        decode(response).await
    }

    /// `PUT {base}{path}` with a JSON body, decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.put(self.url(path)).json(body).send().await?;

        decode(response).await
    }

    /// `POST {base}{path}` with a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    pub async fn post_json_discard<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(())
    }

    /// `PUT {base}{path}` with a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    pub async fn put_json_discard<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(())
    }

    /// `DELETE {base}{path}`, discarding any response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.http.delete(self.url(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(())
    }

    /// `DELETE {base}{path}?{query}`, discarding any response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    pub async fn delete_query(&self, path: &str, query: &[(&str, String)]) -> Result<(), ApiError> {
        let response = self.http.delete(self.url(path)).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(())
    }

    /// `POST {base}{path}` with a multipart form, decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }

    let bytes = response.bytes().await?;

    serde_json::from_slice(&bytes).map_err(ApiError::Decode)
}

/// Lenient scalar coercion for the backend's loosely-typed payloads, which
/// send numbers both as JSON numbers and as strings.
pub(crate) mod coerce {
    use rust_decimal::Decimal;
    use serde_json::Value;

    /// Number or numeric string to [`Decimal`].
    pub(crate) fn decimal(value: &Value) -> Option<Decimal> {
        match value {
            Value::Number(n) => n.to_string().parse().ok(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Number or numeric string to `i64`.
    pub(crate) fn integer(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Number or numeric string to `u32`, flooring negatives at 0.
    pub(crate) fn quantity(value: &Value) -> Option<u32> {
        integer(value).map(|n| u32::try_from(n).unwrap_or(0))
    }
}
