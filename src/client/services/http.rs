//! # HTTP Client Adapter
//!
//! Thin wrapper over `reqwest` that owns the base URL, default headers,
//! the session cookie, and the mapping from transport/status failures to
//! [`ApiError`]. Everything above this module speaks typed envelopes.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::error::ApiError;
use crate::client::services::session::SessionStore;

/// Default per-request timeout. A stuck request must surface as an
/// error, never leave a screen loading forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the dealership REST backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn apply_session(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.cookie_header() {
            Some(cookie) => request.header(reqwest::header::COOKIE, cookie),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with_query(path, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let request = self.apply_session(self.http.get(self.url(path)).query(query));
        self.handle(request.send().await?).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let request = self.apply_session(self.http.post(self.url(path)).json(body));
        self.handle(request.send().await?).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "DELETE");
        let request = self.apply_session(self.http.delete(self.url(path)).query(query));
        self.handle(request.send().await?).await
    }

    async fn handle<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.session.handle_unauthorized();
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let message = extract_message(response).await;
            tracing::warn!(status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Best-effort extraction of the server's error message: a JSON
/// `message` field when present, the raw body otherwise.
async fn extract_message(response: Response) -> String {
    let fallback = response.status().canonical_reason().unwrap_or("error");
    match response.text().await {
        Ok(body) if !body.is_empty() => {
            match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(value) => value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or(body),
                Err(_) => body,
            }
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let session = Arc::new(SessionStore::new("forecourt_session"));
        ApiClient::new("https://api.example.com/", session).unwrap()
    }

    #[test]
    fn base_url_should_be_trimmed() {
        assert_eq!(client().base_url(), "https://api.example.com");
    }

    #[test]
    fn url_should_join_with_single_slash() {
        let client = client();
        assert_eq!(client.url("/cars"), "https://api.example.com/cars");
        assert_eq!(client.url("cars"), "https://api.example.com/cars");
    }
}
