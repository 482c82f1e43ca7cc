//! HTTP client for the Instatus REST API

pub mod component;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.instatus.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid API endpoint '{0}'")]
    InvalidEndpoint(String, #[source] url::ParseError),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Authenticated client for one Instatus account.
///
/// Cheap to clone; shared across resources behind an `Arc` by the provider.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, ApiError> {
        url::Url::parse(endpoint)
            .map_err(|e| ApiError::InvalidEndpoint(endpoint.to_string(), e))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending API request");

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthenticationFailed);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .send(reqwest::Method::GET, path, None::<&serde_json::Value>)
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let response = self.send(reqwest::Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let response = self.send(reqwest::Method::PUT, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(reqwest::Method::DELETE, path, None::<&serde_json::Value>)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_endpoint() {
        let err = Client::new("not a url", "key").unwrap_err();
        assert!(matches!(err, ApiError::InvalidEndpoint(..)));
    }

    #[test]
    fn strips_trailing_slash_from_endpoint() {
        let client = Client::new("https://api.instatus.com/", "key").unwrap();
        assert_eq!(client.base_url, "https://api.instatus.com");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/pg_1/components/cmp_1")
            .with_status(401)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "bad-key").unwrap();
        let err = client
            .get::<serde_json::Value>("/v1/pg_1/components/cmp_1")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::AuthenticationFailed));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_carries_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/pg_1/components/cmp_missing")
            .with_status(404)
            .with_body(r#"{"error":"component not found"}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key").unwrap();
        let err = client
            .get::<serde_json::Value>("/v1/pg_1/components/cmp_missing")
            .await
            .unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("component not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn requests_carry_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/pg_1/components/cmp_1")
            .match_header("authorization", "Bearer secret-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = Client::new(&server.url(), "secret-key").unwrap();
        let _: serde_json::Value = client.get("/v1/pg_1/components/cmp_1").await.unwrap();

        mock.assert_async().await;
    }
}
