use log::{debug, error, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::api::config::ApiConfig;
use crate::api::credentials::CredentialProvider;
use crate::entity::{BoardError, BoardResult};

/// HTTP client bound to the token API.
///
/// Every request picks up the stored bearer token, and a 401 answer evicts it
/// before the error is handed back to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Creates a client with JSON headers and, if given, a construction-time bearer token
    pub fn new(
        config: &ApiConfig,
        token: Option<&str>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> BoardResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| BoardError::Credentials(format!("Invalid bearer token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        // reqwest keeps no cookie store unless asked to
        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // Overwrite the Authorization header with the stored token, if there is one
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.get().await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                error!("Failed to read stored access token: {}", e);
                request
            }
        }
    }

    // Pass successful responses through, evict the token on 401
    async fn check(&self, response: Response) -> BoardResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("API answered 401 for {}, clearing stored access token", response.url());
            if let Err(e) = self.credentials.clear().await {
                error!("Failed to clear stored access token: {}", e);
            }
            return Err(BoardError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("API error {}: {}", status, body);
        Err(BoardError::Status { status, body })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BoardResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let request = self.authorize(self.http_client.get(&url)).await;
        let response = self.check(request.send().await?).await?;

        Ok(response.json::<T>().await?)
    }

    /// POST a JSON body and hand back whatever the server answered.
    ///
    /// A body that is not JSON comes back as `Value::String`, an empty body as `""`.
    pub async fn post_payload<B>(&self, path: &str, body: &B) -> BoardResult<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let request = self.authorize(self.http_client.post(&url).json(body)).await;
        let response = self.check(request.send().await?).await?;
        let text = response.text().await?;

        Ok(payload_from_text(text))
    }
}

fn payload_from_text(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
