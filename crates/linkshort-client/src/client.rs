use crate::error::{ClientError, Result};
use async_trait::async_trait;
use linkshort_core::{
    CreateLinkRequest, CreatedLink, ErrorBody, LookupResponse, ResolutionResult, Resolver,
    ShortCode,
};
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;
use url::Url;

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Connection settings for [`HttpLinkClient`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientConfig {
    /// Server root, e.g. `http://localhost:8000`. The `/api/v1` prefix is appended.
    pub base_url: Url,
    /// Per-request timeout.
    #[builder(default = Duration::from_secs(10))]
    pub timeout: Duration,
}

/// Client for the link lookup and creation endpoints.
#[derive(Debug, Clone)]
pub struct HttpLinkClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpLinkClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(config.base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Init)?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the mapping for `code`.
    ///
    /// Calls `GET {base_url}/api/v1/links/{code}`.
    pub async fn lookup(&self, code: &ShortCode) -> Result<LookupResponse> {
        let endpoint = format!("GET /links/{code}");
        let url = self.endpoint(&["links", code.as_str()])?;
        trace!(code = %code, url = %url, "looking up short code");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let resp = Self::check_status(endpoint.clone(), resp).await?;
        resp.json()
            .await
            .map_err(|source| ClientError::MalformedResponse { endpoint, source })
    }

    /// Creates a short link.
    ///
    /// Calls `POST {base_url}/api/v1/links`.
    pub async fn shorten(&self, request: &CreateLinkRequest) -> Result<CreatedLink> {
        let endpoint = "POST /links".to_string();
        let url = self.endpoint(&["links"])?;
        debug!(url = %request.url, expires_at = ?request.expires_at, "creating short link");

        let resp = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let resp = Self::check_status(endpoint.clone(), resp).await?;
        resp.json()
            .await
            .map_err(|source| ClientError::MalformedResponse { endpoint, source })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(API_PREFIX.iter().chain(segments));
        Ok(url)
    }

    async fn check_status(endpoint: String, resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error);

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { endpoint, message });
        }
        Err(ClientError::Api {
            endpoint,
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Resolver for HttpLinkClient {
    async fn resolve(&self, code: &ShortCode) -> ResolutionResult {
        let result = match self.lookup(code).await {
            Ok(response) => ResolutionResult::from_lookup(response),
            Err(error) => {
                warn!(code = %code, error = %error, "lookup failed");
                ResolutionResult::failed(error.user_message())
            }
        };

        match &result {
            ResolutionResult::Resolved { destination } => {
                debug!(code = %code, url = %destination, "resolved short code")
            }
            ResolutionResult::Failed { reason } => {
                debug!(code = %code, reason = %reason, "short code did not resolve")
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpLinkClient {
        HttpLinkClient::new(ClientConfig::builder().base_url(base.parse().unwrap()).build())
            .unwrap()
    }

    #[test]
    fn endpoint_appends_api_prefix() {
        let url = client("http://localhost:8000").endpoint(&["links", "abc123"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/links/abc123");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let url = client("http://localhost:8000/short/").endpoint(&["links"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/short/api/v1/links");
    }

    #[test]
    fn endpoint_escapes_code() {
        let url = client("http://localhost:8000").endpoint(&["links", "a?b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/links/a%3Fb");
    }

    #[test]
    fn rejects_non_base_url() {
        let config = ClientConfig::builder()
            .base_url("mailto:someone@example.com".parse().unwrap())
            .build();
        assert!(matches!(
            HttpLinkClient::new(config),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
