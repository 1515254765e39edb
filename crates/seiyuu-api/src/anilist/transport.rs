use std::time::Duration;

use reqwest::Client;

use super::error::AniListError;
use crate::traits::{GraphQLRequest, GraphQLTransport, RawResponse};

pub const API_URL: &str = "https://graphql.anilist.co";

/// `GraphQLTransport` backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    endpoint: String,
    http: Client,
}

impl ReqwestTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AniListError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            endpoint: API_URL.to_string(),
            http: Client::new(),
        }
    }
}

impl GraphQLTransport for ReqwestTransport {
    async fn execute(&self, request: &GraphQLRequest) -> Result<RawResponse, AniListError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let text = resp.text().await?;

        // Error bodies are not always JSON; keep them as a string then.
        let body = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) if !(200..300).contains(&status) => serde_json::Value::String(text),
            Err(e) => return Err(AniListError::Parse(e.to_string())),
        };

        tracing::debug!(status, "AniList response received");
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
