use async_trait::async_trait;

use super::{Collector, RegistrationRequest, TransportError};
use crate::types::Reading;

/// JSON-over-HTTP collector client. No request timeout: a hung collector is
/// expected to stall the tick, not fail it.
#[derive(Debug, Clone)]
pub struct HttpCollector {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCollector {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), TransportError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl Collector for HttpCollector {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), TransportError> {
        self.post_json("/register", request).await
    }

    async fn update(&self, reading: &Reading) -> Result<(), TransportError> {
        self.post_json("/update", reading).await
    }
}
