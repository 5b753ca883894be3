//! Cat fact lookups used to decorate member profiles.

use std::time::Duration;

use async_trait::async_trait;
use memberhub_config::FactsConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::MemberResult;
use crate::ports::FactSource;

#[derive(Debug, Deserialize)]
struct FactResponse {
    fact: String,
}

/// Fetches a fact over HTTP.
///
/// Any status other than `200 OK` yields an empty fact; transport failures
/// are errors.
#[derive(Clone)]
pub struct HttpFactSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFactSource {
    pub fn new(config: &FactsConfig) -> MemberResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl FactSource for HttpFactSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_fact(&self) -> MemberResult<String> {
        let response = self.client.get(&self.url).send().await?;
        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), "fact service returned no fact");
            return Ok(String::new());
        }

        let body: FactResponse = response.json().await?;
        Ok(body.fact)
    }
}

/// Fact source used when lookups are switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFacts;

#[async_trait]
impl FactSource for NoFacts {
    async fn fetch_fact(&self) -> MemberResult<String> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source_for(server: &MockServer) -> HttpFactSource {
        HttpFactSource::new(&FactsConfig {
            enabled: true,
            url: server.url("/fact"),
            timeout_seconds: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn returns_fact_on_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/fact");
                then.status(200)
                    .json_body(serde_json::json!({"fact": "Cats have five toes.", "length": 20}));
            })
            .await;

        let fact = source_for(&server).fetch_fact().await.unwrap();

        mock.assert_async().await;
        assert_eq!(fact, "Cats have five toes.");
    }

    #[tokio::test]
    async fn returns_empty_fact_on_non_ok_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fact");
                then.status(503);
            })
            .await;

        let fact = source_for(&server).fetch_fact().await.unwrap();
        assert!(fact.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fact");
                then.status(200).body("not json");
            })
            .await;

        assert!(source_for(&server).fetch_fact().await.is_err());
    }

    #[tokio::test]
    async fn no_facts_is_always_empty() {
        assert_eq!(NoFacts.fetch_fact().await.unwrap(), "");
    }
}
