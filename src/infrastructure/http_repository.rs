// Upstream REST repository implementation
use crate::application::sample_repository::{SampleRepository, TimelineQuery};
use crate::domain::series::Sample;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct HttpSampleRepository {
    host: String,
    token: String,
    client: reqwest::Client,
}

/// The upstream wraps samples in `data`; some endpoints return a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SamplePayload {
    Wrapped { data: Vec<Sample> },
    Bare(Vec<Sample>),
}

impl HttpSampleRepository {
    pub fn new(host: String, token: String) -> Self {
        Self::with_client(host, token, reqwest::Client::new())
    }

    pub fn with_client(host: String, token: String, client: reqwest::Client) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            client,
        }
    }

    fn build_url(&self, query: &TimelineQuery, now: DateTime<Utc>) -> String {
        let end = now.timestamp_millis();
        let start = (now - Duration::hours(query.hours as i64)).timestamp_millis();
        let separator = if query.path.contains('?') { '&' } else { '?' };

        format!(
            "{}/{}{}source={}&startTime={}&endTime={}",
            self.host,
            query.path.trim_start_matches('/'),
            separator,
            urlencoding::encode(&query.source),
            start,
            end
        )
    }

    fn parse_payload(body: &str) -> Result<Vec<Sample>> {
        let payload: SamplePayload =
            serde_json::from_str(body).context("Failed to parse upstream sample payload")?;

        Ok(match payload {
            SamplePayload::Wrapped { data } => data,
            SamplePayload::Bare(samples) => samples,
        })
    }
}

#[async_trait]
impl SampleRepository for HttpSampleRepository {
    async fn fetch_samples(&self, query: &TimelineQuery) -> Result<Vec<Sample>> {
        let url = self.build_url(query, Utc::now());
        tracing::debug!("Fetching samples: {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if !self.token.is_empty() {
            request = request.header("Authorization", format!("Token {}", self.token));
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to upstream")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Upstream query failed with status {}: {}", status, body);
        }

        let body = response
            .text()
            .await
            .context("Failed to read upstream response")?;

        let samples = Self::parse_payload(&body)?;
        tracing::debug!("Fetched {} samples for {}", samples.len(), query.source);

        Ok(samples)
    }
}
