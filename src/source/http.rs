use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::{DashError, DashResult};
use crate::records::{
    ComparisonRecord, HealthStatus, MaterialDetails, RecommendationRecord,
};
use crate::source::envelope::{error_message, required_field, success_field};
use crate::source::{CompareRequest, RecommendRequest, RecommendationSource};

const USER_AGENT: &str = concat!("ecopack-dash/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-api-key";
const BODY_PREVIEW_CHARS: usize = 180;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> DashResult<Self> {
        let base = parse_base_url(&config.url)?;

        let mut headers = HeaderMap::new();
        let api_key = config.api_key.trim();
        if !api_key.is_empty() {
            let value = HeaderValue::from_str(api_key)
                .map_err(|_| DashError::invalid("api key contains invalid header characters"))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs.max(1)))
            .build()
            .map_err(|e| DashError::upstream("http client", e.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> DashResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DashError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, label: &str, segments: &[&str]) -> DashResult<Value> {
        let url = self.endpoint(segments)?;
        self.send(label, self.client.get(url)).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        label: &str,
        segments: &[&str],
        body: &B,
    ) -> DashResult<Value> {
        let url = self.endpoint(segments)?;
        self.send(label, self.client.post(url).json(body)).await
    }

    async fn send(&self, label: &str, request: RequestBuilder) -> DashResult<Value> {
        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!("{label} request failed: {e}");
            DashError::upstream(label, e.to_string())
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("{label} body read failed: {e}");
            DashError::upstream(label, format!("failed reading response body: {e}"))
        })?;
        debug!(
            "{label} -> {status} in {}ms",
            started.elapsed().as_millis()
        );

        match serde_json::from_str::<Value>(&body) {
            // error envelopes arrive with 4xx/5xx; surface their message
            Ok(value) if !status.is_success() => {
                let message = format!("{status}: {}", error_message(&value));
                warn!("{label} returned {message}");
                Err(DashError::upstream(label, message))
            }
            Ok(value) => Ok(value),
            Err(e) => {
                let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
                warn!("{label} returned {status} with non-JSON body: {preview}");
                Err(DashError::upstream(
                    label,
                    format!("{status}: invalid JSON response ({e})"),
                ))
            }
        }
    }
}

#[async_trait]
impl RecommendationSource for HttpBackend {
    async fn health(&self) -> DashResult<HealthStatus> {
        let label = "GET /api/health";
        let body = self.get_json(label, &["api", "health"]).await?;
        let status: HealthStatus = serde_json::from_value(body)
            .map_err(|e| DashError::upstream(label, format!("invalid health payload: {e}")))?;
        if !status.is_healthy() {
            return Err(DashError::upstream(
                label,
                format!("backend reported status `{}`", status.status),
            ));
        }
        Ok(status)
    }

    async fn categories(&self) -> DashResult<Vec<String>> {
        let label = "GET /api/categories";
        let body = self.get_json(label, &["api", "categories"]).await?;
        Ok(success_field(label, &body, "categories")?.unwrap_or_default())
    }

    async fn materials(&self) -> DashResult<Vec<String>> {
        let label = "GET /api/materials";
        let body = self.get_json(label, &["api", "materials"]).await?;
        Ok(success_field(label, &body, "materials")?.unwrap_or_default())
    }

    async fn material_details(&self, name: &str) -> DashResult<MaterialDetails> {
        let label = "GET /api/materials/{name}";
        let body = self.get_json(label, &["api", "materials", name]).await?;
        required_field(label, &body, "material")
    }

    async fn recommend(&self, request: &RecommendRequest) -> DashResult<Vec<RecommendationRecord>> {
        let label = "POST /api/recommend";
        let body = self.post_json(label, &["api", "recommend"], request).await?;
        Ok(success_field(label, &body, "recommendations")?.unwrap_or_default())
    }

    async fn compare(&self, request: &CompareRequest) -> DashResult<ComparisonRecord> {
        let label = "POST /api/compare";
        let body = self.post_json(label, &["api", "compare"], request).await?;
        required_field(label, &body, "comparison")
    }
}

fn parse_base_url(raw: &str) -> DashResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| DashError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(DashError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}
