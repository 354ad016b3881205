use crate::core::{AnalysisBackend, AnalysisReport, DomainString};
use crate::domain::model::HealthStatus;
use crate::utils::error::{OsintError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const ANALYZE_PATH: &str = "/api/osint/analyze";
pub const HEALTH_PATH: &str = "/api/osint/health";

const GENERIC_FAILURE: &str = "Analysis failed";

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    domain: &'a DomainString,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Talks to the OSINT backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAnalysisBackend {
    client: Client,
    base_url: String,
}

impl HttpAnalysisBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, HEALTH_PATH)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.health_url();
        tracing::debug!("Checking backend health at: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OsintError::BackendError {
                status: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }

        Ok(response.json::<HealthStatus>().await?)
    }

    // 錯誤回應的內容不一定是 JSON，解析失敗時退回通用訊息
    async fn error_message(response: reqwest::Response) -> String {
        response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn analyze(&self, domain: &DomainString) -> Result<AnalysisReport> {
        let url = self.analyze_url();
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&AnalyzeRequest { domain })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let message = Self::error_message(response).await;
            tracing::warn!("Backend rejected {}: {} ({})", domain, message, status);
            return Err(OsintError::BackendError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<AnalysisReport>().await?)
    }
}
