use anyhow::Context;

use crate::progress::dto::{DataBody, ProgressDraft};
use crate::progress::record::ProgressRecord;

/// Fixed relative path shared by both operations.
pub const API_PATH: &str = "/api/progress";

/// Thin HTTP client for the progress store endpoint.
#[derive(Debug, Clone)]
pub struct ProgressApi {
    http: reqwest::Client,
    base_url: String,
}

impl ProgressApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, API_PATH)
    }

    pub async fn fetch_progress(&self) -> anyhow::Result<Vec<ProgressRecord>> {
        let response = self
            .http
            .get(self.url())
            .send()
            .await
            .context("request progress list")?;
        anyhow::ensure!(
            response.status().is_success(),
            "failed to load progress records"
        );
        let body: DataBody<Vec<ProgressRecord>> =
            response.json().await.context("decode progress list")?;
        Ok(body.data)
    }

    pub async fn create_progress(&self, draft: &ProgressDraft) -> anyhow::Result<ProgressRecord> {
        let response = self
            .http
            .post(self.url())
            .json(draft)
            .send()
            .await
            .context("send progress record")?;
        anyhow::ensure!(
            response.status().is_success(),
            "failed to save progress record"
        );
        let body: DataBody<ProgressRecord> =
            response.json().await.context("decode saved record")?;
        Ok(body.data)
    }
}
