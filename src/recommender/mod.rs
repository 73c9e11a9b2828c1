use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::JournalRecord;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/recommend";

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("please provide an abstract")]
    EmptyAbstract,

    #[error("recommendation request failed: HTTP status {status}")]
    Fetch { status: u16 },

    #[error("recommendation request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid recommendation response: {message}")]
    Parse { message: String },
}

#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    #[serde(rename = "abstract")]
    text: &'a str,
}

#[derive(Clone, Debug)]
pub struct RecommendClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RecommendClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub async fn recommend(&self, abstract_text: &str) -> Result<Vec<JournalRecord>, RecommendError> {
        let text = abstract_text.trim();
        if text.is_empty() {
            return Err(RecommendError::EmptyAbstract);
        }

        debug!(endpoint = %self.endpoint, chars = text.len(), "requesting recommendations");
        let resp = self
            .client
            .post(self.endpoint.as_str())
            .json(&RecommendRequest { text })
            .send()
            .await
            .map_err(|e| RecommendError::Transport { source: e })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RecommendError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RecommendError::Transport { source: e })?;
        let items = crate::loader::parse_record_array(&body, &self.endpoint).map_err(|e| {
            RecommendError::Parse {
                message: e.to_string(),
            }
        })?;
        let records: Vec<JournalRecord> = items
            .into_iter()
            .filter_map(JournalRecord::from_value)
            .collect();
        info!(count = records.len(), "recommendations received");
        Ok(records)
    }
}
