use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{Dataset, JournalRecord};

pub const DATASET_FILE: &str = "factorsphere_data.json";
const NESTED_PAGE_MARKER: &str = "/src/ever/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    FilePath(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// `http(s)://` values are URLs, anything else is a local path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if crate::utils::is_http_url(value) {
            Self::Url(value.to_string())
        } else {
            Self::FilePath(crate::config::expand_tilde(value))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::FilePath(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {source_name}: HTTP status {status}")]
    Fetch { source_name: String, status: u16 },

    #[error("failed to fetch {source_name}: {source}")]
    Transport {
        source_name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {source_name}: {message}")]
    Parse { source_name: String, message: String },
}

impl LoadError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Transport { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Picks the dataset path relative to the page that asks for it. Detail and
/// list pages live two directories down.
pub fn resolve_dataset_path(page_location: &str) -> String {
    if page_location.contains(NESTED_PAGE_MARKER) {
        format!("../../src/data/{DATASET_FILE}")
    } else {
        format!("./src/data/{DATASET_FILE}")
    }
}

/// Fetches the raw body of a dataset-like resource.
pub async fn fetch_text(client: &reqwest::Client, source: &DatasetSource) -> Result<String, LoadError> {
    match source {
        DatasetSource::FilePath(path) => {
            debug!(path = %path.display(), "reading resource from disk");
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
        }
        DatasetSource::Url(url) => {
            debug!(%url, "fetching resource");
            let resp = client
                .get(url.as_str())
                .send()
                .await
                .map_err(|e| LoadError::Transport {
                    source_name: url.clone(),
                    source: e,
                })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::Fetch {
                    source_name: url.clone(),
                    status: status.as_u16(),
                });
            }
            debug!(status = status.as_u16(), "response received");
            resp.text().await.map_err(|e| LoadError::Transport {
                source_name: url.clone(),
                source: e,
            })
        }
    }
}

pub async fn load(client: &reqwest::Client, source: &DatasetSource) -> Result<Dataset, LoadError> {
    let body = fetch_text(client, source).await?;
    let dataset = parse_dataset(&body, &source.describe())?;
    info!(source = %source, entries = dataset.len(), "dataset loaded");
    Ok(dataset)
}

pub fn parse_dataset(body: &str, source_name: &str) -> Result<Dataset, LoadError> {
    let raw = parse_record_array(body, source_name)?;
    Ok(Dataset::new(retain_valid(raw)))
}

pub(crate) fn parse_record_array(body: &str, source_name: &str) -> Result<Vec<Value>, LoadError> {
    let value: Value = serde_json::from_str(body).map_err(|e| LoadError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(LoadError::Parse {
            source_name: source_name.to_string(),
            message: format!("expected a JSON array, found {}", json_kind(&other)),
        }),
    }
}

/// Keeps objects with more than one populated field, in their original
/// order.
pub fn retain_valid(raw: Vec<Value>) -> Vec<JournalRecord> {
    raw.into_iter()
        .filter_map(JournalRecord::from_value)
        .filter(|r| r.populated_fields() > 1)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
