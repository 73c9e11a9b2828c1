use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::detail::{self, NotFoundError};
use crate::dictionary::Dictionary;
use crate::loader::{self, DatasetSource, LoadError};
use crate::model::{Dataset, JournalRecord};
use crate::output::Report;
use crate::query::Query;
use crate::recommender::{self, RecommendClient, RecommendError};
use crate::views::{self, CardKind, JournalCard, JournalDetails, RecommendationCard, SearchHit};

#[derive(Clone, Debug)]
pub struct Options {
    pub dataset: DatasetSource,
    pub dictionary: Option<DatasetSource>,
    pub endpoint: String,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::parse(&loader::resolve_dataset_path("/index.html")),
            dictionary: None,
            endpoint: recommender::DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid timeout {value}, expected positive integer")]
    InvalidTimeout { value: usize },

    #[error("invalid recommendation endpoint: {endpoint}")]
    InvalidEndpoint { endpoint: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

/// Owns the HTTP client and resource locations. Queries take the loaded
/// [`Dataset`] explicitly.
#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
    client: reqwest::Client,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.timeout_seconds == 0 {
            return Err(RunnerError::InvalidTimeout {
                value: options.timeout_seconds,
            });
        }
        if reqwest::Url::parse(options.endpoint.trim()).is_err() {
            return Err(RunnerError::InvalidEndpoint {
                endpoint: options.endpoint.clone(),
            });
        }
        let client = build_http_client(options.proxy.as_deref(), options.timeout_seconds)?;
        Ok(Self { options, client })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub async fn load_dataset(&self) -> Result<Dataset, RunnerError> {
        Ok(loader::load(&self.client, &self.options.dataset).await?)
    }

    /// A missing or unreadable dictionary is not fatal: labels fall back to
    /// raw field names.
    pub async fn load_dictionary(&self) -> Dictionary {
        let Some(source) = self.options.dictionary.as_ref() else {
            return Dictionary::default();
        };
        match loader::fetch_text(&self.client, source).await {
            Ok(text) => Dictionary::parse(&text),
            Err(e) => {
                warn!(error = %e, "error loading dictionary");
                Dictionary::default()
            }
        }
    }

    pub fn recommend_client(&self) -> RecommendClient {
        RecommendClient::new(self.client.clone(), self.options.endpoint.trim())
    }

    pub async fn recommend(&self, abstract_text: &str) -> Result<Report, RunnerError> {
        let records = self.recommend_client().recommend(abstract_text).await?;
        Ok(Report::Recommendations(
            records.iter().map(RecommendationCard::build).collect(),
        ))
    }
}

pub fn search_report(dataset: &Dataset, query: &Query) -> Report {
    Report::Search(
        query
            .run(dataset.records())
            .into_iter()
            .map(SearchHit::build)
            .collect(),
    )
}

pub fn top_ranked_report(dataset: &Dataset, dictionary: &Dictionary) -> Report {
    cards(views::top_ranked(dataset.records()), CardKind::Ranking, dictionary)
}

pub fn most_cited_report(dataset: &Dataset, dictionary: &Dictionary) -> Report {
    cards(views::most_cited(dataset.records()), CardKind::Cited, dictionary)
}

pub fn impact_list_report(dataset: &Dataset) -> Report {
    Report::List(views::impact_rows(&views::impact_list(dataset.records())))
}

pub fn details_report(dataset: &Dataset, issn: &str) -> Result<Report, NotFoundError> {
    let record = detail::find_by_issn(dataset, issn.trim())?;
    Ok(Report::Details(Box::new(JournalDetails::build(record))))
}

fn cards(records: Vec<&JournalRecord>, kind: CardKind, dictionary: &Dictionary) -> Report {
    Report::Cards(
        records
            .into_iter()
            .map(|r| JournalCard::build(r, kind, dictionary))
            .collect(),
    )
}

fn build_http_client(proxy: Option<&str>, timeout_seconds: usize) -> Result<reqwest::Client, RunnerError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        )),
    );

    let timeout = Duration::from_secs(timeout_seconds.try_into().unwrap_or(10));
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(timeout);

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| RunnerError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| RunnerError::HttpClientBuild { source: e })
}
