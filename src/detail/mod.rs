use thiserror::Error;

use crate::model::{Dataset, JournalRecord};

pub const DETAILS_PAGE: &str = "./src/ever/Details.html";
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const ID_PARAM: &str = "id";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("journal not found: {issn}")]
pub struct NotFoundError {
    pub issn: String,
}

pub fn find_by_issn<'a>(dataset: &'a Dataset, issn: &str) -> Result<&'a JournalRecord, NotFoundError> {
    find_in(dataset.records(), issn)
}

pub fn find_in<'a>(records: &'a [JournalRecord], issn: &str) -> Result<&'a JournalRecord, NotFoundError> {
    records
        .iter()
        .find(|r| r.issn().as_deref() == Some(issn))
        .ok_or_else(|| NotFoundError {
            issn: issn.to_string(),
        })
}

pub fn detail_href(issn: &str) -> String {
    format!("{DETAILS_PAGE}?{ID_PARAM}={}", urlencoding::encode(issn))
}

/// Pulls the journal identifier out of a query string such as `?id=1234-5678`.
/// Returns `None` when the parameter is missing, empty or not valid UTF-8
/// after decoding.
pub fn issn_from_query(query: &str) -> Option<String> {
    let query = query.trim();
    let query = query.split_once('?').map(|(_, q)| q).unwrap_or(query);
    let query = query.split('#').next().unwrap_or_default();
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != ID_PARAM {
            continue;
        }
        let value = value.replace('+', " ");
        let decoded = urlencoding::decode(&value).ok()?;
        let decoded = decoded.trim();
        if decoded.is_empty() {
            return None;
        }
        return Some(decoded.to_string());
    }
    None
}

/// Favicon service URL for the host of `homepage`.
pub fn favicon_url(homepage: &str) -> Option<String> {
    let url = reqwest::Url::parse(homepage.trim()).ok()?;
    let host = url.host_str()?;
    Some(format!("{FAVICON_SERVICE}?domain={host}&sz=32"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                json!({"OA_Journal Name": "First", "OA_ISSN-L": "1234-5678"}),
                json!({"OA_Journal Name": "Second", "OA_ISSN-L": "8765-4321"}),
            ]
            .into_iter()
            .filter_map(JournalRecord::from_value)
            .collect(),
        )
    }

    #[test]
    fn lookup_resolves_exact_issn() {
        let ds = dataset();
        let found = find_by_issn(&ds, "1234-5678").unwrap();
        assert_eq!(found.name().as_deref(), Some("First"));
    }

    #[test]
    fn lookup_reports_missing_issn() {
        let ds = dataset();
        let err = find_by_issn(&ds, "0000-0000").unwrap_err();
        assert_eq!(err.issn, "0000-0000");
        assert_eq!(err.to_string(), "journal not found: 0000-0000");
    }

    #[test]
    fn href_and_query_roundtrip_encoded_ids() {
        let href = detail_href("12 34/56&78");
        assert_eq!(href, "./src/ever/Details.html?id=12%2034%2F56%2678");
        assert_eq!(issn_from_query(&href).as_deref(), Some("12 34/56&78"));
    }

    #[test]
    fn query_without_id_is_none() {
        assert_eq!(issn_from_query("?foo=bar"), None);
        assert_eq!(issn_from_query("?id="), None);
        assert_eq!(issn_from_query(""), None);
        assert_eq!(issn_from_query("foo=1&id=1234-5678#top").as_deref(), Some("1234-5678"));
    }

    #[test]
    fn favicon_uses_homepage_host() {
        assert_eq!(
            favicon_url("https://www.nature.com/nature/").as_deref(),
            Some("https://www.google.com/s2/favicons?domain=www.nature.com&sz=32")
        );
        assert_eq!(favicon_url("not a url"), None);
    }
}
