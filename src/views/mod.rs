//! Ranking views and display view-models.
//!
//! The ranking views are fixed queries over the loaded collection. The
//! view-models turn a [`JournalRecord`] into typed display fields, with
//! [`NOT_AVAILABLE`](crate::utils::NOT_AVAILABLE) standing in for any missing
//! value.

use serde::Serialize;

use crate::detail;
use crate::dictionary::Dictionary;
use crate::model::{self, JournalRecord};
use crate::query::{self, DEFAULT_LIMIT};
use crate::utils::{format_grouped, format_plain, or_not_available};

/// Records with a non-zero rank, best (lowest) rank first.
pub fn top_ranked(records: &[JournalRecord]) -> Vec<&JournalRecord> {
    let mut out: Vec<&JournalRecord> = records
        .iter()
        .filter(|r| r.rank().is_some_and(|rank| rank != 0))
        .collect();
    out.sort_by_key(|r| r.rank().unwrap_or(i64::MAX));
    out.truncate(DEFAULT_LIMIT);
    out
}

/// Records with a non-zero citation count, most cited first.
pub fn most_cited(records: &[JournalRecord]) -> Vec<&JournalRecord> {
    let mut out: Vec<&JournalRecord> = records
        .iter()
        .filter(|r| r.cited_by_count().is_some_and(|c| c != 0.0))
        .collect();
    out.sort_by(|a, b| query::descending(a.cited_by_count(), b.cited_by_count()));
    out.truncate(DEFAULT_LIMIT);
    out
}

/// Every record with a non-zero impact factor, highest first. Not capped.
pub fn impact_list(records: &[JournalRecord]) -> Vec<&JournalRecord> {
    let mut out: Vec<&JournalRecord> = records
        .iter()
        .filter(|r| r.impact_factor().is_some_and(|v| v != 0.0))
        .collect();
    out.sort_by(|a, b| query::descending(a.impact_factor(), b.impact_factor()));
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Ranking,
    Cited,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(dictionary: &Dictionary, field: &str, value: String) -> Self {
        Self {
            label: dictionary.short(field),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JournalCard {
    pub kind: CardKind,
    pub title: String,
    pub issn: Metric,
    pub field: Metric,
    pub headline: Metric,
    pub h_index: Metric,
    pub coverage: Metric,
    pub href: String,
}

impl JournalCard {
    pub fn build(record: &JournalRecord, kind: CardKind, dictionary: &Dictionary) -> Self {
        let name = or_not_available(record.name());
        let title = match kind {
            CardKind::Ranking => format!(
                "#{} - {}",
                or_not_available(record.rank().map(|r| r.to_string())),
                name
            ),
            CardKind::Cited => name,
        };
        let headline = match kind {
            CardKind::Ranking => Metric::new(
                dictionary,
                model::FIELD_SJR,
                or_not_available(record.impact_factor().map(format_plain)),
            ),
            CardKind::Cited => Metric::new(
                dictionary,
                model::FIELD_CITED_BY,
                or_not_available(record.cited_by_count().map(format_grouped)),
            ),
        };
        Self {
            kind,
            title,
            issn: Metric::new(dictionary, model::FIELD_ISSN, or_not_available(record.issn())),
            field: Metric::new(
                dictionary,
                model::FIELD_CATEGORIES,
                or_not_available(record.categories().or_else(|| record.discipline())),
            ),
            headline,
            h_index: Metric::new(
                dictionary,
                model::FIELD_H_INDEX,
                or_not_available(record.h_index().map(format_plain)),
            ),
            coverage: Metric::new(
                dictionary,
                model::FIELD_COVERAGE,
                or_not_available(record.text(model::FIELD_COVERAGE)),
            ),
            href: href_for(record),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub sjr: String,
    pub categories: String,
    pub href: String,
}

impl SearchHit {
    pub fn build(record: &JournalRecord) -> Self {
        Self {
            name: or_not_available(record.name()),
            sjr: or_not_available(record.impact_factor().map(format_plain)),
            categories: or_not_available(record.categories().or_else(|| record.discipline())),
            href: href_for(record),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImpactRow {
    pub position: usize,
    pub name: String,
    pub publisher: String,
    pub categories: String,
    pub impact_factor: String,
    pub citations: String,
    pub href: String,
}

pub fn impact_rows(records: &[&JournalRecord]) -> Vec<ImpactRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| ImpactRow {
            position: i + 1,
            name: or_not_available(r.name()),
            publisher: or_not_available(r.publisher()),
            categories: or_not_available(r.categories()),
            impact_factor: or_not_available(r.impact_factor().map(|v| format!("{v:.2}"))),
            citations: or_not_available(r.cited_by_count().map(format_grouped)),
            href: href_for(r),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JournalDetails {
    pub title: String,
    pub favicon: Option<String>,
    pub issn: String,
    pub publisher: String,
    pub sjr: String,
    pub cited_by_count: String,
    pub h_index: String,
    pub best_quartile: String,
    pub publication: Vec<LabeledValue>,
    pub categories: String,
    pub disciplines: String,
    pub additional: Vec<LabeledValue>,
}

impl JournalDetails {
    pub fn build(record: &JournalRecord) -> Self {
        let homepage = record.homepage();
        let text = |key: &str| or_not_available(record.text(key));
        let plain = |key: &str| or_not_available(record.number(key).map(format_plain));
        Self {
            title: or_not_available(record.name()),
            favicon: homepage.as_deref().and_then(detail::favicon_url),
            issn: or_not_available(record.issn()),
            publisher: or_not_available(record.publisher()),
            sjr: or_not_available(record.impact_factor().map(format_grouped)),
            cited_by_count: or_not_available(record.cited_by_count().map(format_grouped)),
            h_index: or_not_available(record.h_index().map(format_plain)),
            best_quartile: text(model::FIELD_BEST_QUARTILE),
            publication: vec![
                LabeledValue {
                    label: "Recent Documents (2024)",
                    value: plain(model::FIELD_RECENT_DOCS),
                },
                LabeledValue {
                    label: "Documents (3 years)",
                    value: plain(model::FIELD_DOCS_3Y),
                },
                LabeledValue {
                    label: "Citations per Document (2 years)",
                    value: plain(model::FIELD_CITES_PER_DOC),
                },
                LabeledValue {
                    label: "References per Document",
                    value: plain(model::FIELD_REFS_PER_DOC),
                },
            ],
            categories: or_not_available(record.categories()),
            disciplines: or_not_available(record.discipline()),
            additional: vec![
                LabeledValue {
                    label: "Country",
                    value: text(model::FIELD_COUNTRY),
                },
                LabeledValue {
                    label: "Region",
                    value: text(model::FIELD_REGION),
                },
                LabeledValue {
                    label: "Coverage Years",
                    value: text(model::FIELD_COVERAGE),
                },
                LabeledValue {
                    label: "Homepage",
                    value: or_not_available(homepage),
                },
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecommendationCard {
    pub name: String,
    pub publisher: String,
    pub discipline: String,
    pub sjr: String,
    pub score: Option<String>,
    pub homepage: String,
}

impl RecommendationCard {
    pub fn build(record: &JournalRecord) -> Self {
        Self {
            name: or_not_available(record.name().or_else(|| record.text(model::FIELD_JOURNAL))),
            publisher: or_not_available(record.publisher()),
            discipline: or_not_available(record.discipline()),
            sjr: or_not_available(record.impact_factor().map(format_plain)),
            score: record.number("score").map(|s| format!("{s:.2}")),
            homepage: or_not_available(record.homepage()),
        }
    }
}

fn href_for(record: &JournalRecord) -> String {
    detail::detail_href(&record.issn().unwrap_or_default())
}
