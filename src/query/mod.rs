use std::cmp::Ordering;

use feruca::Collator;

use crate::model::JournalRecord;

pub const DEFAULT_LIMIT: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    Impact,
    Name,
    Recent,
    #[default]
    None,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "impact" => Some(Self::Impact),
            "name" => Some(Self::Name),
            "recent" => Some(Self::Recent),
            "none" | "" => Some(Self::None),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Impact => "impact",
            Self::Name => "name",
            Self::Recent => "recent",
            Self::None => "none",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub category: String,
    pub sort: SortKey,
    pub limit: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            sort: SortKey::None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Query {
    pub fn run<'a>(&self, records: &'a [JournalRecord]) -> Vec<&'a JournalRecord> {
        let needle = self.search.to_lowercase();
        let category = self.category.as_str();

        let mut hits: Vec<&JournalRecord> = records
            .iter()
            .filter(|r| matches_search(r, &needle) && matches_category(r, category))
            .collect();

        // sort_by is stable, so equal keys keep dataset order
        match self.sort {
            SortKey::Impact => hits.sort_by(|a, b| descending(a.impact_factor(), b.impact_factor())),
            SortKey::Name => {
                let mut collator = Collator::default();
                hits.sort_by(|a, b| compare_names(&mut collator, a, b));
            }
            SortKey::Recent => hits.sort_by(|a, b| descending(a.recent_docs(), b.recent_docs())),
            SortKey::None => {}
        }

        hits.truncate(self.limit);
        hits
    }
}

/// Search, filter and sort `records`, keeping the first twenty hits.
pub fn query<'a>(
    records: &'a [JournalRecord],
    search_term: &str,
    category_filter: &str,
    sort_key: SortKey,
) -> Vec<&'a JournalRecord> {
    Query {
        search: search_term.to_string(),
        category: category_filter.to_string(),
        sort: sort_key,
        limit: DEFAULT_LIMIT,
    }
    .run(records)
}

fn matches_search(record: &JournalRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [record.name(), record.issn(), record.categories()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_category(record: &JournalRecord, category: &str) -> bool {
    if category.is_empty() {
        return true;
    }
    record
        .categories()
        .map(|c| c.contains(category))
        .unwrap_or(false)
}

pub(crate) fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0).total_cmp(&a.unwrap_or(0.0))
}

/// Unicode collation (CLDR root order): accents and case are secondary to
/// the base letters, lowercase sorts before uppercase.
fn compare_names(collator: &mut Collator, a: &JournalRecord, b: &JournalRecord) -> Ordering {
    let a = a.name().unwrap_or_default();
    let b = b.name().unwrap_or_default();
    collator.collate(a.as_str(), b.as_str())
}
