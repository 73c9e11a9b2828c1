use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// canonical field keys (SCImago + OpenAlex merged export)
pub const FIELD_NAME: &str = "OA_Journal Name";
pub const FIELD_TITLE: &str = "SCIMAGO_Title";
pub const FIELD_ISSN: &str = "OA_ISSN-L";
pub const FIELD_SCIMAGO_ISSN: &str = "SCIMAGO_Issn";
pub const FIELD_CATEGORIES: &str = "SCIMAGO_Categories";
pub const FIELD_DISCIPLINE: &str = "OA_Discipline";
pub const FIELD_SJR: &str = "SCIMAGO_SJR";
pub const FIELD_RANK: &str = "SCIMAGO_Rank";
pub const FIELD_CITED_BY: &str = "OA_Cited By Count";
pub const FIELD_RECENT_DOCS: &str = "SCIMAGO_Total Docs. (2024)";
pub const FIELD_DOCS_3Y: &str = "SCIMAGO_Total Docs. (3years)";
pub const FIELD_CITES_PER_DOC: &str = "SCIMAGO_Citations / Doc. (2years)";
pub const FIELD_REFS_PER_DOC: &str = "SCIMAGO_Ref. / Doc.";
pub const FIELD_H_INDEX: &str = "SCIMAGO_H index";
pub const FIELD_BEST_QUARTILE: &str = "SCIMAGO_SJR Best Quartile";
pub const FIELD_COVERAGE: &str = "SCIMAGO_Coverage";
pub const FIELD_PUBLISHER: &str = "OA_Publisher";
pub const FIELD_HOMEPAGE: &str = "OA_Homepage";
pub const FIELD_COUNTRY: &str = "SCIMAGO_Country";
pub const FIELD_REGION: &str = "SCIMAGO_Region";
// the recommender answers with `{journal, score}` records
pub const FIELD_JOURNAL: &str = "journal";

/// A single journal entry: a flat object of field name to scalar value.
///
/// Accessors never fail. A missing key, a `null`, an empty string or a value
/// of the wrong shape all read as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalRecord {
    fields: Map<String, Value>,
}

impl JournalRecord {
    /// Returns `None` for anything that is not a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| is_populated(v))
    }

    pub fn populated_fields(&self) -> usize {
        self.fields.values().filter(|v| is_populated(v)).count()
    }

    /// Text form of a field. Numbers and booleans are stringified.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
            Value::String(s) => crate::utils::parse_lenient_number(s),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<String> {
        self.text(FIELD_NAME).or_else(|| self.text(FIELD_TITLE))
    }

    pub fn issn(&self) -> Option<String> {
        self.text(FIELD_ISSN).or_else(|| self.text(FIELD_SCIMAGO_ISSN))
    }

    pub fn categories(&self) -> Option<String> {
        self.text(FIELD_CATEGORIES)
    }

    pub fn discipline(&self) -> Option<String> {
        self.text(FIELD_DISCIPLINE)
    }

    pub fn impact_factor(&self) -> Option<f64> {
        self.number(FIELD_SJR)
    }

    pub fn rank(&self) -> Option<i64> {
        self.number(FIELD_RANK).map(|r| r.round() as i64)
    }

    pub fn cited_by_count(&self) -> Option<f64> {
        self.number(FIELD_CITED_BY)
    }

    /// Document count in the most recent tracked year.
    pub fn recent_docs(&self) -> Option<f64> {
        self.number(FIELD_RECENT_DOCS)
    }

    pub fn h_index(&self) -> Option<f64> {
        self.number(FIELD_H_INDEX)
    }

    pub fn publisher(&self) -> Option<String> {
        self.text(FIELD_PUBLISHER)
    }

    pub fn homepage(&self) -> Option<String> {
        self.text(FIELD_HOMEPAGE)
    }
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Immutable snapshot of the loaded collection. Clones share the same
/// allocation.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Arc<[JournalRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<JournalRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[JournalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
