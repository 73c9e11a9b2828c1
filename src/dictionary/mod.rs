//! Display labels for dataset fields.
//!
//! The dictionary is a CSV resource with a header row followed by
//! `field,full,short` lines. It only feeds the view layer.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldLabel {
    pub full: String,
    pub short: String,
}

#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    labels: HashMap<String, FieldLabel>,
}

impl Dictionary {
    pub fn parse(text: &str) -> Self {
        let mut labels = HashMap::new();
        for line in text.lines().skip(1) {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = crate::utils::split_unquoted_csv(line).into_iter();
            let field = parts.next().unwrap_or_default();
            if field.is_empty() {
                continue;
            }
            let full = parts.next().unwrap_or_default();
            let short = parts.next().unwrap_or_default();
            labels.insert(field, FieldLabel { full, short });
        }
        Self { labels }
    }

    /// Label for `field`, defaulting both forms to the field name.
    pub fn label(&self, field: &str) -> FieldLabel {
        match self.labels.get(field) {
            Some(label) => FieldLabel {
                full: non_empty_or(&label.full, field),
                short: non_empty_or(&label.short, field),
            },
            None => FieldLabel {
                full: field.to_string(),
                short: field.to_string(),
            },
        }
    }

    pub fn short(&self, field: &str) -> String {
        self.label(field).short
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
