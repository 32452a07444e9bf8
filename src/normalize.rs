//! Record normalization
//!
//! Lower-cases every field name so columns can be matched case-insensitively,
//! while remembering the key as it was received for header labels.

use crate::types::{Diagnostic, DiagnosticKind, Record, Value};
use log::warn;
use std::collections::HashMap;

/// A field after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedField {
    pub key: String,
    pub original_key: String,
    pub value: Value,
}

/// A record whose keys are all lower-case
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    fields: Vec<NormalizedField>,
    index: HashMap<String, usize>,
}

impl NormalizedRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.field(key).map(|f| &f.value)
    }

    pub fn field(&self, key: &str) -> Option<&NormalizedField> {
        self.index.get(key).map(|&i| &self.fields[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in enumeration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn fields(&self) -> &[NormalizedField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Normalize a single record
///
/// Colliding keys (`Price` and `price`) keep the position of the first
/// occurrence and the value of the last; each collision is reported.
pub fn normalize_record(record: &Record, row: usize, diagnostics: &mut Vec<Diagnostic>) -> NormalizedRecord {
    let mut normalized = NormalizedRecord::default();

    for (key, value) in record.fields() {
        let lower = key.to_lowercase();
        if let Some(&existing) = normalized.index.get(&lower) {
            let field = &mut normalized.fields[existing];
            warn!("row {}: field '{}' overrides '{}' (both normalize to '{}')", row, key, field.original_key, lower);
            diagnostics.push(Diagnostic {
                row,
                column: lower.clone(),
                kind: DiagnosticKind::KeyCollision { kept: key.clone(), dropped: field.original_key.clone() },
            });
            field.original_key = key.clone();
            field.value = value.clone();
        } else {
            normalized.index.insert(lower.clone(), normalized.fields.len());
            normalized.fields.push(NormalizedField { key: lower, original_key: key.clone(), value: value.clone() });
        }
    }

    normalized
}

/// Normalize every record, returning diagnostics for any key collisions
pub fn normalize_records(records: &[Record]) -> (Vec<NormalizedRecord>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let normalized = records.iter().enumerate().map(|(i, r)| normalize_record(r, i, &mut diagnostics)).collect();
    (normalized, diagnostics)
}

/// Rebuild a plain record from a normalized one (lower-case keys)
impl From<&NormalizedRecord> for Record {
    fn from(normalized: &NormalizedRecord) -> Self {
        normalized.fields.iter().fold(Record::new(), |r, f| r.with(f.key.clone(), f.value.clone()))
    }
}
