//! Column resolution
//!
//! Decides which columns are shown and in what order. Runs once per render;
//! the result drives both the header and every body row.

use crate::normalize::NormalizedRecord;
use log::debug;
use serde::{Deserialize, Serialize};

/// Where the set of available columns comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaSource {
    /// Keys of the first record only; columns that first appear later are dropped
    #[default]
    FirstRecord,
    /// Keys of every record, in order of first appearance
    Union,
}

/// Ordered list of column keys that are actually rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSpec {
    keys: Vec<String>,
}

impl ColumnSpec {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Collect the available keys according to the schema source
pub fn available_keys(records: &[NormalizedRecord], schema: SchemaSource) -> Vec<String> {
    match schema {
        SchemaSource::FirstRecord => {
            records.first().map(|r| r.keys().map(str::to_string).collect()).unwrap_or_default()
        }
        SchemaSource::Union => {
            let mut keys: Vec<String> = Vec::new();
            for record in records {
                for key in record.keys() {
                    if !keys.iter().any(|k| k == key) {
                        keys.push(key.to_string());
                    }
                }
            }
            keys
        }
    }
}

/// Resolve columns against the first record
pub fn resolve_columns(order: Option<&[String]>, first: &NormalizedRecord) -> ColumnSpec {
    let available: Vec<String> = first.keys().map(str::to_string).collect();
    resolve_against(order, &available)
}

/// Resolve columns against an explicit key set
///
/// A caller-supplied order is lower-cased and filtered to known keys, keeping
/// the caller's order. Without one, the available keys are used as-is.
pub fn resolve_against(order: Option<&[String]>, available: &[String]) -> ColumnSpec {
    let keys = match order {
        Some(order) => {
            let mut keys: Vec<String> = Vec::with_capacity(order.len());
            for requested in order {
                let lower = requested.to_lowercase();
                if !available.contains(&lower) {
                    debug!("column '{}' not present in data, skipping", requested);
                    continue;
                }
                if !keys.contains(&lower) {
                    keys.push(lower);
                }
            }
            keys
        }
        None => available.to_vec(),
    };

    ColumnSpec { keys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_record;
    use crate::types::Record;

    fn normalized(record: Record) -> NormalizedRecord {
        normalize_record(&record, 0, &mut Vec::new())
    }

    fn order(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_caller_order_is_lowercased_and_filtered() {
        let first = normalized(Record::new().with("a", 1i64).with("B", 2i64).with("c", 3i64));
        let order = order(&["B", "a"]);
        let spec = resolve_columns(Some(&order), &first);
        assert_eq!(spec.keys(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_unknown_columns_are_dropped() {
        let first = normalized(Record::new().with("name", "x"));
        let order = order(&["Missing", "NAME"]);
        let spec = resolve_columns(Some(&order), &first);
        assert_eq!(spec.keys(), &["name".to_string()]);
    }

    #[test]
    fn test_inferred_order_follows_first_record() {
        let first = normalized(Record::new().with("ProductID", 1i64).with("Name", "x").with("unitPrice", 1.0));
        let spec = resolve_columns(None, &first);
        assert_eq!(spec.keys(), &order(&["productid", "name", "unitprice"])[..]);
    }

    #[test]
    fn test_duplicate_requests_collapse() {
        let first = normalized(Record::new().with("name", "x"));
        let order = order(&["name", "Name"]);
        assert_eq!(resolve_columns(Some(&order), &first).len(), 1);
    }

    #[test]
    fn test_union_schema_collects_later_keys() {
        let records = vec![
            normalized(Record::new().with("a", 1i64)),
            normalized(Record::new().with("b", 1i64).with("A", 2i64)),
        ];
        assert_eq!(available_keys(&records, SchemaSource::FirstRecord), order(&["a"]));
        assert_eq!(available_keys(&records, SchemaSource::Union), order(&["a", "b"]));
    }
}
