//! Core data structures for records and rendered tables
//!
//! This module defines the primary data structures used throughout record-table
//! for representing input records, the rendered view model handed to output
//! writers, and the diagnostics collected while rendering.

use serde::{Deserialize, Serialize};

/// A single scalar field value as received from the backend
///
/// Built from decoded JSON with [`Value::from_json`]; it is never serialized itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Convert a decoded JSON value; nested arrays and objects keep their compact JSON text
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or_else(|| Value::Text(n.to_string())),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }

    /// Truthiness as a browser script would judge it
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// String coercion used for pass-through display
    pub fn display_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// One flat input record, field names case-preserved and in received order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder-style field append
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Convert a decoded JSON element. Anything other than an object has no fields.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let fields = match value {
            serde_json::Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), Value::from_json(v))).collect(),
            _ => Vec::new(),
        };
        Self { fields }
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Convert a decoded JSON document into records
///
/// Returns None when the document is not an array; callers treat that the same
/// as an empty collection.
pub fn records_from_json(value: &serde_json::Value) -> Option<Vec<Record>> {
    value.as_array().map(|items| items.iter().map(Record::from_json).collect())
}

//
// View model
//

/// Visual tag attached to a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellClass {
    #[serde(rename = "price-column")]
    Price,
    #[serde(rename = "number-column")]
    Number,
    #[serde(rename = "expired")]
    Expired,
}

impl CellClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellClass::Price => "price-column",
            CellClass::Number => "number-column",
            CellClass::Expired => "expired",
        }
    }

    /// Right-align numeric content in console output
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellClass::Price | CellClass::Number)
    }
}

/// Visual state derived for a whole row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowClass {
    #[serde(rename = "low-stock")]
    LowStock,
}

impl RowClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowClass::LowStock => "low-stock",
        }
    }
}

/// A header cell: display label plus the normalized column key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub label: String,
    pub key: String,
}

/// A rendered body cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub class: Option<CellClass>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), class: None }
    }
}

/// A rendered body row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub low_stock: bool,
    pub class: Option<RowClass>,
}

impl Row {
    /// Concatenated cell text, the way a browser reports a row's textContent
    pub fn text_content(&self) -> String {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Button that navigates somewhere when pressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionControl {
    pub label: String,
    pub target: String,
}

/// Free-text search box shown above the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterInput {
    pub placeholder: String,
}

/// A fully rendered data table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub title: String,
    pub action: Option<ActionControl>,
    pub filter: Option<FilterInput>,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Row>,
}

/// Output handed to whatever mounts the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
    Table(TableView),
    Empty { title: String, message: String },
    Error { title: String, message: String, details: String },
}

pub const EMPTY_MESSAGE: &str = "No data available";
pub const ERROR_TITLE: &str = "Error Loading Data";
pub const ERROR_MESSAGE: &str = "Failed to load data. Please try again later.";

impl ViewModel {
    /// Empty-state view for a valid but empty collection
    pub fn empty(title: &str) -> Self {
        ViewModel::Empty { title: title.to_string(), message: EMPTY_MESSAGE.to_string() }
    }

    /// Error view for a failed fetch or decode
    pub fn error(details: &str) -> Self {
        ViewModel::Error {
            title: ERROR_TITLE.to_string(),
            message: ERROR_MESSAGE.to_string(),
            details: details.to_string(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        match self {
            ViewModel::Table(t) => &t.rows,
            _ => &[],
        }
    }

    pub fn header(&self) -> &[HeaderCell] {
        match self {
            ViewModel::Table(t) => &t.header,
            _ => &[],
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ViewModel::Table(t) => &t.title,
            ViewModel::Empty { title, .. } | ViewModel::Error { title, .. } => title,
        }
    }
}

//
// Diagnostics
//

/// What went wrong with a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Date-like column held something that isn't a date
    InvalidDate { raw: String },
    /// Price-like column held something that isn't a number
    NonNumericCurrency { raw: String },
    /// Two original keys lower-cased to the same column; the last one won
    KeyCollision { kept: String, dropped: String },
}

/// A degraded-but-recovered condition observed while rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub row: usize,
    pub column: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}
