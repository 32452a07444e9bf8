//! Form definitions and form-to-JSON mapping
//!
//! A form is an endpoint plus an ordered list of field mappings. Raw form
//! input is always text; each mapping says how to coerce it and what to send
//! when the input is blank.
//!
//! ```toml
//! endpoint = "/add_product"
//!
//! [[fields]]
//! name = "price"
//! type = "float"
//! default = 0
//! ```

use crate::coerce::{parse_float_prefix_str, parse_int_prefix_str};
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::path::Path;

/// How a raw input string is coerced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Int,
    Float,
}

/// One form field and its JSON mapping
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldMapping {
    /// Name of the field in the form
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Key to send instead of `name`
    #[serde(default)]
    pub target: Option<String>,
    /// Sent when the input is blank; omitted means `null`
    #[serde(default = "null_default")]
    pub default: Json,
}

fn null_default() -> Json {
    Json::Null
}

impl FieldMapping {
    pub fn new(name: &str, field_type: FieldType, default: Json) -> Self {
        Self { name: name.to_string(), field_type, target: None, default }
    }

    /// JSON key this field is sent under
    pub fn output_key(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.name)
    }

    /// Coerce one raw input
    ///
    /// Blank input yields the default. Numeric input that doesn't parse yields
    /// `null`, matching what a browser sends for `NaN`.
    pub fn coerce(&self, raw: &str) -> Json {
        if raw.is_empty() {
            return self.default.clone();
        }
        match self.field_type {
            FieldType::String => Json::String(raw.to_string()),
            FieldType::Int => parse_int_prefix_str(raw).map(Json::from).unwrap_or(Json::Null),
            FieldType::Float => parse_float_prefix_str(raw)
                .and_then(serde_json::Number::from_f64)
                .map(Json::Number)
                .unwrap_or(Json::Null),
        }
    }
}

/// A form definition as stored on disk
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormSpec {
    /// Human-readable name used in status output
    #[serde(default)]
    pub name: Option<String>,
    /// Backend path, e.g. `/add_product`
    pub endpoint: String,
    pub fields: Vec<FieldMapping>,
}

impl FormSpec {
    pub fn parse(text: &str) -> Result<Self, String> {
        let spec: FormSpec = toml::from_str(text).map_err(|e| format!("Invalid form definition: {}", e))?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::parse(&text).map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// Endpoints must be paths and output keys must be unique
    pub fn validate(&self) -> Result<(), String> {
        if !self.endpoint.starts_with('/') {
            return Err(format!("Endpoint '{}' must start with '/'", self.endpoint));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.output_key() == field.output_key()) {
                return Err(format!("Duplicate output field '{}'", field.output_key()));
            }
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.endpoint)
    }

    /// Map raw form input to the JSON object sent to the backend
    pub fn map(&self, raw: &[(String, String)]) -> Map<String, Json> {
        map_form(raw, &self.fields)
    }
}

/// Map raw form input through field mappings
///
/// Fields are emitted in mapping order. Mappings with no matching input are
/// left out entirely; inputs with no mapping are ignored. When the same input
/// name appears twice the last value wins.
pub fn map_form(raw: &[(String, String)], mappings: &[FieldMapping]) -> Map<String, Json> {
    let mut data = Map::new();
    for mapping in mappings {
        let Some((_, value)) = raw.iter().rev().find(|(name, _)| *name == mapping.name) else {
            debug!("form field '{}' not present, skipping", mapping.name);
            continue;
        };
        data.insert(mapping.output_key().to_string(), mapping.coerce(value));
    }
    data
}
