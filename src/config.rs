//! Configuration resolution module
//!
//! This module handles:
//! - The `TableConfig` consumed by the renderer, with its defaults
//! - Loading table settings from a TOML file
//! - Layering CLI flags over file settings
//! - Binding named built-in formatters to columns
use crate::cli::ShowArgs;
use crate::columns::SchemaSource;
use crate::format::{Formatter, format_short_date, format_usd, parse_date};
use crate::coerce;
use crate::normalize::NormalizedRecord;
use crate::types::Value;
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_TITLE: &str = "Data Table";
pub const DEFAULT_ADD_BUTTON_TEXT: &str = "Add New";

/// Rendering options for one table
#[derive(Clone)]
pub struct TableConfig {
    /// Heading shown above the table
    pub title: String,
    pub add_button_text: String,
    /// When set, an "add" action control navigating here is rendered
    pub add_button_url: Option<String>,
    /// Enables the free-text filter
    pub show_filters: bool,
    /// Explicit column order; None infers it from the data
    pub column_order: Option<Vec<String>>,
    pub schema: SchemaSource,
    formatters: HashMap<String, Formatter>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            add_button_text: DEFAULT_ADD_BUTTON_TEXT.to_string(),
            add_button_url: None,
            show_filters: false,
            column_order: None,
            schema: SchemaSource::FirstRecord,
            formatters: HashMap::new(),
        }
    }
}

impl fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<&String> = self.formatters.keys().collect();
        bound.sort();
        f.debug_struct("TableConfig")
            .field("title", &self.title)
            .field("add_button_text", &self.add_button_text)
            .field("add_button_url", &self.add_button_url)
            .field("show_filters", &self.show_filters)
            .field("column_order", &self.column_order)
            .field("schema", &self.schema)
            .field("formatters", &bound)
            .finish()
    }
}

impl TableConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn with_column_order<S: AsRef<str>>(mut self, order: &[S]) -> Self {
        self.column_order = Some(order.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    pub fn with_filters(mut self, show: bool) -> Self {
        self.show_filters = show;
        self
    }

    pub fn with_add_button(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.add_button_text = text.into();
        self.add_button_url = Some(url.into());
        self
    }

    pub fn with_schema(mut self, schema: SchemaSource) -> Self {
        self.schema = schema;
        self
    }

    /// Bind a formatting strategy to a column (matched case-insensitively)
    pub fn with_formatter<F>(mut self, column: &str, formatter: F) -> Self
    where
        F: Fn(&Value, &NormalizedRecord) -> String + Send + Sync + 'static,
    {
        self.formatters.insert(column.to_lowercase(), Arc::new(formatter));
        self
    }

    pub fn set_formatter(&mut self, column: &str, formatter: Formatter) {
        self.formatters.insert(column.to_lowercase(), formatter);
    }

    /// Formatters keyed by lower-cased column name
    pub fn formatters(&self) -> &HashMap<String, Formatter> {
        &self.formatters
    }
}

//
// Named formatters usable from config files
//

/// Built-in formatting strategies that can be bound by name in a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedFormatter {
    /// `$1,234.50`; non-numbers pass through
    Currency,
    /// `M/D/YYYY`; unparseable values pass through
    Date,
    /// Upper-cased text
    Uppercase,
    /// Truthy values as `Yes`, falsy as `No`
    YesNo,
}

impl NamedFormatter {
    pub fn into_formatter(self) -> Formatter {
        match self {
            NamedFormatter::Currency => Arc::new(|value: &Value, _: &NormalizedRecord| {
                coerce::float_value(value).map(format_usd).unwrap_or_else(|| value.display_text())
            }),
            NamedFormatter::Date => Arc::new(|value: &Value, _: &NormalizedRecord| {
                parse_date(value).map(|d| format_short_date(&d)).unwrap_or_else(|| value.display_text())
            }),
            NamedFormatter::Uppercase => {
                Arc::new(|value: &Value, _: &NormalizedRecord| value.display_text().to_uppercase())
            }
            NamedFormatter::YesNo => Arc::new(|value: &Value, _: &NormalizedRecord| {
                let truthy = match value {
                    Value::Text(s) => !matches!(s.trim().to_lowercase().as_str(), "" | "0" | "false" | "no"),
                    other => other.is_truthy(),
                };
                (if truthy { "Yes" } else { "No" }).to_string()
            }),
        }
    }
}

//
// Config file
//

/// Table settings as written in a TOML file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableFile {
    pub title: Option<String>,
    #[serde(alias = "addButtonText")]
    pub add_button_text: Option<String>,
    #[serde(alias = "addButtonUrl")]
    pub add_button_url: Option<String>,
    #[serde(alias = "showFilters")]
    pub show_filters: Option<bool>,
    #[serde(alias = "columnOrder")]
    pub column_order: Option<Vec<String>>,
    pub schema: Option<SchemaSource>,
    pub formatters: BTreeMap<String, NamedFormatter>,
}

impl TableFile {
    /// Parse a TOML document
    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid table config: {}", e))
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let text =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::parse(&text).map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// Apply the file's settings on top of a config
    pub fn apply_to(&self, config: &mut TableConfig) {
        if let Some(ref title) = self.title {
            config.title = title.clone();
        }
        if let Some(ref text) = self.add_button_text {
            config.add_button_text = text.clone();
        }
        if let Some(ref url) = self.add_button_url {
            config.add_button_url = Some(url.clone());
        }
        if let Some(show) = self.show_filters {
            config.show_filters = show;
        }
        if let Some(ref order) = self.column_order {
            config.column_order = Some(order.clone());
        }
        if let Some(schema) = self.schema {
            config.schema = schema;
        }
        for (column, named) in &self.formatters {
            config.set_formatter(column, named.into_formatter());
        }
    }
}

/// Default config file location: `<config dir>/record-table/table.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("record-table").join("table.toml"))
}

/// Build a complete TableConfig from CLI arguments
///
/// Layering, lowest to highest: built-in defaults, the config file
/// (`--config`, or the default location when present), then explicit flags.
pub fn build_table_config(args: &ShowArgs) -> Result<TableConfig, String> {
    let mut config = TableConfig::default();

    let file_path = match args.config {
        Some(ref path) => Some(path.clone()),
        None => default_config_path().filter(|p| p.exists()),
    };
    if let Some(path) = file_path {
        debug!("Loading table config from {:?}", path);
        TableFile::load(&path)?.apply_to(&mut config);
    }

    if let Some(ref title) = args.title {
        config.title = title.clone();
    }
    if !args.columns.is_empty() {
        config.column_order = Some(args.columns.clone());
    }
    if let Some(schema) = args.schema {
        config.schema = schema;
    }
    if args.show_filters || args.filter.is_some() || args.interactive {
        config.show_filters = true;
    }
    if let Some(ref text) = args.add_button_text {
        config.add_button_text = text.clone();
    }
    if let Some(ref url) = args.add_button_url {
        config.add_button_url = Some(url.clone());
    }

    debug!("Resolved table config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
