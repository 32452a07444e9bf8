//! Table rendering
//!
//! Orchestrates normalization, column resolution, cell formatting and row
//! classification into a `ViewModel`. Rendering is pure and synchronous: the
//! caller fetches the records, and a failed fetch never reaches this module
//! (the caller shows `ViewModel::error` instead).

use crate::classify::{classify_row, is_low_stock};
use crate::columns::{ColumnSpec, SchemaSource, available_keys, resolve_against, resolve_columns};
use crate::config::TableConfig;
use crate::filter::FilterHandle;
use crate::format::{CellFormatter, header_label};
use crate::normalize::{NormalizedRecord, normalize_records};
use crate::types::{ActionControl, Cell, Diagnostic, FilterInput, HeaderCell, Record, Row, TableView, ViewModel};
use chrono::{DateTime, Utc};
use log::debug;

pub const FILTER_PLACEHOLDER: &str = "Search...";

/// Everything one render call produces
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub view: ViewModel,
    /// Degraded cells and key collisions, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
    /// Present iff filtering is enabled and there is a table to filter
    pub filter: Option<FilterHandle>,
}

impl RenderOutput {
    fn without_table(view: ViewModel) -> Self {
        Self { view, diagnostics: Vec::new(), filter: None }
    }
}

/// Render records against the current time
pub fn render(records: &[Record], config: &TableConfig) -> RenderOutput {
    render_at(records, config, Utc::now())
}

/// Render records, judging expiry dates against `now`
pub fn render_at(records: &[Record], config: &TableConfig, now: DateTime<Utc>) -> RenderOutput {
    if records.is_empty() {
        debug!("no records, rendering empty view for '{}'", config.title);
        return RenderOutput::without_table(ViewModel::empty(&config.title));
    }

    let (normalized, mut diagnostics) = normalize_records(records);
    let order = config.column_order.as_deref();
    let columns = match config.schema {
        SchemaSource::FirstRecord => resolve_columns(order, &normalized[0]),
        SchemaSource::Union => resolve_against(order, &available_keys(&normalized, SchemaSource::Union)),
    };
    debug!("rendering {} records with columns {:?}", normalized.len(), columns.keys());

    let header = build_header(&columns, &normalized);

    let formatter = CellFormatter::new(config.formatters(), now);
    let rows: Vec<Row> = normalized
        .iter()
        .enumerate()
        .map(|(index, record)| build_row(index, record, &columns, &formatter, &mut diagnostics))
        .collect();

    let filter = config.show_filters.then(|| FilterHandle::new(&rows));

    let view = ViewModel::Table(TableView {
        title: format!("{} ({} items)", config.title, records.len()),
        action: config
            .add_button_url
            .as_ref()
            .filter(|url| !url.is_empty())
            .map(|url| ActionControl { label: config.add_button_text.clone(), target: url.clone() }),
        filter: config.show_filters.then(|| FilterInput { placeholder: FILTER_PLACEHOLDER.to_string() }),
        header,
        rows,
    });

    RenderOutput { view, diagnostics, filter }
}

/// Render a decoded JSON document; anything other than an array renders as empty
pub fn render_json(document: &serde_json::Value, config: &TableConfig) -> RenderOutput {
    match crate::types::records_from_json(document) {
        Some(records) => render(&records, config),
        None => {
            debug!("response is not an array, rendering empty view");
            RenderOutput::without_table(ViewModel::empty(&config.title))
        }
    }
}

/// Header labels come from the key as first received
fn build_header(columns: &ColumnSpec, records: &[NormalizedRecord]) -> Vec<HeaderCell> {
    columns
        .keys()
        .iter()
        .map(|key| {
            let original = records
                .iter()
                .find_map(|r| r.field(key))
                .map(|f| f.original_key.as_str())
                .unwrap_or(key.as_str());
            HeaderCell { label: header_label(key, original), key: key.clone() }
        })
        .collect()
}

fn build_row(
    index: usize,
    record: &NormalizedRecord,
    columns: &ColumnSpec,
    formatter: &CellFormatter,
    diagnostics: &mut Vec<Diagnostic>,
) -> Row {
    let cells = columns
        .keys()
        .iter()
        .map(|key| match record.get(key) {
            Some(value) => {
                let formatted = formatter.format(key, value, record);
                if let Some(kind) = formatted.degraded {
                    diagnostics.push(Diagnostic { row: index, column: key.clone(), kind });
                }
                Cell { text: formatted.text, class: formatted.class }
            }
            // Keeps the row aligned with the header when a record lacks a column
            None => Cell::plain(""),
        })
        .collect();

    Row { cells, low_stock: is_low_stock(record), class: classify_row(record) }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
