//! Report export functions for JSON and Markdown formats.
//!
//! This module handles exporting a rendered table to files for storage
//! and sharing. Both exports honour the render's current filter.

use crate::render::RenderOutput;
use crate::types::ViewModel;
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Build the JSON report: the view model, diagnostics and visible row indices.
pub fn json_report(output: &RenderOutput) -> serde_json::Value {
    let visible: Vec<usize> = match &output.filter {
        Some(filter) => filter.visible_indices(),
        None => (0..output.view.rows().len()).collect(),
    };

    json!({
        "view": output.view,
        "diagnostics": output.diagnostics,
        "filter": output.filter.as_ref().map(|f| f.query()),
        "visible_rows": visible,
    })
}

/// Export the render as pretty-printed JSON.
pub fn export_json_report(output: &RenderOutput, output_path: &Path) -> std::io::Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, &json_report(output))?;
    Ok(())
}

/// Escape text for a Markdown table cell.
fn md_cell(text: &str) -> String {
    text.replace('\\', "\\\\").replace('|', "\\|").replace('\n', " ")
}

/// Build the Markdown report.
///
/// Tables become a pipe table with numeric columns right-aligned; empty and
/// error views become a heading plus their message.
pub fn markdown_report(output: &RenderOutput) -> String {
    let mut md = String::new();

    match &output.view {
        ViewModel::Table(table) => {
            md.push_str(&format!("# {}\n\n", table.title));
            if let Some(ref filter) = output.filter
                && !filter.query().is_empty()
            {
                md.push_str(&format!(
                    "_Filtered by \"{}\": showing {} of {} rows._\n\n",
                    md_cell(filter.query()),
                    filter.visible_count(),
                    filter.row_count()
                ));
            }

            let labels: Vec<String> = table.header.iter().map(|h| md_cell(&h.label)).collect();
            md.push_str(&format!("| {} |\n", labels.join(" | ")));

            // Alignment follows the first row's cell classes
            let aligns: Vec<&str> = (0..table.header.len())
                .map(|i| {
                    let numeric = table
                        .rows
                        .first()
                        .and_then(|r| r.cells.get(i))
                        .is_some_and(|c| c.class.is_some_and(|k| k.is_numeric()));
                    if numeric { "---:" } else { "---" }
                })
                .collect();
            md.push_str(&format!("| {} |\n", aligns.join(" | ")));

            for (i, row) in table.rows.iter().enumerate() {
                if output.filter.as_ref().is_some_and(|f| !f.is_visible(i)) {
                    continue;
                }
                let cells: Vec<String> = row.cells.iter().map(|c| md_cell(&c.text)).collect();
                md.push_str(&format!("| {} |\n", cells.join(" | ")));
            }
        }
        ViewModel::Empty { title, message } => {
            md.push_str(&format!("# {}\n\n{}\n", title, message));
        }
        ViewModel::Error { title, message, details } => {
            md.push_str(&format!("# {}\n\n{}\n\n> Error details: {}\n", title, message, details));
        }
    }

    if !output.diagnostics.is_empty() {
        md.push_str("\n## Diagnostics\n\n");
        for diagnostic in &output.diagnostics {
            md.push_str(&format!("- {}\n", super::table::format_diagnostic(diagnostic)));
        }
    }

    md
}

/// Export the render as a Markdown report.
pub fn export_markdown_report(output: &RenderOutput, output_path: &Path) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;
    write!(file, "{}", markdown_report(output))?;
    Ok(())
}
