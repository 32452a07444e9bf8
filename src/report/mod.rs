//! Report generation module - everything that happens after a render.
//!
//! This module handles:
//! - Printing the rendered view and a diagnostics summary to the console
//! - Export to JSON and Markdown formats
//!
//! Drawing the table itself is handled by the console_format module.
//!
//! # Module Organization
//!
//! - `table` - Console output of views and diagnostics
//! - `export` - JSON and Markdown export

mod export;
mod table;

// Re-export export functions
pub use export::{export_json_report, export_markdown_report, json_report, markdown_report};

// Re-export table functions
pub use table::{diagnostics_summary, format_diagnostic, print_diagnostics, print_render_output};
