//! Console output for a finished render.
//!
//! The table goes to stdout; the diagnostics summary goes to stderr so that
//! piping the table somewhere doesn't mix the two.

use crate::console_format;
use crate::render::RenderOutput;
use crate::types::{Diagnostic, DiagnosticKind};

/// Print the view (respecting the current filter) and then any diagnostics.
pub fn print_render_output(output: &RenderOutput, use_colors: bool) -> std::io::Result<()> {
    console_format::print_view(&output.view, output.filter.as_ref(), use_colors)?;
    print_diagnostics(&output.diagnostics);
    Ok(())
}

/// One line per diagnostic, e.g. `row 3, expirydate: invalid date "someday"`.
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let what = match &diagnostic.kind {
        DiagnosticKind::InvalidDate { raw } => format!("invalid date {:?}", raw),
        DiagnosticKind::NonNumericCurrency { raw } => format!("non-numeric amount {:?}", raw),
        DiagnosticKind::KeyCollision { kept, dropped } => {
            format!("key {:?} collides with {:?}, keeping {:?}", dropped, kept, kept)
        }
    };
    format!("row {}, {}: {}", diagnostic.row + 1, diagnostic.column, what)
}

/// Summary lines for a set of diagnostics; empty when there is nothing to report
pub fn diagnostics_summary(diagnostics: &[Diagnostic]) -> Vec<String> {
    if diagnostics.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("{} diagnostic(s):", diagnostics.len())];
    lines.extend(diagnostics.iter().map(|d| format!("  {}", format_diagnostic(d))));
    lines
}

/// Print a short summary of diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for line in diagnostics_summary(diagnostics) {
        eprintln!("{}", line);
    }
}
