//! Console formatting module - Pure rendering concerns
//!
//! This module handles all console output formatting including:
//! - Table layout and borders
//! - Color terminal output
//! - Text truncation and padding
//!
//! It accepts a finished view model from the renderer and draws it.
//!
//! ## Output Flexibility
//!
//! `TableWriter` writes to any `std::io::Write` destination, so the same code
//! draws to stdout (optionally colored) and into plain-text buffers for tests
//! and Markdown export.

use crate::filter::FilterHandle;
use crate::types::{Cell, CellClass, HeaderCell, Row, TableView, ViewModel};
use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Row color for low-stock rows
pub const LOW_STOCK_COLOR: Color = term::color::BRIGHT_YELLOW;
/// Cell color for expired dates
pub const EXPIRED_COLOR: Color = term::color::BRIGHT_RED;
/// Color for the error view title
pub const ERROR_COLOR: Color = term::color::RED;

/// Narrowest a column is squeezed to when the terminal is too small
const MIN_COLUMN_WIDTH: usize = 5;

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
    width: usize,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer sized to the console
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors, width: console_width() }
    }

    /// Create a writer with an explicit total width
    pub fn with_width(writer: W, use_colors: bool, width: usize) -> Self {
        Self { writer, use_colors, width }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text, optionally wrapped in an ANSI color
    fn write_colored(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(c) if self.use_colors => write!(self.writer, "\x1b[{}m{}\x1b[0m", ansi_code(c), text),
            _ => write!(self.writer, "{}", text),
        }
    }

    /// Write any view model
    pub fn write_view(&mut self, view: &ViewModel, filter: Option<&FilterHandle>) -> io::Result<()> {
        match view {
            ViewModel::Table(table) => self.write_table(table, filter),
            ViewModel::Empty { title, message } => self.write_notice(title, &[message.as_str()], None),
            ViewModel::Error { title, message, details } => {
                let details = format!("Error details: {}", details);
                self.write_notice(title, &[message.as_str(), details.as_str()], Some(ERROR_COLOR))
            }
        }
    }

    /// Write a titled box holding a few lines of text (empty and error views)
    pub fn write_notice(&mut self, title: &str, lines: &[&str], title_color: Option<Color>) -> io::Result<()> {
        let content_width = lines
            .iter()
            .map(|l| display_width(l))
            .chain(std::iter::once(display_width(title)))
            .max()
            .unwrap_or(0)
            .min(self.width.saturating_sub(4));

        writeln!(self.writer, "┌{:─<w$}┐", "", w = content_width + 2)?;
        write!(self.writer, "│ ")?;
        self.write_colored(&truncate_with_padding(title, content_width), title_color)?;
        writeln!(self.writer, " │")?;
        writeln!(self.writer, "├{:─<w$}┤", "", w = content_width + 2)?;
        for line in lines {
            writeln!(self.writer, "│ {} │", center(&truncate_with_padding(line.trim_end(), content_width), content_width))?;
        }
        writeln!(self.writer, "└{:─<w$}┘", "", w = content_width + 2)
    }

    /// Write a data table: title, action and filter lines, then the bordered grid
    pub fn write_table(&mut self, table: &TableView, filter: Option<&FilterHandle>) -> io::Result<()> {
        writeln!(self.writer, "{}", table.title)?;
        if let Some(ref action) = table.action {
            writeln!(self.writer, "[ {} ] -> {}", action.label, action.target)?;
        }
        if let Some(ref input) = table.filter {
            match filter {
                Some(handle) if !handle.query().is_empty() => writeln!(
                    self.writer,
                    "{} \"{}\" (showing {} of {})",
                    input.placeholder,
                    handle.query(),
                    handle.visible_count(),
                    handle.row_count()
                )?,
                _ => writeln!(self.writer, "{}", input.placeholder)?,
            }
        }

        let widths = fit_column_widths(&table.header, &table.rows, self.width);

        self.write_border('┌', '┬', '┐', &widths)?;
        let labels: Vec<Cell> = table.header.iter().map(|h| Cell::plain(h.label.clone())).collect();
        self.write_cells(&labels, &widths, None, true)?;
        self.write_border('├', '┼', '┤', &widths)?;

        for (i, row) in table.rows.iter().enumerate() {
            if filter.is_some_and(|f| !f.is_visible(i)) {
                continue;
            }
            self.write_row(row, &widths)?;
        }

        self.write_border('└', '┴', '┘', &widths)
    }

    /// Write one body row with its row and cell colors
    pub fn write_row(&mut self, row: &Row, widths: &[usize]) -> io::Result<()> {
        let row_color = row.low_stock.then_some(LOW_STOCK_COLOR);
        self.write_cells(&row.cells, widths, row_color, false)
    }

    fn write_cells(&mut self, cells: &[Cell], widths: &[usize], row_color: Option<Color>, header: bool) -> io::Result<()> {
        write!(self.writer, "│")?;
        for (cell, width) in cells.iter().zip(widths) {
            let text = if header {
                center(&truncate_with_padding(&cell.text, *width), *width)
            } else if cell.class.is_some_and(|c| c.is_numeric()) {
                pad_left(&cell.text, *width)
            } else {
                truncate_with_padding(&cell.text, *width)
            };
            let color = if cell.class == Some(CellClass::Expired) { Some(EXPIRED_COLOR) } else { row_color };
            write!(self.writer, " ")?;
            self.write_colored(&text, color)?;
            write!(self.writer, " │")?;
        }
        writeln!(self.writer)
    }

    fn write_border(&mut self, left: char, mid: char, right: char, widths: &[usize]) -> io::Result<()> {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        writeln!(self.writer, "{}{}{}", left, segments.join(&mid.to_string()), right)
    }
}

/// Map a terminal color to its ANSI SGR foreground code
fn ansi_code(color: Color) -> u32 {
    if color < 8 { 30 + color } else { 90 + (color - 8) }
}

//
// Table Layout and Widths
//

/// Column widths that fit the content, shrunk to fit the console if needed
///
/// Each column gets one space of padding either side plus one border, so a
/// table with widths `w` occupies `sum(w) + 3 * w.len() + 1` characters.
pub fn fit_column_widths(header: &[HeaderCell], rows: &[Row], total_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| display_width(&h.label).max(1)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(display_width(&cell.text));
        }
    }

    let overhead = 3 * widths.len() + 1;
    let available = total_width.saturating_sub(overhead);
    while widths.iter().sum::<usize>() > available {
        let Some(widest) = widths.iter_mut().max() else { break };
        if *widest <= MIN_COLUMN_WIDTH {
            break;
        }
        *widest -= 1;
    }

    widths
}

/// Get terminal width or default to 120
fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        120 // Default width
    }
}

static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Override the console width (first call wins)
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width);
}

/// Console width, detected on first use unless overridden
pub fn console_width() -> usize {
    *CONSOLE_WIDTH.get_or_init(get_terminal_width)
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

/// Right-align within width, truncating like `truncate_with_padding` when too long
pub fn pad_left(s: &str, width: usize) -> String {
    let display_w = display_width(s);
    if display_w > width {
        truncate_with_padding(s, width)
    } else {
        format!("{}{}", " ".repeat(width - display_w), s)
    }
}

/// Center already-padded text by moving trailing spaces to the front
fn center(padded: &str, width: usize) -> String {
    let content = padded.trim_end();
    let slack = width.saturating_sub(display_width(content));
    let left = slack / 2;
    format!("{}{}{}", " ".repeat(left), content, " ".repeat(slack - left))
}

//
// Stdout helpers
//

/// Print a view model to stdout
pub fn print_view(view: &ViewModel, filter: Option<&FilterHandle>, use_colors: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut writer = TableWriter::new(stdout.lock(), use_colors);
    writer.write_view(view, filter)
}

/// Render a view model to a plain string at a fixed width
pub fn format_view(view: &ViewModel, filter: Option<&FilterHandle>, width: usize) -> String {
    let mut writer = TableWriter::with_width(Vec::new(), false, width);
    // Writing to a Vec cannot fail
    let _ = writer.write_view(view, filter);
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
