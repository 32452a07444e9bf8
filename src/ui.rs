/// Status lines printed around a render or a form submission
///
/// Every line starts with a prefix naming its kind (`record-table`, `ok`,
/// `error`). The prefix is colored when stdout is a terminal and colors are
/// enabled; the message itself is always plain. Continuation lines of a
/// multi-line message are indented under the prefix.

use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(true);

lazy_static! {
    static ref OUTPUT_LOCK: Mutex<()> = Mutex::new(());
}

/// Kind of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Status,
    Success,
    Error,
}

impl Level {
    pub fn prefix(&self) -> &'static str {
        match self {
            Level::Status => "record-table",
            Level::Success => "ok",
            Level::Error => "error",
        }
    }

    fn color(&self) -> Option<term::color::Color> {
        match self {
            Level::Status => None,
            Level::Success => Some(term::color::BRIGHT_GREEN),
            Level::Error => Some(term::color::BRIGHT_RED),
        }
    }

    // Errors stand apart from the table output around them
    fn padded(&self) -> bool {
        matches!(self, Level::Error)
    }
}

/// Turn prefix coloring on or off for the rest of the process (`--no-color`)
pub fn set_colors(enabled: bool) {
    COLORS.store(enabled, Ordering::Relaxed);
}

/// The body of a status line after its prefix, with continuation lines indented
pub fn message_body(level: Level, msg: &str) -> String {
    let indent = " ".repeat(level.prefix().len() + 2);
    let mut lines = msg.lines();
    let mut body = lines.next().unwrap_or_default().to_string();
    for line in lines {
        body.push('\n');
        body.push_str(&indent);
        body.push_str(line);
    }
    body
}

/// A complete uncolored status line
pub fn plain_line(level: Level, msg: &str) -> String {
    format!("{}: {}", level.prefix(), message_body(level, msg))
}

/// Write the prefix in color; false if the terminal can't do it
fn write_colored_prefix(level: Level) -> bool {
    let Some(color) = level.color() else {
        return false;
    };
    let Some(mut t) = term::stdout() else {
        return false;
    };
    if t.fg(color).is_err() {
        return false;
    }
    let _ = t.attr(term::Attr::Bold);
    let written = write!(t, "{}", level.prefix()).is_ok();
    let _ = t.reset();
    written
}

/// Print one status line to stdout without interleaving with other threads
pub fn emit(level: Level, msg: &str) {
    let _guard = OUTPUT_LOCK.lock();
    if level.padded() {
        println!();
    }
    if COLORS.load(Ordering::Relaxed) && write_colored_prefix(level) {
        println!(": {}", message_body(level, msg));
    } else {
        println!("{}", plain_line(level, msg));
    }
    if level.padded() {
        println!();
    }
}

pub fn status(msg: &str) {
    emit(Level::Status, msg);
}

pub fn print_success(msg: &str) {
    emit(Level::Success, msg);
}

pub fn print_error(msg: &str) {
    emit(Level::Error, msg);
}
