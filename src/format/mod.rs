//! Cell formatting
//!
//! Turns a raw field value into display text plus an optional visual tag. The
//! rules form an ordered chain and the first match wins:
//!
//! 1. a caller-bound formatter for the column (text used verbatim, no tag)
//! 2. currency, for columns named like `price` or `cost`
//! 3. calendar date, for columns named like `date` or `time` holding a truthy value
//! 4. numeric pass-through
//! 5. plain pass-through
//!
//! Rules 2-5 are the built-in strategy table below.
//!
//! # Module Organization
//!
//! - `currency` - USD rendering with digit grouping
//! - `date` - lenient date parsing and short-date rendering
//! - `label` - header labels

mod currency;
mod date;
mod label;

pub use currency::format_usd;
pub use date::{format_short_date, parse_date, parse_date_str};
pub use label::header_label;

use crate::coerce;
use crate::normalize::NormalizedRecord;
use crate::types::{CellClass, DiagnosticKind, Value};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Caller-bound formatting strategy for one column: `(value, row) -> display text`
pub type Formatter = Arc<dyn Fn(&Value, &NormalizedRecord) -> String + Send + Sync>;

/// Column name fragments that select currency formatting
pub const CURRENCY_PATTERNS: &[&str] = &["price", "cost"];

/// Column name fragments that select date formatting
pub const DATE_PATTERNS: &[&str] = &["date", "time"];

/// Column name fragment marking dates that expire
pub const EXPIRY_PATTERN: &str = "expiry";

/// Result of formatting one cell
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedCell {
    pub text: String,
    pub class: Option<CellClass>,
    /// Set when the value couldn't be read the way its column suggests
    pub degraded: Option<DiagnosticKind>,
}

impl FormattedCell {
    fn new(text: String, class: Option<CellClass>) -> Self {
        Self { text, class, degraded: None }
    }

    fn pass_through(value: &Value) -> Self {
        Self::new(value.display_text(), None)
    }
}

/// Everything a strategy may look at
pub struct CellInput<'a> {
    pub column: &'a str,
    pub value: &'a Value,
    pub row: &'a NormalizedRecord,
    pub now: DateTime<Utc>,
}

/// A built-in formatting rule
trait FormatStrategy: Sync {
    fn name(&self) -> &'static str;
    fn applies(&self, input: &CellInput) -> bool;
    fn format(&self, input: &CellInput) -> FormattedCell;
}

fn column_matches(column: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| column.contains(p))
}

struct CurrencyStrategy;

impl FormatStrategy for CurrencyStrategy {
    fn name(&self) -> &'static str {
        "currency"
    }

    fn applies(&self, input: &CellInput) -> bool {
        column_matches(input.column, CURRENCY_PATTERNS)
    }

    fn format(&self, input: &CellInput) -> FormattedCell {
        match coerce::float_value(input.value) {
            Some(amount) => FormattedCell::new(format_usd(amount), Some(CellClass::Price)),
            None => {
                let raw = input.value.display_text();
                debug!("non-numeric value {:?} in currency column '{}'", raw, input.column);
                FormattedCell {
                    text: raw.clone(),
                    class: Some(CellClass::Price),
                    degraded: Some(DiagnosticKind::NonNumericCurrency { raw }),
                }
            }
        }
    }
}

struct DateStrategy;

impl FormatStrategy for DateStrategy {
    fn name(&self) -> &'static str {
        "date"
    }

    fn applies(&self, input: &CellInput) -> bool {
        column_matches(input.column, DATE_PATTERNS) && input.value.is_truthy()
    }

    fn format(&self, input: &CellInput) -> FormattedCell {
        match parse_date(input.value) {
            Some(date) => {
                let expired = input.column.contains(EXPIRY_PATTERN) && date < input.now;
                FormattedCell::new(format_short_date(&date), expired.then_some(CellClass::Expired))
            }
            None => {
                let raw = input.value.display_text();
                debug!("could not parse date {:?} in column '{}'", raw, input.column);
                FormattedCell {
                    text: raw.clone(),
                    class: None,
                    degraded: Some(DiagnosticKind::InvalidDate { raw }),
                }
            }
        }
    }
}

struct NumericStrategy;

impl FormatStrategy for NumericStrategy {
    fn name(&self) -> &'static str {
        "number"
    }

    fn applies(&self, input: &CellInput) -> bool {
        coerce::is_numeric(input.value)
    }

    fn format(&self, input: &CellInput) -> FormattedCell {
        FormattedCell::new(input.value.display_text(), Some(CellClass::Number))
    }
}

struct PassThroughStrategy;

impl FormatStrategy for PassThroughStrategy {
    fn name(&self) -> &'static str {
        "text"
    }

    fn applies(&self, _input: &CellInput) -> bool {
        true
    }

    fn format(&self, input: &CellInput) -> FormattedCell {
        FormattedCell::pass_through(input.value)
    }
}

/// Built-in rules in precedence order; the last one always applies
static BUILTIN_STRATEGIES: [&dyn FormatStrategy; 4] =
    [&CurrencyStrategy, &DateStrategy, &NumericStrategy, &PassThroughStrategy];

/// Formats cells for one render call
pub struct CellFormatter<'a> {
    overrides: &'a HashMap<String, Formatter>,
    now: DateTime<Utc>,
}

impl<'a> CellFormatter<'a> {
    /// `now` is the instant expiry dates are compared against
    pub fn new(overrides: &'a HashMap<String, Formatter>, now: DateTime<Utc>) -> Self {
        Self { overrides, now }
    }

    /// Format a value for a (normalized) column
    pub fn format(&self, column: &str, value: &Value, row: &NormalizedRecord) -> FormattedCell {
        if let Some(formatter) = self.overrides.get(column) {
            return FormattedCell::new(formatter(value, row), None);
        }

        let input = CellInput { column, value, row, now: self.now };
        for strategy in BUILTIN_STRATEGIES.iter() {
            if strategy.applies(&input) {
                return strategy.format(&input);
            }
        }
        FormattedCell::pass_through(value)
    }

    /// Name of the rule that would handle this cell
    pub fn strategy_name(&self, column: &str, value: &Value, row: &NormalizedRecord) -> &'static str {
        if self.overrides.contains_key(column) {
            return "override";
        }
        let input = CellInput { column, value, row, now: self.now };
        BUILTIN_STRATEGIES.iter().find(|s| s.applies(&input)).map(|s| s.name()).unwrap_or("text")
    }
}
