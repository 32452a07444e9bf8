//! Free-text row filtering
//!
//! A `FilterHandle` belongs to exactly one render. It snapshots each rendered
//! row's text and recomputes visibility on every query, without touching the
//! rows themselves. Dropping the handle is all the cleanup there is.

use crate::types::Row;
use log::debug;

#[derive(Debug, Clone)]
pub struct FilterHandle {
    /// Lower-cased concatenated cell text, one entry per row
    haystacks: Vec<String>,
    visible: Vec<bool>,
    query: String,
}

impl FilterHandle {
    /// Snapshot the rendered rows; everything starts visible
    pub fn new(rows: &[Row]) -> Self {
        Self {
            haystacks: rows.iter().map(|r| r.text_content().to_lowercase()).collect(),
            visible: vec![true; rows.len()],
            query: String::new(),
        }
    }

    /// Handle one input event: rescan every row against the query
    pub fn apply(&mut self, query: &str) -> &[bool] {
        let needle = query.to_lowercase();
        for (visible, haystack) in self.visible.iter_mut().zip(&self.haystacks) {
            *visible = haystack.contains(&needle);
        }
        self.query = query.to_string();
        debug!("filter {:?}: {} of {} rows visible", query, self.visible_count(), self.visible.len());
        &self.visible
    }

    /// Current query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Per-row visibility, in row order
    pub fn visibility(&self) -> &[bool] {
        &self.visible
    }

    pub fn is_visible(&self, row: usize) -> bool {
        self.visible.get(row).copied().unwrap_or(false)
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        self.visible.iter().enumerate().filter(|(_, v)| **v).map(|(i, _)| i).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    pub fn row_count(&self) -> usize {
        self.visible.len()
    }
}
