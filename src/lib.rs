// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Render JSON record collections as data tables.
//!
//! The pipeline is: records are normalized (keys lower-cased), columns are
//! resolved, each cell is formatted by the first matching strategy, rows are
//! classified, and the result is a [`types::ViewModel`] that a writer draws.
//!
//! ```no_run
//! use record_table::config::TableConfig;
//! use record_table::render::render_json;
//!
//! let doc = serde_json::json!([{"productID": 1, "unitPrice": 9.5}]);
//! let output = render_json(&doc, &TableConfig::new("Products"));
//! assert_eq!(output.view.title(), "Products (1 items)");
//! ```

pub mod api;
pub mod classify;
pub mod cli;
pub mod coerce;
pub mod columns;
pub mod config;
pub mod console_format;
pub mod filter;
pub mod form;
pub mod format;
pub mod normalize;
pub mod render;
pub mod report;
pub mod types;
pub mod ui;
