// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use record_table::api::{self, FetchedRecords};
use record_table::cli::{CliArgs, Command, ShowArgs, SubmitArgs};
use record_table::form::FormSpec;
use record_table::render::{self, RenderOutput};
use record_table::types::ViewModel;
use record_table::{config, console_format, report, ui};
use std::io::BufRead;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let exit_code = match args.command {
        Command::Show(ref show) => run_show(show),
        Command::Submit(ref submit) => run_submit(submit),
    };

    std::process::exit(exit_code);
}

fn run_show(args: &ShowArgs) -> i32 {
    ui::set_colors(!args.no_color);

    // Set console width override if specified (for testing)
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    let table_config = match config::build_table_config(args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            return 1;
        }
    };

    let fetched = match (&args.url, &args.file) {
        (Some(url), _) => api::fetch_records(url),
        (None, Some(path)) => api::load_records_file(path),
        (None, None) => Err("No record source".to_string()),
    };

    let (mut output, exit_code) = match fetched {
        Ok(FetchedRecords::Records(records)) => (render::render(&records, &table_config), 0),
        Ok(FetchedRecords::NotASequence) => {
            log::warn!("response was not a JSON array, showing empty table");
            (render::render(&[], &table_config), 0)
        }
        Err(e) => {
            log::debug!("fetch failed: {}", e);
            let view = ViewModel::error(&e);
            (RenderOutput { view, diagnostics: Vec::new(), filter: None }, 1)
        }
    };

    if let (Some(query), Some(handle)) = (&args.filter, output.filter.as_mut()) {
        handle.apply(query);
    }

    let use_colors = !args.no_color;
    if args.json {
        match serde_json::to_string_pretty(&report::json_report(&output)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                ui::print_error(&format!("Failed to encode view: {}", e));
                return 1;
            }
        }
    } else if let Err(e) = report::print_render_output(&output, use_colors) {
        ui::print_error(&format!("Failed to write table: {}", e));
        return 1;
    }

    if args.interactive && exit_code == 0 {
        run_interactive(&mut output, use_colors);
    }

    if let Some(ref path) = args.output_json {
        match report::export_json_report(&output, path) {
            Ok(_) => ui::status(&format!("JSON report written to {}", path.display())),
            Err(e) => ui::print_error(&format!("Failed to write {}: {}", path.display(), e)),
        }
    }
    if let Some(ref path) = args.output_md {
        match report::export_markdown_report(&output, path) {
            Ok(_) => ui::status(&format!("Markdown report written to {}", path.display())),
            Err(e) => ui::print_error(&format!("Failed to write {}: {}", path.display(), e)),
        }
    }

    exit_code
}

/// Each stdin line is one filter input event; an empty line clears the filter
fn run_interactive(output: &mut RenderOutput, use_colors: bool) {
    if output.filter.is_none() {
        return;
    }
    ui::status("type to filter, one query per line (Ctrl-D to finish)");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let query = match line {
            Ok(l) => l,
            Err(e) => {
                ui::print_error(&format!("Failed to read input: {}", e));
                break;
            }
        };
        if let Some(handle) = output.filter.as_mut() {
            handle.apply(query.trim());
        }
        if let Err(e) = console_format::print_view(&output.view, output.filter.as_ref(), use_colors) {
            ui::print_error(&format!("Failed to write table: {}", e));
            break;
        }
    }
}

fn run_submit(args: &SubmitArgs) -> i32 {
    let form = match FormSpec::load(&args.form) {
        Ok(f) => f,
        Err(e) => {
            ui::print_error(&e);
            return 1;
        }
    };

    let raw = match args.parsed_fields() {
        Ok(r) => r,
        Err(e) => {
            ui::print_error(&e);
            return 1;
        }
    };

    let body = serde_json::Value::Object(form.map(&raw));

    if args.dry_run {
        println!("POST {}", api::endpoint_url(&args.base_url, &form.endpoint));
        match serde_json::to_string_pretty(&body) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                ui::print_error(&format!("Failed to encode form: {}", e));
                return 1;
            }
        }
        return 0;
    }

    ui::status(&format!("submitting {}", form.display_name()));
    match api::submit_form(&args.base_url, &form.endpoint, &body) {
        Ok(message) => {
            ui::print_success(&message);
            0
        }
        Err(e) => {
            ui::print_error(&format!("Error: {}", e));
            1
        }
    }
}
