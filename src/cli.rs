use crate::columns::SchemaSource;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser, Debug, Clone)]
#[command(name = "record-table")]
#[command(about = "Render backend record collections as tables and submit forms to the backend")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch a record collection and render it as a table
    Show(ShowArgs),
    /// Map form fields to JSON and POST them to the backend
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    /// Endpoint returning a JSON array of records
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Local JSON file holding an array of records
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Table config file (TOML)
    /// Default: <config dir>/record-table/table.toml when it exists
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Heading shown above the table
    #[arg(long)]
    pub title: Option<String>,

    /// Columns to show, in order (case-insensitive; unknown columns are skipped)
    /// Examples: --columns productID,name,unitPrice
    #[arg(long, value_name = "COLUMN", value_delimiter = ',', num_args = 1..)]
    pub columns: Vec<String>,

    /// Where the available columns come from
    #[arg(long, value_enum)]
    pub schema: Option<SchemaSource>,

    /// Enable the free-text filter
    #[arg(long)]
    pub show_filters: bool,

    /// Label of the "add" action control
    #[arg(long)]
    pub add_button_text: Option<String>,

    /// Navigation target of the "add" action control (enables it)
    #[arg(long, value_name = "URL")]
    pub add_button_url: Option<String>,

    /// Only show rows whose text contains this (case-insensitive)
    #[arg(long, value_name = "QUERY")]
    pub filter: Option<String>,

    /// Read filter queries from stdin, one per line, re-rendering after each
    #[arg(long)]
    pub interactive: bool,

    /// Print the view model as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Also write the view model as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub output_json: Option<PathBuf>,

    /// Also write a Markdown report to this path
    #[arg(long, value_name = "PATH")]
    pub output_md: Option<PathBuf>,

    /// Override console width (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Form definition (TOML): endpoint plus field mappings
    #[arg(long, value_name = "PATH")]
    pub form: PathBuf,

    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Raw form input as name=value; repeat for each field
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Print the JSON body instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Show(show) => show.validate(),
            Command::Submit(submit) => submit.parsed_fields().map(|_| ()),
        }
    }
}

impl ShowArgs {
    pub fn validate(&self) -> Result<(), String> {
        match (&self.url, &self.file) {
            (Some(_), Some(_)) => return Err("Cannot specify both --url and --file".to_string()),
            (None, None) => return Err("Must specify a record source: --url <URL> or --file <PATH>".to_string()),
            _ => {}
        }

        if self.json && self.interactive {
            return Err("Cannot specify both --json and --interactive".to_string());
        }

        if let Some(width) = self.console_width
            && width < 20
        {
            return Err(format!("Console width {} is too narrow (minimum 20)", width));
        }

        Ok(())
    }
}

impl SubmitArgs {
    /// Split `name=value` pairs, keeping their order
    pub fn parsed_fields(&self) -> Result<Vec<(String, String)>, String> {
        self.fields
            .iter()
            .map(|pair| {
                pair.split_once('=')
                    .filter(|(name, _)| !name.trim().is_empty())
                    .map(|(name, value)| (name.trim().to_string(), value.to_string()))
                    .ok_or_else(|| format!("Invalid --field '{}': expected NAME=VALUE", pair))
            })
            .collect()
    }
}
