/// Offline integration tests for record-table
///
/// These run the built binary against local JSON fixtures and form
/// definitions, so no backend needs to be running.
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Helper to get the test fixtures directory
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-fixtures")
}

fn forms_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("forms")
}

// Helper to run the binary with an isolated config directory
fn run(args: &[&str]) -> Output {
    let config_home = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_record-table"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run record-table {}: {}", args.join(" "), e))
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

// Helper to run `show --json` and decode stdout
fn show_json(extra: &[&str]) -> (Output, Value) {
    let mut args = vec!["show", "--json"];
    args.extend_from_slice(extra);
    let output = run(&args);
    let report: Value = serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|e| panic!("stdout was not JSON ({}): {}", e, String::from_utf8_lossy(&output.stdout)));
    (output, report)
}

fn cell_texts(report: &Value, row: usize) -> Vec<String> {
    report["view"]["rows"][row]["cells"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_fixtures_exist() {
    for name in ["products.json", "vendors.json", "empty.json", "not_array.json", "products.toml"] {
        assert!(fixtures_dir().join(name).exists(), "missing fixture {}", name);
    }
    assert!(forms_dir().join("add_product.toml").exists());
    assert!(forms_dir().join("add_vendor.toml").exists());
}

#[test]
fn test_show_products_json() {
    let products = fixture("products.json");
    let (output, report) = show_json(&["--file", products.as_str(), "--title", "Products"]);
    assert!(output.status.success());

    let view = &report["view"];
    assert_eq!(view["view"], "table");
    assert_eq!(view["title"], "Products (3 items)");

    let labels: Vec<&str> = view["header"].as_array().unwrap().iter().map(|h| h["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["ID", "Product Name", "Unit Price", "Stock", "Reorder At", "Expiry Date"]);

    assert_eq!(cell_texts(&report, 0), vec!["1", "Widget", "$1,234.50", "3", "5", "1/1/2000"]);
    assert_eq!(view["rows"][0]["low_stock"], true);
    assert_eq!(view["rows"][0]["cells"][5]["class"], "expired");

    // Numeric strings are currency too
    assert_eq!(cell_texts(&report, 1)[2], "$9.99");
    assert_eq!(view["rows"][1]["low_stock"], false);
    assert!(view["rows"][1]["cells"][5]["class"].is_null());

    // "12 units" vs "20" compares as integers
    assert_eq!(view["rows"][2]["low_stock"], true);
    assert_eq!(cell_texts(&report, 2)[2], "call us");
    assert_eq!(cell_texts(&report, 2)[5], "");
    // A null expiry converts to 0, so it reads as a number
    assert_eq!(view["rows"][2]["cells"][5]["class"], "number-column");

    let diagnostics = report["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["kind"], "non_numeric_currency");
    assert_eq!(diagnostics[0]["row"], 2);
}

#[test]
fn test_show_with_config_and_filter() {
    let products = fixture("products.json");
    let config = fixture("products.toml");
    let (output, report) = show_json(&["--file", products.as_str(), "--config", config.as_str(), "--filter", "GADG"]);
    assert!(output.status.success());

    let view = &report["view"];
    assert_eq!(view["title"], "Products (3 items)");
    assert_eq!(view["action"]["label"], "Add Product");
    assert_eq!(view["action"]["target"], "/add_product.html");
    assert_eq!(view["filter"]["placeholder"], "Search...");

    let keys: Vec<&str> = view["header"].as_array().unwrap().iter().map(|h| h["key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["productname", "unitprice", "stockquantity", "reorderlevel", "expirydate"]);

    // Filtering hides rows without removing them
    assert_eq!(view["rows"].as_array().unwrap().len(), 3);
    assert_eq!(report["filter"], "GADG");
    assert_eq!(report["visible_rows"], serde_json::json!([1]));
}

#[test]
fn test_show_columns_flag() {
    let vendors = fixture("vendors.json");
    let (output, report) =
        show_json(&["--file", vendors.as_str(), "--columns", "VENDORNAME,nosuchcolumn,vendorAddress", "--schema", "union"]);
    assert!(output.status.success());

    let labels: Vec<&str> =
        report["view"]["header"].as_array().unwrap().iter().map(|h| h["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Vendor Name", "Vendor Address"]);
    assert_eq!(cell_texts(&report, 0), vec!["Acme Supply", ""]);
    assert_eq!(cell_texts(&report, 1), vec!["Globex", "1 Globex Way"]);
}

#[test]
fn test_show_empty_and_non_array() {
    for name in ["empty.json", "not_array.json"] {
        let path = fixture(name);
        let (output, report) = show_json(&["--file", path.as_str(), "--title", "Vendors"]);
        assert!(output.status.success(), "{} should render an empty view", name);
        assert_eq!(report["view"]["view"], "empty");
        assert_eq!(report["view"]["title"], "Vendors");
        assert_eq!(report["view"]["message"], "No data available");
    }
}

#[test]
fn test_show_missing_file_renders_error_view() {
    let (output, report) = show_json(&["--file", "/nonexistent/records.json"]);
    assert!(!output.status.success());
    assert_eq!(report["view"]["view"], "error");
    assert_eq!(report["view"]["title"], "Error Loading Data");
    assert_eq!(report["view"]["message"], "Failed to load data. Please try again later.");
    assert!(report["view"]["details"].as_str().unwrap().contains("records.json"));
}

#[test]
fn test_show_console_table() {
    let products = fixture("products.json");
    let output = run(&["show", "--file", products.as_str(), "--no-color", "--console-width", "120"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Data Table (3 items)\n"));
    assert!(stdout.contains("$1,234.50"));
    assert!(stdout.contains("Gizmo | Deluxe"));
    assert!(!stdout.contains('\x1b'));

    // The degraded currency cell is reported on stderr
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("non-numeric amount \"call us\""));
}

#[test]
fn test_show_exports_reports() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    let md_path = dir.path().join("report.md");
    let products = fixture("products.json");

    let output = run(&[
        "show",
        "--file",
        products.as_str(),
        "--no-color",
        "--output-json",
        json_path.to_str().unwrap(),
        "--output-md",
        md_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(report["view"]["title"], "Data Table (3 items)");

    let md = std::fs::read_to_string(&md_path).unwrap();
    assert!(md.starts_with("# Data Table (3 items)\n"));
    assert!(md.contains("Gizmo \\| Deluxe"));
    assert!(md.contains("## Diagnostics"));
}

#[test]
fn test_show_requires_source() {
    let output = run(&["show"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Must specify a record source"));
}

#[test]
fn test_submit_dry_run_maps_fields() {
    let form = forms_dir().join("add_product.toml");
    let output = run(&[
        "submit",
        "--form",
        form.to_str().unwrap(),
        "--dry-run",
        "-f",
        "productName=Widget",
        "-f",
        "price=12.50",
        "-f",
        "quantity=",
        "-f",
        "CategoryID=abc",
        "-f",
        "unmapped=ignored",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.splitn(2, '\n');
    assert_eq!(lines.next(), Some("POST http://127.0.0.1:5000/add_product"));

    let body: Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "productName": "Widget",
            "price": 12.5,
            "quantity": 0,
            "CategoryID": null
        })
    );
}

#[test]
fn test_submit_vendor_defaults() {
    let form = forms_dir().join("add_vendor.toml");
    let output = run(&[
        "submit",
        "--form",
        form.to_str().unwrap(),
        "--base-url",
        "http://localhost:8080/",
        "--dry-run",
        "-f",
        "vendorName=Acme",
        "-f",
        "vendorNumber=",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("POST http://localhost:8080/add_vendor\n"));
    let body: Value = serde_json::from_str(stdout.splitn(2, '\n').nth(1).unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"vendorName": "Acme", "vendorNumber": ""}));
}

#[test]
fn test_submit_bad_field_syntax() {
    let form = forms_dir().join("add_vendor.toml");
    let output = run(&["submit", "--form", form.to_str().unwrap(), "--dry-run", "-f", "novalue"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("expected NAME=VALUE"));
}
