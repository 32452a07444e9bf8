//! API module for talking to the records backend
//!
//! This module provides functions for fetching record collections and
//! posting form submissions. Every failure is reduced to a human-readable
//! message; the caller decides how to present it.

use crate::types::{Record, records_from_json};
use log::debug;
use std::path::Path;
use std::time::Duration;

const USER_AGENT: &str = concat!("record-table/", env!("CARGO_PKG_VERSION"));

lazy_static::lazy_static! {
    static ref AGENT: ureq::Agent = ureq::AgentBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build();
}

/// What a fetch produced
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRecords {
    /// The response was a JSON array
    Records(Vec<Record>),
    /// The response decoded but was not an array
    NotASequence,
}

impl FetchedRecords {
    /// Records, or an empty collection when the payload wasn't a sequence
    pub fn into_records(self) -> Vec<Record> {
        match self {
            FetchedRecords::Records(records) => records,
            FetchedRecords::NotASequence => Vec::new(),
        }
    }
}

/// Decode a response body into records
pub fn decode_records(body: &str) -> Result<FetchedRecords, String> {
    let document: serde_json::Value =
        serde_json::from_str(body).map_err(|e| format!("Invalid JSON in response: {}", e))?;
    Ok(match records_from_json(&document) {
        Some(records) => FetchedRecords::Records(records),
        None => FetchedRecords::NotASequence,
    })
}

/// GET a JSON record collection
pub fn fetch_records(url: &str) -> Result<FetchedRecords, String> {
    debug!("fetching records from {}", url);

    let response = AGENT.get(url).set("Accept", "application/json").call().map_err(|e| match e {
        ureq::Error::Status(code, resp) => format!("HTTP {} {} from {}", code, resp.status_text(), url),
        ureq::Error::Transport(t) => format!("Failed to fetch {}: {}", url, t),
    })?;

    let body = response.into_string().map_err(|e| format!("Failed to read response from {}: {}", url, e))?;
    debug!("received {} bytes from {}", body.len(), url);
    decode_records(&body)
}

/// Read a JSON record collection from disk
pub fn load_records_file(path: &Path) -> Result<FetchedRecords, String> {
    debug!("loading records from {:?}", path);
    let body = std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    decode_records(&body)
}

/// Join a base URL and an endpoint path with exactly one slash
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}

/// Interpret a submission reply: `{"message": ...}` on success, `{"error": ...}` otherwise
pub fn interpret_submit_reply(ok: bool, body: &str) -> Result<String, String> {
    let reply: serde_json::Value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);
    let field = |name: &str| reply.get(name).and_then(|v| v.as_str()).map(str::to_string);

    if ok {
        Ok(field("message").unwrap_or_else(|| "Submitted".to_string()))
    } else {
        Err(field("error").unwrap_or_else(|| "Unknown error".to_string()))
    }
}

/// POST a JSON body to `base_url` + `endpoint`
///
/// Returns the backend's confirmation message, or its error text.
pub fn submit_form(base_url: &str, endpoint: &str, body: &serde_json::Value) -> Result<String, String> {
    let url = endpoint_url(base_url, endpoint);
    debug!("submitting form to {}: {}", url, body);

    match AGENT.post(&url).set("Content-Type", "application/json").send_string(&body.to_string()) {
        Ok(response) => {
            debug!("response status: {}", response.status());
            let text = response.into_string().map_err(|e| format!("Failed to read response: {}", e))?;
            interpret_submit_reply(true, &text)
        }
        Err(ureq::Error::Status(code, response)) => {
            debug!("response status: {}", code);
            let text = response.into_string().unwrap_or_default();
            interpret_submit_reply(false, &text)
        }
        Err(ureq::Error::Transport(t)) => Err(format!("Failed to reach {}: {}", url, t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: tests that hit a real backend require a server on localhost:5000
    // and are ignored by default

    #[test]
    #[ignore] // Requires a running backend
    fn test_fetch_products() {
        let fetched = fetch_records("http://127.0.0.1:5000/products").unwrap();
        assert!(matches!(fetched, FetchedRecords::Records(_)));
    }

    #[test]
    fn test_decode_records() {
        let fetched = decode_records(r#"[{"ProductID": 1, "Name": "Widget"}, {"ProductID": 2}]"#).unwrap();
        let records = fetched.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields()[1].0, "Name");
    }

    #[test]
    fn test_decode_not_a_sequence() {
        assert_eq!(decode_records(r#"{"error": "x"}"#).unwrap(), FetchedRecords::NotASequence);
        assert!(decode_records("<html>").is_err());
    }

    #[test]
    fn test_decode_preserves_key_order() {
        let records = decode_records(r#"[{"zeta": 1, "alpha": 2, "Mid": 3}]"#).unwrap().into_records();
        let keys: Vec<&str> = records[0].fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "Mid"]);
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("http://localhost:5000/", "/add_product"), "http://localhost:5000/add_product");
        assert_eq!(endpoint_url("http://localhost:5000", "add_vendor"), "http://localhost:5000/add_vendor");
    }

    #[test]
    fn test_interpret_submit_reply() {
        assert_eq!(
            interpret_submit_reply(true, r#"{"message": "Product added successfully"}"#),
            Ok("Product added successfully".to_string())
        );
        assert_eq!(
            interpret_submit_reply(false, r#"{"error": "A product with this ID already exists"}"#),
            Err("A product with this ID already exists".to_string())
        );
        assert_eq!(interpret_submit_reply(false, "Internal Server Error"), Err("Unknown error".to_string()));
    }
}
