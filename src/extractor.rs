//! Address extraction from raw provider responses.
//!
//! Two strategies: structured extraction pulls string arrays out of a JSON
//! body; pattern extraction scans arbitrary text for IPv4/IPv6 shapes and
//! keeps only candidates that parse as real addresses or networks. A
//! structured provider whose body turns out not to be JSON falls back to
//! pattern extraction, so a provider swapping its API for a plain-text list
//! keeps working.

use ipnet::IpNet;
use regex::Regex;
use serde_json::Value;
use std::net::IpAddr;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::SyncError;

/// How to turn a raw response body into a list of addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Scan the text for IPv4-with-optional-prefix / IPv6-with-prefix shapes
    Pattern,
    /// Collect the string entries of the named JSON array fields, in order
    Structured { fields: &'static [&'static str] },
}

/// Extract an ordered list of IP/CIDR strings from a response body.
///
/// Duplicates are kept and order is preserved. Fails with
/// [`SyncError::EmptyResult`] when nothing is extracted.
pub fn extract(provider: &str, body: &str, strategy: Strategy) -> Result<Vec<String>, SyncError> {
    let entries = match strategy {
        Strategy::Structured { fields } => match serde_json::from_str::<Value>(body) {
            Ok(value) => extract_structured(&value, fields),
            Err(e) => {
                debug!("{provider}: body is not JSON ({e}), falling back to pattern extraction");
                extract_pattern(body)
            }
        },
        Strategy::Pattern => extract_pattern(body),
    };

    if entries.is_empty() {
        return Err(SyncError::EmptyResult {
            provider: provider.to_string(),
        });
    }
    Ok(entries)
}

fn extract_structured(value: &Value, fields: &[&str]) -> Vec<String> {
    let mut entries = Vec::new();
    for field in fields {
        if let Some(items) = value.get(field).and_then(Value::as_array) {
            entries.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
        }
    }
    entries
}

fn extract_pattern(body: &str) -> Vec<String> {
    static CANDIDATE: OnceLock<Regex> = OnceLock::new();
    let re = CANDIDATE.get_or_init(|| {
        // IPv4 with optional prefix, or IPv6 with mandatory prefix
        Regex::new(r"(?:\d{1,3}(?:\.\d{1,3}){3}(?:/\d{1,2})?|[0-9A-Fa-f:]*:[0-9A-Fa-f:]+/\d{1,3})")
            .expect("candidate regex is valid")
    });

    re.find_iter(body)
        .map(|m| m.as_str())
        .filter(|candidate| is_address(candidate))
        .map(str::to_string)
        .collect()
}

/// The regex only narrows candidates; each one must still parse
fn is_address(candidate: &str) -> bool {
    if candidate.contains('/') {
        candidate.parse::<IpNet>().is_ok()
    } else {
        candidate.parse::<IpAddr>().is_ok()
    }
}
