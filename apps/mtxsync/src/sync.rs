//! One synchronization cycle: fetch -> decode -> normalize -> splice -> write.
//!
//! The engine only talks to the outside world through the three injected
//! closures, so a cycle is testable without a server or a real file. A
//! failed cycle never touches the target file: the write happens last and
//! only after every earlier step succeeded.

use crate::document::ConfigDocument;
use crate::normalize::{self, PathMap};
use serde_json::Value as Json;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure reported by the fetch collaborator. The engine treats all
/// variants the same; the split exists for operator-facing messages.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("authentication failed (HTTP 401)")]
    Auth,
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
}

/// Which step of the cycle failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Fetch,
    Decode,
    ReadConfig,
    MalformedConfig,
    WriteConfig,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Fetch => "fetch",
            FailureReason::Decode => "decode",
            FailureReason::ReadConfig => "read_config",
            FailureReason::MalformedConfig => "malformed_config",
            FailureReason::WriteConfig => "write_config",
        }
    }
}

/// Outcome of one cycle. Never a panic or an early crash; every failure
/// carries the step it happened in plus a human-readable detail.
#[derive(Debug)]
pub enum SyncOutcome {
    Succeeded { entries: Vec<(String, String)> },
    Failed { reason: FailureReason, detail: String },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Succeeded { .. })
    }

    pub fn paths_written(&self) -> usize {
        match self {
            SyncOutcome::Succeeded { entries } => entries.len(),
            SyncOutcome::Failed { .. } => 0,
        }
    }
}

/// Run one cycle against the given collaborators.
///
/// Step order matters: the API is consulted before the file is read, so a
/// transient read failure is distinguishable from an API failure, and the
/// file is written only as the final step.
pub fn run_once<F, R, W>(fetch: F, read_config: R, write_config: W) -> SyncOutcome
where
    F: FnOnce() -> Result<Vec<u8>, FetchError>,
    R: FnOnce() -> Result<Vec<String>, io::Error>,
    W: FnOnce(&[String]) -> Result<(), io::Error>,
{
    let body = match fetch() {
        Ok(b) => b,
        Err(e) => return failed(FailureReason::Fetch, e.to_string()),
    };

    let payload = match decode_payload(&body) {
        Ok(p) => p,
        Err(detail) => return failed(FailureReason::Decode, detail),
    };

    let paths = normalize::extract_paths(&payload);
    let entries = writable_entries(&paths);

    let lines = match read_config() {
        Ok(l) => l,
        Err(e) => return failed(FailureReason::ReadConfig, e.to_string()),
    };

    let doc = match ConfigDocument::parse(lines) {
        Ok(d) => d,
        Err(e) => return failed(FailureReason::MalformedConfig, e.to_string()),
    };

    let new_lines = doc.replace_managed_region(&entries);

    if let Err(e) = write_config(&new_lines) {
        return failed(FailureReason::WriteConfig, e.to_string());
    }

    SyncOutcome::Succeeded { entries }
}

/// Entries that can actually be written: the catch-all name is skipped and
/// so is any descriptor without a `source` (partial API data must not block
/// syncing the data that is valid).
pub fn writable_entries(paths: &PathMap) -> Vec<(String, String)> {
    paths
        .iter()
        .filter(|(name, _)| name.as_str() != normalize::CATCH_ALL)
        .filter_map(|(name, desc)| {
            normalize::descriptor_source(desc).map(|s| (name.clone(), s.to_string()))
        })
        .collect()
}

/// Decode the response body. An empty body is a decode failure, not a
/// vacuous success: HTTP 200 with no content is not the same as "no paths".
fn decode_payload(body: &[u8]) -> Result<Json, String> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err("empty response body".to_string());
    }
    serde_json::from_slice(body).map_err(|e| format!("invalid JSON: {}", e))
}

fn failed(reason: FailureReason, detail: String) -> SyncOutcome {
    SyncOutcome::Failed { reason, detail }
}

/// Read the target file as a line sequence. Splitting on `\n` keeps a
/// trailing empty element for a final newline, so join(read(x)) == x and
/// untouched regions survive byte-for-byte.
pub fn read_config_lines(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.split('\n').map(|s| s.to_string()).collect())
}

/// Write the full replacement in one call; no partial writes.
pub fn write_config_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    fs::write(path, lines.join("\n"))
}
