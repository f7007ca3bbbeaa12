//! Blocking HTTP client for the MediaMTX control API.
//!
//! Thin collaborator around `reqwest::blocking`: GET with basic auth and a
//! request timeout, mapping HTTP 401 to an authentication failure and any
//! other non-2xx status to a status failure. The sync engine only ever
//! sees raw bytes or a `FetchError`.

use crate::sync::FetchError;
use std::time::Duration;

/// Timeout for a regular paths fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Shorter timeout for the startup connectivity probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const BODY_PREVIEW_LIMIT: usize = 200;

pub struct ApiClient {
    url: String,
    username: String,
    password: String,
}

impl ApiClient {
    pub fn new(url: String, username: String, password: String) -> Self {
        Self {
            url,
            username,
            password,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw paths-list response body.
    pub fn fetch_paths(&self) -> Result<Vec<u8>, FetchError> {
        self.get(FETCH_TIMEOUT)
    }

    /// Connectivity and credentials probe against the same endpoint.
    pub fn probe(&self) -> Result<(), FetchError> {
        self.get(PROBE_TIMEOUT).map(|_| ())
    }

    fn get(&self, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let resp = client
            .get(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        if status == 401 {
            return Err(FetchError::Auth);
        }
        if !(200..300).contains(&status) {
            let body = resp.text().unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: preview(&body),
            });
        }

        let bytes = resp
            .bytes()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_bodies() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert!(p.ends_with('…'));
        assert_eq!(p.chars().count(), BODY_PREVIEW_LIMIT + 1);
    }

    #[test]
    fn test_preview_keeps_short_bodies() {
        assert_eq!(preview("  not found \n"), "not found");
    }

    #[test]
    fn test_fetch_error_display() {
        let e = FetchError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(e.to_string(), "unexpected HTTP status 503: unavailable");
        assert!(FetchError::Auth.to_string().contains("401"));
    }
}
