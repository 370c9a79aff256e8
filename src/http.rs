//! HTTP access to the vendor's release endpoints.
//!
//! The vendor publishes the latest stable version as a plaintext body at a
//! fixed URL. One GET, no caching, no retries; a failed request aborts the
//! run.

use anyhow::{Context, Result};
use std::sync::OnceLock;
use std::time::Duration;

/// Base URL of the vendor's release bucket.
pub const RELEASES_BASE_URL: &str =
    "https://storage.googleapis.com/claude-code-dist-86c565f3-f756-42ad-8dfa-d59b1c096819/claude-code-releases";

/// Endpoint returning the latest stable version as plaintext.
const STABLE_URL: &str =
    "https://storage.googleapis.com/claude-code-dist-86c565f3-f756-42ad-8dfa-d59b1c096819/claude-code-releases/stable";

/// Default HTTP timeout in seconds
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Get HTTP timeout from environment variable or use default.
/// Cached for performance (only reads env var once).
fn get_http_timeout() -> Duration {
    static TIMEOUT: OnceLock<Duration> = OnceLock::new();
    *TIMEOUT.get_or_init(|| {
        let secs = std::env::var("CLAUDE_UPDATE_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        // Clamp to reasonable range (5-300 seconds)
        Duration::from_secs(secs.clamp(5, 300))
    })
}

/// Fetch the latest stable version from the vendor's endpoint.
///
/// The response body, trimmed of surrounding whitespace, is the version
/// string (e.g. "1.0.24").
pub fn fetch_latest_version() -> Result<String> {
    fetch_latest_version_from(STABLE_URL)
}

/// Internal: fetch with configurable URL (for testing)
pub(crate) fn fetch_latest_version_from(url: &str) -> Result<String> {
    let body = ureq::get(url)
        .timeout(get_http_timeout())
        .call()
        .with_context(|| format!("failed to fetch latest version from {}", url))?
        .into_string()
        .context("failed to read version response body")?;

    Ok(body.trim().to_string())
}
