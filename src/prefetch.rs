//! Artifact hashing via the Nix prefetch tooling.
//!
//! Hashes are never computed in-process: `nix-prefetch-url` downloads the
//! artifact into the store and prints its sha256 in nix-base32, and
//! `nix hash to-sri` reinterprets that as an SRI string
//! (`sha256-<base64>=`), which is what the recipe records.

use anyhow::{Context, Result, bail};
use std::process::Command;

use crate::http::RELEASES_BASE_URL;
use crate::platform::Platform;

/// Build the download URL for one platform's binary at a given version.
pub fn artifact_url(version: &str, platform: Platform) -> String {
    format!(
        "{}/{}/{}/claude",
        RELEASES_BASE_URL,
        version,
        platform.url_segment()
    )
}

/// Prefetch a URL and return its sha256 hash in SRI format.
///
/// Both tool invocations must exit zero; any failure aborts the run.
pub fn sri_hash(url: &str) -> Result<String> {
    let raw = exec_output("nix-prefetch-url", &["--type", "sha256", url])?;
    let raw = raw.trim();

    let sri = exec_output("nix", &["hash", "to-sri", "--type", "sha256", raw])?;
    Ok(sri.trim().to_string())
}

/// Execute a command and return its stdout.
///
/// Non-zero exit is an error carrying the command's stderr.
fn exec_output(cmd: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(cmd)
        .args(args)
        .output()
        .with_context(|| format!("failed to execute {}", cmd))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{} failed with exit code {:?}: {}",
            cmd,
            output.status.code(),
            stderr.trim()
        );
    }

    String::from_utf8(output.stdout).with_context(|| format!("invalid utf8 output from {}", cmd))
}
