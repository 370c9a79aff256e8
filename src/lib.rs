//! Recipe updater for the claude package.
//!
//! Upstream publishes the latest stable version at a fixed plaintext
//! endpoint and one binary per supported platform. This crate checks that
//! endpoint against the version recorded in the package recipe
//! (`default.nix`) and, when upstream is newer, prefetches each platform
//! binary's SRI hash and rewrites the recipe in place.
//!
//! # Pipeline
//!
//! 1. Read the recorded version from the recipe ([`recipe::current_version`]).
//! 2. Fetch the latest stable version ([`http::fetch_latest_version`]).
//! 3. If they differ, prefetch each platform artifact's SRI hash via the
//!    Nix tooling ([`prefetch::sri_hash`]), strictly one platform at a time.
//! 4. Rewrite the recipe's version and per-platform hashes with anchored
//!    regex substitutions and overwrite the file once ([`recipe::Recipe`]).
//!
//! Any failure before the final write leaves the recipe file untouched.

pub mod http;
pub mod output;
pub mod platform;
pub mod prefetch;
pub mod recipe;
pub mod update;

pub use platform::Platform;
pub use update::Outcome;
