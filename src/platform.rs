//! Supported platforms for the upstream binary distribution.
//!
//! The vendor publishes one binary per OS/architecture pair. Each platform
//! has two names: the Nix attribute used in the recipe file and the path
//! segment used in the vendor's download URLs.

use std::fmt;

/// An OS/architecture pair the vendor ships binaries for.
///
/// The set is fixed; iterate with [`Platform::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    X86_64Linux,
    Aarch64Linux,
    X86_64Darwin,
    Aarch64Darwin,
}

impl Platform {
    /// All supported platforms, in recipe-block order.
    pub const ALL: [Platform; 4] = [
        Platform::X86_64Linux,
        Platform::Aarch64Linux,
        Platform::X86_64Darwin,
        Platform::Aarch64Darwin,
    ];

    /// The Nix attribute naming this platform's block in the recipe.
    pub fn nix_attr(&self) -> &'static str {
        match self {
            Platform::X86_64Linux => "x86_64-linux",
            Platform::Aarch64Linux => "aarch64-linux",
            Platform::X86_64Darwin => "x86_64-darwin",
            Platform::Aarch64Darwin => "aarch64-darwin",
        }
    }

    /// The path segment the vendor uses in download URLs.
    pub fn url_segment(&self) -> &'static str {
        match self {
            Platform::X86_64Linux => "linux-x64",
            Platform::Aarch64Linux => "linux-arm64",
            Platform::X86_64Darwin => "darwin-x64",
            Platform::Aarch64Darwin => "darwin-arm64",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nix_attr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_four_platforms() {
        assert_eq!(Platform::ALL.len(), 4);
    }

    #[test]
    fn test_nix_attrs_are_distinct() {
        let attrs: Vec<_> = Platform::ALL.iter().map(|p| p.nix_attr()).collect();
        for (i, a) in attrs.iter().enumerate() {
            for b in &attrs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_url_segments() {
        assert_eq!(Platform::X86_64Linux.url_segment(), "linux-x64");
        assert_eq!(Platform::Aarch64Linux.url_segment(), "linux-arm64");
        assert_eq!(Platform::X86_64Darwin.url_segment(), "darwin-x64");
        assert_eq!(Platform::Aarch64Darwin.url_segment(), "darwin-arm64");
    }

    #[test]
    fn test_display_matches_nix_attr() {
        assert_eq!(Platform::X86_64Linux.to_string(), "x86_64-linux");
        assert_eq!(Platform::Aarch64Darwin.to_string(), "aarch64-darwin");
    }
}
