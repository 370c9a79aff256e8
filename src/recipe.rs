//! Reading and rewriting the recipe file.
//!
//! The recipe is a Nix expression declaring one `version = "...";` field and
//! one block per platform containing a `hash = "...";` field. Edits are
//! targeted regex substitutions rather than a parse/re-emit round trip, so
//! comments, formatting, and attribute ordering survive byte-for-byte.

use anyhow::{Context, Result, bail};
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Pattern matching the recipe's version declaration.
const VERSION_PATTERN: &str = r#"version = "([^"]+)";"#;

/// Extract the currently recorded version, if the declaration is present.
pub fn current_version(text: &str) -> Option<String> {
    let re = Regex::new(VERSION_PATTERN).expect("version pattern is valid");
    re.captures(text).map(|caps| caps[1].to_string())
}

/// Replace the first version declaration with `version`.
///
/// Errors if the document has no version declaration; a silent no-op here
/// would let a run report success without changing anything.
pub fn set_version(text: &str, version: &str) -> Result<String> {
    let re = Regex::new(VERSION_PATTERN).expect("version pattern is valid");
    if !re.is_match(text) {
        bail!("no version declaration found in recipe");
    }

    let replacement = format!("version = \"{}\";", version);
    Ok(re.replacen(text, 1, NoExpand(&replacement)).into_owned())
}

/// Replace the hash inside one platform's block with `sri`.
///
/// The match is anchored to the platform's attribute name and spans the
/// block non-greedily up to its `hash` field, so one platform's update can
/// never touch another block or unrelated text. Errors if the block or its
/// hash field is missing.
pub fn set_platform_hash(text: &str, platform: Platform, sri: &str) -> Result<String> {
    let pattern = format!(
        r#"(?s)({} = \{{[^}}]*?hash = ")[^"]+(")"#,
        regex::escape(platform.nix_attr())
    );
    let re = Regex::new(&pattern).expect("platform block pattern is valid");

    if !re.is_match(text) {
        bail!("no hash field found for platform {} in recipe", platform);
    }

    let updated = re.replacen(text, 1, |caps: &regex::Captures| {
        format!("{}{}{}", &caps[1], sri, &caps[2])
    });
    Ok(updated.into_owned())
}

/// The recipe file: path plus in-memory content.
///
/// Substitutions happen in memory; the file on disk is only touched by
/// [`Recipe::save`], once, after every substitution has succeeded.
#[derive(Debug)]
pub struct Recipe {
    path: PathBuf,
    content: String,
}

impl Recipe {
    /// Read the recipe file into memory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe file {}", path.display()))?;
        Ok(Recipe {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The currently recorded version, if any.
    pub fn version(&self) -> Option<String> {
        current_version(&self.content)
    }

    /// Apply the version and all platform hash substitutions in memory.
    pub fn apply(&mut self, version: &str, hashes: &[(Platform, String)]) -> Result<()> {
        let mut content = set_version(&self.content, version)?;
        for (platform, sri) in hashes {
            content = set_platform_hash(&content, *platform, sri)?;
        }
        self.content = content;
        Ok(())
    }

    /// Overwrite the recipe file with the current in-memory content.
    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, &self.content)
            .with_context(|| format!("failed to write recipe file {}", self.path.display()))
    }
}
