//! The update pipeline.
//!
//! Check: read the recorded version, fetch the latest, compare. Apply:
//! prefetch all four platform hashes sequentially, then rewrite the recipe
//! once. Hashing is all-or-nothing; the recipe file is not touched until
//! every hash has been computed and every substitution has succeeded.

use anyhow::Result;
use std::path::Path;

use crate::platform::Platform;
use crate::recipe::Recipe;
use crate::{http, output, prefetch};

/// Terminal state of an update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Recorded and latest versions match; nothing was written.
    UpToDate { version: String },
    /// The recipe was rewritten with the new version and hashes.
    Updated { from: Option<String>, to: String },
}

/// Run the full check-and-update pipeline against a recipe file.
pub fn run(recipe_path: &Path) -> Result<Outcome> {
    run_with(recipe_path, &http::fetch_latest_version, &prefetch::sri_hash)
}

/// Internal: pipeline with injectable version fetch and hasher (for testing)
fn run_with(
    recipe_path: &Path,
    fetch_version: &dyn Fn() -> Result<String>,
    hash_url: &dyn Fn(&str) -> Result<String>,
) -> Result<Outcome> {
    let mut recipe = Recipe::load(recipe_path)?;
    let current = recipe.version();
    let latest = fetch_version()?;

    output::info(&format!(
        "current version: {}",
        current.as_deref().unwrap_or("(none)")
    ));
    output::info(&format!("latest version: {}", latest));

    if current.as_deref() == Some(latest.as_str()) {
        output::skip("claude is already up to date");
        return Ok(Outcome::UpToDate { version: latest });
    }

    output::action(&format!(
        "updating claude from {} to {}",
        current.as_deref().unwrap_or("(none)"),
        latest
    ));

    // All hashes are computed before any substitution or write.
    let mut hashes = Vec::with_capacity(Platform::ALL.len());
    for platform in Platform::ALL {
        let url = prefetch::artifact_url(&latest, platform);
        output::detail(&format!("fetching hash for {}...", platform));
        let sri = hash_url(&url)?;
        output::detail(&format!("{}: {}", platform, sri));
        hashes.push((platform, sri));
    }

    recipe.apply(&latest, &hashes)?;
    recipe.save()?;

    output::success(&format!("updated claude to version {}", latest));
    Ok(Outcome::Updated {
        from: current,
        to: latest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;
    use std::path::PathBuf;

    const RECIPE: &str = r#"{
  version = "1.0.0";
  sources = {
    x86_64-linux = {
      hash = "sha256-OLDAAAA=";
    };
    aarch64-linux = {
      hash = "sha256-OLDBBBB=";
    };
    x86_64-darwin = {
      hash = "sha256-OLDCCCC=";
    };
    aarch64-darwin = {
      hash = "sha256-OLDDDDD=";
    };
  };
}
"#;

    fn write_recipe(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("default.nix");
        std::fs::write(&path, RECIPE).unwrap();
        path
    }

    /// Fake hasher returning a distinct SRI string per platform URL.
    fn fake_sri(url: &str) -> Result<String> {
        let platform = Platform::ALL
            .iter()
            .find(|p| url.contains(p.url_segment()))
            .expect("url names a known platform");
        Ok(format!("sha256-NEW{}=", platform.url_segment()))
    }

    #[test]
    fn test_up_to_date_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(&dir);

        let outcome = run_with(&path, &|| Ok("1.0.0".to_string()), &|_| {
            panic!("hasher must not run when versions match")
        })
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::UpToDate {
                version: "1.0.0".to_string()
            }
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), RECIPE);
    }

    #[test]
    fn test_update_rewrites_version_and_all_hashes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(&dir);

        let outcome = run_with(&path, &|| Ok("1.0.1".to_string()), &fake_sri).unwrap();

        assert_eq!(
            outcome,
            Outcome::Updated {
                from: Some("1.0.0".to_string()),
                to: "1.0.1".to_string()
            }
        );

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("version = \"1.0.1\";"));
        for platform in Platform::ALL {
            assert!(written.contains(&format!("sha256-NEW{}=", platform.url_segment())));
        }
        assert!(!written.contains("OLD"));
    }

    #[test]
    fn test_all_hashes_computed_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(&dir);

        let path_for_hasher = path.clone();
        let hasher = move |url: &str| -> Result<String> {
            // The recipe must still be untouched while hashing is underway.
            assert_eq!(std::fs::read_to_string(&path_for_hasher).unwrap(), RECIPE);
            fake_sri(url)
        };

        run_with(&path, &|| Ok("1.0.1".to_string()), &hasher).unwrap();
    }

    #[test]
    fn test_platforms_hashed_sequentially_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(&dir);

        let seen = RefCell::new(Vec::new());
        let hasher = |url: &str| -> Result<String> {
            seen.borrow_mut().push(url.to_string());
            fake_sri(url)
        };

        run_with(&path, &|| Ok("1.0.1".to_string()), &hasher).unwrap();

        let urls = seen.into_inner();
        assert_eq!(urls.len(), 4);
        for (url, platform) in urls.iter().zip(Platform::ALL) {
            assert!(url.contains(&format!("/1.0.1/{}/claude", platform.url_segment())));
        }
    }

    #[test]
    fn test_hash_failure_leaves_recipe_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(&dir);

        let calls = RefCell::new(0usize);
        let hasher = |url: &str| -> Result<String> {
            *calls.borrow_mut() += 1;
            if url.contains("darwin-x64") {
                bail!("nix-prefetch-url failed with exit code Some(1)");
            }
            fake_sri(url)
        };

        let result = run_with(&path, &|| Ok("1.0.1".to_string()), &hasher);
        assert!(result.is_err());

        // Two platforms succeeded, the third failed, the fourth was skipped.
        assert_eq!(calls.into_inner(), 3);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), RECIPE);
    }

    #[test]
    fn test_fetch_failure_aborts_before_hashing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(&dir);

        let result = run_with(&path, &|| bail!("connection refused"), &|_| {
            panic!("hasher must not run when the version fetch fails")
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), RECIPE);
    }

    #[test]
    fn test_missing_version_declaration_triggers_update_then_fails_loudly() {
        // Absent version reads as None, which never equals the fetched
        // version, so an update is attempted; the rewrite then refuses to
        // silently no-op.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.nix");
        let recipe = "{ pname = \"claude\"; }\n";
        std::fs::write(&path, recipe).unwrap();

        let result = run_with(&path, &|| Ok("1.0.1".to_string()), &|_| {
            Ok("sha256-NEW=".to_string())
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), recipe);
    }
}
