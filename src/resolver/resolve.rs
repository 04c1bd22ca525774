use log::debug;

use super::exists::reference_exists;
use crate::config::CriticalConfig;
use crate::error::{AssetError, AssetResult};
use crate::locator::join;

/// First existing location for `reference`
///
/// The bare reference is tried first, then `join(candidate, reference)` for each
/// search path in order.
///
/// # Errors
///
/// `FileNotFound` carrying `reference` and the full `search_paths` list when no
/// location exists.
pub async fn resolve_reference(
    reference: &str,
    search_paths: &[String],
    config: &CriticalConfig,
) -> AssetResult<String> {
    if reference_exists(reference, config).await {
        return Ok(reference.to_string());
    }

    for candidate in search_paths {
        let Ok(location) = join(candidate, reference) else {
            continue;
        };
        if reference_exists(&location, config).await {
            debug!(target: "critical::resolve", "resolved {reference} to {location}");
            return Ok(location);
        }
    }

    debug!(
        target: "critical::resolve",
        "{reference} not found in {} search paths",
        search_paths.len()
    );
    Err(AssetError::not_found(reference, search_paths.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn first_existing_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().replace('\\', "/");
        for sub in ["a", "b"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
            std::fs::write(dir.path().join(sub).join("site.css"), sub).unwrap();
        }
        let config = CriticalConfig::builder().cwd("/nowhere").build().unwrap();

        let paths = vec![format!("{root}/missing"), format!("{root}/b"), format!("{root}/a")];
        let found = resolve_reference("site.css?v=1", &paths, &config).await.unwrap();
        assert_eq!(found, format!("{root}/b/site.css"));
    }

    #[tokio::test]
    async fn empty_search_paths_fail_with_empty_list() {
        let config = CriticalConfig::builder().cwd("/nowhere").build().unwrap();
        let err = resolve_reference("missing.css", &[], &config).await.unwrap_err();
        match err {
            AssetError::FileNotFound {
                reference,
                search_paths,
            } => {
                assert_eq!(reference, "missing.css");
                assert!(search_paths.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
