//! Existence checks that never fail

use log::trace;

use crate::asset::Source;
use crate::config::CriticalConfig;
use crate::fetch::probe;
use crate::filesystem::path_exists;
use crate::locator::{is_remote, strip_query, to_filesystem_path};

/// True if `target` can be read
///
/// In-memory sources exist when they have content. Remote references are probed;
/// local ones are checked literally and then without their query string. Every
/// error counts as "does not exist".
pub async fn check_exists(target: &Source, config: &CriticalConfig) -> bool {
    match target {
        Source::Html(html) => !html.is_empty(),
        Source::Descriptor(descriptor) => !descriptor.is_null(),
        Source::Reference(reference) => reference_exists(reference, config).await,
    }
}

/// [`check_exists`] for a plain reference string
pub async fn reference_exists(reference: &str, config: &CriticalConfig) -> bool {
    if reference.is_empty() {
        return false;
    }

    if is_remote(reference) {
        return probe(reference, config).await;
    }

    let literal = to_filesystem_path(config.cwd(), reference);
    if path_exists(&literal).await {
        return true;
    }

    let stripped = strip_query(reference);
    let found = stripped.len() != reference.len()
        && path_exists(to_filesystem_path(config.cwd(), stripped)).await;
    trace!(target: "critical::resolve", "exists {reference}: {found}");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetDescriptor;
    use tempfile::TempDir;

    #[tokio::test]
    async fn local_checks_tolerate_query_strings() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("style.css"), "a{}").unwrap();
        let config = CriticalConfig::builder().cwd(dir.path()).build().unwrap();

        assert!(reference_exists("style.css", &config).await);
        assert!(reference_exists("style.css?v=2", &config).await);
        assert!(!reference_exists("other.css?v=2", &config).await);
        assert!(!reference_exists("", &config).await);
    }

    #[tokio::test]
    async fn in_memory_sources_need_content() {
        let config = CriticalConfig::builder().build().unwrap();
        assert!(check_exists(&Source::Html("<p>".into()), &config).await);
        assert!(!check_exists(&Source::Html(String::new()), &config).await);
        let empty = Source::from(AssetDescriptor::empty("/"));
        assert!(!check_exists(&empty, &config).await);
        let filled = Source::from(AssetDescriptor::from_html("a", "/"));
        assert!(check_exists(&filled, &config).await);
    }
}
