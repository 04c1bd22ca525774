//! Test utilities and helper functions for the critical test suite

use anyhow::Result;
use kodegen_tools_critical::CriticalConfig;
use mockito::{Mock, Server};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test projects
#[allow(dead_code)]
pub fn create_test_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates an HTML document that links the given stylesheets
#[allow(dead_code)]
pub fn create_test_html(title: &str, stylesheets: &[&str]) -> String {
    let links: String = stylesheets
        .iter()
        .map(|href| format!("    <link rel=\"stylesheet\" href=\"{href}\">\n"))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
{links}</head>
<body>
    <h1>{title}</h1>
</body>
</html>"#
    )
}

/// Writes `(relative path, contents)` pairs below `root`, creating directories
#[allow(dead_code)]
pub fn write_project(root: &Path, files: &[(&str, &[u8])]) -> Result<()> {
    for (path, contents) in files {
        let target = root.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, contents)?;
    }
    Ok(())
}

/// Forward-slash string form of a path
#[allow(dead_code)]
pub fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Config rooted at `cwd` with default collaborators
#[allow(dead_code)]
pub fn config_in(cwd: &Path) -> CriticalConfig {
    CriticalConfig::builder()
        .cwd(cwd.to_path_buf())
        .build()
        .expect("Failed to create test config")
}

/// Sets up a mock HTTP server
#[allow(dead_code)]
pub async fn setup_mock_server() -> mockito::ServerGuard {
    Server::new_async().await
}

/// Creates GET and HEAD endpoints that serve `body`
#[allow(dead_code)]
pub async fn create_asset_mocks(
    server: &mut Server,
    path: &str,
    content_type: &str,
    body: &str,
) -> (Mock, Mock) {
    let get = server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .with_body(body)
        .create_async()
        .await;
    let head = server
        .mock("HEAD", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .create_async()
        .await;
    (get, head)
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}

/// Reads a file of the render tree
#[allow(dead_code)]
pub fn read_tree_file(root: &Path, relative: &str) -> Result<String> {
    let path: PathBuf = root.join(relative);
    assert!(path.exists(), "File does not exist: {path:?}");
    Ok(std::fs::read_to_string(path)?)
}
