//! Prepare a render tree for a document and print what was written
//!
//! Usage: cargo run --example prepare -- <PATH_OR_URL> [BASE] [CONFIG_JSON]
//! Example: cargo run --example prepare -- site/pages/index.html site

use anyhow::{Context, Result};
use kodegen_tools_critical::{ConfigFile, CriticalConfig, assemble_document};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(reference) = args.get(1) else {
        eprintln!("usage: prepare <PATH_OR_URL> [BASE] [CONFIG_JSON]");
        std::process::exit(2);
    };

    let mut builder = match args.get(3) {
        Some(file) => {
            let json = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read config file {file}"))?;
            ConfigFile::from_json(&json)
                .and_then(ConfigFile::into_builder)
                .with_context(|| format!("Invalid config file {file}"))?
        }
        None => CriticalConfig::builder(),
    };
    if let Some(base) = args.get(2) {
        builder = builder.base(base.as_str());
    }
    let config = builder.build().context("Failed to build configuration")?;

    log::info!("📄 Preparing {reference}");
    let prepared = assemble_document(reference.as_str(), &config)
        .await
        .with_context(|| format!("Failed to prepare {reference}"))?;

    log::info!(
        "Virtual path: {}",
        prepared.document.virtual_path().unwrap_or("<none>")
    );
    log::info!(
        "Stylesheets: {} ({} bytes of css)",
        prepared.document.stylesheets().len(),
        prepared.document.css().len()
    );
    for file in prepared.tree.files() {
        log::info!("  {}", file.display());
    }

    prepared.tree.cleanup().await?;
    log::info!("✅ Cleaned up");
    Ok(())
}
