//! Stylesheet location, rebasing and render-tree preparation
//!
//! Given an HTML document (path, URL or markup) this crate finds every stylesheet it
//! references, rewrites the `url()` references inside them so they stay valid once
//! the CSS is inlined, and writes a temporary file tree a headless renderer can load.

pub mod asset;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod fetch;
pub mod filesystem;
pub mod locator;
pub mod markup;
pub mod resolver;
pub mod stylesheet;
pub mod utils;

pub use asset::{AssetDescriptor, Source, materialize};
pub use config::{
    ConfigFile, CriticalConfig, CriticalConfigBuilder, RebaseDirective, RebaseTransform,
    RequestOptions,
};
pub use diagnostics::{CollectingDiagnostics, Diagnostics, DiagnosticsHandle, LogDiagnostics};
pub use document::{
    PreparedDocument, TempTree, assemble_document, compute_document_virtual_path, load_document,
    load_document_from_source, prepare_render_tree,
};
pub use error::{AssetError, AssetResult};
pub use fetch::{Fetch, FetchError, FetchFuture, FetchRequest, FetchResponse, HttpFetcher};
pub use locator::{ParsedReference, Reference, is_relative, is_remote, join, resolve};
pub use resolver::{build_search_paths, check_exists, resolve_reference};
pub use stylesheet::{
    RebaseAsset, RebaseMethod, compute_stylesheet_virtual_path, load_stylesheet, rebase_stylesheet,
};
