//! Stylesheet loading and `url()` rebasing

pub mod loader;
pub mod rebase;
pub mod virtual_path;

pub use loader::load_stylesheet;
pub use rebase::{RebaseAsset, RebaseMethod, rebase_stylesheet};
pub use virtual_path::compute_stylesheet_virtual_path;
