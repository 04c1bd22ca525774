//! Locating references on disk or remotely
//!
//! [`check_exists`] answers whether a reference is there, [`build_search_paths`]
//! lists where else it might be, and [`resolve_reference`] walks that list in order.

pub mod exists;
pub mod resolve;
pub mod search_paths;

pub use exists::{check_exists, reference_exists};
pub use resolve::resolve_reference;
pub use search_paths::build_search_paths;
