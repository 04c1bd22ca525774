//! Filesystem collaborators
//!
//! Async wrappers over `tokio::fs` with the error policy the rest of the crate
//! relies on: existence checks fold errors into `false`, removal tolerates entries
//! that are already gone, writes create intermediate directories.

pub mod ancestor;
pub mod glob;
pub mod ops;

pub use ancestor::find_ancestor_directory;
pub use glob::{compile_glob, glob_expand, has_glob_magic};
pub use ops::{path_exists, read_file, remove_path, write_file};
