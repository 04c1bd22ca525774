//! Uniform descriptors for documents and stylesheets
//!
//! Whether a resource came from memory, from disk or over HTTP, the rest of the
//! crate only sees an [`AssetDescriptor`].

pub mod descriptor;
pub mod materialize;

pub use descriptor::AssetDescriptor;
pub use materialize::{Source, materialize};
