//! Configuration for stylesheet resolution and document preparation
//!
//! This module provides the `CriticalConfig` struct, its builder with validation
//! and sensible defaults, and a serde-backed `ConfigFile` for loading options
//! from JSON.

// Sub-modules
pub mod builder;
pub mod file;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::CriticalConfigBuilder;
pub use file::{ConfigFile, CssSetting, RebaseSetting, RequestFile};
pub use types::{CriticalConfig, RebaseDirective, RebaseTransform, RequestOptions};
