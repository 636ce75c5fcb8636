//! Manifest module - Finding the target manifest inside parsed documents.
//!
//! - `walker` yields the manifests a document contains
//! - `selector` decides whether a manifest is the target
//! - `podspec` locates a workload's containers

mod podspec;
mod selector;
mod walker;

pub use podspec::*;
pub use selector::*;
pub use walker::*;

/// Namespace assumed for manifests that do not set `metadata.namespace`.
pub const DEFAULT_NAMESPACE: &str = "default";
