//! # kubeyaml
//!
//! Rewrites a single Kubernetes manifest inside a stream of YAML documents.
//!
//! The target manifest is chosen by namespace, kind and name, and may sit
//! inside a `*List` wrapper. Three rewrites are supported: replacing a
//! container image, updating annotations, and setting values at dotted paths.
//! Every other document passes through unchanged.
//!
//! ## Modules
//!
//! - [`value`] - Generic document tree and YAML stream codec
//! - [`manifest`] - Manifest walking, selection and container lookup
//! - [`mutate`] - The image, annotation and path rewrites
//! - [`rewrite`] - Stream driver applying a rewrite to a document stream

mod error;
pub mod manifest;
pub mod mutate;
pub mod rewrite;
pub mod value;

pub use error::Error;
pub use manifest::{ContainerSelector, Selector};
pub use mutate::{Mutator, Operation, SetPaths, UpdateAnnotations, UpdateImage};
pub use rewrite::{rewrite_stream, rewrite_to_string, Rewrite};
pub use value::Value;
