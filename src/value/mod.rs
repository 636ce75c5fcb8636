//! Value module - In-memory representation of YAML documents.
//!
//! This module provides the generic document tree and the YAML stream codec.

mod value;
mod yaml;

pub use value::*;
pub use yaml::*;
