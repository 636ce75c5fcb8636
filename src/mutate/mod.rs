//! Mutate module - The three manifest rewrites.
//!
//! Each mutator is offered candidate manifests one at a time until it accepts
//! one, and reports its outcome only once the whole stream has been seen.

mod annotate;
mod image;
mod set;

pub use annotate::*;
pub use image::*;
pub use set::*;

use crate::value::Value;
use crate::Error;

/// Mutator rewrites at most one manifest of a stream.
pub trait Mutator {
    /// Offers a candidate manifest. Returns true if this was the target and
    /// has been mutated in place; the driver then stops offering manifests.
    fn apply(&mut self, manifest: &mut Value) -> bool;

    /// Reports the outcome after the stream is exhausted. `matched` is true if
    /// `apply` accepted a manifest.
    fn finish(self, matched: bool) -> Result<(), Error>;
}

/// Operation is one of the supported rewrites with its arguments.
#[derive(Debug, Clone)]
pub enum Operation {
    Image(UpdateImage),
    Annotate(UpdateAnnotations),
    Set(SetPaths),
}

impl Mutator for Operation {
    fn apply(&mut self, manifest: &mut Value) -> bool {
        match self {
            Operation::Image(op) => op.apply(manifest),
            Operation::Annotate(op) => op.apply(manifest),
            Operation::Set(op) => op.apply(manifest),
        }
    }

    fn finish(self, matched: bool) -> Result<(), Error> {
        match self {
            Operation::Image(op) => op.finish(matched),
            Operation::Annotate(op) => op.finish(matched),
            Operation::Set(op) => op.finish(matched),
        }
    }
}

impl From<UpdateImage> for Operation {
    fn from(op: UpdateImage) -> Self {
        Operation::Image(op)
    }
}

impl From<UpdateAnnotations> for Operation {
    fn from(op: UpdateAnnotations) -> Self {
        Operation::Annotate(op)
    }
}

impl From<SetPaths> for Operation {
    fn from(op: SetPaths) -> Self {
        Operation::Set(op)
    }
}
