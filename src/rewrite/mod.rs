//! Rewrite module - Driving a mutator over a document stream.

mod driver;


pub use driver::*;
