#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Stackwrap Intermediate Representation (IR)
//!
//! This crate defines the reflected metadata the generator consumes: the target
//! type, its declared methods and their typed signatures. The IR is the boundary
//! between whatever reflection facility produced the description and the code
//! generation passes.

pub mod type_ir;

// Re-export the main IR types for convenience
pub use type_ir::*;
