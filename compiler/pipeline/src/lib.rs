#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns reflected type metadata into a service
//! facade source file.
//!
//! ## Module Organization
//!
//! - `orchestration` - Entry points (`generate_unit`, `generate`, `generate_for`)
//!   and file output
//! - `compile` - Optional hand-off of the emitted source to an external compiler

use std::time::Duration;

use thiserror::Error;

pub mod compile;
pub mod orchestration;

pub use compile::ExternalCompiler;
pub use orchestration::{compile_target, generate, generate_for, generate_unit, write_generated};

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// I/O error while reading input or writing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON error while reading or dumping models.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The external compiler rejected the generated source. Its output is
    /// kept verbatim.
    #[error("compilation failed (exit code {status:?}):\n{stdout}{stderr}")]
    Compilation {
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },
    /// The external compiler did not finish in time and was killed.
    #[error("compiler timed out after {0:?}")]
    Timeout(Duration),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<semantics::SemanticError> for PipelineError {
    fn from(e: semantics::SemanticError) -> Self { PipelineError::Codegen(e.into()) }
}

impl From<ir::IrError> for PipelineError {
    fn from(e: ir::IrError) -> Self {
        match e {
            ir::IrError::Io(e) => PipelineError::Io(e),
            ir::IrError::Json(e) => PipelineError::Json(e),
        }
    }
}
