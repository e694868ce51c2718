#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for service facades.
//!
//! This crate turns the eligible methods of a reflected type into a
//! [`DeclarationUnit`]: one request and one response type per method plus a
//! facade class with a single dispatch operation per method. Emitters then
//! render the unit as source text for the target framework.
//!
//! Method selection lives in the `semantics` crate; orchestration and file
//! output live in the pipeline.

pub mod generators;

/// Sub-crate: **`code_writer`**
///
/// Indentation-aware writer used by the emitters.
pub mod code_writer;

/// Sub-crate: **`model`**
///
/// Declaration models handed from the builders to the emitters.
pub mod model;

/// Sub-crate: **`options`**
///
/// Generation options and their builder.
pub mod options;

/// Sub-crate: **`utils`**
///
/// Naming policy and text helpers.
pub mod utils;

use thiserror::Error;

pub use generators::csharp::CSharpEmitter;
pub use generators::{build_unit, dto, facade};
pub use model::{
    DeclarationUnit, DispatchMethod, DtoPair, FieldModel, RequestTypeModel, ResponseTypeModel,
    WrapperClassModel,
};
pub use options::{GenerationOptions, GenerationOptionsBuilder};

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The generation options are incomplete or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Method selection rejected the target type or the filter.
    #[error(transparent)]
    Semantic(#[from] semantics::SemanticError),
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Renders a [`DeclarationUnit`] as source text in one target grammar.
///
/// Implementations must be deterministic: the same unit always renders the
/// same text. No semantic validation happens here; type names are emitted as
/// opaque tokens and rejecting bad output is left to the downstream compiler.
pub trait CodeEmitter {
    /// Render the whole unit as a single source blob.
    fn emit(&self, unit: &DeclarationUnit) -> Result<String>;

    /// File extension for emitted sources, without the dot.
    fn file_extension(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_from_underlying_failures() {
        let err: CodegenError = semantics::SemanticError::DuplicateMethod("Add".to_string()).into();
        assert!(matches!(err, CodegenError::Semantic(_)));
        assert_eq!(err.to_string(), "Duplicate eligible method name: Add");

        let err: CodegenError = std::fmt::Error.into();
        assert!(matches!(err, CodegenError::Fmt(_)));

        let err = CodegenError::InvalidConfiguration("target type is required".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: target type is required");
    }
}
