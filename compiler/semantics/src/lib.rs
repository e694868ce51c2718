#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Semantic analysis over reflected type metadata.
//!
//! Decides which of a type's methods take part in generation and rejects
//! method sets the generator cannot represent.

/// Eligibility rules and the optional method-name filter
pub mod method_selection;

pub use method_selection::{
    select_methods, ExclusionReason, MethodFilter, SelectionReport,
};

/// Errors that can occur during semantic analysis.
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    /// The method-name filter is not a valid regular expression.
    #[error("Invalid method name filter: {0}")]
    InvalidFilter(#[from] regex::Error),
    /// Two eligible methods share a name; generated type names would collide.
    #[error("Duplicate eligible method name: {0}")]
    DuplicateMethod(String),
}

/// Result type for semantic analysis operations.
pub type Result<T> = std::result::Result<T, SemanticError>;
