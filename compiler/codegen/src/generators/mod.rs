//! Model builders and emitters.
//!
//! The builders are pure functions of the options and the selected methods;
//! the emitters render the resulting [`DeclarationUnit`] as text.

/// Request and response type models
pub mod dto;

/// Facade class model
pub mod facade;

/// C# rendering for the ServiceStack convention
pub mod csharp;

use ir::MethodDef;

use crate::model::DeclarationUnit;
use crate::options::GenerationOptions;

/// Compose the declaration unit for the already selected `methods`
pub fn build_unit(options: &GenerationOptions, methods: &[MethodDef]) -> DeclarationUnit {
    DeclarationUnit {
        namespace: options.output_namespace.clone(),
        imports: options.imports.clone(),
        wrapper: facade::build_wrapper(options, methods),
        dtos: dto::build_dtos(methods),
    }
}
