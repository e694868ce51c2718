//! Generation options.
//!
//! [`GenerationOptions`] is the single input of a generation call. It is built
//! through [`GenerationOptionsBuilder`], which refuses to build without a target
//! type and fills every other setting with the framework defaults.

use ir::TypeDef;

use crate::utils::default_wrapper_name;
use crate::{CodegenError, Result};

/// Default base type the facade extends
pub const DEFAULT_SERVICE_BASE: &str = "ServiceStack.ServiceInterface.Service";

/// Default import emitted at the top of the generated source
pub const DEFAULT_IMPORT: &str = "ServiceStack.ServiceInterface";

/// Default namespace for generated declarations
pub const DEFAULT_OUTPUT_NAMESPACE: &str = "ServiceStackGen.Generated";

/// Name shared by every dispatch operation
pub const DEFAULT_DISPATCH_METHOD: &str = "Any";

/// Options for one generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// The type being wrapped
    pub target: TypeDef,
    /// Name of the generated facade class
    pub wrapper_type_name: String,
    /// Regular expression restricting which method names are wrapped
    pub method_name_filter: Option<String>,
    /// Namespace the generated declarations are placed in
    pub output_namespace: String,
    /// Framework base type the facade declares
    pub service_base: String,
    /// Namespaces imported by the generated source
    pub imports: Vec<String>,
    /// Name shared by every dispatch operation
    pub dispatch_method_name: String,
}

impl GenerationOptions {
    /// Options for `target` with every setting at its default
    pub fn new(target: TypeDef) -> Self {
        Self {
            wrapper_type_name: default_wrapper_name(&target.name),
            target,
            method_name_filter: None,
            output_namespace: DEFAULT_OUTPUT_NAMESPACE.to_string(),
            service_base: DEFAULT_SERVICE_BASE.to_string(),
            imports: vec![DEFAULT_IMPORT.to_string()],
            dispatch_method_name: DEFAULT_DISPATCH_METHOD.to_string(),
        }
    }

    /// Create a new builder for GenerationOptions
    pub fn builder() -> GenerationOptionsBuilder { GenerationOptionsBuilder::default() }
}

/// Builder for GenerationOptions
#[derive(Debug, Default)]
pub struct GenerationOptionsBuilder {
    target: Option<TypeDef>,
    wrapper_type_name: Option<String>,
    method_name_filter: Option<String>,
    output_namespace: Option<String>,
    service_base: Option<String>,
    imports: Option<Vec<String>>,
    dispatch_method_name: Option<String>,
}

impl GenerationOptionsBuilder {
    /// Set the type to wrap
    pub fn target(mut self, target: TypeDef) -> Self {
        self.target = Some(target);
        self
    }

    /// Override the facade class name
    pub fn wrapper_type_name(mut self, name: impl Into<String>) -> Self {
        self.wrapper_type_name = Some(name.into());
        self
    }

    /// Restrict generation to methods whose name matches `pattern`
    pub fn method_name_filter(mut self, pattern: impl Into<String>) -> Self {
        self.method_name_filter = Some(pattern.into());
        self
    }

    /// Set the output namespace; an empty string emits no namespace block
    pub fn output_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.output_namespace = Some(namespace.into());
        self
    }

    /// Set the framework base type
    pub fn service_base(mut self, base: impl Into<String>) -> Self {
        self.service_base = Some(base.into());
        self
    }

    /// Replace the imported namespaces
    pub fn imports(mut self, imports: Vec<String>) -> Self {
        self.imports = Some(imports);
        self
    }

    /// Override the dispatch operation name
    pub fn dispatch_method_name(mut self, name: impl Into<String>) -> Self {
        self.dispatch_method_name = Some(name.into());
        self
    }

    /// Build the GenerationOptions
    pub fn build(self) -> Result<GenerationOptions> {
        let target = self.target.ok_or_else(|| {
            CodegenError::InvalidConfiguration("target type is required".to_string())
        })?;
        if target.name.trim().is_empty() {
            return Err(CodegenError::InvalidConfiguration(
                "target type name must not be empty".to_string(),
            ));
        }

        let mut options = GenerationOptions::new(target);
        if let Some(name) = self.wrapper_type_name {
            options.wrapper_type_name = name;
        }
        options.method_name_filter = self.method_name_filter;
        if let Some(ns) = self.output_namespace {
            options.output_namespace = ns;
        }
        if let Some(base) = self.service_base {
            options.service_base = base;
        }
        if let Some(imports) = self.imports {
            options.imports = imports;
        }
        if let Some(name) = self.dispatch_method_name {
            options.dispatch_method_name = name;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GenerationOptions::new(TypeDef::new("Calculator"));
        assert_eq!(options.wrapper_type_name, "CalculatorExpected");
        assert_eq!(options.method_name_filter, None);
        assert_eq!(options.service_base, DEFAULT_SERVICE_BASE);
        assert_eq!(options.imports, vec![DEFAULT_IMPORT.to_string()]);
        assert_eq!(options.dispatch_method_name, "Any");
    }

    #[test]
    fn test_builder_overrides() {
        let options = GenerationOptions::builder()
            .target(TypeDef::new("Calculator"))
            .wrapper_type_name("CalculatorService")
            .method_name_filter("^Get")
            .output_namespace("Acme")
            .service_base("Acme.Base")
            .imports(vec![])
            .dispatch_method_name("Post")
            .build()
            .expect("options should build");
        assert_eq!(options.wrapper_type_name, "CalculatorService");
        assert_eq!(options.method_name_filter.as_deref(), Some("^Get"));
        assert_eq!(options.output_namespace, "Acme");
        assert_eq!(options.service_base, "Acme.Base");
        assert!(options.imports.is_empty());
        assert_eq!(options.dispatch_method_name, "Post");
    }

    #[test]
    fn test_builder_requires_target() {
        let err = GenerationOptions::builder().wrapper_type_name("X").build();
        assert!(matches!(err, Err(CodegenError::InvalidConfiguration(_))));

        let err = GenerationOptions::builder().target(TypeDef::new(" ")).build();
        assert!(matches!(err, Err(CodegenError::InvalidConfiguration(_))));
    }
}
