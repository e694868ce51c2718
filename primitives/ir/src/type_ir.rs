//! Reflected type metadata
//!
//! A [`TypeDef`] is the plain-data rendition of what a reflection facility reports
//! about a type: its name, namespace, the assembly it lives in and every method
//! it exposes together with the binding flags needed to decide eligibility.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or saving reflected metadata
#[derive(Debug, Error)]
pub enum IrError {
    /// Underlying I/O error while reading or writing a metadata file
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The metadata file is not valid JSON for a [`TypeDef`]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type Result<T> = std::result::Result<T, IrError>;

/// Reference to a type by name.
///
/// The generator never inspects the referenced type; it only renders
/// [`TypeRef::full_name`] as an opaque token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Simple type name (e.g. "String")
    pub name: String,
    /// Enclosing namespace (e.g. "System"), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Method visibility as reported by reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Publicly callable
    #[default]
    Public,
    /// Private, protected or internal
    NonPublic,
}

/// A single method parameter. Parameter order within a method is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub param_type: TypeRef,
}

/// A method signature reported for the target type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamDef>,
    /// Return type; `None` means the method returns no value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypeRef>,
    /// Visibility of the method
    #[serde(default)]
    pub visibility: Visibility,
    /// Whether the method is static rather than an instance method
    #[serde(default)]
    pub is_static: bool,
    /// Whether the method is inherited from a base type instead of declared directly
    #[serde(default)]
    pub inherited: bool,
}

/// The reflected description of a type to be wrapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Simple type name
    pub name: String,
    /// Enclosing namespace, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Module or assembly file that defines the type (e.g. "Acme.Services.dll")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
    /// All methods reported by reflection, in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

/// Source of reflected method metadata.
///
/// Anything able to list a type's methods with typed signatures can feed the
/// generator: a live reflection API, a parser, or a pre-built [`TypeDef`].
pub trait ReflectionProvider {
    /// Reference to the reflected type itself
    fn type_ref(&self) -> TypeRef;

    /// Module or assembly that defines the type, if known
    fn assembly(&self) -> Option<&str> { None }

    /// Every method the type exposes, in declaration order, including the
    /// ones that are not eligible for generation
    fn methods(&self) -> &[MethodDef];
}

impl TypeRef {
    /// Create a reference to a type without a namespace
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), namespace: None } }

    /// Create a reference to a type inside `namespace`
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { name: name.into(), namespace: Some(namespace.into()) }
    }

    /// Parse a dotted full name: the segment after the last `.` is the name
    ///
    /// # Examples
    /// ```
    /// use stackwrap_ir::TypeRef;
    /// let t = TypeRef::parse("System.String");
    /// assert_eq!(t.name, "String");
    /// assert_eq!(t.namespace.as_deref(), Some("System"));
    /// ```
    pub fn parse(full_name: &str) -> Self {
        match full_name.rsplit_once('.') {
            Some((ns, name)) if !ns.is_empty() && !name.is_empty() => Self::qualified(ns, name),
            _ => Self::new(full_name),
        }
    }

    /// Namespace-qualified name, as rendered into generated code
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl ParamDef {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, param_type: TypeRef) -> Self {
        Self { name: name.into(), param_type }
    }
}

impl MethodDef {
    /// Create a public instance method with no parameters that returns no value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            visibility: Visibility::Public,
            is_static: false,
            inherited: false,
        }
    }

    /// Append a parameter
    pub fn with_param(mut self, name: impl Into<String>, param_type: TypeRef) -> Self {
        self.params.push(ParamDef::new(name, param_type));
        self
    }

    /// Set the return type
    pub fn returning(mut self, returns: TypeRef) -> Self {
        self.returns = Some(returns);
        self
    }

    /// Set the visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark the method as static
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark the method as inherited from a base type
    pub fn as_inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    /// Whether the method produces a value
    pub fn has_result(&self) -> bool { self.returns.is_some() }

    /// Public, instance, and declared directly on the type
    pub fn is_declared_public_instance(&self) -> bool {
        self.visibility == Visibility::Public && !self.is_static && !self.inherited
    }
}

impl TypeDef {
    /// Create a type description without methods
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), namespace: None, assembly: None, methods: Vec::new() }
    }

    /// Set the namespace
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the defining assembly
    pub fn in_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.assembly = Some(assembly.into());
        self
    }

    /// Append a method
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Namespace-qualified name of this type
    pub fn full_name(&self) -> String { self.type_ref().full_name() }

    /// Load a TypeDef from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let ty: Self = serde_json::from_str(&content)?;
        Ok(ty)
    }

    /// Save this TypeDef to a JSON file with pretty formatting
    pub fn to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        // Ensure file ends with a newline (POSIX standard)
        use std::io::Write;
        writeln!(file)?;
        Ok(())
    }
}

impl ReflectionProvider for TypeDef {
    fn type_ref(&self) -> TypeRef {
        TypeRef { name: self.name.clone(), namespace: self.namespace.clone() }
    }

    fn assembly(&self) -> Option<&str> { self.assembly.as_deref() }

    fn methods(&self) -> &[MethodDef] { &self.methods }
}
