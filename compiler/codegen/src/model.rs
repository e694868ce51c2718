//! Declaration models
//!
//! Every model is built once per generation call and never mutated afterwards.
//! Each eligible method contributes exactly one [`RequestTypeModel`], one
//! [`ResponseTypeModel`] and one [`DispatchMethod`], all keyed by the method name.

use ir::TypeRef;
use serde::{Deserialize, Serialize};

/// A property on a generated data type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldModel {
    /// Property name
    pub name: String,
    /// Property type, rendered verbatim
    pub field_type: TypeRef,
}

/// Data type carrying one field per parameter of the wrapped method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTypeModel {
    /// Type name (the method name)
    pub name: String,
    /// One field per parameter, in parameter order
    pub fields: Vec<FieldModel>,
}

/// Data type carrying the wrapped method's return value, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTypeModel {
    /// Type name (the method name followed by `Result`)
    pub name: String,
    /// Empty for void methods, otherwise the single `Result` field
    pub fields: Vec<FieldModel>,
}

/// The request/response pair generated for one method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtoPair {
    /// Request type
    pub request: RequestTypeModel,
    /// Response type
    pub response: ResponseTypeModel,
}

/// One dispatch operation on the facade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchMethod {
    /// Dispatch operation name, identical for every method (e.g. `Any`)
    pub name: String,
    /// Name of the wrapped method the operation forwards to
    pub method_name: String,
    /// Parameter type of the operation
    pub request_type_name: String,
    /// Parameter name of the operation
    pub request_param_name: String,
    /// Declared return type of the operation
    pub response_type_name: String,
    /// Request fields passed positionally to the wrapped method
    pub arguments: Vec<String>,
    /// Whether the wrapped method returns a value
    pub has_result: bool,
}

/// The facade class wrapping the target instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperClassModel {
    /// Class name
    pub name: String,
    /// Framework base type, emitted verbatim
    pub base_type: String,
    /// Type of the wrapped instance
    pub wrapped_type: TypeRef,
    /// Name of the field (and constructor parameter) holding the wrapped instance
    pub wrapped_field_name: String,
    /// One dispatch operation per eligible method, in selection order
    pub dispatch_methods: Vec<DispatchMethod>,
}

/// Everything one generation call produces, ready to be emitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationUnit {
    /// Namespace the declarations live in; empty means none
    pub namespace: String,
    /// Namespaces imported by the generated source
    pub imports: Vec<String>,
    /// The facade class
    pub wrapper: WrapperClassModel,
    /// Request/response pairs, in selection order
    pub dtos: Vec<DtoPair>,
}

impl DeclarationUnit {
    /// Find the request/response pair for `request_type_name`
    pub fn dto(&self, request_type_name: &str) -> Option<&DtoPair> {
        self.dtos.iter().find(|d| d.request.name == request_type_name)
    }

    /// Find the dispatch operation accepting `request_type_name`
    pub fn dispatch_for(&self, request_type_name: &str) -> Option<&DispatchMethod> {
        self.wrapper.dispatch_methods.iter().find(|d| d.request_type_name == request_type_name)
    }
}
