#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `stackwrap-dispatch` — In-Memory Facade Backend
//!
//! Executes a generated [`DeclarationUnit`] against a live target without
//! going through source text and a compiler. The unit is "loaded" once; each
//! [`Request`] is then routed by type name to its dispatch operation, which
//! forwards the request fields positionally to the [`ServiceTarget`].
//!
//! ## Example
//! ```
//! use codegen::{build_unit, GenerationOptions};
//! use ir::{MethodDef, TypeDef, TypeRef};
//! use serde_json::{json, Value};
//! use stackwrap_dispatch::{DispatchError, LoadedService, Request};
//!
//! let greet = MethodDef::new("Greet")
//!     .with_param("name", TypeRef::new("string"))
//!     .returning(TypeRef::new("string"));
//! let options = GenerationOptions::new(TypeDef::new("Greeter").with_method(greet.clone()));
//! let unit = build_unit(&options, &[greet]);
//!
//! let target = |_: &str, args: Vec<Value>| -> Result<Option<Value>, DispatchError> {
//!     Ok(Some(json!(format!("Hello, {}", args[0].as_str().unwrap_or_default()))))
//! };
//! let mut service = LoadedService::load(unit, target).expect("unit is consistent");
//! let response = service
//!     .any(Request::new("Greet").with_field("Name", json!("Ada")))
//!     .expect("dispatch succeeds")
//!     .expect("Greet returns a value");
//! assert_eq!(response.result(), Some(&json!("Hello, Ada")));
//! ```

use std::collections::HashMap;

use codegen::{DeclarationUnit, DispatchMethod};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors raised while loading a unit or dispatching a request.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    /// No dispatch operation accepts this request type.
    #[error("no dispatch operation accepts request type '{0}'")]
    UnknownRequest(String),

    /// The unit is internally inconsistent and cannot be loaded.
    #[error("invalid declaration unit: {0}")]
    InvalidUnit(String),

    /// The wrapped target failed while handling the call.
    #[error("target error: {0}")]
    Target(String),
}

/// The wrapped instance a facade forwards to
pub trait ServiceTarget {
    /// Call `method` with positional `args`; `None` means no value
    fn invoke(&mut self, method: &str, args: Vec<Value>) -> Result<Option<Value>>;
}

impl<F> ServiceTarget for F
where
    F: FnMut(&str, Vec<Value>) -> Result<Option<Value>>,
{
    fn invoke(&mut self, method: &str, args: Vec<Value>) -> Result<Option<Value>> {
        self(method, args)
    }
}

/// An instance of a generated request type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Request type name
    pub type_name: String,
    /// Field values by field name
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Request {
    /// An empty request of type `type_name`
    pub fn new(type_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), fields: Map::new() }
    }

    /// Set a field
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

/// An instance of a generated response type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response type name
    pub type_name: String,
    /// Field values by field name
    pub fields: Map<String, Value>,
}

impl Response {
    /// The `Result` field, if present
    pub fn result(&self) -> Option<&Value> { self.fields.get(codegen::utils::RESULT_FIELD) }
}

/// A facade loaded from a [`DeclarationUnit`] and bound to a target
pub struct LoadedService<T> {
    name: String,
    routes: HashMap<String, DispatchMethod>,
    target: T,
}

impl<T: ServiceTarget> LoadedService<T> {
    /// Bind `unit` to `target`.
    ///
    /// Fails if a dispatch operation has no matching request/response pair or
    /// two operations accept the same request type.
    pub fn load(unit: DeclarationUnit, target: T) -> Result<Self> {
        let mut routes = HashMap::new();
        for dispatch in unit.wrapper.dispatch_methods.iter() {
            let pair = unit.dto(&dispatch.request_type_name).ok_or_else(|| {
                DispatchError::InvalidUnit(format!(
                    "no request type '{}' for method '{}'",
                    dispatch.request_type_name, dispatch.method_name
                ))
            })?;
            if pair.response.name != dispatch.response_type_name {
                return Err(DispatchError::InvalidUnit(format!(
                    "method '{}' returns '{}' but its pair declares '{}'",
                    dispatch.method_name, dispatch.response_type_name, pair.response.name
                )));
            }
            if routes.insert(dispatch.request_type_name.clone(), dispatch.clone()).is_some() {
                return Err(DispatchError::InvalidUnit(format!(
                    "request type '{}' is accepted twice",
                    dispatch.request_type_name
                )));
            }
        }
        logging::trace(
            "dispatch",
            &format!("loaded {} with {} operations", unit.wrapper.name, routes.len()),
        );
        Ok(Self { name: unit.wrapper.name, routes, target })
    }

    /// Facade class name
    pub fn name(&self) -> &str { &self.name }

    /// Request types this facade accepts
    pub fn request_types(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Dispatch `request` to the wrapped target.
    ///
    /// Request fields are passed in declaration order; absent fields are
    /// passed as `null`. Void methods yield `None` after the call completes.
    pub fn any(&mut self, request: Request) -> Result<Option<Response>> {
        let dispatch = self
            .routes
            .get(&request.type_name)
            .ok_or_else(|| DispatchError::UnknownRequest(request.type_name.clone()))?;

        let Request { mut fields, .. } = request;
        let args: Vec<Value> =
            dispatch.arguments.iter().map(|f| fields.remove(f).unwrap_or(Value::Null)).collect();
        if !fields.is_empty() {
            debug!(
                target: "stackwrap",
                request = %dispatch.request_type_name,
                ignored = ?fields.keys().collect::<Vec<_>>(),
                "unknown request fields ignored"
            );
        }

        let value = self.target.invoke(&dispatch.method_name, args)?;
        if !dispatch.has_result {
            return Ok(None);
        }

        let mut fields = Map::new();
        fields.insert(codegen::utils::RESULT_FIELD.to_string(), value.unwrap_or(Value::Null));
        Ok(Some(Response { type_name: dispatch.response_type_name.clone(), fields }))
    }

    /// Consume the facade and return the wrapped target
    pub fn into_target(self) -> T { self.target }
}
