//! Facade class model.

use ir::{MethodDef, ReflectionProvider};

use crate::generators::dto::build_request;
use crate::model::{DispatchMethod, WrapperClassModel};
use crate::options::GenerationOptions;
use crate::utils::{lower_first, request_type_name, response_type_name, wrapper_field_name};

/// Build the dispatch operation forwarding to `method`
pub fn build_dispatch(dispatch_method_name: &str, method: &MethodDef) -> DispatchMethod {
    let request_type_name = request_type_name(method);
    let arguments = build_request(method).fields.into_iter().map(|f| f.name).collect();
    DispatchMethod {
        name: dispatch_method_name.to_string(),
        method_name: method.name.clone(),
        request_param_name: lower_first(&request_type_name),
        request_type_name,
        response_type_name: response_type_name(method),
        arguments,
        has_result: method.has_result(),
    }
}

/// Build the facade class for the selected `methods`
pub fn build_wrapper(options: &GenerationOptions, methods: &[MethodDef]) -> WrapperClassModel {
    let wrapped_type = options.target.type_ref();
    WrapperClassModel {
        name: options.wrapper_type_name.clone(),
        base_type: options.service_base.clone(),
        wrapped_field_name: wrapper_field_name(&wrapped_type),
        wrapped_type,
        dispatch_methods: methods
            .iter()
            .map(|m| build_dispatch(&options.dispatch_method_name, m))
            .collect(),
    }
}
