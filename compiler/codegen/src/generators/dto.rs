//! Request and response type models.
//!
//! Request fields follow parameter order exactly. The dispatch body later
//! passes them back positionally, so field `i` always supplies parameter `i`.

use ir::MethodDef;

use crate::model::{DtoPair, FieldModel, RequestTypeModel, ResponseTypeModel};
use crate::utils::{request_type_name, response_type_name, upper_first, RESULT_FIELD};

/// Build the request type for `method`: one field per parameter
pub fn build_request(method: &MethodDef) -> RequestTypeModel {
    let fields = method
        .params
        .iter()
        .map(|p| FieldModel { name: upper_first(&p.name), field_type: p.param_type.clone() })
        .collect();
    RequestTypeModel { name: request_type_name(method), fields }
}

/// Build the response type for `method`: empty for void, else a single `Result`
pub fn build_response(method: &MethodDef) -> ResponseTypeModel {
    let fields = match &method.returns {
        Some(ty) => vec![FieldModel { name: RESULT_FIELD.to_string(), field_type: ty.clone() }],
        None => Vec::new(),
    };
    ResponseTypeModel { name: response_type_name(method), fields }
}

/// Build the request/response pair of every method, in the given order
pub fn build_dtos(methods: &[MethodDef]) -> Vec<DtoPair> {
    methods
        .iter()
        .map(|m| DtoPair { request: build_request(m), response: build_response(m) })
        .collect()
}

#[cfg(test)]
mod tests {
    use ir::TypeRef;

    use super::*;

    #[test]
    fn test_zero_params_zero_fields() {
        let pair = &build_dtos(&[MethodDef::new("Ping")])[0];
        assert_eq!(pair.request.name, "Ping");
        assert!(pair.request.fields.is_empty());
        assert_eq!(pair.response.name, "PingResult");
        assert!(pair.response.fields.is_empty());
    }

    #[test]
    fn test_fields_follow_parameter_order() {
        let method = MethodDef::new("Move")
            .with_param("z", TypeRef::qualified("System", "Int32"))
            .with_param("a", TypeRef::qualified("System", "String"))
            .with_param("m", TypeRef::qualified("System", "Double"))
            .returning(TypeRef::qualified("System", "Boolean"));

        let request = build_request(&method);
        let names: Vec<_> = request.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Z", "A", "M"]);
        assert_eq!(request.fields[1].field_type.full_name(), "System.String");

        let response = build_response(&method);
        assert_eq!(response.fields.len(), 1);
        assert_eq!(response.fields[0].name, "Result");
        assert_eq!(response.fields[0].field_type.full_name(), "System.Boolean");
    }
}
