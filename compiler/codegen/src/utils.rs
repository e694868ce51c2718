// codegen/src/utils.rs

use ir::{MethodDef, TypeRef};

/// Suffix appended to a method name to name its response type
pub const RESPONSE_SUFFIX: &str = "Result";

/// Suffix appended to the target type name to name the default facade
pub const WRAPPER_SUFFIX: &str = "Expected";

/// Name of the single field carried by a non-void response type
pub const RESULT_FIELD: &str = "Result";

/// Lowercase only the first character
///
/// # Examples
/// ```
/// use stackwrap_codegen::utils::lower_first;
/// assert_eq!(lower_first("GetString"), "getString");
/// assert_eq!(lower_first("URLLoader"), "uRLLoader");
/// ```
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Uppercase only the first character
///
/// # Examples
/// ```
/// use stackwrap_codegen::utils::upper_first;
/// assert_eq!(upper_first("arg1"), "Arg1");
/// assert_eq!(upper_first("name"), "Name");
/// ```
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Request type name: the method name, unchanged
pub fn request_type_name(method: &MethodDef) -> String { method.name.clone() }

/// Response type name: the method name followed by `Result`
pub fn response_type_name(method: &MethodDef) -> String {
    format!("{}{}", method.name, RESPONSE_SUFFIX)
}

/// Name of the facade field holding the wrapped instance
pub fn wrapper_field_name(ty: &TypeRef) -> String { lower_first(&ty.name) }

/// Default facade name for a target type
pub fn default_wrapper_name(type_name: &str) -> String {
    format!("{}{}", type_name, WRAPPER_SUFFIX)
}

/// Drop all whitespace; generated sources are compared in this form
pub fn strip_whitespace(src: &str) -> String { src.chars().filter(|c| !c.is_whitespace()).collect() }

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<String> = src.lines().map(|l| l.trim_end().to_string()).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
