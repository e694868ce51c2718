//! C# emitter for the ServiceStack convention.
//!
//! Layout of the emitted source:
//!
//! ```text
//! using ServiceStack.ServiceInterface;
//!
//! namespace ServiceStackGen.Generated
//! {
//!     public class GreeterExpected : ServiceStack.ServiceInterface.Service
//!     {
//!         private Demo.Greeter greeter;
//!         ...
//!     }
//!
//!     public class Greet { ... }
//!
//!     public class GreetResult { ... }
//! }
//! ```
//!
//! Type names are written as opaque tokens. Locals and fields derived from
//! type names are prefixed with `@` when they collide with a C# keyword.

use crate::code_writer::CodeWriter;
use crate::model::{DeclarationUnit, DispatchMethod, FieldModel, WrapperClassModel};
use crate::utils::{lower_first, RESULT_FIELD};
use crate::{cw_write, cw_writeln, CodeEmitter, Result};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Escape `ident` with `@` if it is a reserved word
pub fn escape_identifier(ident: &str) -> String {
    if KEYWORDS.contains(&ident) {
        format!("@{}", ident)
    } else {
        ident.to_string()
    }
}

/// Renders a [`DeclarationUnit`] as a single C# compilation unit
#[derive(Debug, Clone)]
pub struct CSharpEmitter {
    indent_spaces: usize,
}

impl Default for CSharpEmitter {
    fn default() -> Self { Self { indent_spaces: 4 } }
}

impl CSharpEmitter {
    /// Emitter indenting with `indent_spaces` spaces per level
    pub fn with_indent(indent_spaces: usize) -> Self { Self { indent_spaces } }

    fn write_members(w: &mut CodeWriter<&mut String>, unit: &DeclarationUnit) -> std::fmt::Result {
        write_wrapper(w, &unit.wrapper)?;
        for pair in &unit.dtos {
            w.blank_line()?;
            write_data_class(w, &pair.request.name, &pair.request.fields)?;
            w.blank_line()?;
            write_data_class(w, &pair.response.name, &pair.response.fields)?;
        }
        Ok(())
    }
}

impl CodeEmitter for CSharpEmitter {
    fn emit(&self, unit: &DeclarationUnit) -> Result<String> {
        let mut out = String::new();
        let mut w = CodeWriter::with_indent_spaces(&mut out, self.indent_spaces);

        for import in &unit.imports {
            cw_writeln!(w, "using {};", import)?;
        }
        if !unit.imports.is_empty() {
            w.blank_line()?;
        }

        if unit.namespace.is_empty() {
            Self::write_members(&mut w, unit)?;
        } else {
            w.block(&format!("namespace {}", unit.namespace), |w| Self::write_members(w, unit))?;
        }
        Ok(out)
    }

    fn file_extension(&self) -> &'static str { "cs" }
}

fn write_wrapper(w: &mut CodeWriter<&mut String>, wrapper: &WrapperClassModel) -> std::fmt::Result {
    let field = escape_identifier(&wrapper.wrapped_field_name);
    let wrapped_type = wrapper.wrapped_type.full_name();
    let header = if wrapper.base_type.is_empty() {
        format!("public class {}", wrapper.name)
    } else {
        format!("public class {} : {}", wrapper.name, wrapper.base_type)
    };

    w.block(&header, |w| {
        cw_writeln!(w, "private {} {};", wrapped_type, field)?;
        w.blank_line()?;
        w.block(&format!("public {}({} {})", wrapper.name, wrapped_type, field), |w| {
            cw_writeln!(w, "this.{} = {};", field, field)
        })?;
        for dispatch in &wrapper.dispatch_methods {
            w.blank_line()?;
            write_dispatch(w, &field, dispatch)?;
        }
        Ok(())
    })
}

fn write_dispatch(
    w: &mut CodeWriter<&mut String>,
    field: &str,
    dispatch: &DispatchMethod,
) -> std::fmt::Result {
    let request = escape_identifier(&dispatch.request_param_name);
    let header = format!(
        "public virtual {} {}({} {})",
        dispatch.response_type_name, dispatch.name, dispatch.request_type_name, request
    );

    w.block(&header, |w| {
        let write_call = |w: &mut CodeWriter<&mut String>| -> std::fmt::Result {
            cw_write!(w, "this.{}.{}", field, dispatch.method_name)?;
            w.write_parens(|w| {
                w.write_separated(&dispatch.arguments, ", ", |w, arg| {
                    cw_write!(w, "{}.{}", request, arg)
                })
            })?;
            w.writeln(";")
        };

        if dispatch.has_result {
            let mut local = escape_identifier(&lower_first(&dispatch.response_type_name));
            if local == request || local == field {
                local.push('_');
            }
            cw_writeln!(w, "var {} = new {}();", local, dispatch.response_type_name)?;
            cw_write!(w, "{}.{} = ", local, RESULT_FIELD)?;
            write_call(w)?;
            cw_writeln!(w, "return {};", local)
        } else {
            write_call(w)?;
            w.writeln("return null;")
        }
    })
}

fn write_data_class(
    w: &mut CodeWriter<&mut String>,
    name: &str,
    fields: &[FieldModel],
) -> std::fmt::Result {
    w.block(&format!("public class {}", name), |w| {
        for field in fields {
            cw_writeln!(
                w,
                "public virtual {} {} {{ get; set; }}",
                field.field_type.full_name(),
                escape_identifier(&field.name)
            )?;
        }
        Ok(())
    })
}
