//! Pipeline entry points.
//!
//! Every call is a pure function of its options: select the eligible methods,
//! build the request/response pairs and the facade, then render the unit.

use std::fs;
use std::path::{Path, PathBuf};

use codegen::utils::clean_generated_source;
use codegen::{build_unit, CSharpEmitter, CodeEmitter, DeclarationUnit, GenerationOptions};
use ir::TypeDef;
use semantics::{MethodFilter, SelectionReport};
use tracing::debug;

use crate::compile::ExternalCompiler;
use crate::Result;

/// Select the eligible methods of the target and build the declaration unit
pub fn generate_unit(options: &GenerationOptions) -> Result<DeclarationUnit> {
    let filter = options.method_name_filter.as_deref().map(MethodFilter::new).transpose()?;
    let report = SelectionReport::build(&options.target, filter.as_ref())?;

    for (name, reason) in &report.excluded {
        debug!(target: "stackwrap", method = %name, reason = reason.as_str(), "method excluded");
    }
    logging::trace(
        "pipeline",
        &format!(
            "selected {} of {} methods on {}",
            report.eligible.len(),
            options.target.methods.len(),
            options.target.full_name()
        ),
    );

    Ok(build_unit(options, &report.eligible))
}

/// Generate the C# source for `options`
pub fn generate(options: &GenerationOptions) -> Result<String> {
    let unit = generate_unit(options)?;
    let source = CSharpEmitter::default().emit(&unit)?;
    logging::trace(
        "pipeline",
        &format!("emitted {} ({} bytes)", options.wrapper_type_name, source.len()),
    );
    Ok(source)
}

/// Generate the C# source for `target` with default options
pub fn generate_for(target: TypeDef) -> Result<String> {
    generate(&GenerationOptions::builder().target(target).build()?)
}

/// Write `source` to `out_dir/file_name`, creating the directory if needed.
///
/// Trailing whitespace is trimmed from every line and the file ends with a
/// single newline.
pub fn write_generated<P: AsRef<Path>>(
    out_dir: P,
    file_name: &str,
    source: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(&out_dir)?;
    let path = out_dir.as_ref().join(file_name);
    fs::write(&path, clean_generated_source(source).as_bytes())?;
    logging::trace("pipeline", &format!("wrote {}", path.display()));
    Ok(path)
}

/// Generate the facade for `options` and hand it to `compiler`.
///
/// The target's own assembly, when known, is referenced in addition to the
/// compiler's configured references. Returns the path of the built artifact.
pub fn compile_target(
    options: &GenerationOptions,
    compiler: &ExternalCompiler,
    work_dir: &Path,
) -> Result<PathBuf> {
    let source = generate(options)?;
    let mut compiler = compiler.clone();
    if let Some(assembly) = &options.target.assembly {
        compiler = compiler.with_reference(assembly.clone());
    }
    compiler.compile(&options.wrapper_type_name, &source, work_dir)
}
