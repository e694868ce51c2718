#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Helpers behind the `stackwrap` command line.
//!
//! Flags always win over the configuration file, which wins over the
//! generator's built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use codegen::GenerationOptions;
use config::{CompilerConfig, Config};
use ir::TypeDef;
use pipeline::ExternalCompiler;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Type metadata could not be loaded.
    #[error("failed to load type metadata from '{path}': {source}")]
    Input {
        /// Metadata file
        path: PathBuf,
        /// Underlying error
        source: ir::IrError,
    },
    /// Generation, output or compilation failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    /// Options were rejected by the generator.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// Logging could not be initialised.
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
    /// I/O error while writing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON error while dumping the model.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Generation settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct GenerationOverrides {
    /// `--wrapper-name`
    pub wrapper_type_name: Option<String>,
    /// `--filter`
    pub method_name_filter: Option<String>,
    /// `--namespace`
    pub output_namespace: Option<String>,
}

/// Load `explicit` if given (it must exist), otherwise the default config
/// file if present, otherwise the defaults
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::load_existing(path)?);
    }
    match Config::default_path() {
        Ok(path) if path.exists() => Ok(Config::from_file(path)?),
        _ => Ok(Config::default()),
    }
}

/// Resolve the metadata file from the flag or the config
pub fn resolve_input(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    flag.or_else(|| config.codegen.input_path.clone()).ok_or_else(|| {
        CliError::Message(
            "no input given: pass --input or set codegen.input_path in the config".to_string(),
        )
    })
}

/// Load the reflected type at `path`
pub fn load_target(path: &Path) -> Result<TypeDef> {
    TypeDef::from_file(path).map_err(|source| CliError::Input { path: path.to_path_buf(), source })
}

/// Combine the target, config settings and flag overrides into options
pub fn build_options(
    target: TypeDef,
    config: &Config,
    overrides: &GenerationOverrides,
) -> Result<GenerationOptions> {
    let settings = &config.generation;
    let mut builder = GenerationOptions::builder().target(target);

    if let Some(name) =
        overrides.wrapper_type_name.as_ref().or(settings.wrapper_type_name.as_ref())
    {
        builder = builder.wrapper_type_name(name.clone());
    }
    if let Some(filter) =
        overrides.method_name_filter.as_ref().or(settings.method_name_filter.as_ref())
    {
        builder = builder.method_name_filter(filter.clone());
    }
    if let Some(ns) = overrides.output_namespace.as_ref().or(settings.output_namespace.as_ref()) {
        builder = builder.output_namespace(ns.clone());
    }
    if let Some(base) = &settings.service_base {
        builder = builder.service_base(base.clone());
    }
    if let Some(imports) = &settings.imports {
        builder = builder.imports(imports.clone());
    }
    Ok(builder.build()?)
}

/// Build the external compiler from the `--compiler` flag or the
/// `[compiler]` table, then apply extra references and the timeout flag
pub fn build_compiler(
    program: Option<String>,
    config: &Config,
    references: &[String],
    timeout_secs: Option<u64>,
) -> Result<ExternalCompiler> {
    let base = match (program, &config.compiler) {
        (Some(program), Some(table)) => CompilerConfig { program, ..table.clone() },
        (Some(program), None) => CompilerConfig::new(program),
        (None, Some(table)) => table.clone(),
        (None, None) => {
            return Err(CliError::Message(
                "no compiler given: pass --compiler or add a [compiler] table to the config"
                    .to_string(),
            ))
        }
    };

    let mut compiler = ExternalCompiler::new(base.program)
        .with_args(base.args)
        .with_references(base.references);
    for reference in references {
        compiler = compiler.with_reference(reference.clone());
    }
    if let Some(secs) = timeout_secs.or(base.timeout_secs) {
        compiler = compiler.with_timeout(Duration::from_secs(secs));
    }
    Ok(compiler)
}

#[cfg(test)]
mod tests {
    use config::GenerationSettings;

    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.generation = GenerationSettings {
            wrapper_type_name: Some("FromConfig".to_string()),
            method_name_filter: Some("^Set".to_string()),
            output_namespace: Some("Config.Ns".to_string()),
            service_base: Some("Acme.Base".to_string()),
            imports: Some(vec!["Acme".to_string()]),
        };
        let overrides = GenerationOverrides {
            wrapper_type_name: Some("FromFlag".to_string()),
            method_name_filter: None,
            output_namespace: Some("Flag.Ns".to_string()),
        };

        let options =
            build_options(TypeDef::new("Calculator"), &config, &overrides).expect("options");
        assert_eq!(options.wrapper_type_name, "FromFlag");
        assert_eq!(options.method_name_filter.as_deref(), Some("^Set"));
        assert_eq!(options.output_namespace, "Flag.Ns");
        assert_eq!(options.service_base, "Acme.Base");
        assert_eq!(options.imports, vec!["Acme".to_string()]);
    }

    #[test]
    fn test_defaults_without_config() {
        let options =
            build_options(TypeDef::new("Calculator"), &Config::default(), &Default::default())
                .expect("options");
        assert_eq!(options.wrapper_type_name, "CalculatorExpected");
        assert_eq!(options.output_namespace, "ServiceStackGen.Generated");
    }

    #[test]
    fn test_resolve_input() {
        let mut config = Config::default();
        assert!(resolve_input(None, &config).is_err());

        config.codegen.input_path = Some(PathBuf::from("from-config.json"));
        assert_eq!(
            resolve_input(None, &config).expect("config input"),
            PathBuf::from("from-config.json")
        );
        assert_eq!(
            resolve_input(Some(PathBuf::from("flag.json")), &config).expect("flag input"),
            PathBuf::from("flag.json")
        );
    }

    #[test]
    fn test_build_compiler() {
        assert!(build_compiler(None, &Config::default(), &[], None).is_err());

        let mut config = Config::default();
        let mut table = CompilerConfig::new("mcs");
        table.timeout_secs = Some(30);
        config.compiler = Some(table);

        let compiler = build_compiler(Some("csc".to_string()), &config, &["Extra.dll".to_string()], None)
            .expect("compiler");
        assert_eq!(compiler.program, "csc");
        assert_eq!(compiler.timeout, Some(Duration::from_secs(30)));
        assert!(compiler.references.contains(&"Extra.dll".to_string()));
        assert!(compiler.references.contains(&"ServiceStack.dll".to_string()));

        let compiler = build_compiler(None, &config, &[], Some(5)).expect("compiler");
        assert_eq!(compiler.program, "mcs");
        assert_eq!(compiler.timeout, Some(Duration::from_secs(5)));
    }
}
