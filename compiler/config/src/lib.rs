#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Stackwrap Configuration
//!
//! This crate provides configuration management for Stackwrap.
//! It handles loading, saving, and managing configuration files that specify:
//! - Generation settings (wrapper name, method filter, namespace, service base)
//! - Logging configuration
//! - Input and output locations
//! - The external compiler used by the optional compile step
//!
//! Configuration is stored in TOML format. Every field is optional or has a
//! default, so a partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Assemblies every compile of a generated facade references
pub const DEFAULT_REFERENCES: &[&str] =
    &["ServiceStack.dll", "ServiceStack.ServiceInterface.dll", "ServiceStack.Interfaces.dll"];

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What to generate and how to name it
    pub generation: GenerationSettings,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Input and output locations
    pub codegen: CodegenConfig,
    /// External compiler used by the compile step (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<CompilerConfig>,
}

/// Generation settings
///
/// Unset values fall back to the generator's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Name of the generated facade; defaults to `<Target>Expected`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper_type_name: Option<String>,
    /// Regular expression restricting which method names are wrapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_name_filter: Option<String>,
    /// Namespace the generated declarations are placed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_namespace: Option<String>,
    /// Base type the facade nominally extends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_base: Option<String>,
    /// Namespaces imported at the top of the generated source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<String>>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log file path (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Code generation input/output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Path to the reflected type metadata (JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<PathBuf>,
    /// Where to write generated sources
    pub output_dir: PathBuf,
}

/// External compiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Compiler executable (e.g. "mcs", "csc")
    pub program: String,
    /// Extra arguments passed before the source file
    #[serde(default)]
    pub args: Vec<String>,
    /// Assemblies to reference
    #[serde(default = "default_references")]
    pub references: Vec<String>,
    /// Kill the compiler after this many seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_references() -> Vec<String> {
    DEFAULT_REFERENCES.iter().map(|r| r.to_string()).collect()
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the configuration at `path`, failing with [`ConfigError::NotFound`]
    /// instead of an I/O error when the file does not exist
    pub fn load_existing<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            return Err(ConfigError::NotFound(path.as_ref().to_path_buf()));
        }
        Self::from_file(path)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/stackwrap/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("stackwrap");
        Ok(config_dir.join("config.toml"))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

impl Default for CodegenConfig {
    fn default() -> Self { Self { input_path: None, output_dir: PathBuf::from("generated") } }
}

impl CompilerConfig {
    /// Compiler config for `program` with the default references
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            references: default_references(),
            timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_from_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let toml_content = r#"
            [generation]
            wrapper_type_name = "CalculatorService"
            method_name_filter = "^Get"
            output_namespace = "Acme.Services"
            service_base = "Acme.ServiceBase"
            imports = ["Acme", "System"]

            [logging]
            level = "debug"
            file = "stackwrap.log"

            [codegen]
            input_path = "types/calculator.json"
            output_dir = "out"

            [compiler]
            program = "mcs"
            args = ["-target:library"]
            timeout_secs = 30
        "#;
        fs::write(&temp_file, toml_content)
            .expect("Failed to write TOML content to temporary file");

        let loaded =
            Config::from_file(&temp_file).expect("Failed to load config from temporary file");
        assert_eq!(loaded.generation.wrapper_type_name.as_deref(), Some("CalculatorService"));
        assert_eq!(loaded.generation.method_name_filter.as_deref(), Some("^Get"));
        assert_eq!(loaded.generation.output_namespace.as_deref(), Some("Acme.Services"));
        assert_eq!(loaded.generation.service_base.as_deref(), Some("Acme.ServiceBase"));
        assert_eq!(
            loaded.generation.imports,
            Some(vec!["Acme".to_string(), "System".to_string()])
        );
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.logging.file, Some(PathBuf::from("stackwrap.log")));
        assert_eq!(loaded.codegen.input_path, Some(PathBuf::from("types/calculator.json")));
        assert_eq!(loaded.codegen.output_dir, PathBuf::from("out"));

        let compiler = loaded.compiler.expect("compiler table should be present");
        assert_eq!(compiler.program, "mcs");
        assert_eq!(compiler.args, vec!["-target:library".to_string()]);
        assert_eq!(compiler.references, default_references());
        assert_eq!(compiler.timeout_secs, Some(30));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&temp_file, "[generation]\nmethod_name_filter = \"Foo\"\n")
            .expect("Failed to write TOML content");

        let loaded = Config::from_file(&temp_file).expect("Failed to load partial config");
        assert_eq!(loaded.generation.method_name_filter.as_deref(), Some("Foo"));
        assert_eq!(loaded.generation.service_base, None);
        assert_eq!(loaded.generation.output_namespace, None);
        assert_eq!(loaded.logging, LoggingConfig::default());
        assert!(loaded.compiler.is_none());
    }

    #[test]
    fn test_from_file_errors() {
        let result = Config::from_file("nonexistent_file.toml");
        match result.expect_err("Expected error for nonexistent file") {
            ConfigError::FileRead(_) => {}
            other => panic!("Expected FileRead error, got {:?}", other),
        }

        let result = Config::load_existing("nonexistent_file.toml");
        match result.expect_err("Expected error for nonexistent file") {
            ConfigError::NotFound(path) => assert_eq!(path, PathBuf::from("nonexistent_file.toml")),
            other => panic!("Expected NotFound error, got {:?}", other),
        }

        let temp_file =
            NamedTempFile::new().expect("Failed to create temporary file for parse error test");
        fs::write(&temp_file, "invalid toml content")
            .expect("Failed to write invalid TOML content");
        match Config::from_file(&temp_file).expect_err("Expected parse error for invalid TOML") {
            ConfigError::Parse(_) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_save() {
        let mut config = Config::default();
        config.compiler = Some(CompilerConfig::new("csc"));
        let temp_file =
            NamedTempFile::new().expect("Failed to create temporary file for save test");

        config.save(&temp_file).expect("Failed to save config");
        let contents = fs::read_to_string(&temp_file).expect("Failed to read saved config file");
        assert!(contents.contains("csc"));
        assert!(contents.contains("ServiceStack.Interfaces.dll"));

        let reloaded = Config::from_file(&temp_file).expect("Failed to reload saved config");
        assert_eq!(reloaded, config);

        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let non_existent_subdir = temp_dir.path().join("nonexistent").join("config.toml");
        match config.save(&non_existent_subdir).expect_err("Expected file write error") {
            ConfigError::FileRead(_) => (),
            other => panic!("Expected FileRead error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path().expect("Failed to get default config path");
        assert!(path.ends_with("stackwrap/config.toml"));
    }

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.generation.wrapper_type_name, None);
        assert_eq!(config.generation.method_name_filter, None);
        assert_eq!(config.generation.imports, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, None);
        assert_eq!(config.codegen.output_dir, PathBuf::from("generated"));
        assert!(config.compiler.is_none());
    }
}
