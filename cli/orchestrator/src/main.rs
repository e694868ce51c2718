//! Stackwrap CLI
//!
//! Generates ServiceStack facades from reflected type metadata, dumps the
//! intermediate model, or hands the generated source to a C# compiler.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use stackwrap_cli::{
    build_compiler, build_options, load_config, load_target, resolve_input, GenerationOverrides,
    Result,
};
use tracing::info;

/// Command-line interface configuration for stackwrap.
#[derive(Parser, Debug)]
#[command(name = "stackwrap", about = "ServiceStack facade generator", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Configuration file (defaults to the user config file, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level or filter directive (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

/// Target selection shared by every command.
#[derive(Args, Debug)]
struct TargetArgs {
    /// Reflected type metadata (JSON)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Regular expression restricting which methods are wrapped
    #[arg(long)]
    filter: Option<String>,
    /// Name of the generated facade
    #[arg(long)]
    wrapper_name: Option<String>,
    /// Namespace for generated declarations ("" for none)
    #[arg(long)]
    namespace: Option<String>,
}

/// Available stackwrap commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the facade source
    Generate {
        #[command(flatten)]
        target: TargetArgs,
        /// Write `<Wrapper>.cs` into this directory instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write the declaration model as JSON
    DumpModel {
        #[command(flatten)]
        target: TargetArgs,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate the facade and compile it with an external compiler
    Compile {
        #[command(flatten)]
        target: TargetArgs,
        /// Compiler executable (overrides the config file)
        #[arg(long)]
        compiler: Option<String>,
        /// Working directory for the source and the artifact
        #[arg(long)]
        work_dir: Option<PathBuf>,
        /// Additional assembly reference (repeatable)
        #[arg(long = "reference")]
        references: Vec<String>,
        /// Kill the compiler after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init(level, config.logging.file.as_deref())?;

    let options_for = |target: TargetArgs| -> Result<codegen::GenerationOptions> {
        let input = resolve_input(target.input, &config)?;
        let overrides = GenerationOverrides {
            wrapper_type_name: target.wrapper_name,
            method_name_filter: target.filter,
            output_namespace: target.namespace,
        };
        build_options(load_target(&input)?, &config, &overrides)
    };

    match cli.cmd {
        Commands::Generate { target, output } => {
            let options = options_for(target)?;
            let source = pipeline::generate(&options)?;
            match output {
                Some(dir) => {
                    let file_name = format!("{}.cs", options.wrapper_type_name);
                    let path = pipeline::write_generated(&dir, &file_name, &source)?;
                    info!(target: "stackwrap", path = %path.display(), "facade written");
                }
                None => print!("{}", source),
            }
        }
        Commands::DumpModel { target, output } => {
            let unit = pipeline::generate_unit(&options_for(target)?)?;
            let json = serde_json::to_string_pretty(&unit)?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, format!("{}\n", json))?;
                    info!(target: "stackwrap", path = %path.display(), "model written");
                }
                None => println!("{}", json),
            }
        }
        Commands::Compile { target, compiler, work_dir, references, timeout_secs } => {
            let options = options_for(target)?;
            let compiler = build_compiler(compiler, &config, &references, timeout_secs)?;
            let work_dir = work_dir.unwrap_or_else(|| config.codegen.output_dir.clone());
            let artifact = pipeline::compile_target(&options, &compiler, &work_dir)?;
            println!("{}", artifact.display());
        }
    }
    Ok(())
}
