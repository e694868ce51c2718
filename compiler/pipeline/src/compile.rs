//! Hand-off of generated sources to an external compiler.
//!
//! The compiler is invoked with mcs/csc style flags:
//!
//! ```text
//! <program> <args..> -target:library -out:<work_dir>/<Name>.dll -r:<ref>.. <work_dir>/<Name>.cs
//! ```
//!
//! Failures are reported with the compiler's output unchanged. Nothing is
//! retried.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::{PipelineError, Result};

/// Assemblies referenced by every compile of a generated facade
pub const DEFAULT_REFERENCES: &[&str] =
    &["ServiceStack.dll", "ServiceStack.ServiceInterface.dll", "ServiceStack.Interfaces.dll"];

/// An external compiler process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCompiler {
    /// Executable to run
    pub program: String,
    /// Extra arguments placed before the generated flags
    pub args: Vec<String>,
    /// Assemblies passed as `-r:` references
    pub references: Vec<String>,
    /// Kill the process after this long
    pub timeout: Option<Duration>,
}

impl ExternalCompiler {
    /// Compiler `program` with the default references and no timeout
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            references: DEFAULT_REFERENCES.iter().map(|r| r.to_string()).collect(),
            timeout: None,
        }
    }

    /// Append extra arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replace the references
    pub fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = references;
        self
    }

    /// Add a reference unless it is already present
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        let reference = reference.into();
        if !self.references.contains(&reference) {
            self.references.push(reference);
        }
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Command line arguments for compiling `source_path` into `artifact`
    pub fn command_args(&self, source_path: &Path, artifact: &Path) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("-target:library".to_string());
        args.push(format!("-out:{}", artifact.display()));
        args.extend(self.references.iter().map(|r| format!("-r:{}", r)));
        args.push(source_path.display().to_string());
        args
    }

    /// Write `source` to `work_dir/<name>.cs` and compile it into
    /// `work_dir/<name>.dll`, returning the artifact path
    pub fn compile(&self, name: &str, source: &str, work_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(work_dir)?;
        let source_path = work_dir.join(format!("{}.cs", name));
        let artifact = work_dir.join(format!("{}.dll", name));
        fs::write(&source_path, source)?;

        let args = self.command_args(&source_path, &artifact);
        debug!(target: "stackwrap", program = %self.program, ?args, "running compiler");

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PipelineError::Message(format!("failed to start compiler '{}': {}", self.program, e))
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => match child.wait_timeout(limit)? {
                Some(status) => status,
                None => {
                    kill(&mut child);
                    warn!(target: "stackwrap", program = %self.program, "compiler timed out");
                    return Err(PipelineError::Timeout(limit));
                }
            },
            None => child.wait()?,
        };
        let stdout = collect(stdout);
        let stderr = collect(stderr);

        if !status.success() {
            return Err(PipelineError::Compilation { status: status.code(), stdout, stderr });
        }
        if !artifact.exists() {
            return Err(PipelineError::Message(format!(
                "compiler exited successfully but produced no artifact at {}",
                artifact.display()
            )));
        }
        logging::trace("compile", &format!("built {}", artifact.display()));
        Ok(artifact)
    }
}

fn kill(child: &mut Child) {
    // The process may already have exited between the timeout and the kill.
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_layout() {
        let compiler = ExternalCompiler::new("mcs")
            .with_args(["-nologo"])
            .with_reference("Acme.dll")
            .with_reference("ServiceStack.dll");
        let args = compiler.command_args(Path::new("w/A.cs"), Path::new("w/A.dll"));

        assert_eq!(
            args,
            vec![
                "-nologo",
                "-target:library",
                "-out:w/A.dll",
                "-r:ServiceStack.dll",
                "-r:ServiceStack.ServiceInterface.dll",
                "-r:ServiceStack.Interfaces.dll",
                "-r:Acme.dll",
                "w/A.cs",
            ]
        );
    }

    #[test]
    fn test_missing_program_is_reported() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let err = ExternalCompiler::new("stackwrap-no-such-compiler")
            .compile("A", "class A {}", dir.path())
            .expect_err("spawn should fail");
        assert!(matches!(err, PipelineError::Message(_)));
        assert!(dir.path().join("A.cs").exists());
    }
}
