//! Build attempt wrapper.
//!
//! Runs the real compiler, then writes the placeholder manifests whatever the
//! compiler did, so the hosting pipeline never sees a missing manifest. A
//! failed compile is logged and reported in [`BuildOutcome`] but is not an
//! error. Only a failure of the manifest writer is.

use tracing::{info, warn};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::fanout::{FanoutReport, FanoutWriter};

/// How the compiler step went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileStatus {
    /// Exited zero.
    Succeeded,
    /// Ran and exited non-zero.
    Failed {
        /// Reported exit status.
        exit_code: i32,
    },
    /// Could not be started at all.
    NotStarted {
        /// Spawn error message.
        reason: String,
    },
}

/// Result of a build attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Compiler step status.
    pub compile: CompileStatus,
    /// Manifests written afterwards.
    pub report: FanoutReport,
}

impl BuildOutcome {
    /// Returns `true` if the compiler exited zero.
    #[must_use]
    pub fn build_succeeded(&self) -> bool {
        self.compile == CompileStatus::Succeeded
    }
}

/// Runs the compiler and then the fan-out writer.
pub struct BuildAttempt<'a> {
    ctx: &'a ServiceContext,
    config: &'a Config,
}

impl<'a> BuildAttempt<'a> {
    /// Creates a wrapper over the given ports and settings.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a Config) -> Self {
        Self { ctx, config }
    }

    /// Attempts the compile, then always writes the manifests.
    ///
    /// # Errors
    ///
    /// Returns an error only when the manifests cannot be written. Compiler
    /// failures, including an empty build command, are folded into the
    /// returned [`BuildOutcome`].
    pub fn run(&self) -> Result<BuildOutcome> {
        let compile = self.compile();
        let writer = FanoutWriter::new(self.ctx.fs.as_ref(), &self.config.project_root);
        let report = writer.write_all(&self.config.target_dirs)?;
        Ok(BuildOutcome { compile, report })
    }

    fn compile(&self) -> CompileStatus {
        let command = match self.config.compiler_command() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "no build to run; continuing with manifest repair");
                return CompileStatus::NotStarted { reason: e.to_string() };
            }
        };
        if self.config.credentials.had_conflict() {
            warn!(
                using = %self.config.credentials.source,
                stripped = ?self.config.credentials.strip,
                "conflicting AWS credential sources; stripping from child environment"
            );
        }
        info!(command = %command.display(), env = %self.config.environment, "running build");

        match self.ctx.shell.run(&command) {
            Ok(output) if output.success() => {
                info!("build succeeded");
                CompileStatus::Succeeded
            }
            Ok(output) => {
                warn!(exit_code = output.exit_code, "build failed; continuing with manifest repair");
                CompileStatus::Failed { exit_code: output.exit_code }
            }
            Err(e) => {
                warn!(error = %e, "build could not start; continuing with manifest repair");
                CompileStatus::NotStarted { reason: e.to_string() }
            }
        }
    }
}
