//! Configuration resolved once at startup.
//!
//! Everything the reconciler needs from the environment is read into a
//! [`Config`] up front and passed down. Nothing here mutates the process
//! environment; adjustments for child processes travel on each
//! [`ShellCommand`].

pub mod credentials;
pub mod environment;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ReconcileError, Result};
use crate::fanout::DEFAULT_TARGET_DIRS;
use crate::ports::ShellCommand;

pub use credentials::{CredentialResolution, CredentialSource};
pub use environment::ExecutionEnvironment;

/// Compiler invocation used when `RECONCILE_BUILD_CMD` is unset.
pub const DEFAULT_BUILD_COMMAND: [&str; 3] = ["npx", "next", "build"];

/// Node heap limit, in megabytes, when `RECONCILE_MEMORY_MB` is unset.
pub const DEFAULT_MEMORY_LIMIT_MB: u32 = 4096;

/// Name of the optional dotenv file read from the project root.
pub const DOTENV_FILE: &str = ".env";

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory every target directory is resolved against.
    pub project_root: PathBuf,
    /// Directories that receive the manifest set, relative to the root.
    pub target_dirs: Vec<PathBuf>,
    /// Compiler argv, program first.
    pub build_command: Vec<String>,
    /// Whether `--no-lint` is appended to the compiler invocation.
    pub skip_lint: bool,
    /// Node heap limit exported to child processes.
    pub memory_limit_mb: u32,
    /// Pre-existing `NODE_OPTIONS`, kept ahead of the heap limit.
    pub node_options: Option<String>,
    /// Where the process is running.
    pub environment: ExecutionEnvironment,
    /// Credential source selection for child processes.
    pub credentials: CredentialResolution,
    /// Amplify app identifier.
    pub app_id: Option<String>,
    /// Branch being deployed.
    pub branch: Option<String>,
    /// When set, port interactions are recorded to cassettes under this directory.
    pub record_dir: Option<PathBuf>,
}

impl Config {
    /// Resolves a config from an environment map.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Config`] when a variable holds an unusable value.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        first_problem(Self::from_vars_lenient(vars))
    }

    /// Resolves a config from an environment map, replacing every unusable
    /// value with its default.
    ///
    /// The returned problems list what was replaced; an empty list means the
    /// result equals [`Config::from_vars`].
    #[must_use]
    pub fn from_vars_lenient(vars: &HashMap<String, String>) -> (Self, Vec<ReconcileError>) {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let mut problems = Vec::new();

        let project_root = get("RECONCILE_ROOT").map_or_else(|| PathBuf::from("."), PathBuf::from);

        let default_dirs =
            || -> Vec<PathBuf> { DEFAULT_TARGET_DIRS.iter().map(PathBuf::from).collect() };
        let target_dirs = match get("RECONCILE_TARGET_DIRS").map(parse_dir_list) {
            Some(Ok(dirs)) => dirs,
            Some(Err(e)) => {
                problems.push(e);
                default_dirs()
            }
            None => default_dirs(),
        };

        let build_command = match get("RECONCILE_BUILD_CMD") {
            Some(cmd) => cmd.split_whitespace().map(str::to_string).collect(),
            None => DEFAULT_BUILD_COMMAND.iter().map(|s| (*s).to_string()).collect(),
        };

        let skip_lint = get("RECONCILE_SKIP_LINT").map_or(true, environment::is_truthy);

        let memory_limit_mb = match get("RECONCILE_MEMORY_MB") {
            Some(raw) => raw.parse::<u32>().ok().filter(|mb| *mb > 0).unwrap_or_else(|| {
                problems.push(ReconcileError::Config(format!(
                    "RECONCILE_MEMORY_MB must be a positive integer, got '{raw}'"
                )));
                DEFAULT_MEMORY_LIMIT_MB
            }),
            None => DEFAULT_MEMORY_LIMIT_MB,
        };

        let environment = ExecutionEnvironment::detect(vars);
        let credentials = credentials::resolve(vars, environment);

        let config = Self {
            project_root,
            target_dirs,
            build_command,
            skip_lint,
            memory_limit_mb,
            node_options: get("NODE_OPTIONS").map(str::to_string),
            environment,
            credentials,
            app_id: get("AWS_APP_ID").map(str::to_string),
            branch: get("AWS_BRANCH").map(str::to_string),
            record_dir: get("RECONCILE_RECORD").map(PathBuf::from),
        };
        (config, problems)
    }

    /// Resolves a config from the process environment layered over the
    /// project's `.env` file.
    ///
    /// `root` overrides `RECONCILE_ROOT` when given; the `.env` file is read
    /// from whichever root wins.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Config`] when the `.env` file is malformed or a
    /// variable holds an unusable value.
    pub fn from_process_env(root: Option<&Path>) -> Result<Self> {
        first_problem(Self::from_process_env_lenient(root))
    }

    /// Like [`Config::from_process_env`], but never fails.
    ///
    /// Malformed `.env` lines are skipped and unusable values fall back to
    /// their defaults. Each replacement is returned as a problem.
    #[must_use]
    pub fn from_process_env_lenient(root: Option<&Path>) -> (Self, Vec<ReconcileError>) {
        let process: HashMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        let root = root.map(Path::to_path_buf).unwrap_or_else(|| {
            process.get("RECONCILE_ROOT").map_or_else(|| PathBuf::from("."), PathBuf::from)
        });

        let (mut vars, mut problems) = read_dotenv(&root.join(DOTENV_FILE));
        vars.extend(process);
        vars.insert("RECONCILE_ROOT".to_string(), root.display().to_string());

        let (config, more) = Self::from_vars_lenient(&vars);
        problems.extend(more);
        (config, problems)
    }

    /// Value exported as `NODE_OPTIONS` to child processes.
    #[must_use]
    pub fn node_options_value(&self) -> String {
        let heap = format!("--max-old-space-size={}", self.memory_limit_mb);
        match &self.node_options {
            Some(existing) if existing.contains("--max-old-space-size") => existing.clone(),
            Some(existing) => format!("{existing} {heap}"),
            None => heap,
        }
    }

    /// Wraps an argv with the environment adjustments every child receives.
    ///
    /// Returns `None` when `argv` is empty.
    #[must_use]
    pub fn child_command<S: AsRef<str>>(&self, argv: &[S]) -> Option<ShellCommand> {
        let command = ShellCommand::from_argv(argv)?
            .env("NODE_OPTIONS", self.node_options_value())
            .env_remove(self.credentials.strip.iter().cloned());
        Some(command)
    }

    /// The compiler invocation, including `--no-lint` when lint is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Config`] when the configured command is empty.
    pub fn compiler_command(&self) -> Result<ShellCommand> {
        let command = self
            .child_command(&self.build_command)
            .ok_or_else(|| ReconcileError::Config("build command is empty".to_string()))?;
        Ok(if self.skip_lint { command.arg("--no-lint") } else { command })
    }
}

/// Splits a comma-separated directory list, dropping blank entries.
fn parse_dir_list(list: &str) -> Result<Vec<PathBuf>> {
    let dirs: Vec<PathBuf> =
        list.split(',').map(str::trim).filter(|d| !d.is_empty()).map(PathBuf::from).collect();
    if dirs.is_empty() {
        return Err(ReconcileError::Config("RECONCILE_TARGET_DIRS lists no directories".into()));
    }
    Ok(dirs)
}

/// Returns the config unless resolution reported a problem.
fn first_problem((config, problems): (Config, Vec<ReconcileError>)) -> Result<Config> {
    match problems.into_iter().next() {
        Some(problem) => Err(problem),
        None => Ok(config),
    }
}

/// Reads a dotenv file into a map without touching the process environment.
///
/// A missing file yields an empty map. Lines that fail to parse are skipped
/// and reported; a read error stops at the entries loaded so far.
fn read_dotenv(path: &Path) -> (HashMap<String, String>, Vec<ReconcileError>) {
    let mut vars = HashMap::new();
    let mut problems = Vec::new();

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return (vars, problems);
        }
        Err(e) => {
            problems.push(ReconcileError::Config(format!("cannot read {}: {e}", path.display())));
            return (vars, problems);
        }
    };

    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(dotenvy::Error::Io(e)) => {
                problems.push(ReconcileError::Config(format!("cannot read {}: {e}", path.display())));
                break;
            }
            Err(e) => {
                problems.push(ReconcileError::Config(format!("malformed {}: {e}", path.display())));
            }
        }
    }
    debug!(path = %path.display(), count = vars.len(), "loaded dotenv file");
    (vars, problems)
}
