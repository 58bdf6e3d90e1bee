//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::manifest::ManifestKind;

/// Top-level CLI parser for `amplify-reconcile`.
#[derive(Debug, Parser)]
#[command(
    name = "amplify-reconcile",
    version,
    about = "Keep Next.js build manifests in place for Amplify hosting"
)]
pub struct Cli {
    /// Project root (defaults to `RECONCILE_ROOT`, then the current directory).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Target directory relative to the root; repeat to replace the default list.
    #[arg(long = "dir", global = true)]
    pub dirs: Vec<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute; `build` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the compiler, then write every manifest regardless of its outcome.
    Build,
    /// Write every manifest without running the compiler.
    Write,
    /// Report missing or malformed manifests.
    Check,
    /// Deploy the Amplify backend for the current branch.
    Deploy {
        /// Only fetch backend outputs instead of deploying.
        #[arg(long)]
        outputs_only: bool,
    },
    /// Print the default content of one manifest.
    Print {
        /// Manifest name, e.g. `routes-manifest` or `build-manifest.json`.
        kind: ManifestKind,
    },
    /// Print the resolved configuration.
    Env,
}
