//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reconciler and the outside
//! world (the filesystem and child processes). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod shell;

pub use filesystem::FileSystem;
pub use shell::{ShellCommand, ShellExecutor, ShellOutput};
