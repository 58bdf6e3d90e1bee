//! Resolution of conflicting AWS credential sources.
//!
//! The AWS SDK credential chain refuses to pick between a named profile and
//! static keys when both are present. Instead of deleting variables from the
//! process environment, the resolution is computed once and applied to each
//! child process.

use std::collections::HashMap;
use std::fmt;

use super::environment::ExecutionEnvironment;

/// Static key variables set by CI platforms.
pub const STATIC_KEY_VARS: [&str; 3] =
    ["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "AWS_SESSION_TOKEN"];

/// Variable naming a shared-config profile.
pub const PROFILE_VAR: &str = "AWS_PROFILE";

/// The credential source child processes will see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Nothing configured; the SDK falls back to instance metadata or fails.
    None,
    /// A named profile from the shared config files.
    Profile(String),
    /// Static keys from the environment.
    StaticKeys,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Profile(name) => write!(f, "profile '{name}'"),
            Self::StaticKeys => f.write_str("static keys"),
        }
    }
}

/// Chosen credential source plus the variables to strip from child processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialResolution {
    /// Source left visible to children.
    pub source: CredentialSource,
    /// Variables removed from every child environment.
    pub strip: Vec<String>,
}

impl CredentialResolution {
    /// Returns `true` if both sources were present and one had to be dropped.
    #[must_use]
    pub fn had_conflict(&self) -> bool {
        !self.strip.is_empty()
    }
}

/// Picks a single credential source.
///
/// CI platforms inject static keys for the build role, so those win there.
/// Locally the developer's profile wins over stale exported keys.
#[must_use]
pub fn resolve(
    vars: &HashMap<String, String>,
    environment: ExecutionEnvironment,
) -> CredentialResolution {
    let profile = vars.get(PROFILE_VAR).filter(|v| !v.trim().is_empty()).cloned();
    let has_keys = vars.get(STATIC_KEY_VARS[0]).is_some_and(|v| !v.trim().is_empty());

    match (profile, has_keys) {
        (None, false) => CredentialResolution { source: CredentialSource::None, strip: Vec::new() },
        (Some(name), false) => {
            CredentialResolution { source: CredentialSource::Profile(name), strip: Vec::new() }
        }
        (None, true) => {
            CredentialResolution { source: CredentialSource::StaticKeys, strip: Vec::new() }
        }
        (Some(_), true) if environment.is_ci() => CredentialResolution {
            source: CredentialSource::StaticKeys,
            strip: vec![PROFILE_VAR.to_string()],
        },
        (Some(name), true) => CredentialResolution {
            source: CredentialSource::Profile(name),
            strip: STATIC_KEY_VARS.iter().map(|v| (*v).to_string()).collect(),
        },
    }
}
