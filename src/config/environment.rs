//! Detection of the environment the tool is running in.

use std::collections::HashMap;
use std::fmt;

/// Where the current process is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionEnvironment {
    /// A developer machine.
    Local,
    /// An Amplify Hosting build container.
    AmplifyHosting,
    /// Some other CI runner.
    GenericCi,
}

impl ExecutionEnvironment {
    /// Classifies the environment from its variables.
    ///
    /// Amplify sets `AWS_APP_ID` for every build and marks its containers with
    /// an `AWS_EXECUTION_ENV` value mentioning Amplify. Other CI systems set `CI`.
    #[must_use]
    pub fn detect(vars: &HashMap<String, String>) -> Self {
        let amplify_marker = vars
            .get("AWS_EXECUTION_ENV")
            .is_some_and(|v| v.to_ascii_lowercase().contains("amplify"));
        let has_app_id = vars.get("AWS_APP_ID").is_some_and(|v| !v.trim().is_empty());

        if amplify_marker || has_app_id {
            Self::AmplifyHosting
        } else if vars.get("CI").is_some_and(|v| is_truthy(v)) {
            Self::GenericCi
        } else {
            Self::Local
        }
    }

    /// Returns `true` for any non-local environment.
    #[must_use]
    pub fn is_ci(self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl fmt::Display for ExecutionEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::AmplifyHosting => "amplify-hosting",
            Self::GenericCi => "ci",
        })
    }
}

/// Interprets the usual spellings of a boolean environment flag.
pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
