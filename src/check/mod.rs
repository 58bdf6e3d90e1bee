//! Diagnosis of the manifest set already on disk.
//!
//! Reads every manifest the fan-out writer would produce and reports which
//! are missing, unparseable, or shaped differently from what the hosting
//! runtime expects.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::manifest::{ManifestKind, REQUIRED_PAGES};
use crate::ports::FileSystem;

/// State of one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestStatus {
    /// Present with the expected shape.
    Ok,
    /// Not present.
    Missing,
    /// Present but unreadable or not JSON.
    InvalidJson(String),
    /// Valid JSON that lacks something the runtime reads.
    SchemaMismatch(String),
}

impl fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Missing => f.write_str("missing"),
            Self::InvalidJson(msg) => write!(f, "invalid json: {msg}"),
            Self::SchemaMismatch(msg) => write!(f, "schema mismatch: {msg}"),
        }
    }
}

/// Result for a single manifest file.
#[derive(Debug, Clone)]
pub struct ManifestCheck {
    /// Which manifest was checked.
    pub kind: ManifestKind,
    /// Full path of the file.
    pub path: PathBuf,
    /// What was found.
    pub status: ManifestStatus,
}

/// Aggregated result across every directory and kind.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// One entry per directory × kind, in directory order.
    pub checks: Vec<ManifestCheck>,
}

impl CheckReport {
    /// Returns `true` if every manifest is present and well-formed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.status == ManifestStatus::Ok)
    }

    /// Returns only the entries that are not [`ManifestStatus::Ok`].
    #[must_use]
    pub fn problems(&self) -> Vec<&ManifestCheck> {
        self.checks.iter().filter(|c| c.status != ManifestStatus::Ok).collect()
    }
}

/// Inspects every manifest in every directory under `root`.
#[must_use]
pub fn check<P: AsRef<Path>>(fs: &dyn FileSystem, root: &Path, dirs: &[P]) -> CheckReport {
    let mut checks = Vec::with_capacity(dirs.len() * ManifestKind::ALL.len());
    for dir in dirs {
        let dir = root.join(dir);
        for kind in ManifestKind::ALL {
            let path = dir.join(kind.file_name());
            let status = inspect(fs, &path, kind);
            checks.push(ManifestCheck { kind, path, status });
        }
    }
    CheckReport { checks }
}

fn inspect(fs: &dyn FileSystem, path: &Path, kind: ManifestKind) -> ManifestStatus {
    if !fs.exists(path) {
        return ManifestStatus::Missing;
    }
    let text = match fs.read_to_string(path) {
        Ok(text) => text,
        Err(e) => return ManifestStatus::InvalidJson(e.to_string()),
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => match validate_shape(kind, &value) {
            Ok(()) => ManifestStatus::Ok,
            Err(msg) => ManifestStatus::SchemaMismatch(msg),
        },
        Err(e) => ManifestStatus::InvalidJson(e.to_string()),
    }
}

/// Checks the top-level keys the hosting runtime reads for `kind`.
///
/// # Errors
///
/// Returns a description of the first mismatch found.
pub fn validate_shape(kind: ManifestKind, value: &Value) -> Result<(), String> {
    let object = value.as_object().ok_or("top level is not an object")?;
    let require = |key: &str| object.get(key).ok_or_else(|| format!("missing key '{key}'"));
    let require_array = |key: &str| -> Result<(), String> {
        if require(key)?.is_array() {
            Ok(())
        } else {
            Err(format!("'{key}' is not an array"))
        }
    };

    match kind {
        ManifestKind::RequiredServerFiles => {
            expect_version(require("version")?, 1)?;
            if !require("config")?.is_object() {
                return Err("'config' is not an object".to_string());
            }
            require_array("files")?;
            require_array("ignore")?;
        }
        ManifestKind::RoutesManifest => {
            expect_version(require("version")?, 3)?;
            if !require("basePath")?.is_string() {
                return Err("'basePath' is not a string".to_string());
            }
            for key in ["redirects", "headers", "dynamicRoutes", "staticRoutes", "dataRoutes"] {
                require_array(key)?;
            }
        }
        ManifestKind::BuildManifest => {
            for key in
                ["polyfillFiles", "devFiles", "ampDevFiles", "lowPriorityFiles", "rootMainFiles"]
            {
                require_array(key)?;
            }
            let pages = require("pages")?.as_object().ok_or("'pages' is not an object")?;
            if let Some(route) = REQUIRED_PAGES.iter().find(|r| !pages.contains_key(**r)) {
                return Err(format!("'pages' lacks route '{route}'"));
            }
        }
    }
    Ok(())
}

fn expect_version(value: &Value, expected: u64) -> Result<(), String> {
    match value.as_u64() {
        Some(v) if v == expected => Ok(()),
        _ => Err(format!("expected version {expected}, found {value}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use crate::fanout::{FanoutWriter, DEFAULT_TARGET_DIRS};
    use crate::manifest::generate;
    use serde_json::json;

    #[test]
    fn generated_manifests_pass_shape_checks() {
        for kind in ManifestKind::ALL {
            assert_eq!(validate_shape(kind, &generate(kind).unwrap()), Ok(()), "{kind}");
        }
    }

    #[test]
    fn empty_project_reports_everything_missing() {
        let root = tempfile::tempdir().unwrap();
        let report = check(&LiveFileSystem, root.path(), &DEFAULT_TARGET_DIRS);
        assert_eq!(report.checks.len(), 24);
        assert!(!report.passed());
        assert!(report.checks.iter().all(|c| c.status == ManifestStatus::Missing));
    }

    #[test]
    fn passes_after_fanout() {
        let root = tempfile::tempdir().unwrap();
        FanoutWriter::new(&LiveFileSystem, root.path()).write_all(&DEFAULT_TARGET_DIRS).unwrap();
        let report = check(&LiveFileSystem, root.path(), &DEFAULT_TARGET_DIRS);
        assert!(report.passed(), "{:?}", report.problems());
    }

    #[test]
    fn flags_corrupt_and_mismatched_files() {
        let root = tempfile::tempdir().unwrap();
        FanoutWriter::new(&LiveFileSystem, root.path()).write_all(&[".next"]).unwrap();
        std::fs::write(root.path().join(".next/routes-manifest.json"), "{not json").unwrap();
        std::fs::write(
            root.path().join(".next/build-manifest.json"),
            json!({
                "polyfillFiles": [], "devFiles": [], "ampDevFiles": [],
                "lowPriorityFiles": [], "rootMainFiles": [],
                "pages": {"/_app": []}, "ampFirstPages": []
            })
            .to_string(),
        )
        .unwrap();

        let report = check(&LiveFileSystem, root.path(), &[".next"]);
        let problems = report.problems();
        assert_eq!(problems.len(), 2);
        assert!(matches!(problems[0].status, ManifestStatus::InvalidJson(_)));
        assert_eq!(
            problems[1].status,
            ManifestStatus::SchemaMismatch("'pages' lacks route '/'".to_string())
        );
    }

    #[test]
    fn wrong_version_is_mismatch() {
        let err = validate_shape(
            ManifestKind::RoutesManifest,
            &json!({"version": 4, "basePath": ""}),
        )
        .unwrap_err();
        assert_eq!(err, "expected version 3, found 4");
    }
}
