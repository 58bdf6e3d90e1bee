//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

use amplify_reconcile::fanout::DEFAULT_TARGET_DIRS;
use amplify_reconcile::manifest::ManifestKind;

const MANAGED_VARS: [&str; 10] = [
    "RECONCILE_ROOT",
    "RECONCILE_TARGET_DIRS",
    "RECONCILE_BUILD_CMD",
    "RECONCILE_SKIP_LINT",
    "RECONCILE_MEMORY_MB",
    "RECONCILE_RECORD",
    "AWS_APP_ID",
    "AWS_BRANCH",
    "AWS_EXECUTION_ENV",
    "CI",
];

/// Runs the binary inside `dir` with a clean slate of reconciler variables.
fn run_in(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_amplify-reconcile");
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir).args(args);
    for var in MANAGED_VARS {
        cmd.env_remove(var);
    }
    cmd.envs(env.iter().copied());
    cmd.output().expect("failed to run amplify-reconcile binary")
}

fn count_manifests(root: &Path) -> usize {
    DEFAULT_TARGET_DIRS
        .iter()
        .flat_map(|dir| ManifestKind::ALL.iter().map(move |k| root.join(dir).join(k.file_name())))
        .filter(|path| path.is_file())
        .count()
}

#[test]
fn write_on_empty_project_creates_24_files() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &["write"], &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(count_manifests(root.path()), 24);
}

#[test]
fn bare_invocation_survives_failing_compiler() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &[], &[("RECONCILE_BUILD_CMD", "false")]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{stderr}");
    assert!(stderr.contains("build failed"));
    assert_eq!(count_manifests(root.path()), 24);
}

#[test]
fn build_survives_missing_compiler() {
    let root = tempfile::tempdir().unwrap();
    let output =
        run_in(root.path(), &["build"], &[("RECONCILE_BUILD_CMD", "no-such-compiler-xyz")]);
    assert!(output.status.success());
    assert_eq!(count_manifests(root.path()), 24);
}

#[test]
fn build_survives_unusable_configuration() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join(".env"), "NEXT_PUBLIC_SITE_TITLE=My Resume\n").unwrap();

    let output = run_in(
        root.path(),
        &["build"],
        &[("RECONCILE_BUILD_CMD", "false"), ("RECONCILE_MEMORY_MB", "4g")],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{stderr}");
    assert!(stderr.contains("ignoring unusable setting"), "{stderr}");
    assert_eq!(count_manifests(root.path()), 24);
}

#[test]
fn bare_invocation_survives_unusable_record_dir() {
    let root = tempfile::tempdir().unwrap();
    let blocker = root.path().join("recordings");
    std::fs::write(&blocker, "not a directory").unwrap();

    let output = run_in(
        root.path(),
        &[],
        &[("RECONCILE_BUILD_CMD", "false"), ("RECONCILE_RECORD", blocker.to_str().unwrap())],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{stderr}");
    assert!(stderr.contains("recording unavailable"), "{stderr}");
    assert_eq!(count_manifests(root.path()), 24);
}

#[test]
fn write_still_rejects_unusable_configuration() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &["write"], &[("RECONCILE_MEMORY_MB", "4g")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("RECONCILE_MEMORY_MB"));
    assert_eq!(count_manifests(root.path()), 0);
}

#[test]
fn blocked_directory_exits_with_error() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("server"), "not a directory").unwrap();

    let output = run_in(root.path(), &["write"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("failed to create directory"), "{stderr}");
}

#[test]
fn check_fails_until_manifests_are_written() {
    let root = tempfile::tempdir().unwrap();

    let before = run_in(root.path(), &["check"], &[]);
    assert!(!before.status.success());
    assert!(String::from_utf8_lossy(&before.stdout).contains("missing"));

    assert!(run_in(root.path(), &["write"], &[]).status.success());

    let after = run_in(root.path(), &["check"], &[]);
    assert!(after.status.success());
    assert!(String::from_utf8_lossy(&after.stdout).contains("All 24 manifests present"));
}

#[test]
fn dir_flag_replaces_target_list() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &["write", "--dir", "custom/out"], &[]);
    assert!(output.status.success());
    assert!(root.path().join("custom/out/build-manifest.json").is_file());
    assert!(!root.path().join(".next").exists());
}

#[test]
fn target_dirs_can_come_from_dotenv() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join(".env"), "RECONCILE_TARGET_DIRS=from-dotenv\n").unwrap();

    let output = run_in(root.path(), &["write"], &[]);
    assert!(output.status.success());
    assert!(root.path().join("from-dotenv/routes-manifest.json").is_file());
    assert!(!root.path().join(".next").exists());
}

#[test]
fn print_emits_parseable_manifest() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &["print", "build-manifest"], &[]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["pages"].get("/_app").is_some());
    assert!(value["pages"].get("/").is_some());
}

#[test]
fn deploy_without_branch_fails() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &["deploy"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("AWS_BRANCH"));
}

#[test]
fn help_exits_successfully() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &["--help"], &[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("check"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let root = tempfile::tempdir().unwrap();
    let output = run_in(root.path(), &["nonsense"], &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unrecognized subcommand"));
}
