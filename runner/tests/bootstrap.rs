//! Integration tests for the extract -> persist -> execute sequence.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use husk_runner::{
    ArtifactSpec, BootstrapRunner, LaunchOutcome, Launcher, StaticResources,
};
use husk_types::{BootstrapError, LaunchError, ResourceKey};

const PAYLOAD: &[u8] = b"print(\"hi\")";

#[derive(Debug, Clone, Copy)]
enum FakeBehavior {
    Exit(i32),
    FailToStart,
}

/// Launcher that records every invocation instead of spawning anything.
struct FakeLauncher {
    calls: Mutex<Vec<PathBuf>>,
    behavior: FakeBehavior,
}

impl FakeLauncher {
    fn new(behavior: FakeBehavior) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            behavior,
        }
    }

    fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().expect("lock").clone()
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, script: &Path) -> Result<LaunchOutcome, LaunchError> {
        self.calls.lock().expect("lock").push(script.to_path_buf());
        match self.behavior {
            FakeBehavior::Exit(code) => Ok(LaunchOutcome { exit_code: code }),
            FakeBehavior::FailToStart => Err(LaunchError::NotFound {
                binary: "qjs".to_string(),
            }),
        }
    }
}

fn payload_table() -> StaticResources {
    StaticResources::new(vec![(ResourceKey::script("payload"), PAYLOAD)])
}

fn artifact_in(dir: &tempfile::TempDir) -> ArtifactSpec {
    ArtifactSpec {
        path: dir.path().join("_tmp.js"),
        keep: true,
    }
}

#[test]
fn end_to_end_writes_payload_and_invokes_launcher_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = artifact_in(&dir);
    let launcher = FakeLauncher::new(FakeBehavior::Exit(0));

    let runner = BootstrapRunner::new(payload_table(), &launcher, artifact.clone());
    let outcome = runner.run(&ResourceKey::script("payload")).expect("run");

    assert_eq!(outcome.exit_code, 0);
    assert_eq!(fs::read(&artifact.path).expect("read artifact"), PAYLOAD);
    assert_eq!(launcher.calls(), vec![artifact.path.clone()]);
}

#[test]
fn child_exit_code_flows_through_the_runner() {
    let dir = tempfile::tempdir().expect("tempdir");
    let launcher = FakeLauncher::new(FakeBehavior::Exit(7));

    let runner = BootstrapRunner::new(payload_table(), &launcher, artifact_in(&dir));
    let outcome = runner.run(&ResourceKey::script("payload")).expect("run");

    assert_eq!(outcome.exit_code, 7);
}

#[test]
fn missing_resource_aborts_before_any_filesystem_effect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = artifact_in(&dir);
    let launcher = FakeLauncher::new(FakeBehavior::Exit(0));

    let runner = BootstrapRunner::new(StaticResources::default(), &launcher, artifact.clone());
    let err = runner
        .run(&ResourceKey::script("payload"))
        .expect_err("must fail");

    assert!(matches!(err, BootstrapError::ResourceNotFound { .. }));
    assert_eq!(err.exit_code(), 10);
    assert!(!artifact.path.exists());
    assert!(launcher.calls().is_empty());
}

#[test]
fn write_failure_aborts_before_launch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = ArtifactSpec {
        path: dir.path().join("missing-dir").join("_tmp.js"),
        keep: true,
    };
    let launcher = FakeLauncher::new(FakeBehavior::Exit(0));

    let runner = BootstrapRunner::new(payload_table(), &launcher, artifact);
    let err = runner
        .run(&ResourceKey::script("payload"))
        .expect_err("must fail");

    assert!(matches!(err, BootstrapError::Io { .. }));
    assert_eq!(err.exit_code(), 11);
    assert!(launcher.calls().is_empty());
}

#[test]
fn launch_failure_leaves_artifact_on_disk_by_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = artifact_in(&dir);
    let launcher = FakeLauncher::new(FakeBehavior::FailToStart);

    let runner = BootstrapRunner::new(payload_table(), &launcher, artifact.clone());
    let err = runner
        .run(&ResourceKey::script("payload"))
        .expect_err("must fail");

    assert!(matches!(err, BootstrapError::Launch(_)));
    assert_eq!(err.exit_code(), 12);
    assert_eq!(fs::read(&artifact.path).expect("read artifact"), PAYLOAD);
}

#[test]
fn cleanup_mode_removes_artifact_after_success() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = ArtifactSpec {
        path: dir.path().join("_tmp.js"),
        keep: false,
    };
    let launcher = FakeLauncher::new(FakeBehavior::Exit(0));

    let runner = BootstrapRunner::new(payload_table(), &launcher, artifact.clone());
    runner.run(&ResourceKey::script("payload")).expect("run");

    assert!(!artifact.path.exists());
}

#[test]
fn cleanup_mode_removes_artifact_after_launch_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = ArtifactSpec {
        path: dir.path().join("_tmp.js"),
        keep: false,
    };
    let launcher = FakeLauncher::new(FakeBehavior::FailToStart);

    let runner = BootstrapRunner::new(payload_table(), &launcher, artifact.clone());
    let _ = runner
        .run(&ResourceKey::script("payload"))
        .expect_err("must fail");

    assert!(!artifact.path.exists());
}

#[test]
fn repeated_runs_overwrite_without_accumulating_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = artifact_in(&dir);
    let launcher = FakeLauncher::new(FakeBehavior::Exit(0));

    let runner = BootstrapRunner::new(payload_table(), &launcher, artifact.clone());
    runner.run(&ResourceKey::script("payload")).expect("first");
    runner.run(&ResourceKey::script("payload")).expect("second");

    assert_eq!(fs::read(&artifact.path).expect("read artifact"), PAYLOAD);
    let entries = fs::read_dir(dir.path()).expect("read_dir").count();
    assert_eq!(entries, 1);
    assert_eq!(launcher.calls().len(), 2);
}

#[cfg(unix)]
mod system {
    use husk_config::InterpreterConfig;
    use husk_runner::{ArtifactSpec, BootstrapRunner, StaticResources, SystemLauncher, resolve_interpreter};
    use husk_types::ResourceKey;

    #[test]
    fn real_interpreter_runs_the_persisted_script() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = ArtifactSpec {
            path: dir.path().join("_tmp.sh"),
            keep: true,
        };

        let config = InterpreterConfig {
            binary: Some("sh".to_string()),
            args: None,
        };
        let interpreter = resolve_interpreter(Some(&config)).expect("sh resolves");
        let table = StaticResources::new(vec![(ResourceKey::script("payload"), b"exit 5\n")]);

        let runner = BootstrapRunner::new(table, SystemLauncher::new(interpreter), artifact.clone());
        let outcome = runner.run(&ResourceKey::script("payload")).expect("run");

        assert_eq!(outcome.exit_code, 5);
        assert_eq!(
            std::fs::read(&artifact.path).expect("read artifact"),
            b"exit 5\n"
        );
    }
}
