//! Interpreter resolution and synchronous launch.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use husk_config::InterpreterConfig;
use husk_types::LaunchError;
use tracing::{debug, info};

/// Interpreter binary used when no override is configured.
pub const DEFAULT_INTERPRETER: &str = "qjs";

/// Resolved interpreter for script execution.
#[derive(Debug, Clone)]
pub struct Interpreter {
    /// Path of the interpreter binary.
    pub binary: PathBuf,
    /// Arguments placed before the script path.
    pub args: Vec<String>,
    /// Human-readable name for logging.
    pub name: String,
}

impl std::fmt::Display for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Resolve the interpreter based on config and PATH.
///
/// Priority:
/// - Config override (if set)
/// - PATH lookup of the default binary
///
/// Resolution failures surface here, before any process is spawned.
pub fn resolve_interpreter(
    config: Option<&InterpreterConfig>,
) -> Result<Interpreter, LaunchError> {
    let (requested, args) = match config {
        Some(cfg) => (
            cfg.binary
                .clone()
                .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
            cfg.args.clone().unwrap_or_default(),
        ),
        None => (DEFAULT_INTERPRETER.to_string(), Vec::new()),
    };

    // `which` also validates absolute and relative paths, so both bare names
    // and explicit paths go through the same lookup.
    let binary = which::which(&requested).map_err(|_| LaunchError::NotFound {
        binary: requested.clone(),
    })?;

    let name = binary
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(&requested)
        .to_string();

    debug!(binary = %binary.display(), name = %name, "interpreter resolved");
    Ok(Interpreter { binary, args, name })
}

/// Structured result of one interpreter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Child exit code. Signal-terminated children map to `128 + signal`
    /// on Unix, following shell convention.
    pub exit_code: i32,
}

/// Synchronous process launch seam.
///
/// The runner talks to this instead of spawning directly so tests can
/// substitute a recording fake.
pub trait Launcher {
    fn launch(&self, script: &Path) -> Result<LaunchOutcome, LaunchError>;
}

impl<T: Launcher + ?Sized> Launcher for &T {
    fn launch(&self, script: &Path) -> Result<LaunchOutcome, LaunchError> {
        (**self).launch(script)
    }
}

/// Launcher that spawns the resolved interpreter as a real child process.
///
/// The script path is the sole trailing argument; stdio is inherited. The
/// wait is unbounded: a hung interpreter hangs the caller.
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    interpreter: Interpreter,
}

impl SystemLauncher {
    #[must_use]
    pub fn new(interpreter: Interpreter) -> Self {
        Self { interpreter }
    }

    #[must_use]
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, script: &Path) -> Result<LaunchOutcome, LaunchError> {
        info!(interpreter = %self.interpreter, script = %script.display(), "launching interpreter");

        let status = Command::new(&self.interpreter.binary)
            .args(&self.interpreter.args)
            .arg(script)
            .status()
            .map_err(|source| LaunchError::Spawn {
                binary: self.interpreter.binary.display().to_string(),
                source,
            })?;

        let exit_code = exit_code_of(status);
        debug!(exit_code, "interpreter exited");
        Ok(LaunchOutcome { exit_code })
    }
}

fn exit_code_of(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(1)
}
