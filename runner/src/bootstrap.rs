//! Orchestration of the extract -> persist -> execute sequence.

use std::fs;
use std::path::{Path, PathBuf};

use husk_types::{BootstrapError, ResourceKey};
use tracing::{info, warn};

use crate::launch::{LaunchOutcome, Launcher};
use crate::persist::write_artifact;
use crate::resources::ResourceProvider;

/// Artifact path when no override is configured, relative to the current
/// working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "_tmp.js";

/// Where the script artifact lives and whether it outlives the run.
#[derive(Debug, Clone)]
pub struct ArtifactSpec {
    pub path: PathBuf,
    /// When false, the artifact is removed on every exit path after the
    /// write has happened. The default leaves the file behind for
    /// inspection.
    pub keep: bool,
}

impl Default for ArtifactSpec {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            keep: true,
        }
    }
}

/// Removes the artifact on drop unless retention is configured.
struct ArtifactGuard<'a> {
    path: &'a Path,
    keep: bool,
}

impl Drop for ArtifactGuard<'_> {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(err) = fs::remove_file(self.path) {
            warn!(path = %self.path.display(), "failed to remove script artifact: {err}");
        }
    }
}

/// Extracts the embedded payload, persists it, and hands it to the
/// interpreter.
pub struct BootstrapRunner<R, L> {
    resources: R,
    launcher: L,
    artifact: ArtifactSpec,
}

impl<R, L> BootstrapRunner<R, L>
where
    R: ResourceProvider,
    L: Launcher,
{
    pub fn new(resources: R, launcher: L, artifact: ArtifactSpec) -> Self {
        Self {
            resources,
            launcher,
            artifact,
        }
    }

    /// Run the three-step sequence for `key`.
    ///
    /// Each step starts only after the previous one completed: the write
    /// needs a located payload in hand, and the launch needs the artifact
    /// flushed with its handle closed. Any failure aborts the remaining
    /// steps and surfaces as a [`BootstrapError`].
    pub fn run(&self, key: &ResourceKey) -> Result<LaunchOutcome, BootstrapError> {
        let payload = self
            .resources
            .lookup(key)
            .ok_or_else(|| BootstrapError::ResourceNotFound { key: key.clone() })?;
        info!(key = %key, len = payload.len(), "embedded payload located");

        write_artifact(&self.artifact.path, payload).map_err(|source| BootstrapError::Io {
            path: self.artifact.path.clone(),
            source,
        })?;

        let _guard = ArtifactGuard {
            path: &self.artifact.path,
            keep: self.artifact.keep,
        };
        let outcome = self.launcher.launch(&self.artifact.path)?;
        info!(exit_code = outcome.exit_code, "bootstrap sequence complete");
        Ok(outcome)
    }
}
