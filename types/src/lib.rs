//! Core domain types for husk.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies: resource identity, the bootstrap failure taxonomy, and the
//! mapping from failures to process exit codes.

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Resource Identity
// ============================================================================

/// Type tag distinguishing classes of embedded resources.
///
/// A name match under the wrong kind is a lookup miss, matching how a native
/// executable's resource table treats its type dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// An executable script handed to the interpreter.
    Script,
    /// Opaque auxiliary data.
    Data,
}

impl ResourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Data => "data",
        }
    }
}

/// Symbolic key identifying one embedded payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    name: Cow<'static, str>,
    kind: ResourceKind,
}

impl ResourceKey {
    #[must_use]
    pub const fn script(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: ResourceKind::Script,
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.name)
    }
}

// ============================================================================
// Failure Taxonomy
// ============================================================================

/// Why the interpreter could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("interpreter `{binary}` was not found on PATH")]
    NotFound { binary: String },
    #[error("failed to spawn interpreter `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of one stage of the extract -> persist -> execute sequence.
///
/// Every variant aborts the remaining stages; none is retried. Each maps to
/// a distinct process exit code via [`BootstrapError::exit_code`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The payload is absent from the resource table. A packaging defect,
    /// not a runtime condition.
    #[error("embedded resource `{key}` is missing from the resource table")]
    ResourceNotFound { key: ResourceKey },

    /// The script artifact could not be created or fully written.
    #[error("failed to write script artifact `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The interpreter could not be resolved or spawned.
    #[error("failed to launch interpreter: {0}")]
    Launch(#[from] LaunchError),
}

impl BootstrapError {
    /// Distinct exit code for each failed stage.
    ///
    /// Successful runs exit with the interpreter's own status instead.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ResourceNotFound { .. } => 10,
            Self::Io { .. } => 11,
            Self::Launch(_) => 12,
        }
    }
}
