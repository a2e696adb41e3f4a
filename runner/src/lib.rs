//! Bootstrap runner: locate an embedded payload, persist it to disk, and
//! hand it to an external interpreter.
//!
//! The sequence is strictly ordered. Persistence starts only with a located
//! payload in hand, and the launch starts only after the artifact has been
//! flushed and its handle closed.

pub mod bootstrap;
pub mod launch;
pub mod persist;
pub mod resources;

pub use bootstrap::{ArtifactSpec, BootstrapRunner, DEFAULT_ARTIFACT_PATH};
pub use launch::{
    DEFAULT_INTERPRETER, Interpreter, LaunchOutcome, Launcher, SystemLauncher, resolve_interpreter,
};
pub use resources::{ResourceProvider, StaticResources};
