//! husk - binary entry point.
//!
//! Extracts the script payload embedded at build time, persists it to the
//! configured artifact path, and hands it to the external interpreter. The
//! interpreter's exit status becomes husk's own; each failed bootstrap stage
//! exits with its own distinct code instead.

mod assets;

use husk_config::HuskConfig;
use husk_runner::{
    ArtifactSpec, BootstrapRunner, LaunchOutcome, SystemLauncher, resolve_interpreter,
};
use husk_types::BootstrapError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::try_new("error").expect("error filter is valid"));

    // Diagnostics go to stderr; stdout belongs to the interpreter.
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn load_config() -> Option<HuskConfig> {
    match HuskConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Ignoring unusable config at {:?}, continuing with defaults",
                err.path()
            );
            None
        }
    }
}

fn artifact_spec(config: Option<&HuskConfig>) -> ArtifactSpec {
    let mut spec = ArtifactSpec::default();
    if let Some(artifact) = config.and_then(|cfg| cfg.artifact.as_ref()) {
        if let Some(path) = &artifact.path {
            spec.path = path.clone();
        }
        spec.keep = artifact.keep;
    }
    spec
}

fn run() -> Result<LaunchOutcome, BootstrapError> {
    let config = load_config();

    let interpreter = resolve_interpreter(config.as_ref().and_then(|cfg| cfg.interpreter.as_ref()))?;
    let runner = BootstrapRunner::new(
        assets::builtin(),
        SystemLauncher::new(interpreter),
        artifact_spec(config.as_ref()),
    );

    runner.run(&assets::SCRIPT_KEY)
}

fn main() {
    init_tracing();

    match run() {
        Ok(outcome) => std::process::exit(outcome.exit_code),
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("husk: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
