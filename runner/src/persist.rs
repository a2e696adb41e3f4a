//! Binary-safe persistence of the script artifact.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

/// Write `bytes` to `path` with create-or-truncate semantics.
///
/// The payload is opaque binary data: no newline translation, no encoding
/// assumptions. The file handle is flushed to stable storage and closed
/// before this returns, on success and on failure, so a reader spawned
/// afterwards never sees a truncated or locked file.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    debug!(path = %path.display(), len = bytes.len(), "script artifact written");
    Ok(())
}
