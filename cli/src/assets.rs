//! Payload table baked into this binary.

use husk_runner::StaticResources;
use husk_types::ResourceKey;

/// Key the build script publishes the embedded script under.
pub const SCRIPT_KEY: ResourceKey = ResourceKey::script("payload");

static SCRIPT_PAYLOAD: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/payload.js"));

/// Resource table for the payload embedded at build time.
pub fn builtin() -> StaticResources {
    StaticResources::new(vec![(SCRIPT_KEY, SCRIPT_PAYLOAD)])
}
