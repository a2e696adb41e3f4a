// build.rs — Stage the script payload that ships inside the binary.
//
// The packaging step selects the script to embed by pointing HUSK_PAYLOAD at
// a file; without it the in-repo default asset ships. The staged copy lands
// in OUT_DIR where `src/assets.rs` picks it up with `include_bytes!`.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));

    let source = env::var_os("HUSK_PAYLOAD")
        .map(PathBuf::from)
        .unwrap_or_else(|| manifest_dir.join("assets").join("payload.js"));

    println!("cargo:rerun-if-env-changed=HUSK_PAYLOAD");
    println!("cargo:rerun-if-changed={}", source.display());

    let staged = out_dir.join("payload.js");
    if let Err(err) = fs::copy(&source, &staged) {
        panic!("failed to stage payload {}: {err}", source.display());
    }
}
