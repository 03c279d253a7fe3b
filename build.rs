//! Retrieves information about the version of the engine from Git and the build
//! environment. This information is then written to a file in the output
//! directory and can be accessed at runtime by the engine.

use std::path::Path;
use std::{env, fs, io};

fn generate_file(filename: &str, contents: &str) -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    let dest_path = Path::new(&out_dir).join(filename);
    fs::write(dest_path, contents)
}

// Records the build profile so that the binary can tell whether it is running
// an optimized rules engine.
fn generate_build_info() -> io::Result<()> {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let features = format!(
        "profile={profile} {}debug-assertions",
        if cfg!(debug_assertions) { "+" } else { "-" }
    );
    generate_file("features", &features)
}

fn main() -> shadow_rs::SdResult<()> {
    generate_build_info().map_err(|e| e.to_string())?;
    shadow_rs::new()
}
