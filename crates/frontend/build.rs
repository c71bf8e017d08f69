//! Forwards `PROFITUP_*` settings from a `.env` file to `option_env!`.
//!
//! Values already present in the build environment take precedence.

use std::env;
use std::fs;
use std::path::Path;

const PREFIX: &str = "PROFITUP_";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(Path::to_path_buf);

    let candidates = [
        Some(Path::new(".env").to_path_buf()),
        workspace_root.map(|root| root.join(".env")),
    ];

    let Some(env_file) = candidates.into_iter().flatten().find(|p| p.exists()) else {
        return;
    };

    println!("cargo:rerun-if-changed={}", env_file.display());

    let Ok(contents) = fs::read_to_string(&env_file) else {
        println!("cargo:warning=Could not read {}", env_file.display());
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if key.starts_with(PREFIX) && env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }
}
