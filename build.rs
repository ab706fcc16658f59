//! Build script for the mediadex CLI.
//!
//! Copies `.env.example` into the user's local data directory so a template
//! sits next to the `.env` file the binary reads at start-up.

use std::{env, fs, path::PathBuf};

/// Copies the configuration template.
///
/// Destination:
/// - Linux: `~/.local/share/mediadex/.env.example`
/// - macOS: `~/Library/Application Support/mediadex/.env.example`
/// - Windows: `%LOCALAPPDATA%/mediadex/.env.example`
///
/// A missing template only produces a cargo warning.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("mediadex");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
