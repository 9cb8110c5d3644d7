//! Build script for the library follower.
//!
//! Copies the `config.yaml.example` credential template and the `.env.example`
//! overrides into `~/.spot/` so users find a ready-to-edit starting point next
//! to where the application reads its credentials (`~/.spot/config.yaml`).
//!
//! A missing template only produces a cargo warning. Failing to create the
//! target directory or to write the file fails the build.

use std::{env, fs, path::PathBuf};

const TEMPLATES: [&str; 2] = ["config.yaml.example", ".env.example"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={}", template);
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let Some(mut out_dir) = dirs::home_dir() else {
        println!("cargo:warning=cannot determine home directory, skipping templates");
        return Ok(());
    };
    out_dir.push(".spot");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        let source = manifest_dir.join(template);
        // Only copy if the source exists; otherwise warn instead of failing
        if source.is_file() {
            let contents = fs::read_to_string(&source)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!("cargo:warning={} not found at {}", template, source.display());
        }
    }

    Ok(())
}
