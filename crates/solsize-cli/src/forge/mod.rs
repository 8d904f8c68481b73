//! Forge build invocation and artifact loading

pub mod artifact;
pub mod types;

use std::path::Path;
use std::process::Command;

use color_eyre::eyre::{eyre, Result};

pub use artifact::ArtifactLoader;

/// Run `forge build` in the given project root
pub fn compile(project_root: &Path) -> Result<()> {
    let output = Command::new("forge")
        .arg("build")
        .current_dir(project_root)
        .output()
        .map_err(|_| eyre!("Could not run forge. Is Foundry installed?"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(eyre!("Forge build failed:\n{}", stderr));
    }

    Ok(())
}
