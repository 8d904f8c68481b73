//! Persistence of the most recent size report
//!
//! The snapshot lets `solsize diff` without refs compare against the
//! previous run of the same working tree. It lives under foundry's cache
//! directory and is read before and written after the core computation,
//! never from inside it.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use solsize_core::ContractSize;

const SNAPSHOT_FILE: &str = ".solsize_snapshot.json";

fn snapshot_path(project_root: &Path) -> PathBuf {
    project_root.join("cache").join(SNAPSHOT_FILE)
}

/// Read the size set from a previous run, if one exists
pub fn read(project_root: &Path) -> Result<Option<Vec<ContractSize>>> {
    let path = snapshot_path(project_root);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let sizes = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Corrupt size snapshot at {}", path.display()))?;
    Ok(Some(sizes))
}

/// Write the size set for the next run to compare against
pub fn write(project_root: &Path, sizes: &[ContractSize]) -> Result<()> {
    let path = snapshot_path(project_root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, serde_json::to_string(sizes)?)?;
    Ok(())
}
