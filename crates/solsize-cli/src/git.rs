//! Temporary git worktrees for measuring sizes at another revision

use std::path::{Path, PathBuf};
use std::process::Command;

use color_eyre::eyre::{eyre, Result};
use tempfile::TempDir;

/// A detached git worktree checked out at a specific revision.
///
/// The worktree is removed again when this handle is dropped.
pub struct RevisionWorktree {
    project_root: PathBuf,
    path: PathBuf,
    _tmp: TempDir,
}

impl RevisionWorktree {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RevisionWorktree {
    fn drop(&mut self) {
        // best effort; the temp directory is deleted regardless
        let _ = Command::new("git")
            .args(["worktree", "remove", "--force"])
            .arg(&self.path)
            .current_dir(&self.project_root)
            .output();
    }
}

/// Check out `rev` into a temporary detached worktree of the repository at
/// `project_root`
pub fn checkout(project_root: &Path, rev: &str) -> Result<RevisionWorktree> {
    resolve_rev(project_root, rev)?;

    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("checkout");

    let output = Command::new("git")
        .args(["worktree", "add", "--detach"])
        .arg(&path)
        .arg(rev)
        .current_dir(project_root)
        .output()
        .map_err(|_| eyre!("Could not run git. Is this a git repository?"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(eyre!("Could not check out revision '{}':\n{}", rev, stderr));
    }

    Ok(RevisionWorktree {
        project_root: project_root.to_path_buf(),
        path,
        _tmp: tmp,
    })
}

/// Verify that `rev` names a commit
fn resolve_rev(project_root: &Path, rev: &str) -> Result<()> {
    let output = Command::new("git")
        .args(["rev-parse", "--verify", "--quiet"])
        .arg(format!("{rev}^{{commit}}"))
        .current_dir(project_root)
        .output()
        .map_err(|_| eyre!("Could not run git. Is this a git repository?"))?;

    if !output.status.success() {
        return Err(eyre!("Unknown git revision: {}", rev));
    }

    Ok(())
}
