//! Compare contract sizes across revisions

use std::path::Path;

use clap::Args;
use color_eyre::eyre::Result;
use solsize_core::{merge_sizes, validate_no_oversized, ContractSize};

use super::{load_contract_sizes, ReportOptions};
use crate::config::SizerConfig;
use crate::{forge, git, print, snapshot};

/// Compare contract sizes across git revisions or against the last run
#[derive(Args)]
pub struct DiffCommand {
    /// Git revisions to compare. With one revision the working tree is the
    /// "after" side; with none the snapshot of the last run is the "before"
    /// side.
    #[arg(value_name = "REV", num_args = 0..=2)]
    pub revs: Vec<String>,

    /// Don't compile the working tree before measuring
    #[arg(long)]
    pub no_compile: bool,

    #[command(flatten)]
    pub options: ReportOptions,
}

impl DiffCommand {
    pub async fn run(self) -> Result<()> {
        let project_root = Path::new(".");
        let mut config = SizerConfig::load(project_root)?;
        self.options.apply(&mut config);

        let (set_a, set_b) = match self.revs.as_slice() {
            [] => {
                let previous = snapshot::read(project_root)?.unwrap_or_default();
                let current = self.measure_working_tree(project_root, &config)?;
                (previous, current)
            }
            [rev] => {
                let previous = measure_at_rev(project_root, rev, &config)?;
                let current = self.measure_working_tree(project_root, &config)?;
                (previous, current)
            }
            [rev_a, rev_b] => (
                measure_at_rev(project_root, rev_a, &config)?,
                measure_at_rev(project_root, rev_b, &config)?,
            ),
            _ => unreachable!("clap caps revisions at two"),
        };

        let merged = merge_sizes(&set_a, &set_b);
        print::print_merged(&merged, &config)?;

        if config.strict {
            // strictness applies to the current state, not the baseline
            validate_no_oversized(&set_b)?;
        }

        Ok(())
    }

    fn measure_working_tree(
        &self,
        project_root: &Path,
        config: &SizerConfig,
    ) -> Result<Vec<ContractSize>> {
        if !self.no_compile {
            forge::compile(project_root)?;
        }
        let sizes = load_contract_sizes(project_root, config)?;
        snapshot::write(project_root, &sizes)?;
        Ok(sizes)
    }
}

/// Measure sizes at a revision, in a temporary worktree. A fresh worktree
/// has no build output, so it is always compiled.
fn measure_at_rev(
    project_root: &Path,
    rev: &str,
    config: &SizerConfig,
) -> Result<Vec<ContractSize>> {
    let worktree = git::checkout(project_root, rev)?;
    forge::compile(worktree.path())?;
    load_contract_sizes(worktree.path(), config)
}
