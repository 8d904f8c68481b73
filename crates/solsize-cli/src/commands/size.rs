//! Report compiled contract sizes

use std::path::Path;

use clap::Args;
use color_eyre::eyre::Result;
use solsize_core::validate_no_oversized;

use super::{load_contract_sizes, ReportOptions};
use crate::config::SizerConfig;
use crate::{forge, git, print, snapshot};

/// Report compiled contract sizes against the EVM limits
#[derive(Args)]
pub struct SizeCommand {
    /// Git revision where contracts are measured, instead of the working tree
    #[arg(long)]
    pub rev: Option<String>,

    /// Don't compile before measuring
    #[arg(long)]
    pub no_compile: bool,

    #[command(flatten)]
    pub options: ReportOptions,
}

impl SizeCommand {
    pub async fn run(self) -> Result<()> {
        let project_root = Path::new(".");
        let mut config = SizerConfig::load(project_root)?;
        self.options.apply(&mut config);

        let sizes = match &self.rev {
            Some(rev) => {
                let worktree = git::checkout(project_root, rev)?;
                if !self.no_compile {
                    forge::compile(worktree.path())?;
                }
                load_contract_sizes(worktree.path(), &config)?
            }
            None => {
                if !self.no_compile {
                    forge::compile(project_root)?;
                }
                let sizes = load_contract_sizes(project_root, &config)?;
                snapshot::write(project_root, &sizes)?;
                sizes
            }
        };

        print::print_sizes(&sizes, &config)?;

        if config.strict {
            validate_no_oversized(&sizes)?;
        }

        Ok(())
    }
}
