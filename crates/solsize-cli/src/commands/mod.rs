//! CLI commands for solsize

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use color_eyre::eyre::Result;
use solsize_core::{extract_sizes, ContractFilter, ContractSize, SizeUnit};

use crate::config::SizerConfig;
use crate::forge::ArtifactLoader;

pub mod diff;
pub mod size;

/// All available CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Report compiled contract sizes against the EVM limits
    Size(size::SizeCommand),

    /// Compare contract sizes across git revisions or against the last run
    Diff(diff::DiffCommand),
}

impl Command {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Command::Size(cmd) => cmd.run().await,
            Command::Diff(cmd) => cmd.run().await,
        }
    }
}

/// Report options shared by the size and diff commands. Each flag
/// overrides the corresponding foundry.toml value.
#[derive(Args)]
pub struct ReportOptions {
    /// Fail when any contract exceeds a size limit
    #[arg(long)]
    pub strict: bool,

    /// Display bare contract names instead of fully qualified names
    #[arg(long)]
    pub flat: bool,

    /// Sort by contract name instead of deploy size
    #[arg(long)]
    pub alpha_sort: bool,

    /// Unit used to display sizes (B, kB or KiB)
    #[arg(long)]
    pub unit: Option<SizeUnit>,

    /// Write the report to a file (unstyled) instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only report contracts whose fully qualified name matches
    #[arg(long)]
    pub only: Vec<String>,

    /// Skip contracts whose fully qualified name matches
    #[arg(long)]
    pub except: Vec<String>,
}

impl ReportOptions {
    pub fn apply(&self, config: &mut SizerConfig) {
        if self.strict {
            config.strict = true;
        }
        if self.flat {
            config.flat = true;
        }
        if self.alpha_sort {
            config.alpha_sort = true;
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(output) = &self.output {
            config.output_file = Some(output.clone());
        }
        if !self.only.is_empty() {
            config.only = self.only.clone();
        }
        if !self.except.is_empty() {
            config.except = self.except.clone();
        }
    }
}

/// Load artifacts from a project root and measure every contract that
/// passes the configured filter
pub fn load_contract_sizes(
    project_root: &Path,
    config: &SizerConfig,
) -> Result<Vec<ContractSize>> {
    let filter = ContractFilter::from_patterns(&config.only, &config.except)?;
    let artifacts = ArtifactLoader::new(project_root).load_all()?;
    let sizes = extract_sizes(&artifacts, &filter)?;
    Ok(sizes)
}
