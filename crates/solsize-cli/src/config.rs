use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use solsize_core::SizeUnit;

const FOUNDRY_CONFIG: &str = "foundry.toml";

/// Size reporting configuration, read from the optional `[contract_sizer]`
/// table in foundry.toml. Every field has a default, so the table itself
/// may be absent. Command line flags override these values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizerConfig {
    /// Sort report rows by contract name instead of deploy size
    pub alpha_sort: bool,
    /// Display bare contract names instead of fully qualified names
    pub flat: bool,
    /// Fail when any contract exceeds a size limit
    pub strict: bool,
    /// Patterns of fully qualified names to include
    pub only: Vec<String>,
    /// Patterns of fully qualified names to exclude
    pub except: Vec<String>,
    /// Write the report to this file (unstyled) instead of stdout
    pub output_file: Option<PathBuf>,
    /// Unit used to display sizes
    pub unit: SizeUnit,
}

/// The slice of foundry.toml this tool cares about
#[derive(Debug, Deserialize)]
struct FoundryConfig {
    #[serde(default)]
    contract_sizer: SizerConfig,
}

impl SizerConfig {
    /// Load configuration from foundry.toml in the given project root.
    /// Unknown fields and invalid unit values are rejected here, before
    /// any sizing runs.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(FOUNDRY_CONFIG);
        let content = std::fs::read_to_string(&path)
            .map_err(|_| eyre!("Could not find foundry.toml. Is this a Foundry project?"))?;

        let config: FoundryConfig = toml::from_str(&content)
            .wrap_err_with(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config.contract_sizer)
    }
}
