//! Loading compiled contracts from forge build output

use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use solsize_core::CompiledContract;

use super::types::ContractArtifact;

/// Reads compiled artifacts from a forge `out/` directory
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    out_dir: PathBuf,
}

impl ArtifactLoader {
    /// Create a loader for the given project root
    pub fn new(project_root: &Path) -> Self {
        Self {
            out_dir: project_root.join("out"),
        }
    }

    /// Load every compiled contract under the out directory.
    ///
    /// Layout is `out/<Source>.sol/<Contract>.json`. Special directories
    /// (build-info, dotfiles) and metadata sidecar files are skipped.
    pub fn load_all(&self) -> Result<Vec<CompiledContract>> {
        if !self.out_dir.exists() {
            return Err(eyre!(
                "No build output found at {}. Make sure `forge build` was run.",
                self.out_dir.display()
            ));
        }

        let mut contracts = Vec::new();

        for entry in std::fs::read_dir(&self.out_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            // Skip build-info and other special directories
            if dir_name.starts_with('.') || dir_name == "build-info" {
                continue;
            }

            for json_entry in std::fs::read_dir(&path)? {
                let json_entry = json_entry?;
                let json_path = json_entry.path();

                if json_path.extension().is_none_or(|e| e != "json") {
                    continue;
                }

                let contract_name = match json_path.file_stem().and_then(|n| n.to_str()) {
                    Some(name) => name.to_string(),
                    None => continue,
                };

                // Skip metadata sidecar files
                if contract_name.ends_with(".metadata") {
                    continue;
                }

                let content = std::fs::read_to_string(&json_path)?;
                let artifact: ContractArtifact = serde_json::from_str(&content)
                    .wrap_err_with(|| format!("Failed to parse {}", json_path.display()))?;

                let source_name = artifact
                    .source_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| dir_name.clone());

                let solc_settings = artifact.solc_settings();
                contracts.push(CompiledContract {
                    source_name,
                    contract_name,
                    bytecode: artifact.bytecode.object,
                    deployed_bytecode: artifact.deployed_bytecode.object,
                    solc_settings,
                });
            }
        }

        contracts.sort_by(|a, b| {
            (&a.source_name, &a.contract_name).cmp(&(&b.source_name, &b.contract_name))
        });
        Ok(contracts)
    }
}
