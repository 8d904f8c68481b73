//! Type definitions for forge build artifacts

use serde::Deserialize;
use solsize_core::SolcSettings;
use std::collections::BTreeMap;

/// A contract artifact from forge build output, reduced to the fields
/// size reporting needs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub bytecode: BytecodeObject,
    pub deployed_bytecode: BytecodeObject,
    #[serde(default)]
    pub metadata: Option<ArtifactMetadata>,
}

/// Bytecode object within an artifact
#[derive(Debug, Deserialize)]
pub struct BytecodeObject {
    pub object: String,
}

/// Solc metadata embedded in the artifact
#[derive(Debug, Deserialize)]
pub struct ArtifactMetadata {
    pub compiler: MetadataCompiler,
    #[serde(default)]
    pub settings: MetadataSettings,
}

#[derive(Debug, Deserialize)]
pub struct MetadataCompiler {
    pub version: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSettings {
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    /// Maps the source path to the contract name, e.g.
    /// `"src/Counter.sol": "Counter"`
    #[serde(default)]
    pub compilation_target: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OptimizerSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub runs: u32,
}

impl ContractArtifact {
    /// Source path recorded in the metadata compilation target, if any
    pub fn source_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.settings.compilation_target.keys().next())
            .map(String::as_str)
    }

    /// Compiler settings from the metadata, or the unknown sentinel when
    /// the artifact carries no metadata
    pub fn solc_settings(&self) -> SolcSettings {
        match &self.metadata {
            Some(metadata) => SolcSettings::new(
                metadata.compiler.version.clone(),
                metadata.settings.optimizer.enabled,
                metadata.settings.optimizer.runs,
            ),
            None => SolcSettings::unknown(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contract_artifact() {
        let json = r#"{
            "abi": [],
            "bytecode": { "object": "0x6080604052348015600f57600080fd5b50" },
            "deployedBytecode": { "object": "0x6080604052" },
            "metadata": {
                "compiler": { "version": "0.8.29+commit.ab55807c" },
                "settings": {
                    "optimizer": { "enabled": true, "runs": 200 },
                    "compilationTarget": { "src/Counter.sol": "Counter" }
                }
            }
        }"#;

        let artifact: ContractArtifact = serde_json::from_str(json).unwrap();

        assert_eq!(artifact.bytecode.object, "0x6080604052348015600f57600080fd5b50");
        assert_eq!(artifact.deployed_bytecode.object, "0x6080604052");
        assert_eq!(artifact.source_name(), Some("src/Counter.sol"));

        let settings = artifact.solc_settings();
        assert_eq!(settings.solc_version, "0.8.29+commit.ab55807c");
        assert!(settings.optimizer);
        assert_eq!(settings.runs, 200);
    }

    #[test]
    fn test_parse_artifact_without_metadata() {
        let json = r#"{
            "abi": [],
            "bytecode": { "object": "0x" },
            "deployedBytecode": { "object": "0x" }
        }"#;

        let artifact: ContractArtifact = serde_json::from_str(json).unwrap();

        assert_eq!(artifact.source_name(), None);
        assert_eq!(artifact.solc_settings(), SolcSettings::unknown());
    }

    #[test]
    fn test_parse_artifact_without_optimizer_settings() {
        let json = r#"{
            "abi": [],
            "bytecode": { "object": "0x00" },
            "deployedBytecode": { "object": "0x00" },
            "metadata": {
                "compiler": { "version": "0.8.29+commit.ab55807c" },
                "settings": {
                    "compilationTarget": { "src/Counter.sol": "Counter" }
                }
            }
        }"#;

        let artifact: ContractArtifact = serde_json::from_str(json).unwrap();

        let settings = artifact.solc_settings();
        assert!(!settings.optimizer);
        assert_eq!(settings.runs, 0);
    }
}
