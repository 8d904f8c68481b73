//! Contract size extraction and cross-revision merging

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::bytecode::measure;
use crate::error::{Error, Result};
use crate::filter::ContractFilter;
use crate::settings::SolcSettings;

// =============================================================================
// Records
// =============================================================================

/// A compiled contract as produced by the build tool, before measurement.
/// `bytecode` is the creation (init) code, `deployed_bytecode` the runtime
/// code; both are hex strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledContract {
    pub source_name: String,
    pub contract_name: String,
    pub bytecode: String,
    pub deployed_bytecode: String,
    pub solc_settings: SolcSettings,
}

/// Measured sizes for one contract. Identity is the
/// `(source_name, contract_name)` pair, unique within one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSize {
    pub source_name: String,
    pub contract_name: String,
    pub deploy_size: usize,
    pub init_size: usize,
    pub solc_settings: SolcSettings,
}

/// One contract's sizes across two snapshots. Current fields reflect the
/// "after" set; `previous_*` reflect the "before" set and are absent for
/// contracts that did not exist there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedContractSize {
    pub source_name: String,
    pub contract_name: String,
    pub deploy_size: usize,
    pub init_size: usize,
    pub solc_settings: SolcSettings,
    pub previous_deploy_size: Option<usize>,
    pub previous_init_size: Option<usize>,
    pub settings_changed: bool,
}

/// Common accessors over plain and merged size records, so classification
/// and printing work over either
pub trait SizeRecord {
    fn source_name(&self) -> &str;
    fn contract_name(&self) -> &str;
    fn deploy_size(&self) -> usize;
    fn init_size(&self) -> usize;
    fn solc_settings(&self) -> &SolcSettings;

    /// `source:Contract`, e.g. `src/Token.sol:Token`
    fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name(), self.contract_name())
    }

    /// Name shown in reports: the bare contract name when `flat`
    fn display_name(&self, flat: bool) -> String {
        if flat {
            self.contract_name().to_string()
        } else {
            self.fully_qualified_name()
        }
    }
}

impl SizeRecord for ContractSize {
    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn contract_name(&self) -> &str {
        &self.contract_name
    }

    fn deploy_size(&self) -> usize {
        self.deploy_size
    }

    fn init_size(&self) -> usize {
        self.init_size
    }

    fn solc_settings(&self) -> &SolcSettings {
        &self.solc_settings
    }
}

impl SizeRecord for MergedContractSize {
    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn contract_name(&self) -> &str {
        &self.contract_name
    }

    fn deploy_size(&self) -> usize {
        self.deploy_size
    }

    fn init_size(&self) -> usize {
        self.init_size
    }

    fn solc_settings(&self) -> &SolcSettings {
        &self.solc_settings
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Measure every compiled contract that passes the filter.
///
/// A decoding failure on any artifact aborts the whole extraction, since
/// corrupt bytecode indicates an upstream build problem.
pub fn extract_sizes(
    artifacts: &[CompiledContract],
    filter: &ContractFilter,
) -> Result<Vec<ContractSize>> {
    artifacts
        .iter()
        .filter(|artifact| {
            filter.matches(&format!(
                "{}:{}",
                artifact.source_name, artifact.contract_name
            ))
        })
        .map(|artifact| {
            Ok(ContractSize {
                source_name: artifact.source_name.clone(),
                contract_name: artifact.contract_name.clone(),
                deploy_size: measure(&artifact.deployed_bytecode)?,
                init_size: measure(&artifact.bytecode)?,
                solc_settings: artifact.solc_settings.clone(),
            })
        })
        .collect()
}

/// Fail when two records share a display name, which would make a report
/// ambiguous. With `flat` enabled distinct sources can collide; records are
/// never silently dropped to resolve this.
pub fn ensure_unique_display_names<T: SizeRecord>(records: &[T], flat: bool) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        let display_name = record.display_name(flat);
        if !seen.insert(display_name.clone()) {
            return Err(Error::AmbiguousContractName(display_name));
        }
    }
    Ok(())
}

// =============================================================================
// Merging
// =============================================================================

/// Merge two independently measured size sets into a per-contract diff view.
///
/// The union of identities drives the output: contracts only in `set_b` are
/// additions (no previous sizes), contracts only in `set_a` are removals
/// (current sizes zeroed, settings unknown).
pub fn merge_sizes(set_a: &[ContractSize], set_b: &[ContractSize]) -> Vec<MergedContractSize> {
    let index_a: BTreeMap<(&str, &str), &ContractSize> = set_a
        .iter()
        .map(|s| ((s.source_name.as_str(), s.contract_name.as_str()), s))
        .collect();
    let index_b: BTreeMap<(&str, &str), &ContractSize> = set_b
        .iter()
        .map(|s| ((s.source_name.as_str(), s.contract_name.as_str()), s))
        .collect();

    let identities: BTreeMap<(&str, &str), ()> = index_a
        .keys()
        .chain(index_b.keys())
        .map(|&key| (key, ()))
        .collect();

    identities
        .keys()
        .map(|key| {
            let previous = index_a.get(key).copied();
            let current = index_b.get(key).copied();
            merge_one(key, previous, current)
        })
        .collect()
}

fn merge_one(
    identity: &(&str, &str),
    previous: Option<&ContractSize>,
    current: Option<&ContractSize>,
) -> MergedContractSize {
    let (source_name, contract_name) = *identity;

    let (deploy_size, init_size, solc_settings) = match current {
        Some(b) => (b.deploy_size, b.init_size, b.solc_settings.clone()),
        None => (0, 0, SolcSettings::unknown()),
    };

    // a contract missing from either side always counts as a settings change
    let settings_changed = match (previous, current) {
        (Some(a), Some(b)) => !a.solc_settings.is_equivalent(&b.solc_settings),
        _ => true,
    };

    MergedContractSize {
        source_name: source_name.to_string(),
        contract_name: contract_name.to_string(),
        deploy_size,
        init_size,
        solc_settings,
        previous_deploy_size: previous.map(|a| a.deploy_size),
        previous_init_size: previous.map(|a| a.init_size),
        settings_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(source: &str, name: &str, deployed: &str, init: &str) -> CompiledContract {
        CompiledContract {
            source_name: source.to_string(),
            contract_name: name.to_string(),
            bytecode: init.to_string(),
            deployed_bytecode: deployed.to_string(),
            solc_settings: SolcSettings::new("0.8.29", true, 200),
        }
    }

    fn size(name: &str, deploy: usize, init: usize, settings: SolcSettings) -> ContractSize {
        ContractSize {
            source_name: "src/Test.sol".to_string(),
            contract_name: name.to_string(),
            deploy_size: deploy,
            init_size: init,
            solc_settings: settings,
        }
    }

    #[test]
    fn test_extract_measures_each_artifact() {
        let artifacts = vec![
            artifact("src/Token.sol", "Token", "0x6080604052", "0x60806040526080"),
            artifact("src/Vault.sol", "Vault", "0x", ""),
        ];

        let sizes = extract_sizes(&artifacts, &ContractFilter::default()).unwrap();

        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[0].deploy_size, 5);
        assert_eq!(sizes[0].init_size, 7);
        assert_eq!(sizes[1].deploy_size, 0);
        assert_eq!(sizes[1].init_size, 0);
    }

    #[test]
    fn test_extract_preserves_names_and_settings() {
        let artifacts = vec![artifact("src/Token.sol", "Token", "0x00", "0x00")];

        let sizes = extract_sizes(&artifacts, &ContractFilter::default()).unwrap();

        assert_eq!(sizes[0].source_name, "src/Token.sol");
        assert_eq!(sizes[0].contract_name, "Token");
        assert_eq!(sizes[0].solc_settings, SolcSettings::new("0.8.29", true, 200));
        assert_eq!(sizes[0].fully_qualified_name(), "src/Token.sol:Token");
    }

    #[test]
    fn test_extract_applies_filter() {
        let artifacts = vec![
            artifact("src/Token.sol", "Token", "0x00", "0x00"),
            artifact("src/Vault.sol", "Vault", "0x00", "0x00"),
        ];
        let filter =
            ContractFilter::from_patterns(&["Token".to_string()], &[]).unwrap();

        let sizes = extract_sizes(&artifacts, &filter).unwrap();

        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes[0].contract_name, "Token");
    }

    #[test]
    fn test_extract_fails_on_corrupt_bytecode() {
        let artifacts = vec![artifact("src/Token.sol", "Token", "0xnothex", "0x00")];

        assert!(extract_sizes(&artifacts, &ContractFilter::default()).is_err());
    }

    #[test]
    fn test_display_name_flat() {
        let s = size("Token", 1, 1, SolcSettings::unknown());
        assert_eq!(s.display_name(false), "src/Test.sol:Token");
        assert_eq!(s.display_name(true), "Token");
    }

    #[test]
    fn test_ensure_unique_display_names() {
        let a = ContractSize {
            source_name: "src/a/Token.sol".to_string(),
            ..size("Token", 1, 1, SolcSettings::unknown())
        };
        let b = ContractSize {
            source_name: "src/b/Token.sol".to_string(),
            ..size("Token", 1, 1, SolcSettings::unknown())
        };
        let records = vec![a, b];

        // fully qualified names are distinct, flattened names collide
        assert!(ensure_unique_display_names(&records, false).is_ok());
        let err = ensure_unique_display_names(&records, true).unwrap_err();
        assert!(matches!(err, Error::AmbiguousContractName(name) if name == "Token"));
    }

    #[test]
    fn test_merge_covers_union_of_identities() {
        let settings = SolcSettings::new("0.8.29", true, 0);
        let removed = size("removed", 1, 1, settings.clone());
        let added = size("added", 1, 1, settings.clone());
        let unchanged = size("unchanged", 1, 1, settings.clone());

        let merged = merge_sizes(
            &[removed.clone(), unchanged.clone()],
            &[added.clone(), unchanged.clone()],
        );

        assert_eq!(merged.len(), 3);

        let find = |name: &str| merged.iter().find(|m| m.contract_name == name).unwrap();

        let added = find("added");
        assert_eq!(added.deploy_size, 1);
        assert_eq!(added.previous_deploy_size, None);
        assert_eq!(added.previous_init_size, None);
        assert!(added.settings_changed);

        let removed = find("removed");
        assert_eq!(removed.deploy_size, 0);
        assert_eq!(removed.init_size, 0);
        assert_eq!(removed.solc_settings, SolcSettings::unknown());
        assert_eq!(removed.previous_deploy_size, Some(1));
        assert_eq!(removed.previous_init_size, Some(1));
        assert!(removed.settings_changed);

        let unchanged = find("unchanged");
        assert_eq!(unchanged.deploy_size, 1);
        assert_eq!(unchanged.previous_deploy_size, Some(1));
        assert!(!unchanged.settings_changed);
    }

    #[test]
    fn test_merge_detects_settings_changes() {
        let before = SolcSettings::new("0.8.29", true, 0);

        let changed_runs = size("changedRuns", 1, 1, before.clone());
        let mut changed_runs_after = changed_runs.clone();
        changed_runs_after.solc_settings.runs = 1;

        let no_optimizer = size(
            "changedRunsNoOptimizer",
            1,
            1,
            SolcSettings::new("0.8.29", false, 0),
        );
        let mut no_optimizer_after = no_optimizer.clone();
        no_optimizer_after.solc_settings.runs = 1;

        let merged = merge_sizes(
            &[changed_runs, no_optimizer],
            &[changed_runs_after, no_optimizer_after],
        );

        let find = |name: &str| merged.iter().find(|m| m.contract_name == name).unwrap();
        assert!(find("changedRuns").settings_changed);
        assert!(!find("changedRunsNoOptimizer").settings_changed);
    }

    #[test]
    fn test_merge_with_itself_shows_no_change() {
        let set = vec![
            size("a", 10, 20, SolcSettings::new("0.8.29", true, 200)),
            size("b", 30, 40, SolcSettings::new("0.8.29", false, 0)),
        ];

        let merged = merge_sizes(&set, &set);

        assert_eq!(merged.len(), set.len());
        for record in &merged {
            assert_eq!(record.previous_deploy_size, Some(record.deploy_size));
            assert_eq!(record.previous_init_size, Some(record.init_size));
            assert!(!record.settings_changed);
        }
    }

    #[test]
    fn test_merge_against_empty_previous_set() {
        let set = vec![size("a", 10, 20, SolcSettings::new("0.8.29", true, 200))];

        let merged = merge_sizes(&[], &set);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].previous_deploy_size, None);
        assert!(merged[0].settings_changed);
    }

    #[test]
    fn test_merge_end_to_end_scenario() {
        let settings = SolcSettings::new("0.8.29", true, 200);
        let foo_before = size("Foo", 100, 0, settings.clone());
        let foo_after = size("Foo", 150, 0, settings.clone());
        let bar = size("Bar", 50, 0, settings.clone());

        let merged = merge_sizes(&[foo_before], &[foo_after, bar]);

        assert_eq!(merged.len(), 2);
        let find = |name: &str| merged.iter().find(|m| m.contract_name == name).unwrap();

        let foo = find("Foo");
        assert_eq!(foo.previous_deploy_size, Some(100));
        assert_eq!(foo.deploy_size, 150);
        assert!(!foo.settings_changed);

        let bar = find("Bar");
        assert_eq!(bar.previous_deploy_size, None);
        assert_eq!(bar.deploy_size, 50);
        assert!(bar.settings_changed);
    }
}
