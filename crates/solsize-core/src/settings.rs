//! Compiler settings attached to a measured contract

use serde::{Deserialize, Serialize};

/// The compilation configuration that produced a given bytecode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolcSettings {
    pub solc_version: String,
    pub optimizer: bool,
    pub runs: u32,
}

impl SolcSettings {
    pub fn new(solc_version: impl Into<String>, optimizer: bool, runs: u32) -> Self {
        Self {
            solc_version: solc_version.into(),
            optimizer,
            runs,
        }
    }

    /// Sentinel used when settings cannot be determined, e.g. for a
    /// contract removed between two revisions
    pub fn unknown() -> Self {
        Self {
            solc_version: "unknown".to_string(),
            optimizer: false,
            runs: 0,
        }
    }

    /// The run count that actually affects output: zero when the
    /// optimizer is disabled
    fn effective_runs(&self) -> u32 {
        if self.optimizer {
            self.runs
        } else {
            0
        }
    }

    /// Whether two settings are equivalent for reporting purposes.
    ///
    /// The `runs` value is ignored unless the optimizer is enabled, so
    /// settings differing only in an unused run count compare equal.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.solc_version == other.solc_version
            && self.effective_runs() == other.effective_runs()
    }
}
