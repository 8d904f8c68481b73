//! Protocol size limits and display units
//!
//! See EIPs 170 and 3860:
//! https://eips.ethereum.org/EIPS/eip-170
//! https://eips.ethereum.org/EIPS/eip-3860

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum deployed (runtime) bytecode size in bytes
pub const DEPLOYED_SIZE_LIMIT: usize = 24576;

/// Maximum initcode size in bytes for a contract-creation transaction
pub const INIT_SIZE_LIMIT: usize = 49152;

/// Unit used to scale sizes for display. Comparisons against the limits are
/// always in raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SizeUnit {
    B,
    #[serde(rename = "kB")]
    Kb,
    #[default]
    KiB,
}

impl SizeUnit {
    pub fn divisor(&self) -> f64 {
        match self {
            SizeUnit::B => 1.0,
            SizeUnit::Kb => 1000.0,
            SizeUnit::KiB => 1024.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::B => "B",
            SizeUnit::Kb => "kB",
            SizeUnit::KiB => "KiB",
        }
    }

    /// Scale a byte count into this unit, formatted to three decimals
    pub fn format(&self, size: usize) -> String {
        format!("{:.3}", size as f64 / self.divisor())
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SizeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(SizeUnit::B),
            "kB" => Ok(SizeUnit::Kb),
            "KiB" => Ok(SizeUnit::KiB),
            _ => Err(format!("unit must be one of the following: B, kB, KiB (got '{s}')")),
        }
    }
}
