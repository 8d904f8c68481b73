//! Contract inclusion and exclusion filtering

use crate::error::Result;
use regex::Regex;

/// Allow/deny filter over fully qualified contract names.
///
/// A name passes when it matches at least one `only` pattern (or `only` is
/// empty) and matches no `except` pattern. `except` takes precedence when
/// both match.
#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    only: Vec<Regex>,
    except: Vec<Regex>,
}

impl ContractFilter {
    /// Compile a filter from pattern strings. Malformed patterns are
    /// rejected here, before any extraction runs.
    pub fn from_patterns(only: &[String], except: &[String]) -> Result<Self> {
        Ok(Self {
            only: compile_patterns(only)?,
            except: compile_patterns(except)?,
        })
    }

    pub fn matches(&self, fully_qualified_name: &str) -> bool {
        if !self.only.is_empty() && !self.only.iter().any(|re| re.is_match(fully_qualified_name))
        {
            return false;
        }
        !self
            .except
            .iter()
            .any(|re| re.is_match(fully_qualified_name))
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(Into::into))
        .collect()
}
