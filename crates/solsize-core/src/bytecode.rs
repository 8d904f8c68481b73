//! Bytecode size measurement
//!
//! Measures compiled bytecode length in bytes, normalizing unresolved
//! library link placeholders so that unlinked artifacts measure the same
//! as linked ones.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Link placeholders as emitted by solc, e.g. `__$a3b5...$__`
static LINK_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__\$\w*\$__").expect("valid regex"));

/// A resolved library reference occupies a 20-byte address (40 hex chars)
const PLACEHOLDER_FILL: &str = "0000000000000000000000000000000000000000";

/// Measure the size in bytes of a hex bytecode string.
///
/// Accepts bytecode with or without the `0x` prefix. Unresolved link
/// placeholders are replaced with a zeroed 20-byte address before decoding.
/// An empty string (interface or abstract contract) measures as 0.
pub fn measure(bytecode: &str) -> Result<usize> {
    let normalized = normalize_link_placeholders(bytecode);
    let clean = normalized.trim_start_matches("0x");
    if clean.is_empty() {
        return Ok(0);
    }
    let bytes = hex::decode(clean)?;
    Ok(bytes.len())
}

/// Replace each unresolved link placeholder with a zeroed address
fn normalize_link_placeholders(bytecode: &str) -> Cow<'_, str> {
    LINK_PLACEHOLDER.replace_all(bytecode, PLACEHOLDER_FILL)
}
