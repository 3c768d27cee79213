//! Canonical form for ticker and indicator names.

/// Canonicalize a ticker or indicator name: surrounding whitespace removed,
/// upper case. Every storage path, strategy asset and signal reference goes
/// through here.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}
