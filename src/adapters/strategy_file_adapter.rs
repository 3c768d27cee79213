//! Strategy definition files on disk.

use crate::domain::error::PricebookError;
use crate::domain::strategy::ParsedStrategy;
use crate::domain::strategy_parser::parse_strategy_str;
use std::fs;
use std::path::Path;

/// Load and parse the strategy file `name` inside `dir`.
///
/// A missing file parses as an empty strategy.
pub fn load_strategy(name: &str, dir: &Path) -> Result<ParsedStrategy, PricebookError> {
    let path = dir.join(name);
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "strategy file not found");
        return Ok(ParsedStrategy::default());
    }

    let source = fs::read_to_string(&path)?;
    let parsed = parse_strategy_str(&source)?;
    tracing::debug!(
        path = %path.display(),
        positions = parsed.structure.positions.len(),
        instruments = parsed.instruments.len(),
        indicators = parsed.indicators.len(),
        "loaded strategy"
    );
    Ok(parsed)
}
