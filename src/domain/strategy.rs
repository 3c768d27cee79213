//! Strategy structure handed to the evaluation engine.

use crate::domain::signal::Signal;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyPosition {
    /// Portfolio weight.
    pub ratio: f64,
    pub ticker: String,
    pub buy_signal: String,
    pub sell_signal: String,
    pub buy: Signal,
    pub sell: Signal,
    pub is_holding: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyStructure {
    /// Tickers that appear as position subjects.
    pub assets: BTreeSet<String>,
    /// Positions in source order.
    pub positions: Vec<StrategyPosition>,
}

/// A parsed strategy plus everything the market must load before evaluating it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStrategy {
    pub structure: StrategyStructure,
    pub instruments: BTreeSet<String>,
    pub indicators: BTreeSet<String>,
}

impl StrategyStructure {
    pub fn total_ratio(&self) -> f64 {
        self.positions.iter().map(|p| p.ratio).sum()
    }
}
