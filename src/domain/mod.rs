//! Core domain types and logic.

pub mod row;
pub mod symbol;
pub mod merge;
pub mod price_lookup;
pub mod signal;
pub mod strategy;
pub mod strategy_parser;
pub mod settings;
pub mod error;
