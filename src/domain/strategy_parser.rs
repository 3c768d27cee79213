//! Strategy source parser.
//!
//! One position per line: `ratio,ticker,buy_signal,sell_signal`. Blank lines
//! are skipped. Signals follow the grammar in [`crate::domain::signal`].

use crate::domain::error::ParseError;
use crate::domain::signal::parse_signal;
use crate::domain::strategy::{ParsedStrategy, StrategyPosition};
use crate::domain::symbol::normalize_symbol;

const FIELD_SEPARATOR: char = ',';

pub fn parse_strategy<I, S>(lines: I) -> Result<ParsedStrategy, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedStrategy::default();

    for (index, raw) in lines.into_iter().enumerate() {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let position = parse_position(line).map_err(|e| e.at_line(index + 1, line))?;

        parsed.structure.assets.insert(position.ticker.clone());
        parsed.instruments.insert(position.ticker.clone());
        for signal in [&position.buy, &position.sell] {
            parsed.instruments.extend(signal.instruments());
            parsed.indicators.extend(signal.indicators());
        }
        parsed.structure.positions.push(position);
    }

    Ok(parsed)
}

/// Parse a whole strategy file body.
pub fn parse_strategy_str(source: &str) -> Result<ParsedStrategy, ParseError> {
    parse_strategy(source.lines())
}

fn parse_position(line: &str) -> Result<StrategyPosition, ParseError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [ratio, ticker, buy_signal, sell_signal] = fields.as_slice() else {
        return Err(ParseError::new(
            format!(
                "expected 4 fields (ratio,ticker,buy_signal,sell_signal), found {}",
                fields.len()
            ),
            line,
        ));
    };

    let ratio = ratio
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::new(format!("invalid ratio '{ratio}'"), line))?;

    Ok(StrategyPosition {
        ratio,
        ticker: normalize_symbol(ticker),
        buy_signal: buy_signal.to_string(),
        sell_signal: sell_signal.to_string(),
        buy: parse_signal(buy_signal)?,
        sell: parse_signal(sell_signal)?,
        is_holding: false,
    })
}
