//! Buy/sell signal grammar.
//!
//! ```text
//! signal := ALWAYS | NEVER | term ' ' op ' ' term
//! term   := TICKER '~' INDICATOR
//! ```
//!
//! `op` is kept as an opaque token but may not itself look like a term.
//! `INDICATOR` is either `PRICE` or the name of a derived indicator the market
//! must compute.

use crate::domain::error::ParseError;
use crate::domain::symbol::normalize_symbol;
use std::collections::BTreeSet;
use std::fmt;

pub const ALWAYS: &str = "ALWAYS";
pub const NEVER: &str = "NEVER";
pub const PRICE: &str = "PRICE";

const TERM_SEPARATOR: char = '~';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator {
    Price,
    Derived(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalTerm {
    pub ticker: String,
    pub indicator: Indicator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub left: SignalTerm,
    pub operator: String,
    pub right: SignalTerm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Always,
    Never,
    Compare(Comparison),
}

/// Tagged view of a comparison operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl Comparator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessOrEqual),
            ">" => Some(Self::Greater),
            ">=" => Some(Self::GreaterOrEqual),
            "==" | "=" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            _ => None,
        }
    }
}

impl Comparison {
    /// `None` when the operator token is not a recognised comparison.
    pub fn comparator(&self) -> Option<Comparator> {
        Comparator::from_token(&self.operator)
    }
}

impl Signal {
    /// Tickers referenced by either term.
    pub fn instruments(&self) -> BTreeSet<String> {
        match self {
            Signal::Always | Signal::Never => BTreeSet::new(),
            Signal::Compare(cmp) => [&cmp.left, &cmp.right]
                .into_iter()
                .map(|term| term.ticker.clone())
                .collect(),
        }
    }

    /// Derived indicator names referenced by either term; `PRICE` never appears.
    pub fn indicators(&self) -> BTreeSet<String> {
        match self {
            Signal::Always | Signal::Never => BTreeSet::new(),
            Signal::Compare(cmp) => [&cmp.left, &cmp.right]
                .into_iter()
                .filter_map(|term| match &term.indicator {
                    Indicator::Price => None,
                    Indicator::Derived(name) => Some(name.clone()),
                })
                .collect(),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Price => write!(f, "{PRICE}"),
            Indicator::Derived(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for SignalTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.ticker, TERM_SEPARATOR, self.indicator)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Always => write!(f, "{ALWAYS}"),
            Signal::Never => write!(f, "{NEVER}"),
            Signal::Compare(cmp) => write!(f, "{} {} {}", cmp.left, cmp.operator, cmp.right),
        }
    }
}

pub fn parse_signal(text: &str) -> Result<Signal, ParseError> {
    match text {
        ALWAYS => return Ok(Signal::Always),
        NEVER => return Ok(Signal::Never),
        _ => {}
    }

    let tokens: Vec<&str> = text.split(' ').collect();
    let [left, operator, right] = tokens.as_slice() else {
        return Err(ParseError::new(
            format!(
                "signal '{}' must be ALWAYS, NEVER or 'TICKER~INDICATOR OP TICKER~INDICATOR', found {} tokens",
                text,
                tokens.len()
            ),
            text,
        ));
    };

    if operator.is_empty() || operator.contains(TERM_SEPARATOR) {
        return Err(ParseError::new(
            format!("'{operator}' is not an operator token"),
            text,
        ));
    }

    Ok(Signal::Compare(Comparison {
        left: parse_term(left, text)?,
        operator: operator.to_string(),
        right: parse_term(right, text)?,
    }))
}

/// `TICKER~INDICATOR`. The `PRICE` match runs after canonicalisation, so
/// `aapl~price` is a price term and never lands in the indicator set.
fn parse_term(term: &str, signal: &str) -> Result<SignalTerm, ParseError> {
    let parts: Vec<&str> = term.split(TERM_SEPARATOR).collect();
    let [ticker, indicator] = parts.as_slice() else {
        return Err(ParseError::new(
            format!("term '{term}' must be TICKER~INDICATOR"),
            signal,
        ));
    };

    let indicator = match normalize_symbol(indicator) {
        name if name == PRICE => Indicator::Price,
        name => Indicator::Derived(name),
    };
    Ok(SignalTerm {
        ticker: normalize_symbol(ticker),
        indicator,
    })
}
