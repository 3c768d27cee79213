//! Date-keyed closing price lookup built from a stored series.
//!
//! With gap filling enabled the table covers every calendar day from the first
//! to the last row, weekends and holidays carrying the previous close.

use crate::domain::error::PricebookError;
use crate::domain::row::Row;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date text → closing price.
pub type PriceLookup = BTreeMap<String, f64>;

/// A validated strftime pattern used to parse and render row dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    /// Accepts a pattern only if it renders and re-parses a calendar date
    /// without loss.
    pub fn new(pattern: &str) -> Result<Self, String> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(format!("'{pattern}' is not a valid date format"));
        }
        let format = Self {
            pattern: pattern.to_string(),
        };
        let sample = NaiveDate::from_ymd_opt(2001, 2, 3).ok_or("sample date out of range")?;
        match format.parse(&format.format(sample)) {
            Ok(round_tripped) if round_tripped == sample => Ok(format),
            _ => Err(format!(
                "'{pattern}' does not identify a single calendar day"
            )),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn parse(&self, value: &str) -> Result<NaiveDate, PricebookError> {
        NaiveDate::parse_from_str(value.trim(), &self.pattern).map_err(|_| {
            PricebookError::InvalidDate {
                value: value.to_string(),
                format: self.pattern.clone(),
            }
        })
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.pattern).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Build the lookup table for `series`.
///
/// Every row is validated before any entry is produced, so a malformed date or
/// close anywhere fails the whole build.
pub fn build_price_lookup(
    series: &[Row],
    fill: bool,
    format: &DateFormat,
) -> Result<PriceLookup, PricebookError> {
    let points = series
        .iter()
        .enumerate()
        .map(|(index, row)| parse_point(index + 1, row, format))
        .collect::<Result<Vec<_>, _>>()?;

    let mut lookup = PriceLookup::new();
    for pair in points.windows(2) {
        let (mut cursor, close) = pair[0];
        let (next, _) = pair[1];
        while cursor < next {
            lookup.insert(format.format(cursor), close);
            cursor = match cursor.succ_opt() {
                Some(day) if fill => day,
                _ => next,
            };
        }
    }

    if let Some(&(date, close)) = points.last() {
        lookup.insert(format.format(date), close);
    }
    Ok(lookup)
}

fn parse_point(
    row_number: usize,
    row: &Row,
    format: &DateFormat,
) -> Result<(NaiveDate, f64), PricebookError> {
    if !row.is_complete() {
        return Err(PricebookError::MalformedRow {
            row: row_number,
            reason: format!("expected 6 fields, found {}", row.len()),
        });
    }
    let date = format.parse(row.date())?;
    let close_text = row.close().unwrap_or_default();
    let close = close_text
        .trim()
        .parse::<f64>()
        .map_err(|_| PricebookError::MalformedRow {
            row: row_number,
            reason: format!("invalid close value '{close_text}'"),
        })?;
    Ok((date, close))
}
