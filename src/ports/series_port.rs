//! Series storage port trait.
//!
//! Not safe for concurrent writers on the same ticker; callers serialize
//! writes per ticker. Concurrent reads are fine.

use crate::domain::error::PricebookError;
use crate::domain::merge::{classify, merge};
use crate::domain::price_lookup::{build_price_lookup, DateFormat, PriceLookup};
use crate::domain::row::{Row, Series, FIELD_COUNT};

pub trait SeriesPort {
    /// Stored rows for `ticker`, empty when nothing is stored.
    fn read(&self, ticker: &str) -> Result<Series, PricebookError>;

    /// Discard any stored series and store `rows` in its place.
    fn overwrite(&self, ticker: &str, rows: &[Row]) -> Result<(), PricebookError>;

    /// Add `rows` after the stored series, creating it if absent.
    fn append_rows(&self, ticker: &str, rows: &[Row]) -> Result<(), PricebookError>;

    fn has_series(&self, ticker: &str) -> Result<bool, PricebookError>;

    /// Persist `rows`. With `append`, only the rows [`merge`] selects against the
    /// stored series are written; dates are compared under `format`. The series
    /// exists afterwards even when nothing was selected. Returns the number of
    /// rows written.
    ///
    /// Rows with fewer than six fields are rejected before anything is stored.
    fn write(
        &self,
        ticker: &str,
        rows: &[Row],
        append: bool,
        format: &DateFormat,
    ) -> Result<usize, PricebookError> {
        if let Some(index) = rows.iter().position(|row| !row.is_complete()) {
            return Err(PricebookError::MalformedRow {
                row: index + 1,
                reason: format!("expected {} fields, found {}", FIELD_COUNT, rows[index].len()),
            });
        }
        if !append {
            self.overwrite(ticker, rows)?;
            return Ok(rows.len());
        }
        let existing = self.read(ticker)?;
        let to_append = merge(&existing, rows, format)?;
        if to_append.is_empty() && !rows.is_empty() {
            let overlap = classify(&existing, rows, format)?;
            tracing::warn!(ticker, ?overlap, incoming = rows.len(), "no rows appended");
        } else {
            tracing::info!(ticker, rows = to_append.len(), "appending rows");
        }
        self.append_rows(ticker, &to_append)?;
        Ok(to_append.len())
    }

    /// Column-oriented view: `[dates, opens, highs, lows, closes, volumes]`.
    fn read_columns(&self, ticker: &str) -> Result<Vec<Vec<String>>, PricebookError> {
        let rows = self.read(ticker)?;
        let mut columns = vec![Vec::with_capacity(rows.len()); FIELD_COUNT];
        for (index, row) in rows.iter().enumerate() {
            if !row.is_complete() {
                return Err(PricebookError::MalformedRow {
                    row: index + 1,
                    reason: format!("expected {} fields, found {}", FIELD_COUNT, row.len()),
                });
            }
            for (column, value) in columns.iter_mut().zip(row.fields()) {
                column.push(value.clone());
            }
        }
        Ok(columns)
    }

    fn price_lookup(
        &self,
        ticker: &str,
        fill: bool,
        format: &DateFormat,
    ) -> Result<PriceLookup, PricebookError> {
        build_price_lookup(&self.read(ticker)?, fill, format)
    }
}
