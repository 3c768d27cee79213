//! Incremental merge of a candidate series onto stored history.
//!
//! Dates are parsed with the configured [`DateFormat`] and compared as
//! calendar days, so formats that do not sort as text (`%d/%m/%Y`) merge
//! correctly. An unparseable date surfaces as [`PricebookError::InvalidDate`].
//!
//! Only two shapes ever produce rows to append: no stored history, or an
//! incoming series that strictly straddles the stored last date and contains
//! it. Every other overlap appends nothing.

use crate::domain::error::PricebookError;
use crate::domain::price_lookup::DateFormat;
use crate::domain::row::{Row, Series};

/// How an incoming series relates to the last stored date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Nothing stored yet; all incoming rows are new.
    Fresh,
    /// Incoming contains the stored last date at `after`; rows past it are new.
    Splice { after: usize },
    /// Incoming ends on or before the stored last date (or is empty).
    Stale,
    /// Incoming starts on or after the stored last date, so there is no shared
    /// row to anchor on.
    Ahead,
    /// Stored last date lies inside the incoming range but no incoming row
    /// carries it.
    Unanchored,
}

impl Overlap {
    pub fn appends(&self) -> bool {
        matches!(self, Overlap::Fresh | Overlap::Splice { .. })
    }
}

pub fn classify(
    existing: &[Row],
    incoming: &[Row],
    format: &DateFormat,
) -> Result<Overlap, PricebookError> {
    let Some(stored_last) = existing.last() else {
        return Ok(Overlap::Fresh);
    };
    let (Some(first), Some(last)) = (incoming.first(), incoming.last()) else {
        return Ok(Overlap::Stale);
    };
    let stored_last = format.parse(stored_last.date())?;
    let first = format.parse(first.date())?;
    let last = format.parse(last.date())?;

    if stored_last < last && stored_last > first {
        for (after, row) in incoming.iter().enumerate() {
            if format.parse(row.date())? == stored_last {
                return Ok(Overlap::Splice { after });
            }
        }
        Ok(Overlap::Unanchored)
    } else if stored_last >= last {
        Ok(Overlap::Stale)
    } else {
        Ok(Overlap::Ahead)
    }
}

/// Rows of `incoming` that must be appended after `existing`.
pub fn merge(
    existing: &[Row],
    incoming: &[Row],
    format: &DateFormat,
) -> Result<Series, PricebookError> {
    Ok(match classify(existing, incoming, format)? {
        Overlap::Fresh => incoming.to_vec(),
        Overlap::Splice { after } => incoming[after + 1..].to_vec(),
        Overlap::Stale | Overlap::Ahead | Overlap::Unanchored => Vec::new(),
    })
}
