//! Daily price row representation.
//!
//! Fields are kept as text exactly as stored; numeric interpretation happens
//! only where a consumer needs it (see [`crate::domain::price_lookup`]).

/// Number of positional fields in a well-formed row.
pub const FIELD_COUNT: usize = 6;

pub const DATE: usize = 0;
pub const OPEN: usize = 1;
pub const HIGH: usize = 2;
pub const LOW: usize = 3;
pub const CLOSE: usize = 4;
pub const VOLUME: usize = 5;

/// Column names in on-disk order.
pub const COLUMN_NAMES: [&str; FIELD_COUNT] = ["date", "open", "high", "low", "close", "volume"];

/// One `date,open,high,low,close,volume` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

/// Ordered rows for one ticker, ascending by date.
pub type Series = Vec<Row>;

impl Row {
    pub fn new(
        date: impl Into<String>,
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            fields: vec![
                date.into(),
                open.into(),
                high.into(),
                low.into(),
                close.into(),
                volume.into(),
            ],
        }
    }

    /// Build a row from positional fields without checking the count.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The date field, or `""` for a row with no fields at all.
    pub fn date(&self) -> &str {
        self.field(DATE).unwrap_or("")
    }

    pub fn close(&self) -> Option<&str> {
        self.field(CLOSE)
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.fields.len() >= FIELD_COUNT
    }

    /// Comma-joined form without a line terminator.
    pub fn to_line(&self) -> String {
        self.fields.join(",")
    }
}
