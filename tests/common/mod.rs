#![allow(dead_code)]

use pricebook::domain::error::PricebookError;
pub use pricebook::domain::row::{Row, Series};
use pricebook::domain::symbol::normalize_symbol;
use pricebook::ports::series_port::SeriesPort;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory series store; only the required trait methods are implemented so
/// the provided `write`, `read_columns` and `price_lookup` are exercised.
pub struct MockSeriesPort {
    pub data: RefCell<HashMap<String, Series>>,
    pub appends: RefCell<Vec<(String, usize)>>,
}

impl MockSeriesPort {
    pub fn new() -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
            appends: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(self, ticker: &str, rows: Series) -> Self {
        self.data.borrow_mut().insert(normalize_symbol(ticker), rows);
        self
    }
}

impl SeriesPort for MockSeriesPort {
    fn read(&self, ticker: &str) -> Result<Series, PricebookError> {
        Ok(self
            .data
            .borrow()
            .get(&normalize_symbol(ticker))
            .cloned()
            .unwrap_or_default())
    }

    fn overwrite(&self, ticker: &str, rows: &[Row]) -> Result<(), PricebookError> {
        self.data
            .borrow_mut()
            .insert(normalize_symbol(ticker), rows.to_vec());
        Ok(())
    }

    fn append_rows(&self, ticker: &str, rows: &[Row]) -> Result<(), PricebookError> {
        let key = normalize_symbol(ticker);
        self.appends.borrow_mut().push((key.clone(), rows.len()));
        self.data
            .borrow_mut()
            .entry(key)
            .or_default()
            .extend_from_slice(rows);
        Ok(())
    }

    fn has_series(&self, ticker: &str) -> Result<bool, PricebookError> {
        Ok(self.data.borrow().contains_key(&normalize_symbol(ticker)))
    }
}

pub fn make_row(date: &str, close: f64) -> Row {
    Row::new(
        date,
        format!("{close}"),
        format!("{}", close + 1.0),
        format!("{}", close - 1.0),
        format!("{close}"),
        "1000",
    )
}

pub fn make_series(points: &[(&str, f64)]) -> Series {
    points.iter().map(|(d, c)| make_row(d, *c)).collect()
}

pub fn dates(series: &[Row]) -> Vec<String> {
    series.iter().map(|r| r.date().to_string()).collect()
}
