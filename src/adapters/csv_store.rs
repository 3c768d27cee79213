//! CSV file series store.
//!
//! One headerless file per ticker at `<root>/<TICKER>.csv`, one
//! `date,open,high,low,close,volume` row per line, no quoting.

use crate::domain::error::PricebookError;
use crate::domain::row::{Row, Series};
use crate::domain::symbol::normalize_symbol;
use crate::ports::series_port::SeriesPort;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

pub struct CsvSeriesStore {
    root: PathBuf,
}

impl CsvSeriesStore {
    /// Open a store rooted at `root`, creating the directory and its parents.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PricebookError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "opened series store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn csv_path(&self, ticker: &str) -> PathBuf {
        self.root.join(format!("{}.csv", normalize_symbol(ticker)))
    }

    fn write_to(&self, ticker: &str, file: File, rows: &[Row]) -> Result<(), PricebookError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        for row in rows {
            writer
                .write_record(row.fields())
                .map_err(|e| csv_error(ticker, e))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SeriesPort for CsvSeriesStore {
    fn read(&self, ticker: &str) -> Result<Series, PricebookError> {
        let path = self.csv_path(ticker);
        if !path.is_file() {
            tracing::debug!(ticker, "no stored series");
            return Ok(Vec::new());
        }

        let rows = read_rows(&path).map_err(|e| csv_error(ticker, e))?;
        tracing::debug!(ticker, rows = rows.len(), "read series");
        Ok(rows)
    }

    fn overwrite(&self, ticker: &str, rows: &[Row]) -> Result<(), PricebookError> {
        let path = self.csv_path(ticker);
        if path.is_file() {
            fs::remove_file(&path)?;
        }
        let file = File::create(&path)?;
        self.write_to(ticker, file, rows)?;
        tracing::debug!(ticker, rows = rows.len(), "overwrote series");
        Ok(())
    }

    fn append_rows(&self, ticker: &str, rows: &[Row]) -> Result<(), PricebookError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.csv_path(ticker))?;
        self.write_to(ticker, file, rows)?;
        tracing::debug!(ticker, rows = rows.len(), "appended to series");
        Ok(())
    }

    fn has_series(&self, ticker: &str) -> Result<bool, PricebookError> {
        Ok(self.csv_path(ticker).is_file())
    }
}

/// Read a headerless row file, trimming every field and skipping blank lines.
pub fn read_rows(path: &Path) -> Result<Series, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(Row::from_fields(record.iter()));
    }
    Ok(rows)
}

pub(crate) fn csv_error(ticker: &str, err: csv::Error) -> PricebookError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => PricebookError::Io(io),
        _ => PricebookError::Csv {
            ticker: ticker.to_string(),
            reason,
        },
    }
}
