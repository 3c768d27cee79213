//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_store::{csv_error, read_rows, CsvSeriesStore};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::strategy_file_adapter::load_strategy;
use crate::domain::error::PricebookError;
use crate::domain::row::COLUMN_NAMES;
use crate::domain::settings::Settings;
use crate::domain::strategy::ParsedStrategy;
use crate::obs;
use crate::ports::series_port::SeriesPort;

#[derive(Parser, Debug)]
#[command(name = "pricebook", about = "Daily price history store and strategy parser")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Override the store root directory
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store rows from a headerless CSV file
    Write {
        #[arg(long)]
        ticker: String,
        #[arg(short, long)]
        input: PathBuf,
        /// Append only the rows newer than the stored series
        #[arg(long)]
        append: bool,
    },
    /// Print the stored series for a ticker
    Read {
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        columns: bool,
    },
    /// Print the date → close lookup table for a ticker
    Lookup {
        #[arg(long)]
        ticker: String,
        /// Only stored dates, no carried-forward gap entries
        #[arg(long)]
        no_fill: bool,
    },
    /// Parse a strategy file and list what it needs
    Strategy {
        #[arg(short, long)]
        name: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    if let Err(e) = obs::init_tracing(&cli.log_level) {
        eprintln!("warning: {e}");
    }

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PricebookError::StrategyParse(e)) => {
            eprintln!("error: {}", e.display_with_context());
            ExitCode::from(&PricebookError::StrategyParse(e))
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn execute(cli: Cli) -> Result<(), PricebookError> {
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(root) = cli.data {
        settings.store_root = root;
    }

    match cli.command {
        Command::Write {
            ticker,
            input,
            append,
        } => {
            let written = run_write(&settings, &ticker, &input, append)?;
            eprintln!("Wrote {written} rows for {ticker}");
            Ok(())
        }
        Command::Read { ticker, columns } => {
            let store = CsvSeriesStore::new(&settings.store_root)?;
            if columns {
                print_columns(&store.read_columns(&ticker)?);
            } else {
                for row in store.read(&ticker)? {
                    println!("{}", row.to_line());
                }
            }
            Ok(())
        }
        Command::Lookup { ticker, no_fill } => {
            let store = CsvSeriesStore::new(&settings.store_root)?;
            let fill = settings.fill && !no_fill;
            for (date, close) in store.price_lookup(&ticker, fill, &settings.date_format)? {
                println!("{date},{close}");
            }
            Ok(())
        }
        Command::Strategy { name, dir } => {
            let dir = dir.unwrap_or_else(|| settings.strategy_dir.clone());
            let parsed = load_strategy(&name, &dir)?;
            print!("{}", render_strategy(&parsed));
            Ok(())
        }
    }
}

/// Settings from `path`, or the defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, PricebookError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    tracing::debug!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path)?;
    Settings::from_config(&adapter)
}

pub fn run_write(
    settings: &Settings,
    ticker: &str,
    input: &Path,
    append: bool,
) -> Result<usize, PricebookError> {
    let rows = read_rows(input).map_err(|e| csv_error(ticker, e))?;
    let store = CsvSeriesStore::new(&settings.store_root)?;
    store.write(ticker, &rows, append, &settings.date_format)
}

pub fn render_strategy(parsed: &ParsedStrategy) -> String {
    let mut out = String::new();
    for position in &parsed.structure.positions {
        out.push_str(&format!(
            "{} {} buy=[{}] sell=[{}]\n",
            position.ratio, position.ticker, position.buy, position.sell
        ));
    }
    out.push_str(&format!("assets: {}\n", join(&parsed.structure.assets)));
    out.push_str(&format!("instruments: {}\n", join(&parsed.instruments)));
    out.push_str(&format!("indicators: {}\n", join(&parsed.indicators)));
    out
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn print_columns(columns: &[Vec<String>]) {
    for (name, values) in COLUMN_NAMES.iter().zip(columns) {
        println!("{}: {}", name, values.join(","));
    }
}
