//! Integration tests.
//!
//! Tests cover:
//! - Write/read round trips through the CSV store on disk
//! - Incremental append policy across repeated writes
//! - Lookup tables built from stored series
//! - Provided `SeriesPort` methods against an in-memory port
//! - Strategy files feeding the store with the instruments they need

mod common;

use approx::assert_relative_eq;
use common::*;
use pricebook::adapters::csv_store::CsvSeriesStore;
use pricebook::adapters::strategy_file_adapter::load_strategy;
use pricebook::domain::error::PricebookError;
use pricebook::domain::price_lookup::DateFormat;
use pricebook::ports::series_port::SeriesPort;
use std::fs;
use tempfile::TempDir;

fn iso() -> DateFormat {
    DateFormat::default()
}

fn store() -> (TempDir, CsvSeriesStore) {
    let dir = TempDir::new().unwrap();
    let store = CsvSeriesStore::new(dir.path().join("prices")).unwrap();
    (dir, store)
}

mod csv_store_round_trip {
    use super::*;

    #[test]
    fn overwrite_then_read_is_identical() {
        let (_dir, store) = store();
        let rows = make_series(&[("2024-01-02", 10.0), ("2024-01-03", 10.5), ("2024-01-04", 9.75)]);
        store.write("aapl", &rows, false, &iso()).unwrap();
        assert_eq!(store.read("AAPL").unwrap(), rows);
    }

    #[test]
    fn repeated_daily_appends_build_history() {
        let (_dir, store) = store();
        store
            .write("SPY", &make_series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0)]), true, &iso())
            .unwrap();
        store
            .write(
                "SPY",
                &make_series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0), ("2024-01-03", 3.0)]),
                true,
                &iso(),
            )
            .unwrap();
        store
            .write(
                "SPY",
                &make_series(&[
                    ("2024-01-02", 2.0),
                    ("2024-01-03", 3.0),
                    ("2024-01-04", 4.0),
                    ("2024-01-05", 5.0),
                ]),
                true,
                &iso(),
            )
            .unwrap();

        assert_eq!(
            dates(&store.read("SPY").unwrap()),
            vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
        );
    }

    #[test]
    fn stale_append_leaves_file_untouched() {
        let (_dir, store) = store();
        let rows = make_series(&[("2024-01-01", 1.0), ("2024-01-05", 5.0)]);
        store.write("SPY", &rows, false, &iso()).unwrap();
        let before = fs::read_to_string(store.csv_path("SPY")).unwrap();

        let written = store
            .write("SPY", &make_series(&[("2024-01-02", 2.0), ("2024-01-05", 5.0)]), true, &iso())
            .unwrap();

        assert_eq!(written, 0);
        assert_eq!(fs::read_to_string(store.csv_path("SPY")).unwrap(), before);
    }
}

mod lookup_from_store {
    use super::*;

    #[test]
    fn filled_lookup_covers_weekend() {
        let (_dir, store) = store();
        store
            .write("MSFT", &make_series(&[("2024-01-05", 10.0), ("2024-01-08", 20.0)]), false, &iso())
            .unwrap();
        let lookup = store
            .price_lookup("msft", true, &DateFormat::default())
            .unwrap();
        assert_eq!(lookup.len(), 4);
        assert_relative_eq!(lookup["2024-01-07"], 10.0);
        assert_relative_eq!(lookup["2024-01-08"], 20.0);
    }

    #[test]
    fn lookup_of_unknown_ticker_is_empty() {
        let (_dir, store) = store();
        let lookup = store.price_lookup("ZZZ", true, &DateFormat::default()).unwrap();
        assert!(lookup.is_empty());
    }

    #[test]
    fn corrupt_close_fails_lookup() {
        let (_dir, store) = store();
        fs::write(
            store.csv_path("BAD"),
            "2024-01-01,1,1,1,1,1\n2024-01-02,1,1,1,oops,1\n",
        )
        .unwrap();
        let err = store
            .price_lookup("BAD", false, &DateFormat::default())
            .unwrap_err();
        assert!(matches!(err, PricebookError::MalformedRow { row: 2, .. }));
    }
}

mod provided_port_methods {
    use super::*;

    #[test]
    fn write_without_append_replaces() {
        let port = MockSeriesPort::new().with_series("AAPL", make_series(&[("2020-01-01", 1.0)]));
        let rows = make_series(&[("2024-01-01", 2.0)]);
        assert_eq!(port.write("aapl", &rows, false, &iso()).unwrap(), 1);
        assert_eq!(port.read("AAPL").unwrap(), rows);
        assert!(port.appends.borrow().is_empty());
    }

    #[test]
    fn append_only_passes_merged_tail_to_port() {
        let port = MockSeriesPort::new()
            .with_series("AAPL", make_series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0)]));
        let incoming = make_series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0), ("2024-01-03", 3.0)]);
        assert_eq!(port.write("AAPL", &incoming, true, &iso()).unwrap(), 1);
        assert_eq!(*port.appends.borrow(), vec![("AAPL".to_string(), 1)]);
    }

    #[test]
    fn append_with_no_new_rows_passes_empty_tail() {
        let port = MockSeriesPort::new()
            .with_series("AAPL", make_series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0)]));
        let incoming = make_series(&[("2024-02-01", 1.0), ("2024-02-02", 2.0)]);
        assert_eq!(port.write("AAPL", &incoming, true, &iso()).unwrap(), 0);
        assert_eq!(*port.appends.borrow(), vec![("AAPL".to_string(), 0)]);
        assert_eq!(port.read("AAPL").unwrap().len(), 2);
    }

    #[test]
    fn empty_append_to_unknown_ticker_creates_series() {
        let port = MockSeriesPort::new();
        assert_eq!(port.write("NEW", &[], true, &iso()).unwrap(), 0);
        assert!(port.has_series("NEW").unwrap());
        assert!(port.read("NEW").unwrap().is_empty());
    }

    #[test]
    fn short_row_is_rejected_before_storing() {
        let port = MockSeriesPort::new();
        let rows = vec![make_row("2024-01-01", 1.0), Row::from_fields([""])];
        let err = port.write("AAPL", &rows, false, &iso()).unwrap_err();
        assert!(matches!(err, PricebookError::MalformedRow { row: 2, .. }));
        assert!(!port.has_series("AAPL").unwrap());
    }

    #[test]
    fn day_first_dates_append_across_month_boundary() {
        let format = DateFormat::new("%d/%m/%Y").unwrap();
        let port = MockSeriesPort::new();
        port.write(
            "AAPL",
            &make_series(&[("30/01/2024", 1.0), ("31/01/2024", 2.0)]),
            false,
            &format,
        )
        .unwrap();
        let incoming = make_series(&[
            ("30/01/2024", 1.0),
            ("31/01/2024", 2.0),
            ("01/02/2024", 3.0),
            ("02/02/2024", 4.0),
        ]);
        assert_eq!(port.write("AAPL", &incoming, true, &format).unwrap(), 2);
        assert_eq!(
            dates(&port.read("AAPL").unwrap()),
            vec!["30/01/2024", "31/01/2024", "01/02/2024", "02/02/2024"]
        );
    }

    #[test]
    fn read_columns_on_mock() {
        let port = MockSeriesPort::new()
            .with_series("AAPL", make_series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0)]));
        let columns = port.read_columns("AAPL").unwrap();
        assert_eq!(columns[0], vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(columns[5], vec!["1000", "1000"]);
    }
}

mod strategy_driven_population {
    use super::*;

    #[test]
    fn instruments_from_strategy_seed_the_store() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("rotation"),
            "0.5,spy,SPY~PRICE > SPY~SMA200,SPY~PRICE < SPY~SMA200\n\
             0.5,tlt,TLT~RSI14 < IEF~RSI14,ALWAYS\n",
        )
        .unwrap();
        let parsed = load_strategy("rotation", dir.path()).unwrap();

        let (_data, store) = store();
        for ticker in &parsed.instruments {
            store
                .write(ticker, &make_series(&[("2024-01-01", 1.0)]), true, &iso())
                .unwrap();
        }

        for ticker in ["SPY", "TLT", "IEF"] {
            assert!(store.has_series(ticker).unwrap(), "{ticker} missing");
        }
        assert_eq!(parsed.structure.assets.len(), 2);
        assert_eq!(
            parsed.indicators.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["RSI14", "SMA200"]
        );
    }
}
