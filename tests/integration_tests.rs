use lpo_weather::cli::summarize;
use lpo_weather::models::{Quantity, RawSource};
use lpo_weather::processors::RowMerger;
use lpo_weather::readers::RowReader;
use lpo_weather::writers::{render_json, render_table, write_merged_rows};
use lpo_weather::ProcessingError;
use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::BufWriter;
use tempfile::TempDir;

/// Upstream-style feed: fixed-width records terminated by CR/LF.
fn feed(quantity: Quantity, records: &[(&str, &str)]) -> RawSource {
    let text: String = records
        .iter()
        .map(|(time, value)| format!("2015_02_03 {}{:>6}\r\n", time, value))
        .collect();
    RawSource::new(quantity, text)
}

fn sample_feeds() -> [RawSource; 3] {
    [
        feed(
            Quantity::AirTemperature,
            &[("09:02:34", "38.86"), ("09:07:34", "39.00"), ("09:12:34", "37.50")],
        ),
        feed(
            Quantity::BarometricPressure,
            &[("09:02:34", "30.07"), ("09:07:34", "29.91"), ("09:12:34", "30.12")],
        ),
        feed(
            Quantity::WindSpeed,
            &[("09:02:34", "3.00"), ("09:07:34", "5.00"), ("09:12:34", "1.00")],
        ),
    ]
}

#[test]
fn test_fetch_then_crunch_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let rows_path = temp_dir.path().join("merged.txt");

    // Stage one: merge and write the interchange file
    let feeds = sample_feeds();
    let rows = RowMerger::from_feeds(&feeds).unwrap().merge_all().unwrap();
    {
        let mut writer = BufWriter::new(File::create(&rows_path).unwrap());
        assert_eq!(write_merged_rows(&mut writer, &rows).unwrap(), 3);
    }

    let written = std::fs::read_to_string(&rows_path).unwrap();
    assert_eq!(
        written,
        "2015_02_03 09:02:34 38.86 30.07 3.00\n\
         2015_02_03 09:07:34 39.00 29.91 5.00\n\
         2015_02_03 09:12:34 37.50 30.12 1.00\n"
    );

    // Stage two: read it back and summarize
    let summaries = summarize(RowReader::from_path(&rows_path).unwrap(), false).unwrap();
    assert_eq!(summaries.len(), 1);

    let summary = &summaries[0];
    assert_eq!(summary.date_string(), "2015-02-03");
    assert!((summary.get(Quantity::AirTemperature).mean - 38.453333).abs() < 1e-6);
    assert_eq!(summary.get(Quantity::AirTemperature).median, 38.86);
    assert_eq!(summary.get(Quantity::BarometricPressure).median, 30.07);
    assert_eq!(summary.get(Quantity::WindSpeed).median, 3.0);

    let table = render_table(summary);
    assert!(table.starts_with("2015-02-03\n\tAir Temperature\n\t\tMean\t38.453333\n"));
    assert!(table.contains("\tBarometric Pressure\n\t\tMean\t30.033333\n\t\tMedian\t30.070000\n"));
    assert!(table.ends_with("\tWind Speed\n\t\tMean\t3.000000\n\t\tMedian\t3.000000\n"));

    let json: serde_json::Value = serde_json::from_str(&render_json(&summaries).unwrap()).unwrap();
    assert_eq!(json["2015-02-03"]["windSpeed"]["median"], 3.0);
}

#[test]
fn test_truncated_feed_is_reported() {
    let feeds = sample_feeds();
    let truncated = feed(Quantity::BarometricPressure, &[("09:02:34", "30.07")]);

    let result = RowMerger::new(&feeds[0], [&truncated, &feeds[2]])
        .unwrap()
        .merge_all();

    match result {
        Err(ProcessingError::Alignment { row, quantity, .. }) => {
            assert_eq!(row, 1);
            assert_eq!(quantity, Quantity::BarometricPressure);
        }
        other => panic!("expected alignment error, got {:?}", other),
    }
}

#[test]
fn test_crunch_rejects_empty_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let rows_path = temp_dir.path().join("empty.txt");
    File::create(&rows_path).unwrap();

    let result = summarize(RowReader::from_path(&rows_path).unwrap(), false);
    assert!(matches!(result, Err(ProcessingError::EmptyInput { .. })));
}
