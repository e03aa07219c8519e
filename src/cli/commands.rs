use crate::cli::args::{Cli, Commands};
use crate::cli::logging::init_logging;
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::{FetchDate, WebFetcher};
use crate::models::{MergedRow, Quantity, RawSource, SummaryRecord};
use crate::processors::{DailyStatistics, RowMerger, StatisticsEngine};
use crate::readers::RowReader;
use crate::utils::constants::TODAY;
use crate::utils::progress::ProgressReporter;
use crate::writers::{render_json, render_table, write_merged_rows};
use chrono::NaiveDate;
use std::io::{self, Write};
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Fetch {
            date,
            timestamp_check,
        } => {
            let date = resolve_date(date.as_deref())?;
            let settings = Settings::load(cli.config.as_deref())?;
            let sources = fetch_sources(&settings, date, cli.quiet).await?;

            let rows = RowMerger::from_feeds(&sources)?
                .with_timestamp_check(timestamp_check)
                .merge_all()?;

            let mut stdout = io::stdout().lock();
            let count = write_merged_rows(&mut stdout, &rows)?;
            info!(%date, rows = count, "Wrote merged rows");
        }

        Commands::Crunch {
            json,
            by_date,
            input,
        } => {
            let summaries = match input {
                Some(path) => summarize(RowReader::from_path(&path)?, by_date)?,
                None => summarize(RowReader::new(io::stdin().lock()), by_date)?,
            };
            print_summaries(&summaries, json)?;
        }

        Commands::Report {
            date,
            json,
            timestamp_check,
        } => {
            let date = resolve_date(date.as_deref())?;
            let settings = Settings::load(cli.config.as_deref())?;
            let sources = fetch_sources(&settings, date, cli.quiet).await?;

            let merger =
                RowMerger::from_feeds(&sources)?.with_timestamp_check(timestamp_check);
            let summaries = summarize(merger, false)?;
            print_summaries(&summaries, json)?;
        }
    }

    Ok(())
}

fn resolve_date(arg: Option<&str>) -> Result<NaiveDate> {
    let date = arg.unwrap_or(TODAY).parse::<FetchDate>()?;
    Ok(date.resolve())
}

async fn fetch_sources(settings: &Settings, date: NaiveDate, quiet: bool) -> Result<[RawSource; 3]> {
    let fetcher = WebFetcher::new(settings)?;
    let progress = ProgressReporter::new(
        Quantity::ALL.len() as u64,
        &format!("Fetching feeds for {}", date),
        quiet,
    );

    let sources = fetcher.fetch_sources(date, Some(&progress)).await;
    progress.finish_and_clear();
    sources
}

/// Feed rows into the statistics engine; `by_date` yields one summary per
/// date instead of a single summary labelled with the first row's date.
pub fn summarize<I>(rows: I, by_date: bool) -> Result<Vec<SummaryRecord>>
where
    I: IntoIterator<Item = Result<MergedRow>>,
{
    if by_date {
        let mut daily = DailyStatistics::new();
        for row in rows {
            daily.accumulate(&row?)?;
        }
        return daily.summarize();
    }

    let mut engine = StatisticsEngine::new();
    for row in rows {
        engine.accumulate(&row?)?;
    }
    Ok(vec![engine.summarize()?])
}

fn print_summaries(summaries: &[SummaryRecord], json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        stdout.write_all(render_json(summaries)?.as_bytes())?;
    } else {
        for summary in summaries {
            stdout.write_all(render_table(summary).as_bytes())?;
        }
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::readers::parse_merged_line;

    fn rows(lines: &[&str]) -> Vec<Result<MergedRow>> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| parse_merged_line(line, i))
            .collect()
    }

    #[test]
    fn test_resolve_date() {
        assert_eq!(
            resolve_date(Some("20150203")).unwrap(),
            NaiveDate::from_ymd_opt(2015, 2, 3).unwrap()
        );
        assert!(resolve_date(None).is_ok());
        assert!(matches!(
            resolve_date(Some("Feb 3")),
            Err(ProcessingError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_summarize_single() {
        let summaries = summarize(
            rows(&[
                "2015_02_03 09:02:34 38.86 30.07 3.00",
                "2015_02_03 09:07:34 39.00 29.91 5.00",
                "2015_02_04 00:02:34 37.50 30.12 1.00",
            ]),
            false,
        )
        .unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date_string(), "2015-02-03");
        assert_eq!(summaries[0].get(Quantity::BarometricPressure).median, 30.07);
    }

    #[test]
    fn test_summarize_by_date() {
        let summaries = summarize(
            rows(&[
                "2015_02_03 09:02:34 38.86 30.07 3.00",
                "2015_02_04 00:02:34 37.50 30.12 1.00",
            ]),
            true,
        )
        .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].get(Quantity::WindSpeed).mean, 1.0);
    }

    #[test]
    fn test_summarize_propagates_row_errors() {
        let result = summarize(
            rows(&["2015_02_03 09:02:34 38.86 30.07 3.00", "garbage"]),
            false,
        );
        assert!(matches!(result, Err(ProcessingError::Parse { .. })));
    }

    #[test]
    fn test_summarize_empty_input() {
        let result = summarize(Vec::<Result<MergedRow>>::new(), false);
        assert!(matches!(result, Err(ProcessingError::EmptyInput { .. })));
    }
}
