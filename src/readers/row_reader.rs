use crate::error::{ProcessingError, Result};
use crate::models::{MergedRow, Reading};
use crate::utils::date_stamp::{parse_date_stamp, parse_time};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const SOURCE_NAME: &str = "merged rows";

/// Parse one interchange line: `YYYY_MM_DD HH:MM:SS <value1> <value2> <value3>`.
///
/// Fields may be separated by any amount of whitespace. `offset` is the byte
/// offset of the line within its input and is only used for error reporting.
pub fn parse_merged_line(line: &str, offset: usize) -> Result<MergedRow> {
    let parse_error = || ProcessingError::Parse {
        source_name: SOURCE_NAME.to_string(),
        offset,
        raw: line.trim_end().to_string(),
    };

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return Err(parse_error());
    }

    let date = parse_date_stamp(parts[0]).ok_or_else(parse_error)?;
    let time = parse_time(parts[1]).ok_or_else(parse_error)?;
    let values = [
        Reading::parse(parts[2]).ok_or_else(parse_error)?,
        Reading::parse(parts[3]).ok_or_else(parse_error)?,
        Reading::parse(parts[4]).ok_or_else(parse_error)?,
    ];

    Ok(MergedRow::new(date, time, values))
}

/// Streams merged rows from any buffered reader, skipping blank lines.
pub struct RowReader<R> {
    reader: R,
    offset: usize,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }
}

impl RowReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<MergedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();

            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(read) => {
                    let offset = self.offset;
                    self.offset += read;

                    if line.trim().is_empty() {
                        continue;
                    }

                    return Some(parse_merged_line(&line, offset));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_merged_line() {
        let row = parse_merged_line("2015_02_03 09:02:34 38.86  30.07   3.00", 0).unwrap();

        assert_eq!(row.date_string(), "2015-02-03");
        assert_eq!(row.time.format("%H:%M:%S").to_string(), "09:02:34");
        assert_eq!(row.value(Quantity::AirTemperature), 38.86);
        assert_eq!(row.value(Quantity::BarometricPressure), 30.07);
        assert_eq!(row.value(Quantity::WindSpeed), 3.00);
    }

    #[test]
    fn test_parse_merged_line_errors() {
        let err = parse_merged_line("2015_02_03 09:02:34 38.86 30.07\n", 54).unwrap_err();
        match err {
            ProcessingError::Parse { offset, raw, .. } => {
                assert_eq!(offset, 54);
                assert_eq!(raw, "2015_02_03 09:02:34 38.86 30.07");
            }
            other => panic!("expected parse error, got {:?}", other),
        }

        assert!(parse_merged_line("2015_02_03 09:02:34 38.86 30.07 calm", 0).is_err());
        assert!(parse_merged_line("2015_13_03 09:02:34 38.86 30.07 3.00", 0).is_err());
        assert!(parse_merged_line("2015_02_03 noon 38.86 30.07 3.00", 0).is_err());
    }

    #[test]
    fn test_row_reader_skips_blank_lines() {
        let input = "2015_02_03 09:02:34 38.86 30.07 3.00\n\n2015_02_03 09:07:34 39.00 29.91 5.00\n";
        let rows: Vec<MergedRow> = RowReader::new(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].value(Quantity::WindSpeed), 5.00);
    }

    #[test]
    fn test_row_reader_reports_offset() {
        let input = "2015_02_03 09:02:34 38.86 30.07 3.00\n2015_02_03 09:07:34 39.00 29.91\n";
        let results: Vec<_> = RowReader::new(Cursor::new(input)).collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ProcessingError::Parse { offset: 37, .. })
        ));
    }

    #[test]
    fn test_row_reader_from_path() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "2015_02_03 09:02:34 38.86 30.07 3.00")?;
        writeln!(temp_file, "2015_02_03 09:07:34 39.00 29.91 5.00")?;

        let rows = RowReader::from_path(temp_file.path())?.collect::<Result<Vec<_>>>()?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value(Quantity::BarometricPressure), 30.07);

        Ok(())
    }
}
