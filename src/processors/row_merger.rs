use crate::error::{ProcessingError, Result};
use crate::models::{MergedRow, RawSource, Reading, SourceLine};
use crate::utils::constants::{DATE_FIELD, TIME_FIELD, VALUE_FIELD};
use crate::utils::date_stamp::{parse_date_stamp, parse_time};
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

/// Position of the merge: byte offset shared by all three feeds, and the
/// index of the next row to be produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeCursor {
    pub offset: usize,
    pub row: usize,
}

/// Aligns three feeds into [`MergedRow`]s.
///
/// The primary feed drives the merge: each of its lines supplies the date,
/// time and its own value, and the two secondary feeds are read at the same
/// byte offset. Alignment is positional, so a secondary feed that does not
/// have a line starting at that offset yields [`ProcessingError::Alignment`]
/// for that row. Timestamps are only compared when
/// [`with_timestamp_check`](Self::with_timestamp_check) enables it.
pub struct RowMerger<'a> {
    primary: &'a RawSource,
    secondaries: [&'a RawSource; 2],
    check_timestamps: bool,
    cursor: Option<MergeCursor>,
    errors: usize,
}

struct PrimaryFields<'l> {
    date_token: &'l str,
    time_token: &'l str,
    date: NaiveDate,
    time: NaiveTime,
    value: Reading,
}

impl<'a> RowMerger<'a> {
    pub fn new(primary: &'a RawSource, secondaries: [&'a RawSource; 2]) -> Result<Self> {
        let quantities = [
            primary.quantity(),
            secondaries[0].quantity(),
            secondaries[1].quantity(),
        ];
        if quantities[0] == quantities[1]
            || quantities[0] == quantities[2]
            || quantities[1] == quantities[2]
        {
            return Err(ProcessingError::InvalidFormat(format!(
                "Merge requires three distinct feeds, got {:?}",
                quantities
            )));
        }

        debug!(
            primary = %primary.quantity(),
            primary_len = primary.len(),
            secondary_lens = ?[secondaries[0].len(), secondaries[1].len()],
            "Starting row merge"
        );

        Ok(Self {
            primary,
            secondaries,
            check_timestamps: false,
            cursor: Some(MergeCursor::default()),
            errors: 0,
        })
    }

    /// Merge feeds given in [`Quantity::ALL`](crate::models::Quantity::ALL)
    /// order; the first one is primary.
    pub fn from_feeds(sources: &'a [RawSource; 3]) -> Result<Self> {
        Self::new(&sources[0], [&sources[1], &sources[2]])
    }

    /// Whether each secondary line must carry the same date and time tokens as
    /// the primary line. Disabled by default.
    pub fn with_timestamp_check(mut self, check_timestamps: bool) -> Self {
        self.check_timestamps = check_timestamps;
        self
    }

    /// Produce the row at `cursor` and the cursor for the following row, or
    /// `Ok(None)` once the primary feed is exhausted.
    pub fn step(&self, cursor: MergeCursor) -> Result<Option<(MergedRow, MergeCursor)>> {
        let Some((offset, line)) = self.next_primary_line(cursor.offset) else {
            return Ok(None);
        };

        let fields = self.parse_primary(line, offset)?;

        let mut values: [Option<Reading>; 3] = [None, None, None];
        values[self.primary.quantity().index()] = Some(fields.value);
        for source in self.secondaries {
            let reading = self.secondary_reading(
                source,
                offset,
                cursor.row,
                fields.date_token,
                fields.time_token,
            )?;
            values[source.quantity().index()] = Some(reading);
        }

        let values = match values {
            [Some(a), Some(b), Some(c)] => [a, b, c],
            _ => {
                return Err(ProcessingError::InvalidFormat(
                    "Merged row is missing a quantity".to_string(),
                ))
            }
        };

        let row = MergedRow::new(fields.date, fields.time, values);
        let next = MergeCursor {
            offset: offset + line.consumed,
            row: cursor.row + 1,
        };

        Ok(Some((row, next)))
    }

    /// Collect every row, stopping at the first error.
    pub fn merge_all(self) -> Result<Vec<MergedRow>> {
        self.collect()
    }

    /// First non-blank primary line at or after `offset`, with its start.
    fn next_primary_line(&self, mut offset: usize) -> Option<(usize, SourceLine<'a>)> {
        while let Some(line) = self.primary.line_at(offset) {
            if !line.text.trim().is_empty() {
                return Some((offset, line));
            }
            offset += line.consumed;
        }
        None
    }

    fn parse_primary<'l>(&self, line: SourceLine<'l>, offset: usize) -> Result<PrimaryFields<'l>> {
        let parse_error = || ProcessingError::Parse {
            source_name: self.primary.quantity().feed_name().to_string(),
            offset,
            raw: line.text.to_string(),
        };

        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        if tokens.len() <= VALUE_FIELD {
            return Err(parse_error());
        }

        let date_token = tokens[DATE_FIELD];
        let time_token = tokens[TIME_FIELD];
        let date = parse_date_stamp(date_token).ok_or_else(parse_error)?;
        let time = parse_time(time_token).ok_or_else(parse_error)?;
        let value = Reading::parse(tokens[VALUE_FIELD]).ok_or_else(parse_error)?;

        Ok(PrimaryFields {
            date_token,
            time_token,
            date,
            time,
            value,
        })
    }

    fn secondary_reading(
        &self,
        source: &RawSource,
        offset: usize,
        row: usize,
        date_token: &str,
        time_token: &str,
    ) -> Result<Reading> {
        let misaligned = || ProcessingError::Alignment {
            row,
            quantity: source.quantity(),
            offset,
        };

        if !source.starts_line_at(offset) {
            return Err(misaligned());
        }
        let line = source.line_at(offset).ok_or_else(misaligned)?;

        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(misaligned());
        }
        if self.check_timestamps
            && (tokens.get(DATE_FIELD) != Some(&date_token)
                || tokens.get(TIME_FIELD) != Some(&time_token))
        {
            return Err(misaligned());
        }

        tokens
            .get(VALUE_FIELD)
            .and_then(|token| Reading::parse(token))
            .ok_or_else(|| ProcessingError::Parse {
                source_name: source.quantity().feed_name().to_string(),
                offset,
                raw: line.text.to_string(),
            })
    }

    /// Cursor past the primary line at `cursor`, used to continue after a
    /// failed row.
    fn skip_row(&self, cursor: MergeCursor) -> Option<MergeCursor> {
        self.next_primary_line(cursor.offset)
            .map(|(offset, line)| MergeCursor {
                offset: offset + line.consumed,
                row: cursor.row + 1,
            })
    }

    /// Once the primary feed is exhausted, any secondary feed carrying more or
    /// less data than the primary is misaligned.
    fn check_trailing_data(&self, cursor: MergeCursor) -> Result<()> {
        let primary_len = self.primary.text().trim_end().len();
        for source in self.secondaries {
            if source.text().trim_end().len() != primary_len {
                return Err(ProcessingError::Alignment {
                    row: cursor.row,
                    quantity: source.quantity(),
                    offset: primary_len,
                });
            }
        }
        Ok(())
    }
}

impl Iterator for RowMerger<'_> {
    type Item = Result<MergedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;

        match self.step(cursor) {
            Ok(Some((row, next))) => {
                self.cursor = Some(next);
                Some(Ok(row))
            }
            Ok(None) => {
                self.cursor = None;
                debug!(rows = cursor.row, errors = self.errors, "Row merge complete");
                if self.errors == 0 {
                    self.check_trailing_data(cursor).err().map(Err)
                } else {
                    None
                }
            }
            Err(e) => {
                self.errors += 1;
                self.cursor = self.skip_row(cursor);
                Some(Err(e))
            }
        }
    }
}
