use crate::error::{ProcessingError, Result};
use crate::models::{ColumnSummary, MergedRow, Quantity, SummaryRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Arithmetic mean, or `None` for an empty slice.
///
/// Each term is scaled by the count before summing, so finite inputs near
/// `f64::MAX` still give a finite mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let count = values.len() as f64;
    Some(values.iter().map(|v| v / count).sum())
}

/// Median of a sorted copy of `values`, or `None` for an empty slice.
///
/// Odd counts return the middle element; even counts return the average of
/// the two elements either side of the middle.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Values of one quantity, in the order the rows arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    quantity: Quantity,
    values: Vec<f64>,
}

impl Column {
    pub fn new(quantity: Quantity) -> Self {
        Self {
            quantity,
            values: Vec::new(),
        }
    }

    pub fn from_values(quantity: Quantity, values: Vec<f64>) -> Self {
        Self { quantity, values }
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Make room for `additional` more values without pushing any.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.values
            .try_reserve(additional)
            .map_err(|e| ProcessingError::Allocation {
                quantity: self.quantity,
                message: e.to_string(),
            })
    }

    pub fn push(&mut self, value: f64) -> Result<()> {
        self.reserve(1)?;
        self.values.push(value);
        Ok(())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> Result<f64> {
        mean(&self.values).ok_or(ProcessingError::EmptyInput {
            quantity: self.quantity,
        })
    }

    pub fn median(&self) -> Result<f64> {
        median(&self.values).ok_or(ProcessingError::EmptyInput {
            quantity: self.quantity,
        })
    }

    pub fn summary(&self) -> Result<ColumnSummary> {
        Ok(ColumnSummary {
            mean: self.mean()?,
            median: self.median()?,
        })
    }
}

/// Accumulates merged rows and summarizes them for the date of the first row.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    date: Option<NaiveDate>,
    columns: [Column; 3],
}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self {
            date: None,
            columns: Quantity::ALL.map(Column::new),
        }
    }

    pub fn accumulate(&mut self, row: &MergedRow) -> Result<()> {
        // Reserve every column first so a failure leaves them all the same length
        for column in self.columns.iter_mut() {
            column.reserve(1)?;
        }
        for column in self.columns.iter_mut() {
            column.values.push(row.value(column.quantity));
        }
        if self.date.is_none() {
            self.date = Some(row.date);
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.columns[0].len()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn column(&self, quantity: Quantity) -> &Column {
        &self.columns[quantity.index()]
    }

    pub fn summarize(&self) -> Result<SummaryRecord> {
        let date = self.date.ok_or(ProcessingError::EmptyInput {
            quantity: Quantity::ALL[0],
        })?;

        let summaries = [
            self.columns[0].summary()?,
            self.columns[1].summary()?,
            self.columns[2].summary()?,
        ];

        debug!(%date, rows = self.row_count(), "Summarized rows");
        Ok(SummaryRecord::new(date, summaries))
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One [`StatisticsEngine`] per calendar date, keyed by each row's own date.
#[derive(Debug, Clone, Default)]
pub struct DailyStatistics {
    days: BTreeMap<NaiveDate, StatisticsEngine>,
}

impl DailyStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, row: &MergedRow) -> Result<()> {
        self.days.entry(row.date).or_default().accumulate(row)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Summaries in ascending date order.
    pub fn summarize(&self) -> Result<Vec<SummaryRecord>> {
        self.days.values().map(StatisticsEngine::summarize).collect()
    }
}
