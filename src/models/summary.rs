use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::Quantity;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColumnSummary {
    pub mean: f64,
    pub median: f64,
}

/// Mean and median of each quantity for one date. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    date: NaiveDate,
    columns: [ColumnSummary; 3],
}

impl SummaryRecord {
    /// `columns` is indexed by [`Quantity::index`].
    pub fn new(date: NaiveDate, columns: [ColumnSummary; 3]) -> Self {
        Self { date, columns }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Date in `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn get(&self, quantity: Quantity) -> ColumnSummary {
        self.columns[quantity.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, ColumnSummary)> + '_ {
        Quantity::ALL.into_iter().map(|q| (q, self.get(q)))
    }
}

/// Serializes as `{"airTemperature": {"mean": .., "median": ..}, ...}`.
impl Serialize for SummaryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (quantity, summary) in self.iter() {
            map.serialize_entry(quantity.json_key(), &summary)?;
        }
        map.end()
    }
}
