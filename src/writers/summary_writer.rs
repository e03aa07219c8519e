use crate::error::Result;
use crate::models::SummaryRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Plain-text summary: the date, then each quantity with indented mean and
/// median lines.
pub fn render_table(record: &SummaryRecord) -> String {
    SummaryTable(record).to_string()
}

struct SummaryTable<'a>(&'a SummaryRecord);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.date_string())?;
        for (quantity, summary) in self.0.iter() {
            writeln!(f, "\t{}", quantity.display_name())?;
            writeln!(f, "\t\tMean\t{:.6}", summary.mean)?;
            writeln!(f, "\t\tMedian\t{:.6}", summary.median)?;
        }
        Ok(())
    }
}

/// JSON summary keyed by date:
/// `{ "<date>": { "airTemperature": {"mean": .., "median": ..}, ... } }`.
pub fn render_json(records: &[SummaryRecord]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&SummaryDocument(records))?;
    json.push('\n');
    Ok(json)
}

struct SummaryDocument<'a>(&'a [SummaryRecord]);

impl Serialize for SummaryDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for record in self.0 {
            map.serialize_entry(&record.date_string(), record)?;
        }
        map.end()
    }
}
