use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Quantity;
use crate::utils::date_stamp::{format_date_stamp, TIME_FORMAT};

/// A numeric value together with the token it was parsed from.
///
/// Keeping the token lets the interchange writer reproduce the upstream text
/// exactly (`3.00` stays `3.00` instead of becoming `3`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    value: f64,
    text: String,
}

impl Reading {
    /// Parse a whitespace-free token. Returns `None` for anything that is not
    /// a finite floating-point number.
    pub fn parse(token: &str) -> Option<Self> {
        let value = token.parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }

        Some(Self {
            value,
            text: token.to_string(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One timestamped record combining all three quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Indexed by [`Quantity::index`].
    pub values: [Reading; 3],
}

impl MergedRow {
    pub fn new(date: NaiveDate, time: NaiveTime, values: [Reading; 3]) -> Self {
        Self { date, time, values }
    }

    pub fn reading(&self, quantity: Quantity) -> &Reading {
        &self.values[quantity.index()]
    }

    pub fn value(&self, quantity: Quantity) -> f64 {
        self.reading(quantity).value()
    }

    /// Date in `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Interchange format: `YYYY_MM_DD HH:MM:SS <value1> <value2> <value3>`.
impl fmt::Display for MergedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            format_date_stamp(self.date),
            self.time.format(TIME_FORMAT),
            self.values[0],
            self.values[1],
            self.values[2]
        )
    }
}
