use crate::error::{ProcessingError, Result};
use crate::utils::constants::TODAY;
use chrono::{Local, NaiveDate};
use std::str::FromStr;

/// Date requested on the command line: `today` or an explicit `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchDate {
    #[default]
    Today,
    On(NaiveDate),
}

impl FetchDate {
    pub fn parse(arg: &str) -> Result<Self> {
        if arg.eq_ignore_ascii_case(TODAY) {
            return Ok(FetchDate::Today);
        }

        if arg.len() != 8 || !arg.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProcessingError::InvalidDate(arg.to_string()));
        }

        NaiveDate::parse_from_str(arg, "%Y%m%d")
            .map(FetchDate::On)
            .map_err(|_| ProcessingError::InvalidDate(arg.to_string()))
    }

    /// Calendar date to fetch; `Today` uses the local clock.
    pub fn resolve(&self) -> NaiveDate {
        match self {
            FetchDate::Today => Local::now().date_naive(),
            FetchDate::On(date) => *date,
        }
    }
}

impl FromStr for FetchDate {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
