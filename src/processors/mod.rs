pub mod row_merger;
pub mod statistics;

pub use row_merger::{MergeCursor, RowMerger};
pub use statistics::{mean, median, Column, DailyStatistics, StatisticsEngine};
