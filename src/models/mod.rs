pub mod merged_row;
pub mod quantity;
pub mod raw_source;
pub mod summary;

pub use merged_row::{MergedRow, Reading};
pub use quantity::Quantity;
pub use raw_source::{RawSource, SourceLine};
pub use summary::{ColumnSummary, SummaryRecord};
