pub mod row_reader;

pub use row_reader::{parse_merged_line, RowReader};
