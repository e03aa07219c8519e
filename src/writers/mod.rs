pub mod interchange;
pub mod summary_writer;

pub use interchange::write_merged_rows;
pub use summary_writer::{render_json, render_table};
