pub mod constants;
pub mod date_stamp;
pub mod progress;

pub use constants::*;
pub use date_stamp::{format_date_stamp, normalize_date_stamp, parse_date_stamp, parse_time};
pub use progress::ProgressReporter;
