pub mod date;
pub mod web_fetcher;

pub use date::FetchDate;
pub use web_fetcher::{feed_url, is_error_page, WebFetcher};
