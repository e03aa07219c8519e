/// Upstream date stamp layout (`YYYY_MM_DD`)
pub const DATE_STAMP_LEN: usize = 10;
pub const DATE_STAMP_SEPARATOR: char = '_';

/// Upstream site (Acoustic Research Detachment, Lake Pend Oreille, ID)
pub const DEFAULT_BASE_URL: &str = "http://lpo.dt.navy.mil/data/DM";
pub const DEFAULT_USER_AGENT: &str = concat!("lpo-weather/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The upstream site redirects to this page when no data exists for a date
pub const ERROR_PAGE_MARKER: &str = "error.html";

/// Configuration sources
pub const CONFIG_FILE: &str = "lpo-weather.toml";
pub const ENV_PREFIX: &str = "LPO_WEATHER";

/// Literal accepted in place of a YYYYMMDD date
pub const TODAY: &str = "today";

/// Feed token positions after whitespace tokenization
pub const DATE_FIELD: usize = 0;
pub const TIME_FIELD: usize = 1;
pub const VALUE_FIELD: usize = 2;
