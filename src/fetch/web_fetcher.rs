use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::{Quantity, RawSource};
use crate::utils::constants::ERROR_PAGE_MARKER;
use crate::utils::date_stamp::format_date_stamp;
use crate::utils::progress::ProgressReporter;
use chrono::NaiveDate;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};

/// Page address for one quantity: `<base>/<YYYY>/<YYYY_MM_DD>/<feed>`.
pub fn feed_url(base_url: &str, date: NaiveDate, quantity: Quantity) -> String {
    format!(
        "{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        date.format("%Y"),
        format_date_stamp(date),
        quantity.feed_name()
    )
}

/// The upstream site answers requests for dates without data by redirecting
/// to its error page instead of returning an HTTP error.
pub fn is_error_page(final_url: &str, body: &str) -> bool {
    final_url.contains(ERROR_PAGE_MARKER) || body.contains(ERROR_PAGE_MARKER)
}

pub struct WebFetcher {
    client: Client,
    base_url: String,
}

impl WebFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .redirect(Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    /// Retrieve one feed into its own buffer.
    pub async fn fetch_feed(&self, date: NaiveDate, quantity: Quantity) -> Result<RawSource> {
        let url = feed_url(&self.base_url, date, quantity);
        debug!(%url, "Fetching feed");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Upstream returned an error status");
            return Err(ProcessingError::UpstreamUnavailable {
                url,
                reason: format!("HTTP {}", status),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        if is_error_page(&final_url, &body) {
            warn!(%url, "Upstream returned its error page");
            return Err(ProcessingError::UpstreamUnavailable {
                url,
                reason: "web page error reported; confirm the date".to_string(),
            });
        }

        debug!(%url, bytes = body.len(), "Fetched feed");
        Ok(RawSource::new(quantity, body))
    }

    /// Retrieve all three feeds concurrently, returned in [`Quantity::ALL`]
    /// order.
    pub async fn fetch_sources(
        &self,
        date: NaiveDate,
        progress: Option<&ProgressReporter>,
    ) -> Result<[RawSource; 3]> {
        let (air, pressure, wind) = tokio::try_join!(
            self.fetch_counted(date, Quantity::AirTemperature, progress),
            self.fetch_counted(date, Quantity::BarometricPressure, progress),
            self.fetch_counted(date, Quantity::WindSpeed, progress),
        )?;

        Ok([air, pressure, wind])
    }

    async fn fetch_counted(
        &self,
        date: NaiveDate,
        quantity: Quantity,
        progress: Option<&ProgressReporter>,
    ) -> Result<RawSource> {
        let source = self.fetch_feed(date, quantity).await?;
        if let Some(p) = progress {
            p.increment(1);
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url() {
        let date = NaiveDate::from_ymd_opt(2015, 2, 3).unwrap();
        assert_eq!(
            feed_url("http://lpo.dt.navy.mil/data/DM", date, Quantity::AirTemperature),
            "http://lpo.dt.navy.mil/data/DM/2015/2015_02_03/Air_Temp"
        );
        assert_eq!(
            feed_url("http://lpo.dt.navy.mil/data/DM/", date, Quantity::WindSpeed),
            "http://lpo.dt.navy.mil/data/DM/2015/2015_02_03/Wind_Speed"
        );
    }

    #[test]
    fn test_is_error_page() {
        assert!(is_error_page("http://lpo.dt.navy.mil/error.html", ""));
        assert!(is_error_page(
            "http://lpo.dt.navy.mil/data/DM/2015/2015_02_30/Air_Temp",
            "<a href=\"/error.html\">moved</a>"
        ));
        assert!(!is_error_page(
            "http://lpo.dt.navy.mil/data/DM/2015/2015_02_03/Air_Temp",
            "2015_02_03 09:02:34 38.86\r\n"
        ));
    }

    #[test]
    fn test_fetcher_builds_from_settings() {
        let fetcher = WebFetcher::new(&Settings::default()).unwrap();
        assert_eq!(fetcher.base_url, Settings::default().base_url);
    }
}
