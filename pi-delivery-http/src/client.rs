//! pi.delivery API client struct and builder.

use std::future::Future;

use pi_delivery::{DeliveryError, DigitSource, FetchCause};

use crate::error::{map_http_status, map_reqwest_error};
use crate::types::PiDigitsResponse;

/// Default pi.delivery API base URL.
const DEFAULT_BASE_URL: &str = "https://api.pi.delivery";

/// Maximum number of digits the service returns per request.
///
/// Wire this into `DigitSequencer::new` so every sub-request stays within
/// the bound.
pub const DIGIT_LIMIT: u64 = 1000;

/// Client for the pi.delivery digits API.
///
/// Implements [`DigitSource`] for use anywhere a digit source is accepted.
///
/// # Example
///
/// ```no_run
/// use pi_delivery_http::PiDelivery;
///
/// let client = PiDelivery::new().base_url("https://api.pi.delivery");
/// ```
pub struct PiDelivery {
    /// API base URL (override for testing with a mock server).
    pub(crate) base_url: String,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl PiDelivery {
    /// Create a new client against the public pi.delivery API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL.
    ///
    /// Useful for testing with a local mock server or an API proxy.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the digits endpoint URL.
    pub(crate) fn pi_url(&self) -> String {
        format!("{}/v1/pi", self.base_url)
    }
}

impl Default for PiDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitSource for PiDelivery {
    /// Fetch one bounded run of digits.
    ///
    /// Issues `GET /v1/pi?start=<start>&numberOfDigits=<count>` and returns
    /// the `content` field of the JSON body. A count over [`DIGIT_LIMIT`]
    /// is rejected before any network activity.
    fn fetch(
        &self,
        start: u64,
        count: u64,
    ) -> impl Future<Output = Result<String, DeliveryError>> + Send {
        let url = self.pi_url();
        let http_client = self.client.clone();

        async move {
            if count > DIGIT_LIMIT {
                return Err(DeliveryError::Validation(format!(
                    "cannot request more than {DIGIT_LIMIT} digits per call (got {count})"
                )));
            }

            tracing::debug!(url = %url, start, count, "requesting digit run");

            let response = http_client
                .get(&url)
                .query(&[
                    ("start", start.to_string()),
                    ("numberOfDigits", count.to_string()),
                ])
                .send()
                .await
                .map_err(|e| fetch_error(start, count, map_reqwest_error(e)))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| fetch_error(start, count, map_reqwest_error(e)))?;

            if !status.is_success() {
                return Err(fetch_error(start, count, map_http_status(status, &body)));
            }

            let decoded: PiDigitsResponse = serde_json::from_str(&body)
                .map_err(|e| fetch_error(start, count, FetchCause::InvalidBody(e.to_string())))?;

            Ok(decoded.content)
        }
    }
}

/// Attach the sub-request coordinates to a fetch failure.
fn fetch_error(start: u64, count: u64, cause: FetchCause) -> DeliveryError {
    DeliveryError::Fetch {
        start,
        count,
        cause,
    }
}
