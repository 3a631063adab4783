//! pi.delivery API response types.

use serde::Deserialize;

/// JSON body returned by `GET /v1/pi`.
#[derive(Debug, Deserialize)]
pub struct PiDigitsResponse {
    /// The retrieved digit characters.
    pub content: String,
}
