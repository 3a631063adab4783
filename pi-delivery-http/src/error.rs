//! Internal helpers for mapping HTTP/reqwest failures to [`FetchCause`].

use pi_delivery::FetchCause;

/// Map a non-success HTTP status from the pi.delivery API to a [`FetchCause`].
///
/// The service answers 400 when the start index lies beyond the digit range
/// it serves.
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> FetchCause {
    match status.as_u16() {
        400 => FetchCause::OutOfRange,
        code => FetchCause::Http {
            status: code,
            body: body.to_string(),
        },
    }
}

/// Map a [`reqwest::Error`] to a [`FetchCause`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchCause {
    FetchCause::Network(Box::new(err))
}
