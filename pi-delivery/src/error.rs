//! Error types for digit delivery and rendering.

use std::io;

use thiserror::Error;

/// Errors from retrieving digits.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Request parameters were rejected before any network activity.
    #[error("invalid request: {0}")]
    Validation(String),

    /// A sub-request round trip failed. The whole sequence terminates here;
    /// no partial chunk is yielded and no further sub-requests are issued.
    #[error("fetch of {count} digit(s) at index {start} failed: {cause}")]
    Fetch {
        /// Absolute index of the first digit the sub-request asked for.
        start: u64,
        /// Number of digits the sub-request asked for.
        count: u64,
        /// What went wrong.
        #[source]
        cause: FetchCause,
    },

    /// A sequencer invariant was violated. Unreachable unless the splitting
    /// logic itself is broken.
    #[error("sequencer invariant violated: {0}")]
    Internal(String),
}

/// The underlying cause of a failed sub-request.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FetchCause {
    /// Network-level error (connection reset, DNS failure, etc.).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered with an unexpected non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body, verbatim.
        body: String,
    },

    /// The requested start index lies beyond the range the service serves.
    #[error("start index beyond the service's digit range")]
    OutOfRange,

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// The service returned a different number of digits than requested.
    #[error("expected {expected} digit(s), got {actual}")]
    LengthMismatch {
        /// Digits the sub-request asked for.
        expected: u64,
        /// Digits the service actually returned.
        actual: u64,
    },

    /// The response contained a byte that is not an ASCII decimal digit.
    #[error("response contains non-digit content")]
    NonDigit,
}

/// Errors from rendering a digit stream.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
    /// The digit stream failed mid-render. The already-rendered prefix
    /// stays on the sink; nothing is rolled back.
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// Writing to the sink failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_error_display() {
        assert_eq!(
            DeliveryError::Validation("count too large".into()).to_string(),
            "invalid request: count too large"
        );
        assert_eq!(
            DeliveryError::Fetch {
                start: 2000,
                count: 100,
                cause: FetchCause::OutOfRange,
            }
            .to_string(),
            "fetch of 100 digit(s) at index 2000 failed: \
             start index beyond the service's digit range"
        );
        assert_eq!(
            DeliveryError::Internal("sub-request over limit".into()).to_string(),
            "sequencer invariant violated: sub-request over limit"
        );
    }

    #[test]
    fn fetch_cause_display() {
        assert_eq!(
            FetchCause::Http {
                status: 503,
                body: "unavailable".into(),
            }
            .to_string(),
            "HTTP 503: unavailable"
        );
        assert_eq!(
            FetchCause::LengthMismatch {
                expected: 10,
                actual: 7,
            }
            .to_string(),
            "expected 10 digit(s), got 7"
        );
    }

    #[test]
    fn render_error_wraps_delivery_and_io() {
        let render: RenderError = DeliveryError::Validation("bad".into()).into();
        assert!(matches!(render, RenderError::Delivery(_)));

        let render: RenderError = io::Error::other("pipe closed").into();
        assert!(matches!(render, RenderError::Io(_)));
    }
}
