//! Chunked retrieval of arbitrary-length digit runs.
//!
//! One `(start, count)` request becomes `ceil(count / chunk_limit)` bounded
//! sub-requests, issued strictly sequentially against a [`DigitSource`] and
//! exposed as a lazy stream of [`DigitChunk`]s.

use async_stream::try_stream;
use futures::Stream;

use crate::error::{DeliveryError, FetchCause};
use crate::source::DigitSource;
use crate::types::{DigitChunk, DigitRequest};

/// Turns one arbitrary digit request into an ordered series of bounded
/// sub-requests against a [`DigitSource`].
pub struct DigitSequencer<S> {
    /// The fetch capability every sub-request goes through.
    source: S,
    /// Maximum digits per sub-request.
    chunk_limit: u64,
}

impl<S: DigitSource> DigitSequencer<S> {
    /// Create a sequencer that never asks `source` for more than
    /// `chunk_limit` digits per round trip.
    #[must_use]
    pub fn new(source: S, chunk_limit: u64) -> Self {
        Self {
            source,
            chunk_limit,
        }
    }

    /// Retrieve the requested run as a lazy, finite, forward-only stream of
    /// chunks, one per sub-request, in increasing start-index order.
    ///
    /// Each sub-request is awaited to completion before the next is issued,
    /// so ordering comes from sequential issuance alone and the stream never
    /// runs ahead of its consumer. A failed sub-request ends the stream with
    /// its error; no partial chunk is yielded for it and no further
    /// sub-requests are attempted.
    ///
    /// A request for zero digits produces an empty stream with zero round
    /// trips.
    pub fn sequence(
        &self,
        request: DigitRequest,
    ) -> impl Stream<Item = Result<DigitChunk, DeliveryError>> + Send {
        try_stream! {
            ensure_coverable(request, self.chunk_limit)?;

            for sub in request.chunks(self.chunk_limit) {
                ensure_within_limit(sub, self.chunk_limit)?;

                tracing::debug!(start = sub.start, count = sub.count, "issuing sub-request");
                let digits = self.source.fetch(sub.start, sub.count).await?;
                let chunk = validate_chunk(sub, digits)?;

                yield chunk;
            }
        }
    }
}

/// Reject requests no sequence of bounded sub-requests can cover.
fn ensure_coverable(request: DigitRequest, chunk_limit: u64) -> Result<(), DeliveryError> {
    if request.end().is_none() {
        return Err(DeliveryError::Validation(format!(
            "start {} + count {} overflows the digit index space",
            request.start, request.count
        )));
    }
    if chunk_limit == 0 && request.count > 0 {
        return Err(DeliveryError::Validation(
            "chunk limit must be non-zero".into(),
        ));
    }
    Ok(())
}

/// Sub-requests over the limit indicate a splitting bug, not bad input.
fn ensure_within_limit(sub: DigitRequest, chunk_limit: u64) -> Result<(), DeliveryError> {
    if sub.count > chunk_limit {
        return Err(DeliveryError::Internal(format!(
            "sub-request for {} digit(s) exceeds the chunk limit {}",
            sub.count, chunk_limit
        )));
    }
    Ok(())
}

/// Check a fetch result against its sub-request and wrap it into a chunk.
fn validate_chunk(sub: DigitRequest, digits: String) -> Result<DigitChunk, DeliveryError> {
    if digits.len() as u64 != sub.count {
        return Err(DeliveryError::Fetch {
            start: sub.start,
            count: sub.count,
            cause: FetchCause::LengthMismatch {
                expected: sub.count,
                actual: digits.len() as u64,
            },
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DeliveryError::Fetch {
            start: sub.start,
            count: sub.count,
            cause: FetchCause::NonDigit,
        });
    }
    Ok(DigitChunk {
        start_index: sub.start,
        digits,
    })
}
