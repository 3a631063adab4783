//! The digit-fetch capability seam.

use std::future::Future;

use crate::error::DeliveryError;

/// A remote source of Pi digits.
///
/// Implementations serve at most a bounded number of digits per call; the
/// sequencer keeps every call within that bound. A source called directly
/// with a count over its bound rejects it with
/// [`DeliveryError::Validation`] before any network activity.
///
/// This trait uses RPITIT and is NOT object-safe. That's intentional —
/// callers compose with generics (`DigitSequencer<S: DigitSource>`), and
/// tests substitute in-memory fakes.
pub trait DigitSource: Send + Sync {
    /// Fetch `count` digits starting at absolute index `start`.
    ///
    /// On success the returned string holds exactly the digit characters of
    /// the requested range, in position order.
    fn fetch(
        &self,
        start: u64,
        count: u64,
    ) -> impl Future<Output = Result<String, DeliveryError>> + Send;
}
