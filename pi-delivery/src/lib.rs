#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod error;
pub mod format;
pub mod sequence;
pub mod source;
pub mod types;

pub use error::{DeliveryError, FetchCause, RenderError};
pub use format::{DigitWriter, RenderSink};
pub use sequence::DigitSequencer;
pub use source::DigitSource;
pub use types::{DigitChunk, DigitRequest};
