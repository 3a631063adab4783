#![doc = include_str!("../README.md")]

pub mod client;
pub(crate) mod error;
pub(crate) mod types;

pub use client::{DIGIT_LIMIT, PiDelivery};

// Re-export the core crate's surface for convenience
pub use pi_delivery::{DeliveryError, DigitSequencer, DigitSource, FetchCause};
