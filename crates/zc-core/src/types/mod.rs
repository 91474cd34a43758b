//! Domain types for market quotes.

mod frequency;
mod quote;

pub use frequency::Frequency;
pub use quote::{DayCountBasis, Quote, RateType};
