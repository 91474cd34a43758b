//! # Zerocurve Core
//!
//! Core types for the Zerocurve zero-coupon curve library.
//!
//! This crate provides the foundational building blocks used throughout
//! Zerocurve:
//!
//! - **Quotes**: Normalized market quote records ([`Quote`], [`RateType`])
//! - **Conventions**: Day-count basis tags and payment frequencies
//! - **Day Count**: The fixed ACT/365 year-fraction calculation used by the
//!   curve engine
//!
//! ## Design Philosophy
//!
//! - **Normalize at the boundary**: a [`Quote`] stores its rate already
//!   divided by the coupon base, so downstream code never re-scales
//! - **Fail fast**: malformed inputs are rejected at construction instead of
//!   silently defaulting to zero
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use zc_core::{DayCountBasis, Frequency, Quote, RateType};
//!
//! let quote = Quote::new(
//!     RateType::Swap,
//!     NaiveDate::from_ymd_opt(2016, 9, 28).unwrap(),
//!     NaiveDate::from_ymd_opt(2018, 9, 28).unwrap(),
//!     2.0, // quoted in percent
//!     DayCountBasis::Act365,
//!     Some(Frequency::Annual),
//!     100.0, // coupon base divisor
//! )
//! .unwrap();
//!
//! assert!((quote.rate() - 0.02).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod daycount;
pub mod error;
pub mod types;

pub use daycount::{year_fraction_act365, DAYS_IN_YEAR};
pub use error::{CoreError, CoreResult};
pub use types::{DayCountBasis, Frequency, Quote, RateType};
