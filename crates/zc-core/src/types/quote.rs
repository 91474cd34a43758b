//! Normalized market quote records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::daycount::year_fraction_act365;
use crate::error::{CoreError, CoreResult};
use crate::types::Frequency;

/// Instrument class of a market quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateType {
    /// Cash deposit rate, the short end of the curve.
    Cash,
    /// Par swap rate, the medium-to-long end of the curve.
    Swap,
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RateType::Cash => "Cash",
            RateType::Swap => "Swap",
        };
        write!(f, "{name}")
    }
}

/// Day-count basis tag carried on a quote.
///
/// The curve engine itself always measures maturities with a fixed 365-day
/// year; the tag records what the quote source declared and is preserved for
/// external collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountBasis {
    /// Actual/365 Fixed.
    #[default]
    Act365,
    /// 30/360 bond basis.
    Thirty360,
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCountBasis::Act365 => "ACT/365",
            DayCountBasis::Thirty360 => "30/360",
        };
        write!(f, "{name}")
    }
}

/// A single market quote, normalized and immutable.
///
/// The stored rate is the quoted rate already divided by the coupon base,
/// so a quote of `2.0` with coupon base `100.0` stores `0.02`. Construction
/// rejects malformed numeric inputs instead of defaulting them to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    rate_type: RateType,
    settle: NaiveDate,
    roll_date: Option<NaiveDate>,
    maturity: NaiveDate,
    rate: f64,
    basis: DayCountBasis,
    frequency: Option<Frequency>,
    coupon_base: f64,
}

impl Quote {
    /// Creates a normalized quote.
    ///
    /// # Arguments
    ///
    /// * `rate_type` - Cash or swap
    /// * `settle` - Settlement date, the origin of the term measurement
    /// * `maturity` - Maturity date (must be after `settle`)
    /// * `quoted_rate` - The raw quoted rate, before coupon-base scaling
    /// * `basis` - Declared day-count basis tag
    /// * `frequency` - Fixed-leg payment frequency; required for swap quotes
    /// * `coupon_base` - Divisor normalizing the quoted rate (e.g. 100.0 for
    ///   quotes in percent); must be positive and finite
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidQuote`] when the coupon base is not a
    /// positive finite number, the quoted rate is not finite, the maturity
    /// does not follow settlement, or a swap quote lacks a frequency.
    pub fn new(
        rate_type: RateType,
        settle: NaiveDate,
        maturity: NaiveDate,
        quoted_rate: f64,
        basis: DayCountBasis,
        frequency: Option<Frequency>,
        coupon_base: f64,
    ) -> CoreResult<Self> {
        if !coupon_base.is_finite() || coupon_base <= 0.0 {
            return Err(CoreError::invalid_quote(format!(
                "coupon base must be positive and finite, got {coupon_base}"
            )));
        }
        if !quoted_rate.is_finite() {
            return Err(CoreError::invalid_quote(format!(
                "quoted rate must be finite, got {quoted_rate}"
            )));
        }
        if maturity <= settle {
            return Err(CoreError::invalid_quote(format!(
                "maturity {maturity} must follow settlement {settle}"
            )));
        }
        if rate_type == RateType::Swap && frequency.is_none() {
            return Err(CoreError::invalid_quote(
                "swap quotes require a payment frequency",
            ));
        }

        Ok(Self {
            rate_type,
            settle,
            roll_date: None,
            maturity,
            rate: quoted_rate / coupon_base,
            basis,
            frequency,
            coupon_base,
        })
    }

    /// Attaches the roll date recorded in the quote source.
    #[must_use]
    pub fn with_roll_date(mut self, roll_date: NaiveDate) -> Self {
        self.roll_date = Some(roll_date);
        self
    }

    /// Returns the instrument class.
    pub fn rate_type(&self) -> RateType {
        self.rate_type
    }

    /// Returns the settlement date.
    pub fn settle(&self) -> NaiveDate {
        self.settle
    }

    /// Returns the roll date, when the quote source supplied one.
    pub fn roll_date(&self) -> Option<NaiveDate> {
        self.roll_date
    }

    /// Returns the maturity date.
    pub fn maturity(&self) -> NaiveDate {
        self.maturity
    }

    /// Returns the normalized rate (quoted rate divided by coupon base).
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the declared day-count basis tag.
    pub fn basis(&self) -> DayCountBasis {
        self.basis
    }

    /// Returns the fixed-leg payment frequency, present on swap quotes.
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// Returns the coupon-base divisor the rate was normalized with.
    pub fn coupon_base(&self) -> f64 {
        self.coupon_base
    }

    /// Returns the years to maturity on the fixed 365-day year.
    pub fn years_to_maturity(&self) -> f64 {
        year_fraction_act365(self.settle, self.maturity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn swap_quote(rate: f64, coupon_base: f64) -> CoreResult<Quote> {
        Quote::new(
            RateType::Swap,
            date(2016, 9, 28),
            date(2018, 9, 28),
            rate,
            DayCountBasis::Act365,
            Some(Frequency::Annual),
            coupon_base,
        )
    }

    #[test]
    fn test_rate_normalized_by_coupon_base() {
        let quote = swap_quote(2.5, 100.0).unwrap();
        assert_relative_eq!(quote.rate(), 0.025, epsilon = 1e-12);
        assert_relative_eq!(quote.coupon_base(), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_years_to_maturity_act365() {
        let quote = swap_quote(2.0, 100.0).unwrap();
        // 2016-09-28 to 2018-09-28 spans 730 days.
        assert_relative_eq!(quote.years_to_maturity(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_coupon_base() {
        assert!(swap_quote(2.0, 0.0).is_err());
        assert!(swap_quote(2.0, -100.0).is_err());
        assert!(swap_quote(2.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        assert!(swap_quote(f64::INFINITY, 100.0).is_err());
    }

    #[test]
    fn test_rejects_inverted_dates() {
        let result = Quote::new(
            RateType::Cash,
            date(2018, 9, 28),
            date(2016, 9, 28),
            1.0,
            DayCountBasis::Act365,
            None,
            100.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_swap_requires_frequency() {
        let result = Quote::new(
            RateType::Swap,
            date(2016, 9, 28),
            date(2018, 9, 28),
            2.0,
            DayCountBasis::Act365,
            None,
            100.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_roll_date_attachment() {
        let quote = swap_quote(2.0, 100.0)
            .unwrap()
            .with_roll_date(date(2016, 9, 30));
        assert_eq!(quote.roll_date(), Some(date(2016, 9, 30)));
    }
}
