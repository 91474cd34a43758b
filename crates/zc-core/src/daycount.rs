//! Fixed ACT/365 day count.
//!
//! The curve engine measures every maturity as a year fraction computed with
//! a fixed 365-day year. Richer day-count and calendar logic lives with the
//! external quote-parsing collaborator, not here.

use chrono::NaiveDate;

/// Number of days in the fixed year basis.
pub const DAYS_IN_YEAR: f64 = 365.0;

/// Returns the year fraction between two dates on a fixed 365-day year.
///
/// A negative fraction is returned when `end` precedes `start`; callers that
/// require a forward-looking period validate the ordering themselves.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use zc_core::year_fraction_act365;
///
/// let settle = NaiveDate::from_ymd_opt(2016, 9, 28).unwrap();
/// let maturity = NaiveDate::from_ymd_opt(2017, 9, 28).unwrap();
/// assert!((year_fraction_act365(settle, maturity) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn year_fraction_act365(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / DAYS_IN_YEAR
}
