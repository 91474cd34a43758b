//! Curve container: knots, the append-then-seal builder, and the sealed
//! immutable curve.
//!
//! A [`CurveBuilder`] accepts knots in any order; [`CurveBuilder::seal`]
//! sorts once, collapses duplicate terms, and computes every knot's spacing,
//! producing an immutable [`RatesCurve`]. Interpolation models are always
//! fitted against a sealed curve and never mutate it; extending a curve
//! means reopening it with [`RatesCurve::to_builder`] and sealing again.

use zc_core::{Frequency, Quote, RateType};

use crate::error::{CurveError, CurveResult};

/// Two knots whose terms differ by less than half a day (1/730 year) are
/// considered the same maturity.
pub const TERM_EQUALITY_TOLERANCE: f64 = 0.5 / 365.0;

/// Tolerance used when testing a term against zero.
const ALMOST_ZERO: f64 = 1e-8;

/// A single curve data point: a term in years and its rate.
///
/// `spacing` is the distance in years to the next knot in the same sealed
/// curve; it is zero for the last knot and meaningless before sealing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    term: f64,
    rate: f64,
    spacing: f64,
}

impl Knot {
    /// Creates a knot from a term in years and an annually compounded rate.
    #[must_use]
    pub fn new(term: f64, rate: f64) -> Self {
        Self {
            term,
            rate,
            spacing: 0.0,
        }
    }

    /// Creates a knot from a normalized market quote, deriving the term with
    /// the fixed 365-day year count.
    #[must_use]
    pub fn from_quote(quote: &Quote) -> Self {
        Self::new(quote.years_to_maturity(), quote.rate())
    }

    /// Returns the years to maturity.
    pub fn term(&self) -> f64 {
        self.term
    }

    /// Returns the rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the gap in years to the next knot (zero for the last knot).
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Returns the continuously compounded equivalent of this knot's
    /// annually compounded rate.
    pub fn continuous_rate(&self) -> f64 {
        (1.0 + self.rate).ln()
    }

    /// Returns true when the other knot sits at the same maturity within
    /// the half-day tolerance.
    pub fn same_term(&self, other: &Knot) -> bool {
        (self.term - other.term).abs() < TERM_EQUALITY_TOLERANCE
    }
}

/// Open builder collecting knots before a curve is sealed.
#[derive(Debug, Clone, Default)]
pub struct CurveBuilder {
    knots: Vec<Knot>,
    frequency: Option<Frequency>,
}

impl CurveBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a knot; insertion order is irrelevant.
    #[must_use]
    pub fn add(mut self, knot: Knot) -> Self {
        self.knots.push(knot);
        self
    }

    /// Adds a knot through a mutable reference, for loop-driven callers.
    pub fn push(&mut self, knot: Knot) {
        self.knots.push(knot);
    }

    /// Sets the yearly cash-flow frequency (meaningful for swap curves).
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Returns true when no knots have been added yet.
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Sorts the knots by term, collapses duplicates within the half-day
    /// tolerance (first in ascending term order wins), computes spacings,
    /// and produces the immutable curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::EmptyCurve`] when no knots were added, so a
    /// sealed curve is non-empty by construction.
    pub fn seal(mut self) -> CurveResult<RatesCurve> {
        if self.knots.is_empty() {
            return Err(CurveError::EmptyCurve);
        }

        self.knots.sort_by(|a, b| a.term.total_cmp(&b.term));

        let mut knots: Vec<Knot> = Vec::with_capacity(self.knots.len());
        for knot in self.knots {
            match knots.last() {
                Some(last) if last.same_term(&knot) => {}
                _ => knots.push(knot),
            }
        }

        for i in 0..knots.len() - 1 {
            knots[i].spacing = knots[i + 1].term - knots[i].term;
        }

        Ok(RatesCurve {
            knots,
            frequency: self.frequency,
        })
    }
}

/// An immutable, ordered-by-maturity sequence of knots.
///
/// Sealed curves are non-empty, strictly ascending in term (no duplicates
/// within the half-day tolerance), and every knot but the last carries the
/// spacing to its successor.
#[derive(Debug, Clone)]
pub struct RatesCurve {
    knots: Vec<Knot>,
    frequency: Option<Frequency>,
}

impl RatesCurve {
    /// Builds a curve from a quote set, keeping only quotes of the given
    /// rate type.
    ///
    /// Quotes landing on an already-seen maturity (within the half-day
    /// tolerance) are skipped silently; the first quote seen wins. For swap
    /// curves the cash-flow frequency is taken from the first matching
    /// quote.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::EmptyCurve`] when no quote matches the type.
    pub fn from_quotes(quotes: &[Quote], rate_type: RateType) -> CurveResult<Self> {
        let mut builder = CurveBuilder::new();
        let mut kept: Vec<Knot> = Vec::new();

        for quote in quotes.iter().filter(|q| q.rate_type() == rate_type) {
            let knot = Knot::from_quote(quote);
            if kept.iter().any(|k| k.same_term(&knot)) {
                continue;
            }
            kept.push(knot);
            builder.push(knot);
        }

        if rate_type == RateType::Swap {
            let frequency = quotes
                .iter()
                .filter(|q| q.rate_type() == RateType::Swap)
                .find_map(Quote::frequency);
            if let Some(frequency) = frequency {
                builder = builder.with_frequency(frequency);
            }
        }

        builder.seal()
    }

    /// Returns the smallest term in the curve.
    pub fn first_term(&self) -> f64 {
        self.knots[0].term
    }

    /// Returns the largest term in the curve.
    pub fn last_term(&self) -> f64 {
        self.knots[self.knots.len() - 1].term
    }

    /// Returns the rate of the knot at position `i`.
    ///
    /// # Panics
    ///
    /// Panics when `i` is out of bounds, like slice indexing.
    pub fn rate_at(&self, i: usize) -> f64 {
        self.knots[i].rate
    }

    /// Returns the term of the knot at position `i`.
    ///
    /// # Panics
    ///
    /// Panics when `i` is out of bounds, like slice indexing.
    pub fn term_at(&self, i: usize) -> f64 {
        self.knots[i].term
    }

    /// Returns the spacing of the knot at position `i` (zero for the last).
    ///
    /// # Panics
    ///
    /// Panics when `i` is out of bounds, like slice indexing.
    pub fn spacing_at(&self, i: usize) -> f64 {
        self.knots[i].spacing
    }

    /// Returns the number of knots.
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Always false: sealing rejects empty curves. Present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Returns the knots in ascending term order.
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Returns the yearly cash-flow frequency, set on swap curves.
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// Returns true when any knot carries a negative rate.
    ///
    /// Callers branch interpolation policy on this; the curve itself does
    /// not forbid negative rates.
    pub fn has_negative_rates(&self) -> bool {
        self.knots.iter().any(|k| k.rate < 0.0)
    }

    /// Returns true when a knot sits at term zero.
    pub fn has_zero_term_knot(&self) -> bool {
        self.knots.iter().any(|k| k.term.abs() < ALMOST_ZERO)
    }

    /// Reopens the curve for appending; seal again to get a new curve.
    #[must_use]
    pub fn to_builder(&self) -> CurveBuilder {
        let mut builder = CurveBuilder {
            knots: self.knots.clone(),
            frequency: self.frequency,
        };
        // Spacings are recomputed at seal.
        for knot in &mut builder.knots {
            knot.spacing = 0.0;
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use zc_core::DayCountBasis;

    fn curve_from_terms(terms: &[f64]) -> RatesCurve {
        let mut builder = CurveBuilder::new();
        for &t in terms {
            builder.push(Knot::new(t, 0.02));
        }
        builder.seal().unwrap()
    }

    #[test]
    fn test_seal_sorts_and_spaces() {
        let curve = curve_from_terms(&[5.0, 0.5, 2.0, 10.0]);

        assert_eq!(curve.len(), 4);
        assert_relative_eq!(curve.term_at(0), 0.5);
        assert_relative_eq!(curve.term_at(3), 10.0);
        assert_relative_eq!(curve.spacing_at(0), 1.5);
        assert_relative_eq!(curve.spacing_at(1), 3.0);
        assert_relative_eq!(curve.spacing_at(2), 5.0);
        assert_relative_eq!(curve.spacing_at(3), 0.0);
    }

    #[test]
    fn test_seal_empty_fails() {
        let result = CurveBuilder::new().seal();
        assert!(matches!(result, Err(CurveError::EmptyCurve)));
    }

    #[test]
    fn test_first_and_last_term() {
        let curve = curve_from_terms(&[2.0, 0.5, 5.0]);
        assert_relative_eq!(curve.first_term(), 0.5);
        assert_relative_eq!(curve.last_term(), 5.0);
    }

    #[test]
    fn test_duplicate_terms_collapse_on_seal() {
        // 0.5y and 0.5y + a quarter day are the same maturity.
        let curve = CurveBuilder::new()
            .add(Knot::new(0.5, 0.010))
            .add(Knot::new(0.5 + 0.25 / 365.0, 0.099))
            .add(Knot::new(2.0, 0.020))
            .seal()
            .unwrap();

        assert_eq!(curve.len(), 2);
        assert_relative_eq!(curve.rate_at(0), 0.010);
    }

    #[test]
    fn test_structural_predicates() {
        let curve = CurveBuilder::new()
            .add(Knot::new(0.0, 0.01))
            .add(Knot::new(1.0, -0.002))
            .seal()
            .unwrap();

        assert!(curve.has_negative_rates());
        assert!(curve.has_zero_term_knot());

        let curve = curve_from_terms(&[1.0, 2.0]);
        assert!(!curve.has_negative_rates());
        assert!(!curve.has_zero_term_knot());
    }

    #[test]
    fn test_continuous_rate() {
        let knot = Knot::new(2.0, 0.02);
        assert_relative_eq!(knot.continuous_rate(), 1.02_f64.ln(), epsilon = 1e-15);
    }

    #[test]
    fn test_to_builder_roundtrip() {
        let curve = curve_from_terms(&[0.5, 2.0]);
        let extended = curve.to_builder().add(Knot::new(1.0, 0.015)).seal().unwrap();

        assert_eq!(extended.len(), 3);
        assert_relative_eq!(extended.term_at(1), 1.0);
        assert_relative_eq!(extended.spacing_at(0), 0.5);
        assert_relative_eq!(extended.spacing_at(1), 1.0);
    }

    #[test]
    fn test_from_quotes_filters_and_dedupes() {
        let settle = NaiveDate::from_ymd_opt(2016, 9, 28).unwrap();
        let d = |days: u64| settle + chrono::Days::new(days);

        let quotes = vec![
            Quote::new(
                RateType::Cash,
                settle,
                d(183),
                1.0,
                DayCountBasis::Act365,
                None,
                100.0,
            )
            .unwrap(),
            // Same maturity as the first cash quote: skipped, first wins.
            Quote::new(
                RateType::Cash,
                settle,
                d(183),
                9.9,
                DayCountBasis::Act365,
                None,
                100.0,
            )
            .unwrap(),
            Quote::new(
                RateType::Swap,
                settle,
                d(730),
                2.0,
                DayCountBasis::Act365,
                Some(Frequency::Annual),
                100.0,
            )
            .unwrap(),
        ];

        let cash = RatesCurve::from_quotes(&quotes, RateType::Cash).unwrap();
        assert_eq!(cash.len(), 1);
        assert_relative_eq!(cash.rate_at(0), 0.01);
        assert!(cash.frequency().is_none());

        let swaps = RatesCurve::from_quotes(&quotes, RateType::Swap).unwrap();
        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps.frequency(), Some(Frequency::Annual));
    }

    #[test]
    fn test_from_quotes_no_match_fails() {
        let settle = NaiveDate::from_ymd_opt(2016, 9, 28).unwrap();
        let quotes = vec![Quote::new(
            RateType::Cash,
            settle,
            settle + chrono::Days::new(183),
            1.0,
            DayCountBasis::Act365,
            None,
            100.0,
        )
        .unwrap()];

        let result = RatesCurve::from_quotes(&quotes, RateType::Swap);
        assert!(matches!(result, Err(CurveError::EmptyCurve)));
    }

    proptest! {
        #[test]
        fn prop_seal_orders_any_insertion(mut terms in proptest::collection::vec(0.01f64..50.0, 1..20)) {
            // Space candidate terms out so the dedup tolerance never
            // collapses intended knots.
            terms.sort_by(f64::total_cmp);
            terms.dedup_by(|a, b| (*a - *b).abs() < 2.0 * TERM_EQUALITY_TOLERANCE);
            let spaced = terms.clone();

            // Insert in reversed order to exercise the sort.
            let mut builder = CurveBuilder::new();
            for &t in spaced.iter().rev() {
                builder.push(Knot::new(t, 0.02));
            }
            let curve = builder.seal().unwrap();

            prop_assert_eq!(curve.len(), spaced.len());
            for i in 0..curve.len() - 1 {
                prop_assert!(curve.term_at(i) < curve.term_at(i + 1));
                prop_assert!(
                    (curve.spacing_at(i) - (curve.term_at(i + 1) - curve.term_at(i))).abs()
                        < 1e-12
                );
            }
            prop_assert_eq!(curve.spacing_at(curve.len() - 1), 0.0);
        }
    }
}
