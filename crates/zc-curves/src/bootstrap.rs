//! Sequential zero-curve bootstrapping from cash and par swap quotes.
//!
//! The pipeline has three stages:
//!
//! 1. Seed a zero curve with the cash knots (cash rates are zero rates).
//! 2. Densify the sparse par swap curve to one knot per payment period,
//!    reading the intermediate par rates off a model fitted to the sparse
//!    quotes.
//! 3. Walk the densified swaps in maturity order. For each swap, discount
//!    its coupons off the model fitted to the zero curve built so far,
//!    solve the closed-form zero rate that reprices the swap to par, append
//!    the new knot, and refit the model before moving on.
//!
//! The refit after every append is what lets later coupons discount off a
//! curve that already contains all earlier pillars.

use log::{debug, trace};
use zc_core::{Frequency, Quote, RateType};

use crate::curve::{CurveBuilder, Knot, RatesCurve};
use crate::error::{CurveError, CurveResult};
use crate::model::{Interpolation, Model, ModelKind};

/// A par swap reduced to the fields the bootstrap needs: maturity in
/// years, par rate, and fixed-leg payment frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParSwap {
    term: f64,
    rate: f64,
    frequency: Frequency,
}

impl ParSwap {
    /// Creates a par swap from maturity, par rate, and payment frequency.
    #[must_use]
    pub fn new(term: f64, rate: f64, frequency: Frequency) -> Self {
        Self {
            term,
            rate,
            frequency,
        }
    }

    /// Returns the maturity in years.
    pub fn term(&self) -> f64 {
        self.term
    }

    /// Returns the par rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Number of coupon periods to maturity, rounded to the nearest whole
    /// period.
    pub fn coupon_count(&self) -> usize {
        (self.term * f64::from(self.frequency.periods_per_year())).round() as usize
    }

    /// Fixed coupon per period, `rate / frequency`.
    fn coupon(&self) -> f64 {
        self.rate / f64::from(self.frequency.periods_per_year())
    }

    /// Sum of discounted coupons for every period strictly before maturity.
    fn discounted_coupon_sum(&self, model: &Model) -> CurveResult<f64> {
        let period = self.frequency.period_in_years();
        let coupon = self.coupon();
        let mut sum = 0.0;
        for i in 1..self.coupon_count() {
            sum += coupon * model.discount_factor(i as f64 * period)?;
        }
        trace!(
            "swap term {:.4}: discounted coupon sum {:.8} over {} periods",
            self.term,
            sum,
            self.coupon_count().saturating_sub(1)
        );
        Ok(sum)
    }

    /// Solves the annually compounded zero rate at this swap's maturity
    /// that reprices the swap to par, discounting coupons off `model`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::BootstrapInfeasible`] when the discounted
    /// coupon sum reaches 1, which leaves no value for the final exchange.
    pub fn bootstrap_zero_rate(&self, model: &Model) -> CurveResult<f64> {
        let sum = self.discounted_coupon_sum(model)?;
        if sum >= 1.0 {
            return Err(CurveError::bootstrap_infeasible(self.term, sum));
        }
        Ok(((1.0 + self.coupon()) / (1.0 - sum)).powf(1.0 / self.term) - 1.0)
    }

    /// Par residual of the swap priced with coupons off `model` and the
    /// final exchange discounted at `zero_rate` with annual compounding.
    /// Zero means the swap reprices exactly to par.
    pub fn par_residual(&self, model: &Model, zero_rate: f64) -> CurveResult<f64> {
        let sum = self.discounted_coupon_sum(model)?;
        Ok(sum + (1.0 + self.coupon()) * (1.0 + zero_rate).powf(-self.term) - 1.0)
    }
}

/// One solved bootstrap pillar together with its par-repricing residual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepricingCheck {
    /// Swap maturity in years.
    pub term: f64,
    /// Input par rate.
    pub par_rate: f64,
    /// Solved zero rate.
    pub zero_rate: f64,
    /// Par residual at the solve; zero up to rounding.
    pub residual: f64,
}

/// Output of the bootstrap: the final zero curve, the model fitted to it,
/// and one repricing check per solved pillar.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    curve: RatesCurve,
    model: Model,
    checks: Vec<RepricingCheck>,
}

impl BootstrapResult {
    /// Returns the bootstrapped zero curve.
    pub fn curve(&self) -> &RatesCurve {
        &self.curve
    }

    /// Returns the model fitted to the final curve.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the per-pillar repricing checks in maturity order.
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Consumes the result, yielding the curve and its model.
    #[must_use]
    pub fn into_parts(self) -> (RatesCurve, Model) {
        (self.curve, self.model)
    }
}

/// Expands a sparse par swap curve to one knot per payment period.
///
/// A model of the given kind is fitted to the sparse quotes and evaluated
/// at every payment date from the first to the last swap maturity; the
/// densified curve keeps the input frequency.
///
/// # Errors
///
/// Returns [`CurveError::MissingFrequency`] when the swap curve carries no
/// payment frequency, plus any model-fit error.
pub fn densify_swap_curve(swap_curve: &RatesCurve, kind: ModelKind) -> CurveResult<RatesCurve> {
    let frequency = swap_curve.frequency().ok_or(CurveError::MissingFrequency)?;
    let model = Model::fit(kind, swap_curve)?;

    let period = frequency.period_in_years();
    let first = swap_curve.first_term();
    let last = swap_curve.last_term();
    let count = ((last - first) / period).round() as usize;

    let mut builder = CurveBuilder::new().with_frequency(frequency);
    for i in 0..=count {
        let term = first + i as f64 * period;
        builder.push(Knot::new(term, model.modeled_rate(term)?));
    }
    let dense = builder.seal()?;
    debug!(
        "densified swap curve: {} knots from {:.4} to {:.4} at {}",
        dense.len(),
        first,
        last,
        frequency
    );
    Ok(dense)
}

/// Bootstraps zero rates for a densified swap curve onto a cash-seeded
/// zero curve, refitting the model after every appended pillar.
///
/// # Errors
///
/// Returns [`CurveError::MissingFrequency`] when the swap curve carries no
/// payment frequency, [`CurveError::BootstrapInfeasible`] when a swap's
/// discounted coupon sum reaches 1 (the zero curve is left untouched by
/// the failing pillar), plus any model-fit error.
pub fn bootstrap_zero_curve(
    zero_seed: &RatesCurve,
    dense_swaps: &RatesCurve,
    kind: ModelKind,
) -> CurveResult<BootstrapResult> {
    let frequency = dense_swaps.frequency().ok_or(CurveError::MissingFrequency)?;

    let mut curve = zero_seed.clone();
    let mut model = Model::fit(kind, &curve)?;
    let mut checks = Vec::with_capacity(dense_swaps.len());

    for knot in dense_swaps.knots() {
        let swap = ParSwap::new(knot.term(), knot.rate(), frequency);
        let zero_rate = swap.bootstrap_zero_rate(&model)?;
        let residual = swap.par_residual(&model, zero_rate)?;
        debug!(
            "bootstrapped pillar: term {:.4} par {:.6} -> zero {:.8} (residual {:+.3e})",
            swap.term(),
            swap.rate(),
            zero_rate,
            residual
        );

        curve = curve
            .to_builder()
            .add(Knot::new(swap.term(), zero_rate))
            .seal()?;
        model = Model::fit(kind, &curve)?;
        checks.push(RepricingCheck {
            term: swap.term(),
            par_rate: swap.rate(),
            zero_rate,
            residual,
        });
    }

    Ok(BootstrapResult {
        curve,
        model,
        checks,
    })
}

/// Full pipeline from raw quotes to a bootstrapped zero curve: seed the
/// zero curve with the cash quotes, fit an interpolator to the par swap
/// quotes, densify to payment dates, and bootstrap pillar by pillar.
///
/// # Errors
///
/// Returns [`CurveError::EmptyCurve`] when either quote class is absent,
/// plus any densification or bootstrap error.
pub fn build_zero_curve(quotes: &[Quote], kind: ModelKind) -> CurveResult<BootstrapResult> {
    let zero_seed = RatesCurve::from_quotes(quotes, RateType::Cash)?;
    let sparse_swaps = RatesCurve::from_quotes(quotes, RateType::Swap)?;
    let dense_swaps = densify_swap_curve(&sparse_swaps, kind)?;
    bootstrap_zero_curve(&zero_seed, &dense_swaps, kind)
}
