//! Natural cubic spline interpolation on zero rates.
//!
//! Each interval between adjacent knots carries its own cubic
//! `r(x) = a·x³ + b·x² + c·x + d`, with `x` the offset from the interval's
//! left knot and `d` that knot's rate. Fitting solves one N×N linear system
//! for the `b` coefficients (natural boundary: zero curvature at both end
//! knots) and derives `a` and `c` from them, so the spline passes through
//! every knot with continuous first and second derivatives.

use nalgebra::{DMatrix, DVector};
use zc_math::solve_gaussian;

use crate::curve::RatesCurve;
use crate::error::{CurveError, CurveResult};
use crate::model::Interpolation;

/// One minute as a fraction of a 365-day year, the bump width used for the
/// numerical instantaneous forward.
const FORWARD_BUMP: f64 = 1.0 / 525_600.0;

/// Half-open maturity window `[start, end)` mapping a query term onto its
/// spline segment. The last bucket is unbounded above so queries past the
/// final knot continue the second-to-last polynomial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaturityBucket {
    start: f64,
    end: f64,
    segment: usize,
}

impl MaturityBucket {
    /// Returns the inclusive lower bound in years.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the exclusive upper bound in years (infinite for the last
    /// bucket).
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the index of the spline segment this bucket maps to.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Returns true when `term` falls inside this bucket's window.
    pub fn contains(&self, term: f64) -> bool {
        term >= self.start && term < self.end
    }
}

/// A natural cubic spline fitted to a sealed curve.
#[derive(Debug, Clone)]
pub struct CubicSplineModel {
    terms: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
    buckets: Vec<MaturityBucket>,
}

impl CubicSplineModel {
    /// Fits the spline to a sealed curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientKnots`] for curves with fewer than
    /// three knots, and propagates [`CurveError::Math`] should the
    /// coefficient system be singular (it cannot be for distinct knot
    /// terms, but the solver's guard is kept rather than unwrapped away).
    pub fn fit(curve: &RatesCurve) -> CurveResult<Self> {
        let n = curve.len();
        if n < 3 {
            return Err(CurveError::insufficient_knots(3, n));
        }

        let terms: Vec<f64> = (0..n).map(|i| curve.term_at(i)).collect();
        let d: Vec<f64> = (0..n).map(|i| curve.rate_at(i)).collect();
        let spacing: Vec<f64> = (0..n - 1).map(|i| curve.spacing_at(i)).collect();

        // Coefficient system for the b's: natural boundary rows pin the end
        // curvatures to zero, interior rows enforce first-derivative
        // continuity at each inner knot.
        let mut matrix = DMatrix::zeros(n, n);
        let mut rhs = DVector::zeros(n);
        matrix[(0, 0)] = 1.0;
        matrix[(n - 1, n - 1)] = 1.0;
        for i in 1..n - 1 {
            matrix[(i, i - 1)] = spacing[i - 1];
            matrix[(i, i)] = 2.0 * (spacing[i - 1] + spacing[i]);
            matrix[(i, i + 1)] = spacing[i];
            rhs[i] = -3.0
                * ((d[i] - d[i - 1]) / spacing[i - 1] - (d[i + 1] - d[i]) / spacing[i]);
        }

        let b_solution = solve_gaussian(matrix, rhs)?;
        let b: Vec<f64> = b_solution.iter().copied().collect();

        let mut a = Vec::with_capacity(n - 1);
        let mut c = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            a.push((b[i + 1] - b[i]) / (3.0 * spacing[i]));
            c.push(
                -spacing[i] * (b[i + 1] + 2.0 * b[i]) / 3.0 + (d[i + 1] - d[i]) / spacing[i],
            );
        }

        let mut buckets = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            buckets.push(MaturityBucket {
                start: terms[i],
                end: if i == n - 2 { f64::INFINITY } else { terms[i + 1] },
                segment: i,
            });
        }

        Ok(Self {
            terms,
            a,
            b,
            c,
            d,
            buckets,
        })
    }

    /// Returns the per-segment maturity buckets.
    pub fn buckets(&self) -> &[MaturityBucket] {
        &self.buckets
    }

    /// Returns the solved quadratic coefficients, one per knot. The first
    /// and last are zero by the natural boundary condition.
    pub fn b_coefficients(&self) -> &[f64] {
        &self.b
    }

    /// Maps a term onto `(segment, offset)` through the bucket table.
    /// Terms below the first bucket evaluate segment 0 at zero offset;
    /// terms past the last knot fall into the unbounded final bucket and
    /// continue its polynomial beyond the nominal range.
    fn locate(&self, term: f64) -> (usize, f64) {
        if term < self.buckets[0].start {
            return (0, 0.0);
        }
        let i = self.buckets.partition_point(|b| b.start <= term) - 1;
        let bucket = &self.buckets[i];
        (bucket.segment, term - bucket.start)
    }

    fn eval(&self, segment: usize, x: f64) -> f64 {
        self.a[segment] * x.powi(3) + self.b[segment] * x.powi(2) + self.c[segment] * x
            + self.d[segment]
    }
}

impl Interpolation for CubicSplineModel {
    fn modeled_rate(&self, term: f64) -> CurveResult<f64> {
        let (segment, x) = self.locate(term);
        Ok(self.eval(segment, x))
    }

    /// Numerical instantaneous forward: the annualized growth between `t`
    /// and `t` plus one minute, read off the compounded growth factor
    /// `(1+r)^t`.
    fn instantaneous_forward(&self, term: f64) -> CurveResult<f64> {
        let bumped = term + FORWARD_BUMP;
        let r0 = self.modeled_rate(term)?;
        let r1 = self.modeled_rate(bumped)?;
        let growth = (1.0 + r1).powf(bumped) / (1.0 + r0).powf(term);
        Ok(growth.powf(1.0 / FORWARD_BUMP) - 1.0)
    }

    fn last_term(&self) -> f64 {
        self.terms[self.terms.len() - 1]
    }
}
