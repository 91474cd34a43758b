//! Hagan-West monotone convex interpolation on forward rates.
//!
//! The model works on N+1 nodes: a synthetic node at term zero carrying the
//! first curve rate (unless the curve already has a zero-term knot) followed
//! by the curve knots. Fitting computes the discrete forward rate of each
//! interval, blends them into node forwards by term weighting, and, under
//! the default policy, collars each node forward into the band that keeps
//! the interpolated forward curve non-negative. All of this happens eagerly
//! at fit time; the fitted model is immutable and queries are free of side
//! effects.
//!
//! Within an interval the forward is the discrete forward plus a shape
//! correction `g(x)` chosen from the four Hagan-West zones (plus a flat
//! degenerate zone); the zero rate integrates the same correction through
//! its antiderivative `G(x)`, so rate and forward stay consistent by
//! construction.

use serde::{Deserialize, Serialize};

use crate::curve::RatesCurve;
use crate::error::{CurveError, CurveResult};
use crate::model::Interpolation;

/// Boundary values below this are treated as exactly zero when classifying
/// the interpolation zone.
const ALMOST_ZERO: f64 = 1e-8;

/// Controls whether fitted node forwards may go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForwardPolicy {
    /// Collar node forwards into `[0, 2·min(adjacent discrete forwards)]`.
    #[default]
    ClampAtZero,
    /// Leave forwards unconstrained; discrete forwards and interpolation
    /// nodes are rebuilt from the raw rate values instead.
    AllowNegative,
}

/// Caller-owned position hint for strictly sequential interval lookups.
///
/// The default query path is a binary search, safe for concurrent reads.
/// Callers sweeping the curve in near-monotone term order can pass a cursor
/// by `&mut` to the `_seq` query variants; the cursor remembers the last
/// interval and walks from there instead of searching from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalCursor {
    hint: usize,
}

impl IntervalCursor {
    /// Creates a cursor positioned at the first interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Hagan-West zone selected from the interval's boundary values `g0`, `g1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    One,
    Two,
    Three,
    Four,
    Flat,
}

fn classify(g0: f64, g1: f64) -> Zone {
    if (g0 < 0.0 && -0.5 * g0 <= g1 && g1 <= -2.0 * g0)
        || (g0 > 0.0 && -0.5 * g0 >= g1 && g1 >= -2.0 * g0)
    {
        Zone::One
    } else if (g0 < 0.0 && g1 > -2.0 * g0) || (g0 > 0.0 && g1 < -2.0 * g0) {
        Zone::Two
    } else if (g0 > 0.0 && 0.0 > g1 && g1 > -0.5 * g0)
        || (g0 < 0.0 && 0.0 < g1 && g1 < -0.5 * g0)
    {
        Zone::Three
    } else if g0.abs() < ALMOST_ZERO && g1.abs() < ALMOST_ZERO {
        Zone::Flat
    } else {
        Zone::Four
    }
}

/// The shape integral `G(x)`; zero at both interval boundaries.
fn g_integral(x: f64, g0: f64, g1: f64) -> f64 {
    match classify(g0, g1) {
        Zone::One => {
            g0 * (x - 2.0 * x.powi(2) + x.powi(3)) + g1 * (-x.powi(2) + x.powi(3))
        }
        Zone::Two => {
            let eta = (g1 + 2.0 * g0) / (g1 - g0);
            if x <= eta {
                g0 * x
            } else {
                g0 * x + (g1 - g0) * (x - eta).powi(3) / (1.0 - eta).powi(2) / 3.0
            }
        }
        Zone::Three => {
            let eta = 3.0 * g1 / (g1 - g0);
            if x < eta {
                g1 * x - (g0 - g1) * ((eta - x).powi(3) / eta.powi(2) - eta) / 3.0
            } else {
                (2.0 / 3.0 * g1 + g0 / 3.0) * eta + g1 * (x - eta)
            }
        }
        Zone::Four => {
            let eta = g1 / (g1 + g0);
            let a = -g0 * g1 / (g0 + g1);
            if x <= eta {
                a * x - (g0 - a) * ((eta - x).powi(3) / eta.powi(2) - eta) / 3.0
            } else {
                (2.0 / 3.0 * a + g0 / 3.0) * eta
                    + a * (x - eta)
                    + (g1 - a) * (x - eta).powi(3) / (1.0 - eta).powi(2) / 3.0
            }
        }
        Zone::Flat => 0.0,
    }
}

/// The shape derivative `g(x)`; equals `g0` at `x = 0` and `g1` at `x = 1`.
fn g_derivative(x: f64, g0: f64, g1: f64) -> f64 {
    match classify(g0, g1) {
        Zone::One => {
            g0 * (1.0 - 4.0 * x + 3.0 * x.powi(2)) + g1 * (-2.0 * x + 3.0 * x.powi(2))
        }
        Zone::Two => {
            let eta = (g1 + 2.0 * g0) / (g1 - g0);
            if x <= eta {
                g0
            } else {
                g0 + (g1 - g0) * ((x - eta) / (1.0 - eta)).powi(2)
            }
        }
        Zone::Three => {
            let eta = 3.0 * g1 / (g1 - g0);
            if x < eta {
                g1 + (g0 - g1) * ((eta - x) / eta).powi(2)
            } else {
                g1
            }
        }
        Zone::Four => {
            let eta = g1 / (g1 + g0);
            let a = -g0 * g1 / (g0 + g1);
            if x <= eta {
                a + (g0 - a) * ((eta - x) / eta).powi(2)
            } else {
                a + (g1 - a) * ((eta - x) / (1.0 - eta)).powi(2)
            }
        }
        Zone::Flat => 0.0,
    }
}

/// Checks the bounds in order rather than via `f64::clamp`: a steeply
/// inverted curve makes a discrete forward negative, so the upper bound
/// `2·min(adjacent fd)` can drop below the lower bound and `clamp` would
/// panic where this returns the maximum.
fn collar(minimum: f64, value: f64, maximum: f64) -> f64 {
    if value < minimum {
        minimum
    } else if value > maximum {
        maximum
    } else {
        value
    }
}

/// A fitted Hagan-West monotone convex model.
#[derive(Debug, Clone)]
pub struct MonotoneConvexModel {
    /// Node terms; index 0 is term zero.
    terms: Vec<f64>,
    /// Per-interval discrete forward rates; index 0 is unused.
    discrete_forwards: Vec<f64>,
    /// Zero rate attributed to each node for the rate integral.
    interpolation_nodes: Vec<f64>,
    /// Blended (and possibly collared) instantaneous forwards at the nodes.
    node_forwards: Vec<f64>,
    policy: ForwardPolicy,
}

impl MonotoneConvexModel {
    /// Fits the model with the default non-negative-forwards policy.
    pub fn fit(curve: &RatesCurve) -> CurveResult<Self> {
        Self::fit_with_policy(curve, ForwardPolicy::ClampAtZero)
    }

    /// Fits the model with an explicit forward policy.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientKnots`] when fewer than two nodes
    /// are available (a curve whose only knot sits at term zero).
    pub fn fit_with_policy(curve: &RatesCurve, policy: ForwardPolicy) -> CurveResult<Self> {
        let mut terms = Vec::with_capacity(curve.len() + 1);
        let mut values = Vec::with_capacity(curve.len() + 1);
        if !curve.has_zero_term_knot() {
            terms.push(0.0);
            values.push(curve.rate_at(0));
        }
        for knot in curve.knots() {
            terms.push(knot.term());
            values.push(knot.rate());
        }

        let node_count = terms.len();
        if node_count < 2 {
            return Err(CurveError::insufficient_knots(2, node_count));
        }
        let last = node_count - 1;

        let mut discrete_forwards = vec![0.0; node_count];
        let mut interpolation_nodes = vec![0.0; node_count];
        let mut node_forwards = vec![0.0; node_count];
        interpolation_nodes[0] = values[0];

        for j in 1..=last {
            discrete_forwards[j] =
                (terms[j] * values[j] - terms[j - 1] * values[j - 1]) / (terms[j] - terms[j - 1]);
            interpolation_nodes[j] = values[j];
        }

        for j in 1..last {
            node_forwards[j] = (terms[j] - terms[j - 1]) / (terms[j + 1] - terms[j - 1])
                * discrete_forwards[j + 1]
                + (terms[j + 1] - terms[j]) / (terms[j + 1] - terms[j - 1])
                    * discrete_forwards[j];
        }

        // The boundary forwards halve the overshoot of their neighbor. For a
        // two-node fit the first formula reads the still-zero interior slot,
        // which is the intended seed value.
        node_forwards[0] =
            discrete_forwards[1] - 0.5 * (node_forwards[1] - discrete_forwards[1]);
        node_forwards[last] =
            discrete_forwards[last] - 0.5 * (node_forwards[last - 1] - discrete_forwards[last]);

        match policy {
            ForwardPolicy::ClampAtZero => {
                node_forwards[0] = collar(0.0, node_forwards[0], 2.0 * discrete_forwards[1]);
                for j in 1..last {
                    node_forwards[j] = collar(
                        0.0,
                        node_forwards[j],
                        2.0 * discrete_forwards[j].min(discrete_forwards[j + 1]),
                    );
                }
                node_forwards[last] =
                    collar(0.0, node_forwards[last], 2.0 * discrete_forwards[last]);
            }
            ForwardPolicy::AllowNegative => {
                let mut term_rate = 0.0;
                for j in 1..last.saturating_sub(1) {
                    discrete_forwards[j] = values[j];
                    term_rate += discrete_forwards[j] * (terms[j] - terms[j - 1]);
                    interpolation_nodes[j] = term_rate / terms[j];
                }
            }
        }

        Ok(Self {
            terms,
            discrete_forwards,
            interpolation_nodes,
            node_forwards,
            policy,
        })
    }

    /// Returns the forward policy this model was fitted with.
    pub fn policy(&self) -> ForwardPolicy {
        self.policy
    }

    /// Returns the fitted instantaneous forwards at the nodes.
    pub fn node_forwards(&self) -> &[f64] {
        &self.node_forwards
    }

    /// Returns the node terms, starting at zero.
    pub fn node_terms(&self) -> &[f64] {
        &self.terms
    }

    /// Binary-search interval lookup: the largest `i` with
    /// `terms[i] <= term`, clamped so a query at the last node lands in the
    /// final interval at `x = 1`.
    fn locate(&self, term: f64) -> usize {
        let i = self.terms.partition_point(|&t| t <= term).saturating_sub(1);
        i.min(self.terms.len() - 2)
    }

    /// Cursor-walk interval lookup; same result as [`Self::locate`] for any
    /// in-range term.
    fn locate_from(&self, term: f64, hint: usize) -> usize {
        let last = self.terms.len() - 1;
        let mut i = hint.min(last - 1);
        loop {
            if term >= self.terms[i] {
                if term >= self.terms[i + 1] {
                    if i + 1 == last {
                        return last - 1;
                    }
                    i += 1;
                } else {
                    return i;
                }
            } else if i == 0 {
                return 0;
            } else {
                i -= 1;
            }
        }
    }

    fn interval_boundaries(&self, i: usize) -> (f64, f64) {
        let g0 = self.node_forwards[i] - self.discrete_forwards[i + 1];
        let g1 = self.node_forwards[i + 1] - self.discrete_forwards[i + 1];
        (g0, g1)
    }

    /// Zero rate at `term` inside interval `i`; `term` must be positive.
    fn rate_in_interval(&self, term: f64, i: usize) -> f64 {
        let x = (term - self.terms[i]) / (self.terms[i + 1] - self.terms[i]);
        let (g0, g1) = self.interval_boundaries(i);
        let g_value = if x == 0.0 || x == 1.0 {
            0.0
        } else {
            g_integral(x, g0, g1)
        };

        (self.terms[i] * self.interpolation_nodes[i]
            + (term - self.terms[i]) * self.discrete_forwards[i + 1]
            + (self.terms[i + 1] - self.terms[i]) * g_value)
            / term
    }

    fn forward_in_interval(&self, term: f64, i: usize) -> f64 {
        let x = (term - self.terms[i]) / (self.terms[i + 1] - self.terms[i]);
        let (g0, g1) = self.interval_boundaries(i);
        let g_value = if x == 0.0 {
            g0
        } else if x == 1.0 {
            g1
        } else {
            g_derivative(x, g0, g1)
        };
        g_value + self.discrete_forwards[i + 1]
    }

    fn rate_with_locator(&self, term: f64, locate: impl FnOnce(&Self) -> usize) -> f64 {
        if term <= 0.0 {
            return self.node_forwards[0];
        }
        let last_term = self.last_term();
        if term > last_term {
            // Flat forward extrapolation: the rate decays from the last
            // node's zero rate toward the terminal forward.
            let last_interval = self.terms.len() - 2;
            let base = self.rate_in_interval(last_term, last_interval);
            let fwd = self.forward_in_interval(last_term, last_interval);
            return base * last_term / term + fwd * (1.0 - last_term / term);
        }
        self.rate_in_interval(term, locate(self))
    }

    fn forward_with_locator(&self, term: f64, locate: impl FnOnce(&Self) -> usize) -> f64 {
        if term <= 0.0 {
            return self.node_forwards[0];
        }
        let last_term = self.last_term();
        if term > last_term {
            let last_interval = self.terms.len() - 2;
            return self.forward_in_interval(last_term, last_interval);
        }
        self.forward_in_interval(term, locate(self))
    }

    /// Sequential variant of [`Interpolation::modeled_rate`] using a
    /// caller-owned cursor.
    pub fn modeled_rate_seq(&self, term: f64, cursor: &mut IntervalCursor) -> CurveResult<f64> {
        let rate = self.rate_with_locator(term, |model| {
            let i = model.locate_from(term, cursor.hint);
            cursor.hint = i;
            i
        });
        Ok(rate)
    }

    /// Sequential variant of [`Interpolation::instantaneous_forward`] using
    /// a caller-owned cursor.
    pub fn instantaneous_forward_seq(
        &self,
        term: f64,
        cursor: &mut IntervalCursor,
    ) -> CurveResult<f64> {
        let fwd = self.forward_with_locator(term, |model| {
            let i = model.locate_from(term, cursor.hint);
            cursor.hint = i;
            i
        });
        Ok(fwd)
    }
}

impl Interpolation for MonotoneConvexModel {
    fn modeled_rate(&self, term: f64) -> CurveResult<f64> {
        Ok(self.rate_with_locator(term, |model| model.locate(term)))
    }

    fn instantaneous_forward(&self, term: f64) -> CurveResult<f64> {
        Ok(self.forward_with_locator(term, |model| model.locate(term)))
    }

    fn last_term(&self) -> f64 {
        self.terms[self.terms.len() - 1]
    }
}
