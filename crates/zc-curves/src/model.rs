//! Model selection and the shared interpolation capability trait.
//!
//! The two interpolation models live in [`crate::spline`] and
//! [`crate::monotone_convex`]; this module gives callers one closed
//! dispatch point, [`Model`], so code that consumes a fitted model never
//! needs to know which scheme produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::RatesCurve;
use crate::error::CurveResult;
use crate::monotone_convex::{ForwardPolicy, MonotoneConvexModel};
use crate::spline::CubicSplineModel;

/// Capability trait shared by all fitted interpolation models.
///
/// A fitted model is an immutable snapshot of one sealed curve; queries
/// take `&self` and are freely shareable across threads.
pub trait Interpolation {
    /// Returns the annually compounded zero rate modeled at `term` years.
    fn modeled_rate(&self, term: f64) -> CurveResult<f64>;

    /// Returns the instantaneous forward rate at `term` years.
    fn instantaneous_forward(&self, term: f64) -> CurveResult<f64>;

    /// Returns the largest knot term this model was fitted on.
    fn last_term(&self) -> f64;

    /// Returns the discount factor `exp(-r(t) * t)` at `term` years.
    fn discount_factor(&self, term: f64) -> CurveResult<f64> {
        let rate = self.modeled_rate(term)?;
        Ok((-rate * term).exp())
    }

    /// Returns the annually compounded forward rate between `start` and
    /// `end` years, derived from the ratio of the modeled growth factors.
    fn compounded_forward(&self, start: f64, end: f64) -> CurveResult<f64> {
        let r_start = self.modeled_rate(start)?;
        let r_end = self.modeled_rate(end)?;
        let growth = (1.0 + r_end).powf(end) / (1.0 + r_start).powf(start);
        Ok(growth.powf(1.0 / (end - start)) - 1.0)
    }
}

/// Interpolation scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Natural cubic spline on zero rates.
    CubicSpline,
    /// Hagan-West monotone convex on forward rates.
    #[default]
    MonotoneConvex,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CubicSpline => write!(f, "cubic-spline"),
            Self::MonotoneConvex => write!(f, "monotone-convex"),
        }
    }
}

/// A fitted interpolation model of either scheme.
///
/// The set of schemes is closed on purpose: the bootstrapper refits a model
/// after every curve append, and a closed enum keeps that loop monomorphic
/// and `Copy`-cheap to match on.
#[derive(Debug, Clone)]
pub enum Model {
    /// Natural cubic spline.
    CubicSpline(CubicSplineModel),
    /// Hagan-West monotone convex.
    MonotoneConvex(MonotoneConvexModel),
}

impl Model {
    /// Fits a model of the given kind to a sealed curve.
    ///
    /// Monotone convex defaults to clamping forwards at zero; when the
    /// curve carries negative rates the clamp is lifted so the fitted
    /// forwards can track the data.
    pub fn fit(kind: ModelKind, curve: &RatesCurve) -> CurveResult<Self> {
        match kind {
            ModelKind::CubicSpline => Ok(Self::CubicSpline(CubicSplineModel::fit(curve)?)),
            ModelKind::MonotoneConvex => {
                let policy = if curve.has_negative_rates() {
                    ForwardPolicy::AllowNegative
                } else {
                    ForwardPolicy::ClampAtZero
                };
                Ok(Self::MonotoneConvex(MonotoneConvexModel::fit_with_policy(
                    curve, policy,
                )?))
            }
        }
    }

    /// Returns the scheme this model was fitted with.
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::CubicSpline(_) => ModelKind::CubicSpline,
            Self::MonotoneConvex(_) => ModelKind::MonotoneConvex,
        }
    }
}

impl Interpolation for Model {
    fn modeled_rate(&self, term: f64) -> CurveResult<f64> {
        match self {
            Self::CubicSpline(m) => m.modeled_rate(term),
            Self::MonotoneConvex(m) => m.modeled_rate(term),
        }
    }

    fn instantaneous_forward(&self, term: f64) -> CurveResult<f64> {
        match self {
            Self::CubicSpline(m) => m.instantaneous_forward(term),
            Self::MonotoneConvex(m) => m.instantaneous_forward(term),
        }
    }

    fn last_term(&self) -> f64 {
        match self {
            Self::CubicSpline(m) => m.last_term(),
            Self::MonotoneConvex(m) => m.last_term(),
        }
    }
}
