//! # Zerocurve Curves
//!
//! Zero-coupon curve construction and interpolation for the Zerocurve
//! library.
//!
//! This crate provides:
//!
//! - **Curve Container**: Ordered maturity/rate knots behind an
//!   append-then-seal builder ([`CurveBuilder`], [`RatesCurve`])
//! - **Interpolation Models**: A natural cubic spline and a Hagan-West
//!   monotone-convex forward-rate model behind one capability trait
//!   ([`Interpolation`], [`Model`])
//! - **Bootstrap**: Sequential zero-rate bootstrapping from cash and par
//!   swap quotes ([`bootstrap::build_zero_curve`])
//!
//! ## Quick Start
//!
//! ```rust
//! use zc_curves::prelude::*;
//!
//! // Zero curve knots: term in years, annually compounded rate.
//! let curve = CurveBuilder::new()
//!     .add(Knot::new(0.5, 0.010))
//!     .add(Knot::new(2.0, 0.020))
//!     .add(Knot::new(5.0, 0.025))
//!     .add(Knot::new(10.0, 0.030))
//!     .seal()
//!     .unwrap();
//!
//! let model = Model::fit(ModelKind::MonotoneConvex, &curve).unwrap();
//!
//! let zero = model.modeled_rate(3.0).unwrap();
//! let df = model.discount_factor(3.0).unwrap();
//! let fwd = model.instantaneous_forward(3.0).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::suboptimal_flops)]

pub mod bootstrap;
pub mod curve;
pub mod error;
pub mod model;
pub mod monotone_convex;
pub mod spline;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        bootstrap_zero_curve, build_zero_curve, densify_swap_curve, BootstrapResult, ParSwap,
        RepricingCheck,
    };
    pub use crate::curve::{CurveBuilder, Knot, RatesCurve, TERM_EQUALITY_TOLERANCE};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::model::{Interpolation, Model, ModelKind};
    pub use crate::monotone_convex::{ForwardPolicy, IntervalCursor, MonotoneConvexModel};
    pub use crate::spline::{CubicSplineModel, MaturityBucket};
}

pub use curve::{CurveBuilder, Knot, RatesCurve};
pub use error::{CurveError, CurveResult};
pub use model::{Interpolation, Model, ModelKind};
