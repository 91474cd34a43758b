//! End-to-end bootstrap: raw cash and par swap quotes in, a fitted zero
//! curve out, checked against par repricing and basic curve sanity.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::{Days, NaiveDate};
use zc_core::{DayCountBasis, Frequency, Quote, RateType};
use zc_curves::prelude::*;

fn settle() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 9, 28).unwrap()
}

fn cash(days: u64, quoted: f64) -> Quote {
    Quote::new(
        RateType::Cash,
        settle(),
        settle() + Days::new(days),
        quoted,
        DayCountBasis::Act365,
        None,
        100.0,
    )
    .unwrap()
}

fn swap(days: u64, quoted: f64) -> Quote {
    Quote::new(
        RateType::Swap,
        settle(),
        settle() + Days::new(days),
        quoted,
        DayCountBasis::Act365,
        Some(Frequency::Annual),
        100.0,
    )
    .unwrap()
}

/// Cash 1% at 6m; annual par swaps 2% at 2y, 2.5% at 5y, 3% at 10y.
fn market_quotes() -> Vec<Quote> {
    vec![
        cash(183, 1.0),
        swap(730, 2.0),
        swap(1826, 2.5),
        swap(3652, 3.0),
    ]
}

#[test]
fn bootstrap_monotone_convex_end_to_end() {
    let result = build_zero_curve(&market_quotes(), ModelKind::MonotoneConvex).unwrap();
    let curve = result.curve();
    let model = result.model();

    // One cash knot plus one pillar per payment period from 2y to 10y.
    assert_eq!(curve.len(), 10);
    assert_relative_eq!(curve.first_term(), 183.0 / 365.0);
    // Densified pillars step in whole periods from the first swap maturity,
    // so the last pillar sits at 2y + 8 periods = 10y even.
    assert_abs_diff_eq!(curve.last_term(), 10.0, epsilon = 1e-9);

    // An upward-sloping par curve bootstraps to non-decreasing zero rates.
    for i in 1..curve.len() {
        assert!(
            curve.rate_at(i) >= curve.rate_at(i - 1) - 1e-12,
            "zero rate dipped at pillar {i}: {} -> {}",
            curve.rate_at(i - 1),
            curve.rate_at(i)
        );
    }

    // Discount factors fall strictly with maturity.
    let mut previous = 1.0;
    let mut t = 0.5;
    while t <= 10.0 {
        let df = model.discount_factor(t).unwrap();
        assert!(df < previous, "discount factor rose at term {t}");
        assert!(df > 0.0);
        previous = df;
        t += 0.25;
    }

    // Every solved pillar repriced its swap to par at solve time.
    assert_eq!(result.checks().len(), 9);
    for check in result.checks() {
        assert_abs_diff_eq!(check.residual, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn bootstrapped_swaps_reprice_off_final_curve() {
    let result = build_zero_curve(&market_quotes(), ModelKind::MonotoneConvex).unwrap();
    let model = result.model();

    // Pricing off the final curve moves the early coupon discounts slightly
    // relative to the in-loop solves, so the tolerance here is looser than
    // the per-pillar residual check.
    for check in result.checks() {
        let swap = ParSwap::new(check.term, check.par_rate, Frequency::Annual);
        let residual = swap.par_residual(model, check.zero_rate).unwrap();
        assert_abs_diff_eq!(residual, 0.0, epsilon = 2e-3);
    }
}

#[test]
fn bootstrap_cubic_spline_end_to_end() {
    // The spline needs at least three knots at every refit, so the zero
    // curve is seeded with three cash quotes.
    let quotes = vec![
        cash(91, 0.8),
        cash(183, 1.0),
        cash(365, 1.4),
        swap(730, 2.0),
        swap(1826, 2.5),
        swap(3652, 3.0),
    ];

    let result = build_zero_curve(&quotes, ModelKind::CubicSpline).unwrap();
    let curve = result.curve();
    let model = result.model();

    assert_eq!(curve.len(), 12);
    assert_eq!(model.kind(), ModelKind::CubicSpline);

    for check in result.checks() {
        assert_abs_diff_eq!(check.residual, 0.0, epsilon = 1e-6);
        // The fitted spline passes through every solved pillar.
        let modeled = model.modeled_rate(check.term).unwrap();
        assert_relative_eq!(modeled, check.zero_rate, epsilon = 1e-8);
    }

    let mut previous = 1.0;
    for t in [0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0] {
        let df = model.discount_factor(t).unwrap();
        assert!(df < previous, "discount factor rose at term {t}");
        previous = df;
    }
}

#[test]
fn model_kinds_agree_at_bootstrap_pillars() {
    // Both interpolators must reproduce the same closed-form pillar solves
    // for identical single-period coupon structures; differences appear
    // only between pillars.
    let quotes = vec![
        cash(91, 0.8),
        cash(183, 1.0),
        cash(365, 1.4),
        swap(730, 2.0),
        swap(1826, 2.5),
        swap(3652, 3.0),
    ];

    let mc = build_zero_curve(&quotes, ModelKind::MonotoneConvex).unwrap();
    let spline = build_zero_curve(&quotes, ModelKind::CubicSpline).unwrap();

    // First pillar discounts its coupons off the cash-only seed, where the
    // two interpolators differ; agreement tightens as pillars accumulate
    // but stays approximate.
    for (a, b) in mc.checks().iter().zip(spline.checks().iter()) {
        assert_relative_eq!(a.term, b.term);
        assert_abs_diff_eq!(a.zero_rate, b.zero_rate, epsilon = 5e-4);
    }
}
