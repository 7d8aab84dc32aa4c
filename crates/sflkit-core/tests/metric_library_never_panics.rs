// crates/sflkit-core/tests/metric_library_never_panics.rs
// ============================================================================
// Module: Metric Library Property Tests
// Description: Every registered metric never panics; division-by-zero and
//              NaN results are coerced to 0.0 across arbitrary counts.
// ============================================================================
//! Property-based tests for the closed-form metric formula library.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use sflkit_core::metrics::MetricCounts;
use sflkit_core::metrics::lookup;
use sflkit_core::metrics::registered_names;

proptest! {
    #[test]
    fn every_registered_metric_never_panics_and_stays_finite(
        ef in any::<u32>(),
        ep in any::<u32>(),
        nf in any::<u32>(),
        np in any::<u32>(),
    ) {
        let counts = MetricCounts { ef: u64::from(ef), ep: u64::from(ep), nf: u64::from(nf), np: u64::from(np) };

        for name in registered_names() {
            let metric = lookup(name).unwrap_or_else(|| panic!("registered name `{name}` has no formula"));
            let value = metric(counts);
            prop_assert!(value.is_finite(), "metric `{name}` produced a non-finite value for {counts:?}");
        }
    }

}

#[test]
fn every_registered_metric_is_finite_on_all_zero_counts() {
    let counts = MetricCounts::default();
    for name in registered_names() {
        let metric = lookup(name).expect("registered name has a formula");
        let value = metric(counts);
        assert!(value.is_finite(), "metric `{name}` produced a non-finite value on all-zero counts");
    }
}

#[test]
fn safe_div_coerces_division_by_zero_and_nan_to_zero() {
    assert_eq!(sflkit_core::metrics::safe_div(1.0, 0.0), 0.0);
    assert_eq!(sflkit_core::metrics::safe_div(0.0, 0.0), 0.0);
    assert_eq!(sflkit_core::metrics::safe_div(f64::NAN, 1.0), 0.0);
    assert_eq!(sflkit_core::metrics::safe_div(f64::INFINITY, 1.0), 0.0);
}

#[test]
fn lookup_covers_every_registered_name() {
    for name in registered_names() {
        assert!(lookup(name).is_some(), "`{name}` is registered but has no formula");
    }
}
