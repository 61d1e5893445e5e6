//! Metric engine tests: formula values and unset-input behavior.

use ctmon_core::metrics::{
    loading_time, match_factor, parse_positive, productivity_hauler, productivity_loader,
};
use ctmon_core::{DerivedMetrics, RawInputs, RawValue};

fn full_inputs() -> RawInputs {
    RawInputs {
        cycletime_loader: "30".into(),
        waktu_kerja_loader: "120".into(),
        jumlah_passing: "4".into(),
        cycletime_hauler: "10".into(),
        konversi_jarak: "2".into(),
        jumlah_hd: "5".into(),
    }
}

#[test]
fn loading_time_matches_formula() {
    // 30 s per cycle, 4 passes -> 2 minutes
    assert_eq!(loading_time(&"30".into(), &"4".into()), 2.0);
}

#[test]
fn productivity_loader_matches_formula() {
    assert_eq!(productivity_loader(&RawValue::from(120.0), 2.0), 2520.0);
}

#[test]
fn productivity_hauler_matches_formula() {
    assert_eq!(productivity_hauler(&"10".into(), &"2".into()), 126.0);
}

#[test]
fn match_factor_matches_formula() {
    assert_eq!(match_factor(&"5".into(), 126.0, 2520.0), 0.25);
}

#[test]
fn non_positive_or_non_numeric_inputs_yield_zero() {
    for bad in ["", "   ", "abc", "-3", "0", "1e"] {
        assert_eq!(loading_time(&bad.into(), &"4".into()), 0.0, "input {bad:?}");
        assert_eq!(loading_time(&"30".into(), &bad.into()), 0.0, "input {bad:?}");
    }
    assert_eq!(productivity_loader(&"120".into(), 0.0), 0.0);
    assert_eq!(productivity_hauler(&"0".into(), &"2".into()), 0.0);
    assert_eq!(match_factor(&"5".into(), 0.0, 2520.0), 0.0);
    assert_eq!(match_factor(&"5".into(), 126.0, 0.0), 0.0);
}

#[test]
fn parse_positive_accepts_decimal_comma_and_whitespace() {
    assert_eq!(parse_positive(&" 3,5 ".into()), Some(3.5));
    assert_eq!(parse_positive(&" 12.25".into()), Some(12.25));
    assert_eq!(parse_positive(&"3,5,0".into()), None);
    assert_eq!(parse_positive(&RawValue::Number(0.0)), None);
    assert_eq!(parse_positive(&RawValue::Number(f64::NAN)), None);
    assert_eq!(parse_positive(&RawValue::Number(-1.5)), None);
}

#[test]
fn compute_runs_the_full_chain() {
    let metrics = DerivedMetrics::compute(&full_inputs());
    assert_eq!(metrics.loading_time, 2.0);
    assert_eq!(metrics.productivity_loader, 2520.0);
    assert_eq!(metrics.productivity_hauler, 126.0);
    assert_eq!(metrics.match_factor, 0.25);
}

#[test]
fn compute_with_partial_inputs_stays_finite() {
    // Only the loader side is filled in; hauler metrics fall back to 0.
    let inputs = RawInputs {
        cycletime_loader: "30".into(),
        waktu_kerja_loader: "120".into(),
        jumlah_passing: "4".into(),
        ..Default::default()
    };
    let metrics = DerivedMetrics::compute(&inputs);
    assert_eq!(metrics.loading_time, 2.0);
    assert_eq!(metrics.productivity_loader, 2520.0);
    assert_eq!(metrics.productivity_hauler, 0.0);
    assert_eq!(metrics.match_factor, 0.0);
    assert!(metrics.loading_time.is_finite());
    assert!(metrics.match_factor.is_finite());
}

#[test]
fn raw_value_display_renders_cells_verbatim() {
    assert_eq!(RawValue::Number(30.0).display(), "30");
    assert_eq!(RawValue::Number(2.5).display(), "2.5");
    assert_eq!(RawValue::from("  30 ").display(), "30");
    assert_eq!(RawValue::empty().display(), "");
}
