// Tests for the distance-to-parameter mapper.

use theremin_core::{linear_remap, CurveError, FalloffCurve};

// Canonical pose-variant pitch curve: C3..B4.
fn pitch_curve() -> FalloffCurve {
    FalloffCurve::new(131.0, 494.0, 10.0)
}

#[test]
fn falloff_equals_max_at_zero_distance() {
    let v = pitch_curve().value_at(0.0);
    assert!((v - 494.0).abs() < 1e-3, "expected max at d=0, got {v}");
}

#[test]
fn falloff_approaches_min_at_large_distance() {
    let v = pitch_curve().value_at(1000.0);
    assert!((v - 131.0).abs() < 1e-3, "expected min in the limit, got {v}");
}

#[test]
fn falloff_is_strictly_decreasing_while_above_resolution() {
    // Strict monotonicity holds until the exponential term drops below f32
    // resolution of the output range. With sensitivity 10 that term is
    // ~2e-3 at d=1.2 and step differences are ~1e-4, well above one ulp
    // at 131 (~1.5e-5); past d~1.5 consecutive samples round together.
    let curve = pitch_curve();
    let mut prev = curve.value_at(0.0);
    for i in 1..=60 {
        let d = i as f32 * 0.02;
        let v = curve.value_at(d);
        assert!(v < prev, "not strictly decreasing at d={d}: {v} >= {prev}");
        prev = v;
    }
}

#[test]
fn falloff_is_bounded_for_all_distances() {
    let curve = pitch_curve();
    for i in 0..=10_000 {
        let d = i as f32 * 0.1;
        let v = curve.value_at(d);
        assert!(v.is_finite(), "non-finite value at d={d}");
        assert!(
            (curve.min..=curve.max).contains(&v),
            "value {v} out of [{}, {}] at d={d}",
            curve.min,
            curve.max
        );
    }
}

#[test]
fn gain_curve_spans_zero_to_one() {
    let curve = FalloffCurve::new(0.0, 1.0, 1.0);
    assert!((curve.value_at(0.0) - 1.0).abs() < 1e-6);
    assert!(curve.value_at(100.0) < 1e-6);
}

#[test]
fn linear_remap_hits_range_endpoints() {
    let lo = linear_remap(100.0, 100.0, 255.0, 0.05, 0.8);
    assert!((lo - 0.05).abs() < 1e-6, "got {lo}");
    let hi = linear_remap(255.0, 100.0, 255.0, 0.05, 0.8);
    assert!((hi - 0.8).abs() < 1e-6, "got {hi}");
}

#[test]
fn linear_remap_midpoint() {
    let mid = linear_remap(177.5, 100.0, 255.0, 0.05, 0.8);
    assert!((mid - 0.425).abs() < 1e-6, "got {mid}");
}

#[test]
fn linear_remap_supports_flipped_input_range() {
    // Tracker y grows downward; scene y grows upward.
    let top = linear_remap(0.0, 255.0, 0.0, 1.0, 1.8);
    assert!((top - 1.8).abs() < 1e-6, "got {top}");
    let bottom = linear_remap(255.0, 255.0, 0.0, 1.0, 1.8);
    assert!((bottom - 1.0).abs() < 1e-6, "got {bottom}");
}

#[test]
fn linear_remap_extrapolates_instead_of_clamping() {
    let above = linear_remap(410.0, 100.0, 255.0, 0.05, 0.8);
    assert!(above > 0.8, "inputs past in_max must extrapolate, got {above}");
    let below = linear_remap(0.0, 100.0, 255.0, 0.05, 0.8);
    assert!(below < 0.05, "inputs before in_min must extrapolate, got {below}");
}

#[test]
fn curve_validation_rejects_bad_sensitivity() {
    for s in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let err = FalloffCurve::new(0.0, 1.0, s).validate().unwrap_err();
        assert!(
            matches!(err, CurveError::BadSensitivity(_)),
            "sensitivity {s} accepted"
        );
    }
}

#[test]
fn curve_validation_rejects_inverted_or_nonfinite_bounds() {
    let err = FalloffCurve::new(500.0, 100.0, 1.0).validate().unwrap_err();
    assert!(matches!(err, CurveError::BadBounds { .. }));
    let err = FalloffCurve::new(f32::NAN, 100.0, 1.0).validate().unwrap_err();
    assert!(matches!(err, CurveError::BadBounds { .. }));
    assert!(FalloffCurve::new(131.0, 494.0, 10.0).validate().is_ok());
}
