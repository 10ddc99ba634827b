//! Assertion utilities for testing.
//!
//! Floating-point comparisons for interpolated values, including grid value
//! lists where failed points are `null`.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a JSON grid value list matches `expected`, with `None` for failed points.
///
/// # Panics
///
/// Panics on a length difference, on a null/number mismatch, or when a value
/// differs by more than `epsilon`.
pub fn assert_grid_values(
    actual: &[serde_json::Value],
    expected: &[Option<f64>],
    epsilon: Option<f64>,
) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Grids have different sizes: actual = {}, expected = {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        match (a.as_f64(), e) {
            (Some(a), Some(e)) => assert_approx_eq(a, *e, epsilon),
            (None, None) => {
                assert!(a.is_null(), "Point {} is neither a number nor null: {}", i, a)
            }
            _ => panic!("Point {} differs: actual = {}, expected = {:?}", i, a, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0000000001, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_grid_values() {
        let values = vec![json!(1.5), json!(null), json!(2.0)];
        assert_grid_values(&values, &[Some(1.5), None, Some(2.0)], None);
    }

    #[test]
    #[should_panic(expected = "Point 1 differs")]
    fn test_assert_grid_values_null_mismatch() {
        let values = vec![json!(1.5), json!(null)];
        assert_grid_values(&values, &[Some(1.5), Some(0.0)], None);
    }
}
