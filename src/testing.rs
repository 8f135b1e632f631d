//! Testing helpers.

use assert_float_eq::*;

pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_f64_near!(expected, actual, distance);
        }
    }
}

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that the `(value, probability)` pairs match `expected` in order, comparing values exactly
/// and probabilities to within an absolute `epsilon`.
pub fn assert_pairs_f64_absolute(expected: &[(f64, f64)], actual: &[(f64, f64)], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {} ({expected:?} vs {actual:?})",
        expected.len(),
        actual.len()
    );
    for (&(expected_value, expected_prob), &(actual_value, actual_prob)) in expected.iter().zip(actual) {
        assert_float_absolute_eq!(expected_value, actual_value, 1e-12);
        assert_float_absolute_eq!(expected_prob, actual_prob, epsilon);
    }
}
