//! Mathematical utility functions for grid sampling and interpolation
//!
//! This module provides the small numeric helpers shared by the grid,
//! the boundary extraction and the raster view.

/// Assert that the deviation between two values is less than a threshold
///
/// Calculates the percentage deviation between `actual` and `expected`, then
/// asserts that this deviation is less than the specified `max_deviation`.
#[macro_export]
macro_rules! assert_deviation {
    ($actual:expr, $expected:expr, $max_deviation:expr) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.2}% >= {:.2}%\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, actual_val, expected_val
                );
            }
        }
    };
    ($actual:expr, $expected:expr, $max_deviation:expr, $($arg:tt)+) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.2}% >= {:.2}%: {}\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, format_args!($($arg)+), actual_val, expected_val
                );
            }
        }
    };
}

/// Linear interpolation between two values
///
/// # Examples
/// ```
/// use fe_pourbaix::math_utils::lerp;
///
/// assert_eq!(lerp(0.0, 14.0, 0.5), 7.0);
/// assert_eq!(lerp(-2.5, 2.5, 0.25), -1.25);
/// ```
pub fn lerp(a: f64, b: f64, ratio: f64) -> f64 {
    a + (b - a) * ratio
}

/// Evenly spaced samples from `a` to `b`, both end points included.
///
/// The span is multiplied before dividing so that samples landing on
/// "round" coordinates (pH 2 on a 0..14 axis of 8 points) are exact.
///
/// # Examples
/// ```
/// use fe_pourbaix::math_utils::linspace;
///
/// assert_eq!(linspace(0.0, 14.0, 8)[1], 2.0);
/// assert_eq!(linspace(-2.5, 2.5, 11)[3], -1.0);
/// ```
pub fn linspace(a: f64, b: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        b
                    } else {
                        a + (b - a) * i as f64 / last
                    }
                })
                .collect()
        }
    }
}

/// Inverse linear interpolation - find the ratio for a given value
///
/// # Examples
/// ```
/// use fe_pourbaix::math_utils::inverse_lerp;
///
/// assert_eq!(inverse_lerp(-2.5, 2.5, 0.0), 0.5);
/// ```
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < f64::EPSILON {
        0.0 // Avoid division by zero
    } else {
        (value - a) / (b - a)
    }
}

/// Calculate the percentage deviation between two values
///
/// Uses the expected value as the reference (base) for the percentage calculation.
///
/// # Examples
/// ```
/// use fe_pourbaix::math_utils::deviation;
///
/// assert_eq!(deviation(105.0, 100.0), 5.0);
/// assert_eq!(deviation(95.0, 100.0), 5.0);
/// ```
pub fn deviation(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        if actual.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((actual - expected).abs() / expected.abs()) * 100.0
    }
}
