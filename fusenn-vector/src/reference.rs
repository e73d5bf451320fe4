/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
//! Direct-evaluation distance implementations.
//!
//! These evaluate `Σ (a_d − b_d)²` term by term, without the norm
//! decomposition the fused kernel uses. They are slower but free of
//! cancellation, which makes them the independent oracle for correctness
//! tests higher in the workspace.

use crate::Element;

/// Evaluate the squared Euclidean distance between `x` and `y` directly.
///
/// # Panics
///
/// Panics if `x.len() != y.len()`.
pub fn reference_squared_l2<T: Element>(x: &[T], y: &[T]) -> T {
    assert_eq!(x.len(), y.len());
    std::iter::zip(x.iter(), y.iter()).fold(T::ZERO, |acc, (&a, &b)| {
        let diff = a - b;
        diff.mul_add(diff, acc)
    })
}

/// Evaluate the Euclidean distance between `x` and `y` directly.
///
/// # Panics
///
/// Panics if `x.len() != y.len()`.
pub fn reference_l2<T: Element>(x: &[T], y: &[T]) -> T {
    reference_squared_l2(x, y).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_l2_by_hand() {
        let x: Vec<f64> = vec![1.0, 2.0, 3.0];
        let y: Vec<f64> = vec![1.0, 0.0, 5.0];
        assert_eq!(reference_squared_l2(&x, &y), 8.0);
        assert_eq!(reference_l2(&x, &y), 8.0f64.sqrt());
    }

    #[test]
    fn zero_distance_for_identical_inputs() {
        let x: Vec<f32> = vec![0.25, -1.5, 3.75, 0.0];
        assert_eq!(reference_squared_l2(&x, &x), 0.0);
        assert_eq!(reference_l2(&x, &x), 0.0);
    }

    #[test]
    fn one_dimensional_is_absolute_difference() {
        assert_eq!(reference_l2::<f32>(&[2.0], &[-1.5]), 3.5);
        assert_eq!(reference_l2::<f32>(&[-1.5], &[2.0]), 3.5);
    }
}
