/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use crate::Element;

/// Evaluate the inner product of `x` and `y`, accumulating in the working
/// precision with fused multiply-add.
///
/// # Panics
///
/// Panics if `x.len() != y.len()`.
#[inline]
pub fn dot<T: Element>(x: &[T], y: &[T]) -> T {
    assert_eq!(
        x.len(),
        y.len(),
        "dot product arguments must have equal length"
    );
    std::iter::zip(x.iter(), y.iter()).fold(T::ZERO, |acc, (&a, &b)| a.mul_add(b, acc))
}

/// Evaluate the square of the L2 norm of `x`.
#[inline]
pub fn squared_norm<T: Element>(x: &[T]) -> T {
    x.iter().fold(T::ZERO, |acc, &a| a.mul_add(a, acc))
}

///////////
// Tests //
///////////

#[cfg(test)]
mod tests {
    use rand::{
        distr::{Distribution, Uniform},
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    const MAX_DIM: usize = 128;
    cfg_if::cfg_if! {
        if #[cfg(miri)] {
            const NUM_TRIALS: usize = 1;
        } else {
            const NUM_TRIALS: usize = 16;
        }
    }

    // Small integer-valued inputs keep every intermediate exact, so the fused
    // path can be compared against the naive sum without a tolerance.
    fn fill_integral(rng: &mut StdRng, v: &mut [f64]) {
        let distribution = Uniform::<i64>::new(-16, 16).unwrap();
        v.iter_mut()
            .for_each(|v| *v = distribution.sample(rng) as f64);
    }

    #[test]
    fn dot_matches_naive_sum() {
        let mut rng = StdRng::seed_from_u64(0x7a3d_90c1_44b2_e5f8);
        for dim in 0..MAX_DIM {
            let mut x = vec![0.0f64; dim];
            let mut y = vec![0.0f64; dim];
            for _ in 0..NUM_TRIALS {
                fill_integral(&mut rng, &mut x);
                fill_integral(&mut rng, &mut y);

                let naive: f64 = std::iter::zip(x.iter(), y.iter()).map(|(a, b)| a * b).sum();
                assert_eq!(dot(&x, &y), naive, "dim {dim}");
            }
        }
    }

    #[test]
    fn squared_norm_is_self_dot() {
        let mut rng = StdRng::seed_from_u64(0x19c4_5eed_4302_8d77);
        for dim in 0..MAX_DIM {
            let mut x = vec![0.0f64; dim];
            for _ in 0..NUM_TRIALS {
                fill_integral(&mut rng, &mut x);
                assert_eq!(squared_norm(&x), dot(&x, &x), "dim {dim}");
                assert!(squared_norm(&x) >= 0.0);
            }
        }
    }

    #[test]
    fn single_precision_path() {
        let x: Vec<f32> = vec![1.0, 2.0, 3.0];
        let y: Vec<f32> = vec![4.0, -5.0, 6.0];
        assert_eq!(dot(&x, &y), 12.0);
        assert_eq!(squared_norm(&x), 14.0);
        assert_eq!(dot::<f32>(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic(expected = "dot product arguments must have equal length")]
    fn dot_length_mismatch_panics() {
        let _ = dot::<f32>(&[1.0, 2.0], &[1.0]);
    }
}
