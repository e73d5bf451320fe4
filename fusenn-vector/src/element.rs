/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt::Debug,
    ops::{Add, Mul, Sub},
};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// The floating-point element types the fused kernel operates on.
///
/// The trait is sealed over `f32` and `f64`: both input matrices and the
/// optional distance output of one invocation share a single implementation
/// of this trait, so mixed-precision calls are unrepresentable.
///
/// [`Element::CANCELLATION_TOLERANCE`] is the per-precision relative
/// tolerance applied when the norm decomposition
/// `‖a−b‖² = ‖a‖² + ‖b‖² − 2·a·b` produces a small negative value through
/// cancellation. Values within the tolerance are clamped to zero; values
/// beyond it indicate an input-scale problem and surface as an error.
pub trait Element:
    sealed::Sealed
    + Copy
    + Debug
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + 'static
{
    const ZERO: Self;
    const INFINITY: Self;
    const CANCELLATION_TOLERANCE: Self;

    /// Fused multiply-add: `self * a + b` with a single rounding.
    fn mul_add(self, a: Self, b: Self) -> Self;

    /// The non-negative square root of `self`.
    fn sqrt(self) -> Self;

    /// Widen to `f64` for reporting and tolerance-based comparisons.
    fn to_f64(self) -> f64;
}

impl Element for f32 {
    const ZERO: Self = 0.0;
    const INFINITY: Self = f32::INFINITY;
    const CANCELLATION_TOLERANCE: Self = 1.0e-4;

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        f32::mul_add(self, a, b)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;
    const INFINITY: Self = f64::INFINITY;
    const CANCELLATION_TOLERANCE: Self = 1.0e-10;

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        f64::mul_add(self, a, b)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}
