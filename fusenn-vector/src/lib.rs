/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
//! # fusenn-vector
//!
//! Scalar arithmetic primitives for the fused nearest-neighbor kernel. The
//! crate pins down the two supported element precisions behind the [`Element`]
//! trait and provides the dot-product and norm reductions the kernel is built
//! from, plus direct-evaluation reference distances used as a test oracle.
#![cfg_attr(
    not(test),
    warn(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

mod element;
pub use element::Element;

mod ops;
pub use ops::{dot, squared_norm};

pub mod reference;
