/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
//! # fusenn-utils
//!
//! Shared infrastructure for the fusenn workspace. Currently this is limited to
//! [`views`]: light-weight row-major matrix views over caller-owned contiguous
//! buffers, with optional `rayon` parallel iteration.
#![cfg_attr(
    not(test),
    warn(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

pub mod views;
