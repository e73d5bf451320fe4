/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use thiserror::Error;

/// Convenience alias for a `Result<T, FusedNnError>`.
pub type FusedNnResult<T> = Result<T, FusedNnError>;

/// Errors reported by the fused nearest-neighbor operation.
///
/// Shape and emptiness errors are detected before any computation begins;
/// when one is returned, no output buffer has been touched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FusedNnError {
    /// The query and reference matrices disagree on dimensionality.
    #[error(
        "queries have dimension {queries_dim} but references have dimension {references_dim}"
    )]
    ShapeMismatch {
        queries_dim: usize,
        references_dim: usize,
    },

    /// One of the input matrices has zero columns.
    #[error("input matrices must have at least one column")]
    ZeroDimension,

    /// The reference set has no rows, so no nearest reference is defined.
    #[error("the reference set is empty; no nearest reference is defined")]
    EmptyReferenceSet,

    /// An output buffer's length does not match the number of query rows.
    #[error("the {buffer} buffer holds {got} entries but {expected} query rows were supplied")]
    OutputLength {
        buffer: &'static str,
        expected: usize,
        got: usize,
    },

    /// A negative accumulated squared distance exceeded the per-precision
    /// cancellation tolerance. Small negatives within the tolerance are
    /// clamped to zero instead; this variant signals an input-scale or
    /// precision problem, not ordinary rounding.
    #[error(
        "accumulated squared distance {value:e} for query {query} against reference \
         {reference} falls below the cancellation tolerance {tolerance:e}; \
         check input scaling"
    )]
    NumericInstability {
        query: usize,
        reference: u32,
        value: f64,
        tolerance: f64,
    },
}
