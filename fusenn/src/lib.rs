/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
//! # fusenn
//!
//! Fused L2 nearest-neighbor assignment: given a query set of `N` vectors and
//! a reference ("centroid") set of `K` vectors in `D`-dimensional space, find
//! the nearest reference row for every query row under Euclidean distance,
//! without ever materializing the `N x K` distance matrix.
//!
//! Distances are evaluated through the decomposition
//! `‖q − r‖² = ‖q‖² + ‖r‖² − 2·(q · r)`: row norms are computed once, the
//! cross term is a fused-multiply-add dot product per pair, and each value is
//! folded straight into a per-row `(min distance, min index)` accumulator.
//! Ties always resolve to the smaller reference index, and the result is
//! identical whether rows are reduced sequentially or in parallel.
//!
//! ```rust
//! use fusenn::{fused_l2_nearest, DistanceForm};
//! use fusenn::views::MatrixView;
//!
//! let queries = [0.0f32, 0.0, 10.0, 10.0]; // 2 x 2, row-major
//! let references = [9.0f32, 9.0, 1.0, 1.0]; // 2 x 2, row-major
//! let queries = MatrixView::try_new(&queries, 2, 2)?;
//! let references = MatrixView::try_new(&references, 2, 2)?;
//!
//! let mut indices = [0u32; 2];
//! let mut distances = [0.0f32; 2];
//! fused_l2_nearest(
//!     queries,
//!     references,
//!     DistanceForm::Euclidean,
//!     &mut indices,
//!     Some(&mut distances),
//! )?;
//!
//! assert_eq!(indices, [1, 0]);
//! assert_eq!(distances, [2.0f32.sqrt(), 2.0f32.sqrt()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(
    not(test),
    warn(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

pub mod error;
pub use error::{FusedNnError, FusedNnResult};

mod form;
pub use form::DistanceForm;

mod nearest;
pub use nearest::{Nearest, INVALID_INDEX};

mod kernel;

pub use fusenn_utils::views;
pub use fusenn_vector::Element;

use fusenn_utils::views::MatrixView;

/// Check the input matrices: dimensions must agree and be non-zero, and the
/// reference set must be non-empty. Runs before any computation.
fn validate_inputs<T: Element>(
    queries: MatrixView<'_, T>,
    references: MatrixView<'_, T>,
) -> FusedNnResult<()> {
    if queries.ncols() != references.ncols() {
        return Err(FusedNnError::ShapeMismatch {
            queries_dim: queries.ncols(),
            references_dim: references.ncols(),
        });
    }
    if queries.ncols() == 0 {
        return Err(FusedNnError::ZeroDimension);
    }
    if references.nrows() == 0 {
        return Err(FusedNnError::EmptyReferenceSet);
    }
    Ok(())
}

/// Check that an output buffer covers every query row.
fn validate_output_len(
    buffer: &'static str,
    expected: usize,
    got: usize,
) -> FusedNnResult<()> {
    if expected != got {
        return Err(FusedNnError::OutputLength {
            buffer,
            expected,
            got,
        });
    }
    Ok(())
}

/// Assign every query row to its nearest reference row.
///
/// For each row `i` of `queries`, writes the index of the closest row of
/// `references` to `indices[i]`, and (when a `distances` buffer is supplied)
/// the corresponding distance in the requested [`DistanceForm`]. Ties resolve
/// to the smallest reference index.
///
/// When the `rayon` feature is enabled (the default), query rows are
/// partitioned across the currently installed rayon pool; the result is
/// identical to [`fused_l2_nearest_serial`].
///
/// # Errors
///
/// * [`FusedNnError::ShapeMismatch`] / [`FusedNnError::ZeroDimension`] if the
///   matrices disagree on dimensionality or have zero columns.
/// * [`FusedNnError::EmptyReferenceSet`] if `references` has no rows.
/// * [`FusedNnError::OutputLength`] if `indices` (or `distances`, when
///   supplied) is not exactly `queries.nrows()` long.
/// * [`FusedNnError::NumericInstability`] if cancellation in the norm
///   decomposition exceeds the per-precision tolerance.
///
/// All errors are reported before any output is written.
pub fn fused_l2_nearest<T: Element>(
    queries: MatrixView<'_, T>,
    references: MatrixView<'_, T>,
    form: DistanceForm,
    indices: &mut [u32],
    distances: Option<&mut [T]>,
) -> FusedNnResult<()> {
    validate_inputs(queries, references)?;
    validate_output_len("indices", queries.nrows(), indices.len())?;
    if let Some(len) = distances.as_deref().map(<[T]>::len) {
        validate_output_len("distances", queries.nrows(), len)?;
    }

    tracing::debug!(
        queries = queries.nrows(),
        references = references.nrows(),
        dimension = queries.ncols(),
        form = ?form,
        parallel = cfg!(feature = "rayon"),
        "running fused L2 nearest-neighbor assignment"
    );

    let query_norms = kernel::squared_norms(queries);
    let reference_norms = kernel::squared_norms(references);

    #[cfg(feature = "rayon")]
    let accumulators = kernel::compute_parallel(
        queries,
        &query_norms,
        references,
        &reference_norms,
        kernel::TILE_ROWS,
    );
    #[cfg(not(feature = "rayon"))]
    let accumulators = kernel::compute_serial(
        queries,
        &query_norms,
        references,
        &reference_norms,
        kernel::TILE_ROWS,
    );

    kernel::finalize_into(
        &accumulators,
        &query_norms,
        &reference_norms,
        form,
        indices,
        distances,
    )
}

/// [`fused_l2_nearest`] restricted to a single thread.
///
/// Same contract and same results as the parallel path; useful inside an
/// already-parallel caller or when thread-pool setup is unwanted.
pub fn fused_l2_nearest_serial<T: Element>(
    queries: MatrixView<'_, T>,
    references: MatrixView<'_, T>,
    form: DistanceForm,
    indices: &mut [u32],
    distances: Option<&mut [T]>,
) -> FusedNnResult<()> {
    validate_inputs(queries, references)?;
    validate_output_len("indices", queries.nrows(), indices.len())?;
    if let Some(len) = distances.as_deref().map(<[T]>::len) {
        validate_output_len("distances", queries.nrows(), len)?;
    }

    tracing::debug!(
        queries = queries.nrows(),
        references = references.nrows(),
        dimension = queries.ncols(),
        form = ?form,
        parallel = false,
        "running fused L2 nearest-neighbor assignment"
    );

    let query_norms = kernel::squared_norms(queries);
    let reference_norms = kernel::squared_norms(references);
    let accumulators = kernel::compute_serial(
        queries,
        &query_norms,
        references,
        &reference_norms,
        kernel::TILE_ROWS,
    );

    kernel::finalize_into(
        &accumulators,
        &query_norms,
        &reference_norms,
        form,
        indices,
        distances,
    )
}

/// Assign every query row to its nearest reference row, returning an owned
/// vector of [`Nearest`] pairs instead of writing into caller buffers.
///
/// Errors match [`fused_l2_nearest`] minus the output-length conditions.
pub fn fused_l2_nearest_alloc<T: Element>(
    queries: MatrixView<'_, T>,
    references: MatrixView<'_, T>,
    form: DistanceForm,
) -> FusedNnResult<Vec<Nearest<T>>> {
    validate_inputs(queries, references)?;

    tracing::debug!(
        queries = queries.nrows(),
        references = references.nrows(),
        dimension = queries.ncols(),
        form = ?form,
        parallel = cfg!(feature = "rayon"),
        "running fused L2 nearest-neighbor assignment"
    );

    let query_norms = kernel::squared_norms(queries);
    let reference_norms = kernel::squared_norms(references);

    #[cfg(feature = "rayon")]
    let accumulators = kernel::compute_parallel(
        queries,
        &query_norms,
        references,
        &reference_norms,
        kernel::TILE_ROWS,
    );
    #[cfg(not(feature = "rayon"))]
    let accumulators = kernel::compute_serial(
        queries,
        &query_norms,
        references,
        &reference_norms,
        kernel::TILE_ROWS,
    );

    kernel::finalize_owned(accumulators, &query_norms, &reference_norms, form)
}
