/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
//! The fused distance-computation-and-reduction kernel.
//!
//! The kernel never materializes the N x K distance matrix. Squared norms of
//! both inputs are computed once up front, reference rows are visited in
//! tiles, and each tile's distances are folded straight into the per-row
//! [`Nearest`] accumulator via the stable decomposition
//! `dist²(i, j) = ‖q_i‖² + ‖r_j‖² − 2·(q_i · r_j)`.

use fusenn_utils::views::MatrixView;
use fusenn_vector::{dot, squared_norm, Element};

use crate::{
    error::{FusedNnError, FusedNnResult},
    form::DistanceForm,
    nearest::Nearest,
};

/// Number of reference rows per tile.
///
/// Sized so a tile of reference rows stays resident in L1/L2 while one query
/// row streams against it. Tiling changes locality only: each distance is a
/// full-dimension dot product against precomputed norms, so the numerical
/// result is identical for every tile size (see `tile_size_is_invisible`).
pub(crate) const TILE_ROWS: usize = 64;

/// Compute the squared L2 norm of every row of `matrix`.
///
/// One pass per invocation; the result is reused by every pairwise distance
/// evaluation so the cross-term dot product is the only per-pair work. A
/// matrix with zero rows yields an empty vector.
pub(crate) fn squared_norms<T: Element>(matrix: MatrixView<'_, T>) -> Vec<T> {
    matrix.row_iter().map(squared_norm).collect()
}

/// Reduce one query row against the full reference set, tile by tile, in
/// ascending reference order.
fn reduce_row<T: Element>(
    query: &[T],
    query_norm: T,
    references: MatrixView<'_, T>,
    reference_norms: &[T],
    tile_rows: usize,
) -> Nearest<T> {
    debug_assert_eq!(references.nrows(), reference_norms.len());

    let mut nearest = Nearest::identity();
    for (tile_index, tile) in references.window_iter(tile_rows).enumerate() {
        let base = tile_index * tile_rows;
        let norms = &reference_norms[base..base + tile.nrows()];
        for (offset, (row, &norm)) in std::iter::zip(tile.row_iter(), norms).enumerate() {
            let cross = dot(query, row);
            let distance = (query_norm + norm) - (cross + cross);
            nearest.observe(distance, (base + offset) as u32);
        }
    }
    nearest
}

/// Reduce every query row sequentially.
pub(crate) fn compute_serial<T: Element>(
    queries: MatrixView<'_, T>,
    query_norms: &[T],
    references: MatrixView<'_, T>,
    reference_norms: &[T],
    tile_rows: usize,
) -> Vec<Nearest<T>> {
    std::iter::zip(queries.row_iter(), query_norms)
        .map(|(query, &norm)| reduce_row(query, norm, references, reference_norms, tile_rows))
        .collect()
}

/// Reduce query rows in parallel, partitioned across the current rayon pool.
///
/// Rows are independent: each worker owns its rows' accumulators outright and
/// the shared inputs are read-only, so no synchronization beyond the final
/// collect is needed. Within a row the traversal is the same ascending-order
/// walk as [`compute_serial`], so both paths produce identical results.
#[cfg(feature = "rayon")]
pub(crate) fn compute_parallel<T: Element>(
    queries: MatrixView<'_, T>,
    query_norms: &[T],
    references: MatrixView<'_, T>,
    reference_norms: &[T],
    tile_rows: usize,
) -> Vec<Nearest<T>> {
    use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

    queries
        .par_row_iter()
        .zip(query_norms.par_iter())
        .map(|(query, &norm)| reduce_row(query, norm, references, reference_norms, tile_rows))
        .collect()
}

/// Reject accumulators whose negative value exceeds the cancellation
/// tolerance, before anything is written to an output buffer.
///
/// A catastrophic cancellation always surfaces in the row minimum (a large
/// negative value is smaller than every legitimate candidate), so checking
/// the accumulated minima covers every pair the kernel evaluated.
pub(crate) fn check_stability<T: Element>(
    accumulators: &[Nearest<T>],
    query_norms: &[T],
    reference_norms: &[T],
) -> FusedNnResult<()> {
    for (query, nearest) in accumulators.iter().enumerate() {
        debug_assert!(!nearest.is_identity());
        if nearest.distance < T::ZERO {
            let scale = query_norms[query] + reference_norms[nearest.index as usize];
            let tolerance = scale * T::CANCELLATION_TOLERANCE;
            if nearest.distance + tolerance < T::ZERO {
                return Err(FusedNnError::NumericInstability {
                    query,
                    reference: nearest.index,
                    value: nearest.distance.to_f64(),
                    tolerance: tolerance.to_f64(),
                });
            }
        }
    }
    Ok(())
}

/// Convert one accumulated squared minimum into the requested output form.
///
/// Small negatives from cancellation are clamped to zero first, so the square
/// root is never taken of a negative value.
#[inline]
pub(crate) fn finalize_value<T: Element>(distance: T, form: DistanceForm) -> T {
    let clamped = if distance < T::ZERO { T::ZERO } else { distance };
    if form.is_euclidean() {
        clamped.sqrt()
    } else {
        clamped
    }
}

/// Write finalized results into the caller's buffers.
///
/// Runs the stability check first; on error no buffer is touched. Each entry
/// is written exactly once.
pub(crate) fn finalize_into<T: Element>(
    accumulators: &[Nearest<T>],
    query_norms: &[T],
    reference_norms: &[T],
    form: DistanceForm,
    indices: &mut [u32],
    distances: Option<&mut [T]>,
) -> FusedNnResult<()> {
    check_stability(accumulators, query_norms, reference_norms)?;

    for (out, nearest) in std::iter::zip(indices.iter_mut(), accumulators) {
        *out = nearest.index;
    }
    if let Some(out) = distances {
        for (out, nearest) in std::iter::zip(out.iter_mut(), accumulators) {
            *out = finalize_value(nearest.distance, form);
        }
    }
    Ok(())
}

/// Finalize into an owned vector of `(index, distance)` accumulators.
pub(crate) fn finalize_owned<T: Element>(
    accumulators: Vec<Nearest<T>>,
    query_norms: &[T],
    reference_norms: &[T],
    form: DistanceForm,
) -> FusedNnResult<Vec<Nearest<T>>> {
    check_stability(&accumulators, query_norms, reference_norms)?;

    Ok(accumulators
        .into_iter()
        .map(|nearest| Nearest::new(nearest.index, finalize_value(nearest.distance, form)))
        .collect())
}

///////////
// Tests //
///////////
