/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::ops::{Index, IndexMut};

#[cfg(feature = "rayon")]
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSlice, ParallelSliceMut};
use thiserror::Error;

/// Error returned when a buffer cannot be interpreted with the requested shape.
#[derive(Debug, Error)]
#[non_exhaustive]
#[error(
    "a matrix with {nrows} rows and {ncols} columns requires {} elements, \
     but the buffer holds {len}", nrows * ncols
)]
pub struct ShapeError {
    nrows: usize,
    ncols: usize,
    len: usize,
}

impl ShapeError {
    /// The number of rows that was requested.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// The number of columns that was requested.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// The length of the offending buffer.
    pub fn buffer_len(&self) -> usize {
        self.len
    }
}

/////////////////
// MatrixView  //
/////////////////

/// A non-owning view over a dense chunk of memory, interpreting that memory as
/// a 2-dimensional matrix laid out in row-major order.
///
/// Views are `Copy` and may be freely shared across threads when the element
/// type is `Sync`. All row-yielding iterators require `ncols > 0`; matrices
/// with zero columns can be constructed but not iterated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    nrows: usize,
    ncols: usize,
}

impl<'a, T> MatrixView<'a, T> {
    /// Try to construct a view over `data` with the given shape.
    ///
    /// Fails with a [`ShapeError`] if `data.len() != nrows * ncols`.
    pub fn try_new(data: &'a [T], nrows: usize, ncols: usize) -> Result<Self, ShapeError> {
        if data.len() != nrows * ncols {
            Err(ShapeError {
                nrows,
                ncols,
                len: data.len(),
            })
        } else {
            Ok(Self { data, nrows, ncols })
        }
    }

    /// Return the number of rows in the matrix.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the number of columns in the matrix.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the underlying data as a flat slice.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Return row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row(&self, row: usize) -> &'a [T] {
        assert!(
            row < self.nrows,
            "tried to access row {row} of a matrix with {} rows",
            self.nrows
        );
        let start = row * self.ncols;
        &self.data[start..start + self.ncols]
    }

    /// Return an iterator over all rows, beginning with row 0.
    ///
    /// # Panics
    ///
    /// Panics if `self.ncols() == 0`.
    pub fn row_iter(&self) -> impl ExactSizeIterator<Item = &'a [T]> {
        self.data.chunks_exact(self.ncols)
    }

    /// Return an iterator that divides the matrix into sub-matrices with (up
    /// to) `batchsize` rows each, preserving row order.
    ///
    /// The final window may have fewer than `batchsize` rows when the row
    /// count is not evenly divisible.
    ///
    /// # Panics
    ///
    /// Panics if `batchsize == 0` or `self.ncols() == 0`.
    pub fn window_iter(&self, batchsize: usize) -> impl Iterator<Item = MatrixView<'a, T>> {
        assert!(batchsize != 0, "window_iter batchsize cannot be zero");
        let ncols = self.ncols;
        self.data.chunks(ncols * batchsize).map(move |data| {
            debug_assert_eq!(data.len() % ncols, 0);
            MatrixView {
                data,
                nrows: data.len() / ncols,
                ncols,
            }
        })
    }

    /// Return a parallel iterator over the rows of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `self.ncols() == 0`.
    #[cfg(feature = "rayon")]
    pub fn par_row_iter(&self) -> impl IndexedParallelIterator<Item = &'a [T]>
    where
        T: Sync,
    {
        self.data.par_chunks_exact(self.ncols)
    }
}

impl<T> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            col < self.ncols,
            "col {col} is out of bounds (max: {})",
            self.ncols
        );
        &self.row(row)[col]
    }
}

////////////
// Matrix //
////////////

/// An owning, row-major matrix backed by a boxed slice.
///
/// This is the construction-side companion of [`MatrixView`]: callers build
/// and fill a `Matrix`, then hand read-only [`MatrixView`]s to computations.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Box<[T]>,
    nrows: usize,
    ncols: usize,
}

impl<T> Matrix<T> {
    /// Construct a matrix with every element set to `value`.
    pub fn new(value: T, nrows: usize, ncols: usize) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![value; nrows * ncols].into_boxed_slice(),
            nrows,
            ncols,
        }
    }

    /// Construct a matrix by invoking `f` once per element, in memory order.
    pub fn from_fn<F>(mut f: F, nrows: usize, ncols: usize) -> Self
    where
        F: FnMut() -> T,
    {
        let data: Box<[T]> = (0..nrows * ncols).map(|_| f()).collect();
        Self { data, nrows, ncols }
    }

    /// Take ownership of `data`, interpreting it with the given shape.
    ///
    /// Fails with a [`ShapeError`] if `data.len() != nrows * ncols`.
    pub fn try_from_vec(data: Vec<T>, nrows: usize, ncols: usize) -> Result<Self, ShapeError> {
        if data.len() != nrows * ncols {
            Err(ShapeError {
                nrows,
                ncols,
                len: data.len(),
            })
        } else {
            Ok(Self {
                data: data.into_boxed_slice(),
                nrows,
                ncols,
            })
        }
    }

    /// Return the number of rows in the matrix.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the number of columns in the matrix.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the underlying data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Return the underlying data as a mutable flat slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Return a read-only view over the whole matrix.
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView {
            data: &self.data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Return row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row(&self, row: usize) -> &[T] {
        self.as_view().row(row)
    }

    /// Return row `row` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        assert!(
            row < self.nrows,
            "tried to access row {row} of a matrix with {} rows",
            self.nrows
        );
        let start = row * self.ncols;
        &mut self.data[start..start + self.ncols]
    }

    /// Return an iterator over all rows, beginning with row 0.
    ///
    /// # Panics
    ///
    /// Panics if `self.ncols() == 0`.
    pub fn row_iter(&self) -> impl ExactSizeIterator<Item = &[T]> {
        self.data.chunks_exact(self.ncols)
    }

    /// Return a mutable iterator over all rows, beginning with row 0.
    ///
    /// # Panics
    ///
    /// Panics if `self.ncols() == 0`.
    pub fn row_iter_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [T]> {
        self.data.chunks_exact_mut(self.ncols)
    }

    /// Return a parallel mutable iterator over the rows of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `self.ncols() == 0`.
    #[cfg(feature = "rayon")]
    pub fn par_row_iter_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [T]>
    where
        T: Send,
    {
        self.data.par_chunks_exact_mut(self.ncols)
    }

    /// Consume the matrix, returning the boxed backing storage.
    pub fn into_inner(self) -> Box<[T]> {
        self.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            col < self.ncols,
            "col {col} is out of bounds (max: {})",
            self.ncols
        );
        &self.row(row)[col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            col < self.ncols,
            "col {col} is out of bounds (max: {})",
            self.ncols
        );
        &mut self.row_mut(row)[col]
    }
}

///////////
// Tests //
///////////
