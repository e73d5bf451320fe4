/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use fusenn_vector::Element;

/// Index stored by the identity accumulator before any reference row has
/// been observed. Valid results never carry this index: the public operation
/// rejects an empty reference set before the kernel runs.
pub const INVALID_INDEX: u32 = u32::MAX;

/// The per-query-row reduction state: the smallest distance seen so far and
/// the reference row that produced it.
///
/// `Nearest` forms a commutative monoid under [`Nearest::combine`] with
/// [`Nearest::identity`] as the neutral element. The combine operation is a
/// minimum under the total order (distance ascending, then index ascending),
/// so partial reductions computed in any grouping merge to the same result a
/// strictly sequential ascending-index traversal would produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<T> {
    /// The index of the closest reference row observed so far.
    pub index: u32,

    /// The distance to that row.
    pub distance: T,
}

impl<T: Element> Nearest<T> {
    /// Construct an accumulator holding the given candidate.
    pub fn new(index: u32, distance: T) -> Self {
        Self { index, distance }
    }

    /// The neutral element of [`Nearest::combine`]: infinite distance with
    /// [`INVALID_INDEX`].
    pub fn identity() -> Self {
        Self {
            index: INVALID_INDEX,
            distance: T::INFINITY,
        }
    }

    /// Return whether the accumulator has observed any candidate.
    pub fn is_identity(&self) -> bool {
        self.index == INVALID_INDEX
    }

    /// Fold a single candidate into the accumulator.
    ///
    /// Candidates at strictly smaller distance always win; at equal distance
    /// the smaller index wins, which under an ascending-index traversal is
    /// first-seen-wins.
    #[inline]
    pub fn observe(&mut self, distance: T, index: u32) {
        if distance < self.distance || (distance == self.distance && index < self.index) {
            self.distance = distance;
            self.index = index;
        }
    }

    /// Merge two partial reductions.
    ///
    /// Associative and commutative, with [`Nearest::identity`] as the
    /// neutral element.
    #[inline]
    pub fn combine(self, other: Self) -> Self {
        if other.distance < self.distance
            || (other.distance == self.distance && other.index < self.index)
        {
            other
        } else {
            self
        }
    }

    /// Return the contents of `self` as an `(index, distance)` tuple.
    pub fn as_tuple(self) -> (u32, T) {
        (self.index, self.distance)
    }
}

///////////
// Tests //
///////////
