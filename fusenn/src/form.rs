/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

/// Selects the form of the distance values produced by the fused operation.
///
/// The nearest index is identical in both forms; only the reported distance
/// changes. `Squared` skips the final square root and is the cheaper option
/// when the caller only ranks or thresholds squared values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceForm {
    /// Squared Euclidean distance.
    Squared,
    /// True Euclidean distance (the square root is applied at finalization).
    Euclidean,
}

impl DistanceForm {
    /// Return whether the final square root is applied.
    pub fn is_euclidean(&self) -> bool {
        match self {
            Self::Squared => false,
            Self::Euclidean => true,
        }
    }
}
