//! Error types for polynomial construction, calculus and evaluation.

use thiserror::Error;

use crate::index::ExponentIndex;

/// Errors raised by polynomial operations.
///
/// All variants are fail-fast: the operation that raised them has no
/// partial result and leaves its inputs untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolyError {
    /// A term's exponent index has a negative component.
    #[error("each element of the index {index} must be non-negative")]
    InvalidIndex {
        /// The offending index.
        index: ExponentIndex,
    },

    /// A requested axis lies outside `[0, dim)`.
    #[error("given axis {axis} must be in [0, {dim})")]
    InvalidAxis {
        /// The requested axis.
        axis: usize,
        /// Number of variables of the polynomial.
        dim: usize,
    },

    /// An index or coordinate does not have one entry per variable.
    #[error("expected {expected} components, found {found}")]
    DimensionMismatch {
        /// Number of variables of the polynomial.
        expected: usize,
        /// Length of the supplied index or coordinate.
        found: usize,
    },

    /// A repeated evaluator was used before a polynomial was supplied.
    #[error("evaluator has no polynomial")]
    Uninitialized,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PolyError>;
