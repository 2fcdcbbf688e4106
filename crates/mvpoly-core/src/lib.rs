//! # mvpoly-core
//!
//! Sparse multivariate polynomials over floating-point coefficients.
//!
//! This crate provides:
//! - An ordered term store keyed by exponent indices
//! - Merge-based addition and subtraction, product multiplication
//! - Partial differentiation, integration and substitution
//! - One-shot evaluation with a generalized Horner scheme
//! - [`RepeatedEvaluator`] for evaluating one polynomial at many points
//!
//! ## Orderings
//!
//! Terms are sorted by a [`MonomialOrder`], leading term first. Lex order
//! is the default and the only one under which terms sharing their
//! leading exponents are contiguous; the Horner evaluators and the fast
//! differentiation path rely on that. Other orderings fall back to plain
//! term-by-term algorithms.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod arith;
mod calculus;

pub mod coefficient;
pub mod error;
pub mod eval;
pub mod index;
pub mod ordering;
pub mod partition;
pub mod polynomial;
pub mod repeated;
pub mod store;

#[cfg(test)]
mod proptests;

pub use coefficient::Coefficient;
pub use error::{PolyError, Result};
pub use index::{Exponent, ExponentIndex};
pub use ordering::{CustomOrder, MonomialOrder};
pub use partition::AxisPartition;
pub use polynomial::{BulkEdit, Polynomial};
pub use repeated::RepeatedEvaluator;
pub use store::{SortState, Term, TermStore};
