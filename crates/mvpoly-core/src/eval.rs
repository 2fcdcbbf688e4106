//! One-shot point evaluation.
//!
//! Lex-ordered polynomials are evaluated with a generalized Horner scheme:
//! the term range is split by the exponent at axis 0, each run is split by
//! axis 1, and so on down to the last axis, where a run is a univariate
//! polynomial in the last variable and is folded with Horner's rule.
//! Partitions are rebuilt on every call, so [`RepeatedEvaluator`] is the
//! better choice when one polynomial is evaluated at many points.
//!
//! [`RepeatedEvaluator`]: crate::repeated::RepeatedEvaluator

use crate::coefficient::Coefficient;
use crate::error::{PolyError, Result};
use crate::partition::AxisPartition;
use crate::polynomial::Polynomial;
use crate::store::Term;

impl<R: Coefficient> Polynomial<R> {
    /// Evaluates the polynomial at `x`.
    ///
    /// Uses the generalized Horner scheme under lex order and plain
    /// term-by-term summation otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DimensionMismatch`] unless `x` has one
    /// coordinate per variable.
    pub fn evaluate(&self, x: &[R]) -> Result<R> {
        self.check_point(x)?;
        if !self.order().is_lex() {
            return Ok(naive(self.terms(), x));
        }
        if self.is_empty() {
            return Ok(R::zero());
        }
        Ok(horner(self.terms(), 0, x))
    }

    /// Evaluates the polynomial at `x` as `Σ c·Π x_i^e_i`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DimensionMismatch`] unless `x` has one
    /// coordinate per variable.
    pub fn evaluate_naive(&self, x: &[R]) -> Result<R> {
        self.check_point(x)?;
        Ok(naive(self.terms(), x))
    }

    pub(crate) fn check_point(&self, x: &[R]) -> Result<()> {
        if x.len() == self.dim() {
            Ok(())
        } else {
            Err(PolyError::DimensionMismatch {
                expected: self.dim(),
                found: x.len(),
            })
        }
    }
}

fn naive<R: Coefficient>(terms: &[Term<R>], x: &[R]) -> R {
    terms
        .iter()
        .map(|(index, c)| *c * monomial(index.as_slice(), x))
        .fold(R::zero(), |acc, v| acc + v)
}

/// `Π x_i^e_i` over the given exponents.
fn monomial<R: Coefficient>(exps: &[i32], x: &[R]) -> R {
    exps.iter()
        .zip(x)
        .fold(R::one(), |acc, (&e, &xi)| acc * xi.powi(e))
}

/// Evaluates a non-empty lex-sorted run whose terms agree on every axis
/// before `axis`.
fn horner<R: Coefficient>(terms: &[Term<R>], axis: usize, x: &[R]) -> R {
    let last_axis = x.len() - 1;
    if axis == last_axis {
        // The run shares its outer exponents; fold in their monomial once.
        let outer = monomial(&terms[0].0.as_slice()[..last_axis], x);
        return fold_run(terms, last_axis, x[last_axis]) * outer;
    }

    AxisPartition::build(terms, 0..terms.len(), axis)
        .runs()
        .map(|run| horner(&terms[run], axis + 1, x))
        .fold(R::zero(), |acc, v| acc + v)
}

/// Horner's rule along `axis` over a run of terms with descending
/// exponents at that axis.
///
/// Returns `Σ c·x^e` over the run, ignoring every other axis.
pub(crate) fn fold_run<R: Coefficient>(run: &[Term<R>], axis: usize, x: R) -> R {
    let Some(((first, c0), rest)) = run.split_first() else {
        return R::zero();
    };
    let mut acc = *c0;
    let mut last = first[axis];
    for (index, c) in rest {
        let next = index[axis];
        acc = acc * x.powi(last - next) + *c;
        last = next;
    }
    acc * x.powi(last)
}
