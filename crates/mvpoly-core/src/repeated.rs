//! Repeated evaluation of one polynomial at many points.
//!
//! Setup splits the D-variable polynomial into runs that agree on the
//! first D−1 exponents and creates a (D−1)-variable projection with one
//! term per run. The projection is handled the same way, down to a
//! univariate layer. Each evaluation folds every run along its last
//! variable, writes the results into the projection's coefficients, and
//! moves one layer down.
//!
//! ```text
//! layer 0 (x, y, z)   3x²yz² + x²yz + 2y²     runs: [x²y: z², z] [y²: 1]
//! layer 1 (x, y)      c₀·x²y + c₁·y²          runs: [x²: y] [1: y²]
//! layer 2 (x)         d₀·x² + d₁
//! ```

use crate::coefficient::Coefficient;
use crate::error::{PolyError, Result};
use crate::eval::fold_run;
use crate::index::ExponentIndex;
use crate::ordering::MonomialOrder;
use crate::partition::{self, AxisPartition};
use crate::polynomial::Polynomial;
use crate::store::{SortState, Term};

/// One level of the dimension chain.
#[derive(Clone, Debug)]
enum EvalLayer<R> {
    /// A polynomial in two or more variables and its runs over all but
    /// the last variable. Run `r` feeds term `r` of the next layer.
    Multivariate {
        polynomial: Polynomial<R>,
        runs: AxisPartition,
    },
    /// The terminal polynomial in one variable.
    Univariate { polynomial: Polynomial<R> },
}

impl<R: Coefficient> EvalLayer<R> {
    fn polynomial(&self) -> &Polynomial<R> {
        match self {
            EvalLayer::Multivariate { polynomial, .. } | EvalLayer::Univariate { polynomial } => {
                polynomial
            }
        }
    }

    fn polynomial_mut(&mut self) -> &mut Polynomial<R> {
        match self {
            EvalLayer::Multivariate { polynomial, .. } | EvalLayer::Univariate { polynomial } => {
                polynomial
            }
        }
    }

    fn into_polynomial(self) -> Polynomial<R> {
        match self {
            EvalLayer::Multivariate { polynomial, .. } | EvalLayer::Univariate { polynomial } => {
                polynomial
            }
        }
    }
}

/// Evaluates a fixed polynomial at many points.
///
/// Partitioning happens once, in [`RepeatedEvaluator::new`] or
/// [`RepeatedEvaluator::set_polynomial`]; each call to
/// [`RepeatedEvaluator::evaluate`] then visits every term once.
/// Evaluation overwrites internal projections and therefore takes
/// `&mut self`.
#[derive(Clone, Debug)]
pub struct RepeatedEvaluator<R> {
    /// Layer `i` holds a polynomial in `dim - i` variables.
    layers: Vec<EvalLayer<R>>,
}

impl<R> Default for RepeatedEvaluator<R> {
    /// Creates an evaluator with no polynomial.
    fn default() -> Self {
        Self { layers: Vec::new() }
    }
}

impl<R: Coefficient> RepeatedEvaluator<R> {
    /// Creates an evaluator for `polynomial`.
    ///
    /// A polynomial under another ordering is re-sorted to lex order,
    /// which the Horner folds require.
    #[must_use]
    pub fn new(polynomial: Polynomial<R>) -> Self {
        let mut evaluator = Self::default();
        evaluator.set_polynomial(polynomial);
        evaluator
    }

    /// Replaces the polynomial, discarding and rebuilding all layers.
    pub fn set_polynomial(&mut self, polynomial: Polynomial<R>) {
        let polynomial = if polynomial.order().is_lex() {
            polynomial
        } else {
            polynomial.reorder(MonomialOrder::Lex)
        };
        let dim = polynomial.dim();
        let terms = polynomial.len();

        let mut layers = Vec::with_capacity(dim);
        let mut current = polynomial;
        while current.dim() > 1 {
            let (runs, projection) = project(&current);
            layers.push(EvalLayer::Multivariate {
                polynomial: current,
                runs,
            });
            current = projection;
        }
        layers.push(EvalLayer::Univariate {
            polynomial: current,
        });

        tracing::debug!(
            dim,
            terms,
            layer_terms = ?layers.iter().map(|l| l.polynomial().len()).collect::<Vec<_>>(),
            "built repeated evaluator"
        );
        self.layers = layers;
    }

    /// Returns true once a polynomial has been supplied.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Returns the number of variables, if ready.
    #[must_use]
    pub fn dim(&self) -> Option<usize> {
        self.polynomial().map(Polynomial::dim)
    }

    /// Returns the polynomial being evaluated, if ready.
    #[must_use]
    pub fn polynomial(&self) -> Option<&Polynomial<R>> {
        self.layers.first().map(EvalLayer::polynomial)
    }

    /// Consumes the evaluator, returning its polynomial.
    #[must_use]
    pub fn into_polynomial(self) -> Option<Polynomial<R>> {
        self.layers.into_iter().next().map(EvalLayer::into_polynomial)
    }

    /// Sets the coefficient of `index`.
    ///
    /// An existing term is overwritten in place and the layers stay valid;
    /// a new index triggers a full rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::Uninitialized`] before setup, and the index
    /// errors of [`Polynomial::insert`] for an index that cannot be stored.
    pub fn set_coefficient(&mut self, index: ExponentIndex, value: R) -> Result<()> {
        let top = self
            .layers
            .first_mut()
            .ok_or(PolyError::Uninitialized)?
            .polynomial_mut();
        top.check_index(&index)?;
        if let Some(c) = top.get_mut(&index) {
            *c = value;
            return Ok(());
        }

        let mut polynomial = std::mem::take(&mut self.layers)
            .into_iter()
            .next()
            .map(EvalLayer::into_polynomial)
            .ok_or(PolyError::Uninitialized)?;
        polynomial.insert_or_assign(index, value)?;
        self.set_polynomial(polynomial);
        Ok(())
    }

    /// Evaluates the polynomial at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::Uninitialized`] before setup and
    /// [`PolyError::DimensionMismatch`] unless `x` has one coordinate per
    /// variable.
    pub fn evaluate(&mut self, x: &[R]) -> Result<R> {
        self.polynomial()
            .ok_or(PolyError::Uninitialized)?
            .check_point(x)?;

        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let EvalLayer::Multivariate { polynomial, runs } = &done[i - 1] else {
                continue;
            };
            let axis = polynomial.dim() - 1;
            let terms = polynomial.terms();
            let projection = rest[0].polynomial_mut();
            for (slot, run) in projection.values_mut().zip(runs.runs()) {
                *slot = fold_run(&terms[run], axis, x[axis]);
            }
        }

        let last = self.layers.last().ok_or(PolyError::Uninitialized)?;
        Ok(fold_run(last.polynomial().terms(), 0, x[0]))
    }
}

/// Splits a lex-ordered polynomial in `k >= 2` variables into runs sharing
/// the first `k - 1` exponents, and builds the zeroed projection onto
/// those exponents.
fn project<R: Coefficient>(polynomial: &Polynomial<R>) -> (AxisPartition, Polynomial<R>) {
    let dim = polynomial.dim();
    let terms = polynomial.terms();
    let runs = partition::chain(terms, dim - 1).pop().unwrap_or_default();

    // Distinct outer exponents in lex order stay distinct and in lex order
    // after truncation, so run r maps to projection term r.
    let projected: Vec<Term<R>> = runs
        .runs()
        .map(|run| (terms[run.start].0.truncated(dim - 1), R::zero()))
        .collect();
    let projection = Polynomial::from_valid_sequence(
        dim - 1,
        projected,
        MonomialOrder::Lex,
        SortState::OrderedUnique,
    );
    (runs, projection)
}
