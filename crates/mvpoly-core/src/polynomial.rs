//! Sparse multivariate polynomials.
//!
//! A [`Polynomial`] owns a [`TermStore`] and a variable count. Every index
//! that enters the store is checked: it must have one exponent per
//! variable and no negative exponent. Zero coefficients are never pruned
//! implicitly; see [`Polynomial::compact`].

use std::fmt;

use crate::coefficient::Coefficient;
use crate::error::{PolyError, Result};
use crate::index::{Exponent, ExponentIndex};
use crate::ordering::MonomialOrder;
use crate::store::{SortState, Term, TermStore};

/// A sparse multivariate polynomial.
///
/// Terms are stored as (index, coefficient) pairs, sorted by the
/// monomial ordering with the leading term first.
#[derive(Clone, Debug)]
pub struct Polynomial<R> {
    /// Terms in storage order.
    store: TermStore<R>,
    /// Number of variables.
    dim: usize,
}

impl<R: Coefficient> Polynomial<R> {
    /// Creates an empty polynomial in `dim` variables under lex order.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self::with_order(dim, MonomialOrder::Lex)
    }

    /// Creates an empty polynomial with an explicit ordering.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    #[must_use]
    pub fn with_order(dim: usize, order: MonomialOrder) -> Self {
        assert!(dim > 0, "a polynomial needs at least one variable");
        Self {
            store: TermStore::new(order),
            dim,
        }
    }

    /// Creates the constant polynomial `c`.
    ///
    /// The term is kept even when `c` is zero.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    #[must_use]
    pub fn constant(c: R, dim: usize) -> Self {
        let mut poly = Self::new(dim);
        poly.store.push_back(ExponentIndex::zero(dim), c);
        poly
    }

    /// Creates the single variable `x_i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= dim`.
    #[must_use]
    pub fn var(i: usize, dim: usize) -> Self {
        let mut poly = Self::new(dim);
        poly.store.push_back(ExponentIndex::var(i, dim), R::one());
        poly
    }

    /// Creates a lex-ordered polynomial from terms in any order.
    ///
    /// Repeated indices are merged by summing their coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidIndex`] for a negative exponent and
    /// [`PolyError::DimensionMismatch`] for an index of the wrong length.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    pub fn from_terms<I>(dim: usize, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = Term<R>>,
    {
        Self::from_terms_with_order(dim, terms, MonomialOrder::Lex)
    }

    /// Creates a polynomial from terms in any order under `order`.
    ///
    /// # Errors
    ///
    /// See [`Polynomial::from_terms`].
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    pub fn from_terms_with_order<I>(dim: usize, terms: I, order: MonomialOrder) -> Result<Self>
    where
        I: IntoIterator<Item = Term<R>>,
    {
        Self::from_sequence(dim, terms.into_iter().collect(), order, SortState::Unsorted)
    }

    /// Creates a polynomial from a sequence whose sortedness is declared.
    ///
    /// With [`SortState::OrderedUnique`] the caller attests that the
    /// sequence is already in storage order without repeated indices, and
    /// no sort takes place. Indices are validated either way.
    ///
    /// # Errors
    ///
    /// See [`Polynomial::from_terms`].
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    pub fn from_sequence(
        dim: usize,
        terms: Vec<Term<R>>,
        order: MonomialOrder,
        state: SortState,
    ) -> Result<Self> {
        assert!(dim > 0, "a polynomial needs at least one variable");
        for (index, _) in &terms {
            check_index(dim, index)?;
        }
        Ok(Self::from_valid_sequence(dim, terms, order, state))
    }

    /// Builds a polynomial from indices already known to be valid.
    pub(crate) fn from_valid_sequence(
        dim: usize,
        terms: Vec<Term<R>>,
        order: MonomialOrder,
        state: SortState,
    ) -> Self {
        Self {
            store: TermStore::from_sequence(terms, order, state),
            dim,
        }
    }

    pub(crate) fn from_store(dim: usize, store: TermStore<R>) -> Self {
        Self { store, dim }
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the monomial ordering.
    #[must_use]
    pub fn order(&self) -> &MonomialOrder {
        self.store.order()
    }

    /// Returns the number of terms, zero coefficients included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the allocated term capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Reserves room for at least `additional` more terms.
    pub fn reserve(&mut self, additional: usize) {
        self.store.reserve(additional);
    }

    /// Shrinks the term buffer to fit.
    pub fn shrink_to_fit(&mut self) {
        self.store.shrink_to_fit();
    }

    /// Removes all terms.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Returns the terms in storage order.
    #[must_use]
    pub fn terms(&self) -> &[Term<R>] {
        self.store.as_slice()
    }

    /// Iterates over terms in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Term<R>> {
        self.store.iter()
    }

    /// Iterates mutably over the coefficients in storage order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut R> + '_ {
        self.store.values_mut()
    }

    /// Returns the leading term.
    #[must_use]
    pub fn leading_term(&self) -> Option<&Term<R>> {
        self.store.first()
    }

    /// Returns the trailing term.
    #[must_use]
    pub fn trailing_term(&self) -> Option<&Term<R>> {
        self.store.last()
    }

    /// Returns true if the index is stored.
    #[must_use]
    pub fn contains(&self, index: &ExponentIndex) -> bool {
        self.store.contains(index)
    }

    /// Returns the stored coefficient of an index.
    #[must_use]
    pub fn get(&self, index: &ExponentIndex) -> Option<&R> {
        self.store.get(index)
    }

    /// Returns the stored coefficient of an index mutably.
    pub fn get_mut(&mut self, index: &ExponentIndex) -> Option<&mut R> {
        self.store.get_mut(index)
    }

    /// Returns the coefficient of an index, zero when absent.
    #[must_use]
    pub fn coefficient(&self, index: &ExponentIndex) -> R {
        self.get(index).copied().unwrap_or_else(R::zero)
    }

    /// Inserts a term unless its index is already stored.
    ///
    /// Returns whether the term was inserted.
    ///
    /// # Errors
    ///
    /// Fails on an invalid index, leaving the polynomial unchanged.
    pub fn insert(&mut self, index: ExponentIndex, coeff: R) -> Result<bool> {
        self.check_index(&index)?;
        Ok(self.store.insert(index, coeff).1)
    }

    /// Inserts a term, overwriting an existing coefficient.
    ///
    /// Returns whether the index was newly inserted.
    ///
    /// # Errors
    ///
    /// Fails on an invalid index, leaving the polynomial unchanged.
    pub fn insert_or_assign(&mut self, index: ExponentIndex, coeff: R) -> Result<bool> {
        self.check_index(&index)?;
        Ok(self.store.insert_or_assign(index, coeff).1)
    }

    /// Adds `coeff` to the term at `index`, inserting it if absent.
    ///
    /// # Errors
    ///
    /// Fails on an invalid index, leaving the polynomial unchanged.
    pub fn add_term(&mut self, index: ExponentIndex, coeff: R) -> Result<()> {
        self.check_index(&index)?;
        self.store.add_term(index, coeff);
        Ok(())
    }

    /// Returns the coefficient of `index` mutably, inserting a zero term if
    /// absent.
    ///
    /// # Errors
    ///
    /// Fails on an invalid index, leaving the polynomial unchanged.
    pub fn coeff_mut(&mut self, index: ExponentIndex) -> Result<&mut R> {
        self.check_index(&index)?;
        Ok(self.store.entry_or_zero(index))
    }

    /// Adds every term of `terms`, summing into existing coefficients.
    ///
    /// All indices are validated before anything is inserted.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid index, leaving the polynomial unchanged.
    pub fn extend_terms<I>(&mut self, terms: I) -> Result<()>
    where
        I: IntoIterator<Item = Term<R>>,
    {
        let incoming: Vec<Term<R>> = terms.into_iter().collect();
        for (index, _) in &incoming {
            self.check_index(index)?;
        }
        let mut seq = self.store.extract_sequence();
        seq.reserve(incoming.len());
        seq.extend(incoming);
        self.store.adopt_sequence(seq, SortState::Unsorted);
        Ok(())
    }

    /// Removes a term, returning its coefficient.
    pub fn remove(&mut self, index: &ExponentIndex) -> Option<R> {
        self.store.remove(index)
    }

    /// Drops every term whose coefficient is exactly zero.
    pub fn compact(&mut self) {
        self.store.retain(|_, c| !c.is_zero());
    }

    /// Multiplies every coefficient by `r` in place.
    ///
    /// Zero coefficients produced by scaling are kept.
    pub fn scale(&mut self, r: R) {
        for c in self.store.values_mut() {
            *c *= r;
        }
    }

    /// Returns a copy with every coefficient multiplied by `r`.
    #[must_use]
    pub fn scaled(&self, r: R) -> Self {
        let mut poly = self.clone();
        poly.scale(r);
        poly
    }

    /// Returns a copy re-sorted under another ordering.
    #[must_use]
    pub fn reorder(&self, order: MonomialOrder) -> Self {
        Self::from_valid_sequence(self.dim, self.terms().to_vec(), order, SortState::Unsorted)
    }

    /// Computes the total degree, zero for an empty polynomial.
    #[must_use]
    pub fn total_degree(&self) -> i64 {
        self.iter()
            .map(|(index, _)| index.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Computes the largest exponent of one variable.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidAxis`] if `axis >= dim`.
    pub fn degree(&self, axis: usize) -> Result<Exponent> {
        self.check_axis(axis)?;
        Ok(self.iter().map(|(index, _)| index[axis]).max().unwrap_or(0))
    }

    /// Hands the term buffer to the caller for a bulk edit.
    ///
    /// The polynomial is consumed; a new one is obtained from
    /// [`BulkEdit::finish`].
    #[must_use]
    pub fn into_bulk_edit(mut self) -> BulkEdit<R> {
        let terms = self.store.extract_sequence();
        BulkEdit {
            terms,
            store: self.store,
            dim: self.dim,
        }
    }

    /// Checks that `axis` addresses a variable.
    pub(crate) fn check_axis(&self, axis: usize) -> Result<()> {
        if axis < self.dim {
            Ok(())
        } else {
            Err(PolyError::InvalidAxis {
                axis,
                dim: self.dim,
            })
        }
    }

    /// Checks that `index` may be stored.
    pub(crate) fn check_index(&self, index: &ExponentIndex) -> Result<()> {
        check_index(self.dim, index)
    }
}

fn check_index(dim: usize, index: &ExponentIndex) -> Result<()> {
    if index.len() != dim {
        return Err(PolyError::DimensionMismatch {
            expected: dim,
            found: index.len(),
        });
    }
    if !index.is_non_negative() {
        return Err(PolyError::InvalidIndex {
            index: index.clone(),
        });
    }
    Ok(())
}

/// A term buffer temporarily owned by the caller.
///
/// Produced by [`Polynomial::into_bulk_edit`]. Indices may be rewritten
/// freely; [`BulkEdit::finish`] validates them and restores storage order.
#[derive(Debug)]
pub struct BulkEdit<R> {
    terms: Vec<Term<R>>,
    /// The emptied store, kept for its ordering and allocation policy.
    store: TermStore<R>,
    dim: usize,
}

impl<R: Coefficient> BulkEdit<R> {
    /// Returns the number of variables of the originating polynomial.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the ordering the terms will be stored under.
    #[must_use]
    pub fn order(&self) -> &MonomialOrder {
        self.store.order()
    }

    /// Returns the terms.
    #[must_use]
    pub fn terms(&self) -> &[Term<R>] {
        &self.terms
    }

    /// Returns the term buffer for editing.
    pub fn terms_mut(&mut self) -> &mut Vec<Term<R>> {
        &mut self.terms
    }

    /// Returns the buffer to a polynomial.
    ///
    /// With [`SortState::OrderedUnique`] the caller attests that the edit
    /// kept storage order and uniqueness; otherwise the terms are sorted
    /// and repeated indices summed.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidIndex`] or
    /// [`PolyError::DimensionMismatch`] if an edited index cannot be
    /// stored.
    pub fn finish(self, state: SortState) -> Result<Polynomial<R>> {
        let Self {
            terms,
            mut store,
            dim,
        } = self;
        for (index, _) in &terms {
            check_index(dim, index)?;
        }
        tracing::trace!(terms = terms.len(), ?state, "adopting edited term sequence");
        store.adopt_sequence(terms, state);
        Ok(Polynomial::from_store(dim, store))
    }
}

/// Exact structural equality: same variable count and identical term
/// sequences. No numeric tolerance is applied, and an explicit zero term
/// differs from an absent one.
impl<R: Coefficient> PartialEq for Polynomial<R> {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim && self.store == other.store
    }
}

/// Renders terms in storage order, e.g. `3*x^2*y - 2*x*y^2 + 5`.
impl<R: Coefficient> fmt::Display for Polynomial<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }

        for (i, (index, c)) in self.iter().enumerate() {
            let negative = *c < R::zero();
            match (i, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = if negative { -*c } else { *c };
            if index.as_slice().iter().all(|&e| e == 0) {
                write!(f, "{magnitude}")?;
            } else {
                write!(f, "{magnitude}*{}", index.to_monomial_string())?;
            }
        }
        Ok(())
    }
}
