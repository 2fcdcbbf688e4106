//! Sorted, unique-keyed term storage.
//!
//! `TermStore` is a flat map: a `Vec` of `(index, coefficient)` pairs kept
//! in storage order under a [`MonomialOrder`]. Lookups are binary searches;
//! insertions shift the tail. Bulk loads either trust the caller's claim
//! that a sequence is already ordered and unique, or sort and merge it.

use std::cmp::Ordering;

use crate::coefficient::Coefficient;
use crate::index::ExponentIndex;
use crate::ordering::MonomialOrder;

/// A single `(exponent index, coefficient)` pair.
pub type Term<R> = (ExponentIndex, R);

/// Declares what a caller knows about a bulk-loaded term sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SortState {
    /// Arbitrary order, possibly with repeated indices.
    ///
    /// The sequence is sorted and repeated indices are merged by summing
    /// their coefficients.
    Unsorted,

    /// Already in storage order with no repeated index.
    ///
    /// Sorting is skipped. Debug builds still assert the claim.
    OrderedUnique,
}

/// Ordered unique mapping from exponent index to coefficient.
#[derive(Clone, Debug)]
pub struct TermStore<R> {
    /// Terms in storage order (leading term first).
    terms: Vec<Term<R>>,
    /// Ordering fixed at construction.
    order: MonomialOrder,
}

impl<R: Coefficient> TermStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new(order: MonomialOrder) -> Self {
        Self {
            terms: Vec::new(),
            order,
        }
    }

    /// Creates an empty store with room for `capacity` terms.
    #[must_use]
    pub fn with_capacity(order: MonomialOrder, capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
            order,
        }
    }

    /// Creates a store from a term sequence.
    #[must_use]
    pub fn from_sequence(terms: Vec<Term<R>>, order: MonomialOrder, state: SortState) -> Self {
        let mut store = Self::new(order);
        store.adopt_sequence(terms, state);
        store
    }

    /// Returns the ordering.
    #[must_use]
    pub fn order(&self) -> &MonomialOrder {
        &self.order
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the allocated capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.terms.capacity()
    }

    /// Reserves room for at least `additional` more terms.
    pub fn reserve(&mut self, additional: usize) {
        self.terms.reserve(additional);
    }

    /// Shrinks the backing buffer to fit.
    pub fn shrink_to_fit(&mut self) {
        self.terms.shrink_to_fit();
    }

    /// Removes all terms, keeping the ordering.
    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Returns the terms in storage order.
    #[must_use]
    pub fn as_slice(&self) -> &[Term<R>] {
        &self.terms
    }

    /// Iterates over terms in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Term<R>> {
        self.terms.iter()
    }

    /// Iterates mutably over coefficients in storage order.
    ///
    /// Keys stay immutable, so storage order cannot be broken.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut R> + '_ {
        self.terms.iter_mut().map(|(_, c)| c)
    }

    /// Returns the first term in storage order.
    #[must_use]
    pub fn first(&self) -> Option<&Term<R>> {
        self.terms.first()
    }

    /// Returns the last term in storage order.
    #[must_use]
    pub fn last(&self) -> Option<&Term<R>> {
        self.terms.last()
    }

    /// Binary search for an index.
    ///
    /// Returns `Ok(position)` if present, otherwise `Err(insertion point)`.
    pub fn find(&self, index: &ExponentIndex) -> Result<usize, usize> {
        self.terms
            .binary_search_by(|(k, _)| self.order.storage_cmp(k, index))
    }

    /// Returns true if the index is stored.
    #[must_use]
    pub fn contains(&self, index: &ExponentIndex) -> bool {
        self.find(index).is_ok()
    }

    /// Returns the coefficient of an index.
    #[must_use]
    pub fn get(&self, index: &ExponentIndex) -> Option<&R> {
        self.find(index).ok().map(|pos| &self.terms[pos].1)
    }

    /// Returns the coefficient of an index mutably.
    pub fn get_mut(&mut self, index: &ExponentIndex) -> Option<&mut R> {
        match self.find(index) {
            Ok(pos) => Some(&mut self.terms[pos].1),
            Err(_) => None,
        }
    }

    /// Inserts a term unless the index is already stored.
    ///
    /// Returns the term's position and whether it was inserted. An existing
    /// coefficient is left untouched.
    pub fn insert(&mut self, index: ExponentIndex, coeff: R) -> (usize, bool) {
        match self.find(&index) {
            Ok(pos) => (pos, false),
            Err(pos) => {
                self.terms.insert(pos, (index, coeff));
                (pos, true)
            }
        }
    }

    /// Inserts a term, overwriting the coefficient of an existing index.
    ///
    /// Returns the term's position and whether it was newly inserted.
    pub fn insert_or_assign(&mut self, index: ExponentIndex, coeff: R) -> (usize, bool) {
        match self.find(&index) {
            Ok(pos) => {
                self.terms[pos].1 = coeff;
                (pos, false)
            }
            Err(pos) => {
                self.terms.insert(pos, (index, coeff));
                (pos, true)
            }
        }
    }

    /// Adds `coeff` to the term at `index`, inserting it if absent.
    pub fn add_term(&mut self, index: ExponentIndex, coeff: R) -> usize {
        match self.find(&index) {
            Ok(pos) => {
                self.terms[pos].1 += coeff;
                pos
            }
            Err(pos) => {
                self.terms.insert(pos, (index, coeff));
                pos
            }
        }
    }

    /// Returns the coefficient of `index`, inserting a zero term if absent.
    pub fn entry_or_zero(&mut self, index: ExponentIndex) -> &mut R {
        let pos = match self.find(&index) {
            Ok(pos) => pos,
            Err(pos) => {
                self.terms.insert(pos, (index, R::zero()));
                pos
            }
        };
        &mut self.terms[pos].1
    }

    /// Removes a term by index, returning its coefficient.
    pub fn remove(&mut self, index: &ExponentIndex) -> Option<R> {
        self.find(index).ok().map(|pos| self.terms.remove(pos).1)
    }

    /// Keeps only the terms for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ExponentIndex, &R) -> bool,
    {
        self.terms.retain(|(k, c)| keep(k, c));
    }

    /// Appends a term that orders strictly after every stored term.
    ///
    /// This is the O(1) hinted insertion used by merge algorithms.
    pub fn push_back(&mut self, index: ExponentIndex, coeff: R) {
        debug_assert!(self
            .terms
            .last()
            .map_or(true, |(k, _)| self.order.precedes(k, &index)));
        self.terms.push((index, coeff));
    }

    /// Takes the backing sequence out, leaving the store empty.
    pub fn extract_sequence(&mut self) -> Vec<Term<R>> {
        std::mem::take(&mut self.terms)
    }

    /// Replaces the contents with `terms`.
    pub fn adopt_sequence(&mut self, mut terms: Vec<Term<R>>, state: SortState) {
        match state {
            SortState::Unsorted => normalize(&mut terms, &self.order),
            SortState::OrderedUnique => {
                debug_assert!(is_ordered_unique(&terms, &self.order));
            }
        }
        self.terms = terms;
    }

    /// Consumes the store, returning its backing sequence.
    #[must_use]
    pub fn into_sequence(self) -> Vec<Term<R>> {
        self.terms
    }
}

impl<R: PartialEq> PartialEq for TermStore<R> {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

/// Sorts terms into storage order and merges repeated indices by summing.
///
/// The sort is stable, so repeated indices are summed in input order.
pub(crate) fn normalize<R: Coefficient>(terms: &mut Vec<Term<R>>, order: &MonomialOrder) {
    terms.sort_by(|a, b| order.storage_cmp(&a.0, &b.0));
    terms.dedup_by(|later, kept| {
        if later.0 == kept.0 {
            kept.1 += later.1;
            true
        } else {
            false
        }
    });
}

/// Returns true if consecutive terms are strictly increasing in storage order.
pub(crate) fn is_ordered_unique<R>(terms: &[Term<R>], order: &MonomialOrder) -> bool {
    terms
        .windows(2)
        .all(|w| order.storage_cmp(&w[0].0, &w[1].0) == Ordering::Less)
}
