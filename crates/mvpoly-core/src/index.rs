//! Exponent indices identifying monomials.
//!
//! An index is a tuple of signed exponents, one per variable. Stored
//! polynomials only ever hold non-negative indices; negative components
//! may exist transiently while an algorithm rewrites exponents.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};

use smallvec::SmallVec;

/// Integer type of a single exponent.
pub type Exponent = i32;

/// Exponents kept inline before spilling to the heap.
const INLINE_VARS: usize = 4;

/// Variable names used when rendering monomials.
const VAR_NAMES: [char; 6] = ['x', 'y', 'z', 'w', 'u', 'v'];

/// A D-tuple of integer exponents.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct ExponentIndex(SmallVec<[Exponent; INLINE_VARS]>);

impl ExponentIndex {
    /// Creates the index of the monomial 1 (all exponents zero).
    #[must_use]
    pub fn zero(dim: usize) -> Self {
        Self(SmallVec::from_elem(0, dim))
    }

    /// Creates the index of the variable `x_i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= dim`.
    #[must_use]
    pub fn var(i: usize, dim: usize) -> Self {
        assert!(i < dim);
        let mut index = Self::zero(dim);
        index.0[i] = 1;
        index
    }

    /// Creates an index from a slice of exponents.
    #[must_use]
    pub fn from_slice(exps: &[Exponent]) -> Self {
        Self(SmallVec::from_slice(exps))
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the index has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the exponents as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Exponent] {
        &self.0
    }

    /// Returns true if every component is non-negative.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.0.iter().all(|&e| e >= 0)
    }

    /// Sum of all exponents.
    #[must_use]
    pub fn total_degree(&self) -> i64 {
        self.0.iter().map(|&e| i64::from(e)).sum()
    }

    /// Returns the index made of the first `len` exponents.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the number of variables.
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        Self(SmallVec::from_slice(&self.0[..len]))
    }

    /// Returns a copy with `delta` added to one exponent.
    #[must_use]
    pub fn shifted(&self, axis: usize, delta: Exponent) -> Self {
        let mut index = self.clone();
        index.0[axis] += delta;
        index
    }

    /// Renders the monomial, e.g. `x^2*y`, or `1` for the zero index.
    #[must_use]
    pub fn to_monomial_string(&self) -> String {
        let parts: Vec<String> = self
            .0
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e != 0)
            .map(|(i, &e)| {
                let name = VAR_NAMES
                    .get(i)
                    .map_or_else(|| format!("x{i}"), char::to_string);
                if e == 1 {
                    name
                } else {
                    format!("{name}^{e}")
                }
            })
            .collect();

        if parts.is_empty() {
            "1".to_string()
        } else {
            parts.join("*")
        }
    }
}

impl<const N: usize> From<[Exponent; N]> for ExponentIndex {
    fn from(exps: [Exponent; N]) -> Self {
        Self::from_slice(&exps)
    }
}

impl From<Vec<Exponent>> for ExponentIndex {
    fn from(exps: Vec<Exponent>) -> Self {
        Self(SmallVec::from_vec(exps))
    }
}

impl FromIterator<Exponent> for ExponentIndex {
    fn from_iter<I: IntoIterator<Item = Exponent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for ExponentIndex {
    type Output = Exponent;

    fn index(&self, axis: usize) -> &Exponent {
        &self.0[axis]
    }
}

impl IndexMut<usize> for ExponentIndex {
    fn index_mut(&mut self, axis: usize) -> &mut Exponent {
        &mut self.0[axis]
    }
}

// Monomial multiplication adds exponents componentwise.
impl Add for &ExponentIndex {
    type Output = ExponentIndex;

    fn add(self, other: &ExponentIndex) -> ExponentIndex {
        debug_assert_eq!(self.len(), other.len());
        self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect()
    }
}

impl Sub for &ExponentIndex {
    type Output = ExponentIndex;

    fn sub(self, other: &ExponentIndex) -> ExponentIndex {
        debug_assert_eq!(self.len(), other.len());
        self.0.iter().zip(&other.0).map(|(a, b)| a - b).collect()
    }
}

impl fmt::Display for ExponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, ")")
    }
}
