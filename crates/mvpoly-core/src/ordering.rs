//! Monomial orderings used as term comparers.
//!
//! Every polynomial stores its terms in descending order under its
//! monomial ordering (leading term first). The ordering is fixed when the
//! polynomial is constructed.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::index::ExponentIndex;

/// Signature of a caller-supplied monomial comparison.
pub type CompareFn = dyn Fn(&ExponentIndex, &ExponentIndex) -> Ordering + Send + Sync;

/// A named, caller-supplied monomial ordering.
///
/// The function must be a strict total order: it returns
/// `Ordering::Equal` only for identical indices.
#[derive(Clone)]
pub struct CustomOrder {
    name: &'static str,
    compare: Arc<CompareFn>,
}

impl CustomOrder {
    /// Wraps a comparison function.
    pub fn new<F>(name: &'static str, compare: F) -> Self
    where
        F: Fn(&ExponentIndex, &ExponentIndex) -> Ordering + Send + Sync + 'static,
    {
        Self {
            name,
            compare: Arc::new(compare),
        }
    }
}

impl fmt::Debug for CustomOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomOrder").field("name", &self.name).finish()
    }
}

/// A monomial ordering.
#[derive(Clone, Debug, Default)]
pub enum MonomialOrder {
    /// Lexicographic order.
    ///
    /// The first nonzero exponent difference, starting at axis 0, decides.
    /// This is the canonical order: terms sharing their outer exponents
    /// are contiguous and visit the last axis from highest to lowest
    /// exponent, which the Horner evaluators rely on.
    #[default]
    Lex,

    /// Total degree first, ties broken by lex.
    ///
    /// Terms of the highest total degree are stored first.
    Grlex,

    /// Total degree first, ties broken from the last variable backwards.
    ///
    /// Among monomials of equal degree, the one with the smaller exponent
    /// on the last differing variable ranks higher, so `y^2` is stored
    /// before `x*z`.
    Grevlex,

    /// A caller-supplied ordering.
    Custom(CustomOrder),
}

impl MonomialOrder {
    /// Wraps a comparison function as an ordering.
    pub fn custom<F>(name: &'static str, compare: F) -> Self
    where
        F: Fn(&ExponentIndex, &ExponentIndex) -> Ordering + Send + Sync + 'static,
    {
        Self::Custom(CustomOrder::new(name, compare))
    }

    /// Compares two monomials according to this ordering.
    #[must_use]
    pub fn compare(&self, a: &ExponentIndex, b: &ExponentIndex) -> Ordering {
        match self {
            MonomialOrder::Lex => cmp_lex(a, b),
            MonomialOrder::Grlex => cmp_grlex(a, b),
            MonomialOrder::Grevlex => cmp_grevlex(a, b),
            MonomialOrder::Custom(custom) => (custom.compare)(a, b),
        }
    }

    /// Storage comparison: `Less` when `a` is stored before `b`.
    #[must_use]
    pub fn storage_cmp(&self, a: &ExponentIndex, b: &ExponentIndex) -> Ordering {
        self.compare(b, a)
    }

    /// Strict storage predicate: true when `a` is stored before `b`.
    #[must_use]
    pub fn precedes(&self, a: &ExponentIndex, b: &ExponentIndex) -> bool {
        self.storage_cmp(a, b) == Ordering::Less
    }

    /// Returns true for the canonical lexicographic ordering.
    #[must_use]
    pub const fn is_lex(&self) -> bool {
        matches!(self, MonomialOrder::Lex)
    }

    /// Returns a short name for the ordering.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::Grlex => "grlex",
            MonomialOrder::Grevlex => "grevlex",
            MonomialOrder::Custom(custom) => custom.name,
        }
    }
}

impl PartialEq for MonomialOrder {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MonomialOrder::Lex, MonomialOrder::Lex)
            | (MonomialOrder::Grlex, MonomialOrder::Grlex)
            | (MonomialOrder::Grevlex, MonomialOrder::Grevlex) => true,
            (MonomialOrder::Custom(a), MonomialOrder::Custom(b)) => {
                Arc::ptr_eq(&a.compare, &b.compare)
            }
            _ => false,
        }
    }
}

impl Eq for MonomialOrder {}

impl fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Compares two monomials lexicographically.
pub fn cmp_lex(a: &ExponentIndex, b: &ExponentIndex) -> Ordering {
    a.as_slice().cmp(b.as_slice())
}

/// Compares two monomials by graded lexicographic order.
pub fn cmp_grlex(a: &ExponentIndex, b: &ExponentIndex) -> Ordering {
    a.total_degree()
        .cmp(&b.total_degree())
        .then_with(|| cmp_lex(a, b))
}

/// Compares two monomials by graded reverse lexicographic order.
pub fn cmp_grevlex(a: &ExponentIndex, b: &ExponentIndex) -> Ordering {
    a.total_degree().cmp(&b.total_degree()).then_with(|| {
        a.as_slice()
            .iter()
            .zip(b.as_slice())
            .rev()
            .map(|(ea, eb)| eb.cmp(ea))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_order() {
        let order = MonomialOrder::Lex;

        let x = ExponentIndex::var(0, 2);
        let y = ExponentIndex::var(1, 2);
        let y2 = ExponentIndex::from([0, 2]);

        // x > y in lex
        assert_eq!(order.compare(&x, &y), Ordering::Greater);

        // x > y^2 in lex (first variable dominates)
        assert_eq!(order.compare(&x, &y2), Ordering::Greater);
        assert!(order.precedes(&x, &y2));
        assert!(!order.precedes(&x, &x));
    }

    #[test]
    fn test_grevlex_storage() {
        let order = MonomialOrder::Grevlex;
        let idx = |e: [i32; 3]| ExponentIndex::from(e);

        // Degree 2, leading term first.
        let stored = [
            idx([2, 0, 0]),
            idx([1, 1, 0]),
            idx([0, 2, 0]),
            idx([1, 0, 1]),
            idx([0, 1, 1]),
            idx([0, 0, 2]),
        ];
        assert!(stored.windows(2).all(|w| order.precedes(&w[0], &w[1])));

        // Degree dominates the variable pattern.
        assert_eq!(order.storage_cmp(&idx([0, 0, 2]), &idx([1, 0, 0])), Ordering::Less);
        assert_eq!(order.storage_cmp(&idx([0, 2, 0]), &idx([0, 2, 0])), Ordering::Equal);

        // Lex would put x*z ahead of y^2.
        assert!(MonomialOrder::Lex.precedes(&idx([1, 0, 1]), &idx([0, 2, 0])));
    }

    #[test]
    fn test_grlex_vs_lex() {
        let x = ExponentIndex::from([1, 0]);
        let y2 = ExponentIndex::from([0, 2]);

        assert_eq!(MonomialOrder::Lex.compare(&x, &y2), Ordering::Greater);
        assert_eq!(MonomialOrder::Grlex.compare(&x, &y2), Ordering::Less);
    }

    #[test]
    fn test_custom_identity() {
        let ascending = MonomialOrder::custom("ascending", |a, b| cmp_lex(b, a));
        let same = ascending.clone();
        let other = MonomialOrder::custom("ascending", |a, b| cmp_lex(b, a));

        assert_eq!(ascending, same);
        assert_ne!(ascending, other);
        assert_ne!(ascending, MonomialOrder::Lex);
        assert_eq!(ascending.name(), "ascending");

        let x = ExponentIndex::var(0, 2);
        let y = ExponentIndex::var(1, 2);
        assert!(ascending.precedes(&y, &x));
    }
}
