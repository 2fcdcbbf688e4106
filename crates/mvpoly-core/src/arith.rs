//! Polynomial arithmetic.
//!
//! Addition and subtraction merge the two sorted term sequences in
//! O(|left| + |right|). Multiplication forms every pairwise product,
//! sorts once and collapses equal indices.
//!
//! Binary operations produce a result under the left operand's ordering.

use std::cmp::Ordering;
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

use crate::coefficient::Coefficient;
use crate::polynomial::Polynomial;
use crate::store::{SortState, Term, TermStore};

/// Merges two sorted term sequences, negating the right side when
/// `subtract` is set. Combined coefficients are emitted even when zero.
fn merge<R: Coefficient>(l: &Polynomial<R>, r: &Polynomial<R>, subtract: bool) -> Polynomial<R> {
    assert_eq!(l.dim(), r.dim(), "operands must have the same number of variables");

    let order = l.order();
    let rekeyed;
    let right: &[Term<R>] = if order == r.order() {
        r.terms()
    } else {
        tracing::warn!(
            left = %order,
            right = %r.order(),
            "merging polynomials with different orderings; the left ordering is used"
        );
        rekeyed = r.reorder(order.clone());
        rekeyed.terms()
    };
    let left = l.terms();
    let signed = |c: R| if subtract { -c } else { c };

    let mut out = TermStore::with_capacity(order.clone(), left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        let (li, lc) = &left[i];
        let (ri, rc) = &right[j];
        match order.storage_cmp(li, ri) {
            Ordering::Less => {
                out.push_back(li.clone(), *lc);
                i += 1;
            }
            Ordering::Greater => {
                out.push_back(ri.clone(), signed(*rc));
                j += 1;
            }
            Ordering::Equal => {
                let c = if subtract { *lc - *rc } else { *lc + *rc };
                out.push_back(li.clone(), c);
                i += 1;
                j += 1;
            }
        }
    }
    for (index, c) in &left[i..] {
        out.push_back(index.clone(), *c);
    }
    for (index, c) in &right[j..] {
        out.push_back(index.clone(), signed(*c));
    }

    Polynomial::from_store(l.dim(), out)
}

/// Multiplies two polynomials by the full Cartesian product of terms.
fn product<R: Coefficient>(l: &Polynomial<R>, r: &Polynomial<R>) -> Polynomial<R> {
    assert_eq!(l.dim(), r.dim(), "operands must have the same number of variables");
    if l.order() != r.order() {
        tracing::warn!(
            left = %l.order(),
            right = %r.order(),
            "multiplying polynomials with different orderings; the left ordering is used"
        );
    }

    let mut terms = Vec::with_capacity(l.len() * r.len());
    for (li, lc) in l.terms() {
        for (ri, rc) in r.terms() {
            terms.push((li + ri, *lc * *rc));
        }
    }

    // Sums of non-negative indices stay non-negative.
    Polynomial::from_valid_sequence(l.dim(), terms, l.order().clone(), SortState::Unsorted)
}

impl<R: Coefficient> Neg for Polynomial<R> {
    type Output = Polynomial<R>;

    fn neg(mut self) -> Polynomial<R> {
        for c in self.values_mut() {
            *c = -*c;
        }
        self
    }
}

impl<R: Coefficient> Neg for &Polynomial<R> {
    type Output = Polynomial<R>;

    fn neg(self) -> Polynomial<R> {
        -self.clone()
    }
}

impl<R: Coefficient> MulAssign<R> for Polynomial<R> {
    fn mul_assign(&mut self, r: R) {
        self.scale(r);
    }
}

impl<R: Coefficient> Add for &Polynomial<R> {
    type Output = Polynomial<R>;

    fn add(self, other: &Polynomial<R>) -> Polynomial<R> {
        merge(self, other, false)
    }
}

impl<R: Coefficient> Sub for &Polynomial<R> {
    type Output = Polynomial<R>;

    fn sub(self, other: &Polynomial<R>) -> Polynomial<R> {
        merge(self, other, true)
    }
}

impl<R: Coefficient> Mul for &Polynomial<R> {
    type Output = Polynomial<R>;

    fn mul(self, other: &Polynomial<R>) -> Polynomial<R> {
        product(self, other)
    }
}

/// Forwards the owned and mixed operand forms to the by-reference impl.
macro_rules! forward_binop {
    ($tr:ident, $method:ident) => {
        impl<R: Coefficient> $tr for Polynomial<R> {
            type Output = Polynomial<R>;

            fn $method(self, other: Polynomial<R>) -> Polynomial<R> {
                (&self).$method(&other)
            }
        }

        impl<R: Coefficient> $tr<&Polynomial<R>> for Polynomial<R> {
            type Output = Polynomial<R>;

            fn $method(self, other: &Polynomial<R>) -> Polynomial<R> {
                (&self).$method(other)
            }
        }

        impl<R: Coefficient> $tr<Polynomial<R>> for &Polynomial<R> {
            type Output = Polynomial<R>;

            fn $method(self, other: Polynomial<R>) -> Polynomial<R> {
                self.$method(&other)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
