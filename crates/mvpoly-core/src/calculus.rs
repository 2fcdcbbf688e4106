//! Partial differentiation, indefinite integration and substitution.

use crate::coefficient::Coefficient;
use crate::error::Result;
use crate::partition::nested_run_end;
use crate::polynomial::Polynomial;
use crate::store::{SortState, Term};

impl<R: Coefficient> Polynomial<R> {
    /// Computes the partial derivative along `axis`.
    ///
    /// Terms whose exponent at `axis` is zero vanish. Other coefficients
    /// are multiplied by that exponent, which is then decremented.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidAxis`](crate::PolyError::InvalidAxis)
    /// if `axis >= dim`.
    pub fn differentiate(&self, axis: usize) -> Result<Self> {
        self.check_axis(axis)?;
        if self.order().is_lex() {
            return Ok(self.differentiate_lex(axis));
        }

        let mut terms = Vec::with_capacity(self.len());
        for (index, c) in self.iter() {
            let e = index[axis];
            if e == 0 {
                continue;
            }
            terms.push((index.shifted(axis, -1), *c * R::from_exponent(e)));
        }

        // Decrementing may reorder terms under a non-lex ordering.
        Ok(Self::from_valid_sequence(
            self.dim(),
            terms,
            self.order().clone(),
            SortState::Unsorted,
        ))
    }

    /// Lex-order differentiation.
    ///
    /// Within a run sharing axes `0..axis`, the terms with a zero exponent
    /// at `axis` come last and are skipped as a block. Decrementing every
    /// surviving exponent by one keeps lex order, so no sort is needed.
    fn differentiate_lex(&self, axis: usize) -> Self {
        let src = self.terms();
        let mut terms: Vec<Term<R>> = Vec::with_capacity(src.len());
        let mut pos = 0;
        while pos < src.len() {
            let (index, c) = &src[pos];
            let e = index[axis];
            if e == 0 {
                pos = nested_run_end(src, pos, axis);
            } else {
                terms.push((index.shifted(axis, -1), *c * R::from_exponent(e)));
                pos += 1;
            }
        }
        Self::from_valid_sequence(
            self.dim(),
            terms,
            self.order().clone(),
            SortState::OrderedUnique,
        )
    }

    /// Computes the antiderivative along `axis` with zero integration
    /// constant.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidAxis`](crate::PolyError::InvalidAxis)
    /// if `axis >= dim`.
    pub fn integrate(&self, axis: usize) -> Result<Self> {
        self.check_axis(axis)?;
        self.clone().into_integral(axis)
    }

    /// Consuming form of [`Polynomial::integrate`] that reuses the term
    /// buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidAxis`](crate::PolyError::InvalidAxis)
    /// if `axis >= dim`.
    pub fn into_integral(self, axis: usize) -> Result<Self> {
        self.check_axis(axis)?;

        // Raising one exponent of every term keeps lex order.
        let state = if self.order().is_lex() {
            SortState::OrderedUnique
        } else {
            SortState::Unsorted
        };

        let mut edit = self.into_bulk_edit();
        for (index, c) in edit.terms_mut().iter_mut() {
            index[axis] += 1;
            *c /= R::from_exponent(index[axis]);
        }
        edit.finish(state)
    }

    /// Fixes the variable at `axis` to `value`.
    ///
    /// The result keeps all variables; the exponent at `axis` becomes zero
    /// and terms that collide are summed.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidAxis`](crate::PolyError::InvalidAxis)
    /// if `axis >= dim`.
    pub fn substitute(&self, axis: usize, value: R) -> Result<Self> {
        self.check_axis(axis)?;
        let terms = self
            .iter()
            .map(|(index, c)| {
                let e = index[axis];
                (index.shifted(axis, -e), *c * value.powi(e))
            })
            .collect();
        Ok(Self::from_valid_sequence(
            self.dim(),
            terms,
            self.order().clone(),
            SortState::Unsorted,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::PolyError;
    use crate::index::ExponentIndex;
    use crate::ordering::MonomialOrder;
    use crate::polynomial::Polynomial;

    fn sample() -> Polynomial<f64> {
        // 3x^2y + 2xy^2 + 5
        Polynomial::from_terms(
            2,
            [
                (ExponentIndex::from([2, 1]), 3.0),
                (ExponentIndex::from([1, 2]), 2.0),
                (ExponentIndex::from([0, 0]), 5.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_differentiate_x() {
        let d = sample().differentiate(0).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.get(&ExponentIndex::from([1, 1])), Some(&6.0));
        assert_eq!(d.get(&ExponentIndex::from([0, 2])), Some(&2.0));
    }

    #[test]
    fn test_differentiate_y() {
        let d = sample().differentiate(1).unwrap();
        assert_eq!(
            d.terms(),
            &[
                (ExponentIndex::from([2, 0]), 3.0),
                (ExponentIndex::from([1, 1]), 4.0),
            ]
        );
    }

    #[test]
    fn test_differentiate_skips_zero_runs() {
        // x^2 z + x^2 + x y^3 + y^2 z^4 + y + 7
        let p = Polynomial::from_terms(
            3,
            [
                (ExponentIndex::from([2, 0, 1]), 1.0),
                (ExponentIndex::from([2, 0, 0]), 1.0),
                (ExponentIndex::from([1, 3, 0]), 1.0),
                (ExponentIndex::from([0, 2, 4]), 1.0),
                (ExponentIndex::from([0, 1, 0]), 1.0),
                (ExponentIndex::from([0, 0, 0]), 7.0),
            ],
        )
        .unwrap();

        let dy = p.differentiate(1).unwrap();
        assert_eq!(
            dy.terms(),
            &[
                (ExponentIndex::from([1, 2, 0]), 3.0),
                (ExponentIndex::from([0, 1, 4]), 2.0),
                (ExponentIndex::from([0, 0, 0]), 1.0),
            ]
        );

        let graded = p.reorder(MonomialOrder::Grevlex);
        assert_eq!(graded.differentiate(1).unwrap().reorder(MonomialOrder::Lex), dy);

        let dz = p.differentiate(2).unwrap();
        assert_eq!(
            dz.terms(),
            &[
                (ExponentIndex::from([2, 0, 0]), 1.0),
                (ExponentIndex::from([0, 2, 3]), 4.0),
            ]
        );
    }

    #[test]
    fn test_integrate_y() {
        let i = sample().integrate(1).unwrap();
        assert_eq!(i.len(), 3);
        assert_eq!(i.get(&ExponentIndex::from([1, 3])), Some(&(2.0 / 3.0)));
        assert_eq!(i.get(&ExponentIndex::from([0, 1])), Some(&5.0));
        assert_eq!(i.get(&ExponentIndex::from([2, 2])), Some(&1.5));
    }

    #[test]
    fn test_integrate_under_grlex() {
        let p = sample().reorder(MonomialOrder::Grlex);
        let i = p.into_integral(0).unwrap();
        assert_eq!(i.order(), &MonomialOrder::Grlex);
        assert_eq!(i.get(&ExponentIndex::from([3, 1])), Some(&1.0));
        assert_eq!(i.get(&ExponentIndex::from([1, 0])), Some(&5.0));
        assert_eq!(i.leading_term().map(|(k, _)| k.clone()), Some(ExponentIndex::from([3, 1])));
    }

    #[test]
    fn test_invalid_axis() {
        let p = sample();
        assert_eq!(
            p.differentiate(2),
            Err(PolyError::InvalidAxis { axis: 2, dim: 2 })
        );
        #[allow(clippy::cast_sign_loss)]
        let wrapped = -1isize as usize;
        assert!(matches!(
            p.differentiate(wrapped),
            Err(PolyError::InvalidAxis { .. })
        ));
        assert!(matches!(p.integrate(5), Err(PolyError::InvalidAxis { .. })));
        assert!(matches!(
            p.substitute(2, 1.0),
            Err(PolyError::InvalidAxis { .. })
        ));
    }

    #[test]
    fn test_substitute() {
        // y = 2: 6x^2 + 8x + 5
        let s = sample().substitute(1, 2.0).unwrap();
        assert_eq!(
            s.terms(),
            &[
                (ExponentIndex::from([2, 0]), 6.0),
                (ExponentIndex::from([1, 0]), 8.0),
                (ExponentIndex::from([0, 0]), 5.0),
            ]
        );

        // x = 0 zeroes every term but the constant; nothing is pruned.
        let s = sample().substitute(0, 0.0).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(&ExponentIndex::from([0, 2])), Some(&0.0));
        assert_eq!(s.get(&ExponentIndex::from([0, 1])), Some(&0.0));
        assert_eq!(s.get(&ExponentIndex::from([0, 0])), Some(&5.0));

        // xy + xy^2 at y = 3 collapses to 12x.
        let p = Polynomial::from_terms(
            2,
            [
                (ExponentIndex::from([1, 1]), 1.0),
                (ExponentIndex::from([1, 2]), 1.0),
            ],
        )
        .unwrap();
        let s = p.substitute(1, 3.0).unwrap();
        assert_eq!(s.terms(), &[(ExponentIndex::from([1, 0]), 12.0)]);
    }
}
