//! Property-based tests for polynomial arithmetic, calculus and evaluation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::index::ExponentIndex;
    use crate::ordering::{cmp_lex, MonomialOrder};
    use crate::polynomial::Polynomial;
    use crate::repeated::RepeatedEvaluator;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    // Small integer coefficients keep sums and products exact in f64.
    fn small_coeff() -> impl Strategy<Value = f64> {
        (-5i32..=5).prop_map(f64::from)
    }

    fn small_index(dim: usize) -> impl Strategy<Value = ExponentIndex> {
        proptest::collection::vec(0i32..4, dim).prop_map(ExponentIndex::from)
    }

    fn small_poly(dim: usize) -> impl Strategy<Value = Polynomial<f64>> {
        proptest::collection::vec((small_index(dim), small_coeff()), 0..8)
            .prop_map(move |terms| Polynomial::from_terms(dim, terms).unwrap())
    }

    fn poly2() -> impl Strategy<Value = Polynomial<f64>> {
        small_poly(2)
    }

    fn poly3() -> impl Strategy<Value = Polynomial<f64>> {
        small_poly(3)
    }

    // Halves in [-2, 2] keep monomial values dyadic.
    fn point(dim: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec((-4i32..=4).prop_map(|k| f64::from(k) / 2.0), dim)
    }

    fn order() -> impl Strategy<Value = MonomialOrder> {
        // One shared comparer, so every drawn custom order compares equal.
        let ascending = MonomialOrder::custom("revlex", |a, b| cmp_lex(b, a));
        prop_oneof![
            Just(MonomialOrder::Lex),
            Just(MonomialOrder::Grlex),
            Just(MonomialOrder::Grevlex),
            Just(ascending),
        ]
    }

    fn strictly_ordered(p: &Polynomial<f64>) -> bool {
        p.terms()
            .windows(2)
            .all(|w| p.order().precedes(&w[0].0, &w[1].0))
    }

    proptest! {
        // Storage

        #[test]
        fn terms_stay_strictly_ordered(p in poly3(), ord in order(), extra in small_poly(3)) {
            let mut q = p.reorder(ord);
            prop_assert!(strictly_ordered(&q));
            for (index, c) in extra.iter() {
                q.add_term(index.clone(), *c).unwrap();
            }
            prop_assert!(strictly_ordered(&q));
        }

        #[test]
        fn reorder_preserves_terms(p in poly3(), ord in order()) {
            let q = p.reorder(ord);
            prop_assert_eq!(q.len(), p.len());
            prop_assert_eq!(q.reorder(MonomialOrder::Lex), p);
        }

        // Ring axioms

        #[test]
        fn add_commutative(a in poly2(), b in poly2()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn add_associative(a in poly2(), b in poly2(), c in poly2()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn sub_is_add_neg(a in poly2(), b in poly2()) {
            prop_assert_eq!(&a - &b, &a + &(-&b));
        }

        #[test]
        fn mul_commutative(a in poly2(), b in poly2()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn mul_associative(a in poly2(), b in poly2(), c in poly2()) {
            prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        }

        #[test]
        fn distributive(a in poly2(), b in poly2(), c in poly2()) {
            // a * (b + c) = a * b + a * c
            let left = &a * &(&b + &c);
            let right = &(&a * &b) + &(&a * &c);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn mul_identity(a in poly3()) {
            let one = Polynomial::constant(1.0, 3);
            prop_assert_eq!(&a * &one, a);
        }

        // Calculus

        #[test]
        fn differentiate_linear(a in poly3(), b in poly3(), axis in 0usize..3) {
            let left = (&a + &b).differentiate(axis).unwrap();
            let right = &a.differentiate(axis).unwrap() + &b.differentiate(axis).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn differentiate_matches_across_orderings(a in poly3(), ord in order(), axis in 0usize..3) {
            let lex = a.differentiate(axis).unwrap();
            let other = a.reorder(ord).differentiate(axis).unwrap();
            prop_assert_eq!(other.reorder(MonomialOrder::Lex), lex);
        }

        #[test]
        fn differentiate_undoes_integrate(a in poly3(), axis in 0usize..3) {
            let back = a.integrate(axis).unwrap().differentiate(axis).unwrap();
            prop_assert_eq!(back.len(), a.len());
            for ((bi, bc), (ai, ac)) in back.iter().zip(a.iter()) {
                prop_assert_eq!(bi, ai);
                prop_assert!(approx_eq(*bc, *ac));
            }
        }

        #[test]
        fn integrate_stays_ordered(a in poly3(), ord in order(), axis in 0usize..3) {
            let i = a.reorder(ord).into_integral(axis).unwrap();
            prop_assert!(strictly_ordered(&i));
        }

        // Evaluation

        #[test]
        fn horner_matches_naive(a in poly3(), x in point(3)) {
            let horner = a.evaluate(&x).unwrap();
            let naive = a.evaluate_naive(&x).unwrap();
            prop_assert!(approx_eq(horner, naive));
        }

        #[test]
        fn evaluation_ignores_ordering(a in poly3(), ord in order(), x in point(3)) {
            let reordered = a.reorder(ord);
            let expected = a.evaluate(&x).unwrap();
            prop_assert!(approx_eq(reordered.evaluate(&x).unwrap(), expected));
            let mut eval = RepeatedEvaluator::new(reordered);
            prop_assert!(approx_eq(eval.evaluate(&x).unwrap(), expected));
        }

        #[test]
        fn arithmetic_ignores_ordering(a in poly2(), b in poly2(), ord in order()) {
            let (ra, rb) = (a.reorder(ord.clone()), b.reorder(ord));
            prop_assert_eq!((&ra + &rb).reorder(MonomialOrder::Lex), &a + &b);
            prop_assert_eq!((&ra * &rb).reorder(MonomialOrder::Lex), &a * &b);
        }

        #[test]
        fn repeated_matches_one_shot(a in poly3(), xs in proptest::collection::vec(point(3), 1..5)) {
            let mut eval = RepeatedEvaluator::new(a.clone());
            for x in &xs {
                let repeated = eval.evaluate(x).unwrap();
                let one_shot = a.evaluate(x).unwrap();
                prop_assert!(approx_eq(repeated, one_shot));
            }
        }

        #[test]
        fn evaluation_is_homomorphic(a in poly2(), b in poly2(), x in point(2)) {
            let ax = a.evaluate(&x).unwrap();
            let bx = b.evaluate(&x).unwrap();
            prop_assert!(approx_eq((&a + &b).evaluate(&x).unwrap(), ax + bx));
            prop_assert!(approx_eq((&a * &b).evaluate(&x).unwrap(), ax * bx));
        }

        #[test]
        fn substitute_matches_evaluation(a in poly3(), x in point(3), axis in 0usize..3) {
            let s = a.substitute(axis, x[axis]).unwrap();
            prop_assert!(approx_eq(s.evaluate(&x).unwrap(), a.evaluate(&x).unwrap()));
        }
    }
}
