//! Property-based tests for expression evaluation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::assign::{assign, evaluate};
    use crate::dense::DynamicMatrix;
    use crate::expr::{declsym, map, max, min};
    use lazymat_core::validation::check_property;
    use lazymat_core::{ColumnMajor, Error, Matrix, Property};

    // Strategy for small integer matrices of a given shape
    fn matrix_of(rows: usize, columns: usize) -> impl Strategy<Value = DynamicMatrix<i64>> {
        proptest::collection::vec(-1000i64..1000, rows * columns)
            .prop_map(move |values| DynamicMatrix::from_fn(rows, columns, |i, j| values[i * columns + j]))
    }

    // Strategy for a pair of same-shaped matrices in different storage orders
    fn operand_pair() -> impl Strategy<Value = (DynamicMatrix<i64>, DynamicMatrix<i64, ColumnMajor>)> {
        (1usize..12, 1usize..12).prop_flat_map(|(rows, columns)| {
            (matrix_of(rows, columns), matrix_of(rows, columns))
                .prop_map(|(a, b)| (a, b.to_opposite()))
        })
    }

    fn symmetrize(m: &DynamicMatrix<i64>) -> DynamicMatrix<i64> {
        DynamicMatrix::from_fn(m.rows(), m.columns(), |i, j| m.get(i.min(j), i.max(j)))
    }

    // Strategy for two symmetric matrices of the same order
    fn symmetric_pair() -> impl Strategy<Value = (DynamicMatrix<i64>, DynamicMatrix<i64>)> {
        (1usize..10).prop_flat_map(|n| {
            (matrix_of(n, n), matrix_of(n, n))
                .prop_map(|(s, t)| (symmetrize(&s), symmetrize(&t)))
        })
    }

    fn combine(x: i64, y: i64) -> i64 {
        3 * x - y * y % 17
    }

    proptest! {
        #[test]
        fn map_is_elementwise((a, b) in operand_pair()) {
            let expr = map(&a, &b, combine).unwrap();
            let result = evaluate(&expr);
            for i in 0..a.rows() {
                for j in 0..a.columns() {
                    prop_assert_eq!(result.get(i, j), combine(a.get(i, j), b.get(i, j)));
                    prop_assert_eq!(expr.get(i, j), result.get(i, j));
                }
            }
        }

        #[test]
        fn map_keeps_operand_shape((a, b) in operand_pair()) {
            let expr = map(&a, &b, combine).unwrap();
            prop_assert_eq!(expr.dimensions(), a.dimensions());

            let wider = DynamicMatrix::<i64>::new(a.rows(), a.columns() + 1);
            let err = map(&a, &wider, combine).err().expect("shape mismatch");
            prop_assert_eq!(
                err,
                Error::shape_mismatch("map", a.dimensions(), wider.dimensions())
            );
        }

        #[test]
        fn self_assignment_matches_materialized_copy((a, b) in operand_pair()) {
            let expected = evaluate(&map(&a, &b, combine).unwrap());
            let mut c = a.clone();
            c.assign_with(|c, out| assign(out, &map(c, &b, combine)?)).unwrap();
            prop_assert_eq!(&c, &expected);

            // the same through an explicit temporary and copy
            let mut d = a.clone();
            let tmp = evaluate(&map(&d, &b, combine).unwrap());
            assign(&mut d, &tmp).unwrap();
            prop_assert_eq!(d, c);
        }

        #[test]
        fn min_max_of_symmetric_are_symmetric((s, t) in symmetric_pair()) {
            let t = t.to_opposite();
            let upper = max(declsym(&s).unwrap(), declsym(&t).unwrap()).unwrap();
            let lower = min(declsym(&s).unwrap(), declsym(&t).unwrap()).unwrap();
            prop_assert!(structure_of(&upper).is_symmetric());
            prop_assert!(structure_of(&lower).is_symmetric());
            prop_assert!(check_property(&evaluate(&upper), Property::Symmetric).is_ok());
            prop_assert!(check_property(&evaluate(&lower), Property::Symmetric).is_ok());
        }
    }

    fn structure_of<M: Matrix>(_: &M) -> lazymat_core::Structure {
        M::STRUCTURE
    }
}
