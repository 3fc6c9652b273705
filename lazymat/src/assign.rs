//! Assignment entry points
//!
//! Public functions validate shapes before anything is written, then hand
//! the source its destination. The source's own [`Matrix::assign_to`] (or
//! [`Matrix::assign_to_sparse`]) implements the tier its type selects:
//!
//! 1. direct element loop, linear or blocked
//! 2. serial evaluation of operands that require it, then the loop
//! 3. dense temporary in the destination's order for sparse destinations
//! 4. compound variants of the above through an [`Accumulate`] policy
//!
//! The parallel tier lives in [`crate::smp`] and is reached through
//! [`crate::Evaluator`].

pub mod kernel;
pub mod strategy;

use lazymat_core::validation::check_same_shape;
use lazymat_core::{
    Accumulate, AddAssign, Assign, DenseStorage, Element, Matrix, MatrixMut, Result,
    SchurAssign, SparseMatrixMut, SparseStorage, StorageOrder, SubAssign,
};

pub use strategy::{Plan, SmpStrategy, Strategy};

/// Evaluate `expr` serially into its result type
pub fn evaluate<E: Matrix + ?Sized>(expr: &E) -> E::ResultType {
    let (rows, columns) = expr.dimensions();
    let mut result = E::ResultType::zeroed(rows, columns);
    expr.assign_to::<_, Assign>(&mut result);
    result
}

fn dense<D, E, A>(target: &mut D, source: &E) -> Result<()>
where
    D: MatrixMut<Element = E::Element> + ?Sized,
    E: Matrix + ?Sized,
    A: Accumulate,
{
    check_same_shape(A::NAME, target.dimensions(), source.dimensions())?;
    tracing::trace!(
        rows = target.rows(),
        columns = target.columns(),
        op = A::NAME,
        element = %<E::Element as Element>::kind(),
        "dense assignment"
    );
    source.assign_to::<D, A>(target);
    Ok(())
}

/// `target = source`
pub fn assign<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: MatrixMut<Element = E::Element> + ?Sized,
    E: Matrix + ?Sized,
{
    dense::<D, E, Assign>(target, source)
}

/// `target += source`
pub fn add_assign<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: MatrixMut<Element = E::Element> + ?Sized,
    E: Matrix + ?Sized,
{
    dense::<D, E, AddAssign>(target, source)
}

/// `target -= source`
pub fn sub_assign<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: MatrixMut<Element = E::Element> + ?Sized,
    E: Matrix + ?Sized,
{
    dense::<D, E, SubAssign>(target, source)
}

/// `target = target ∘ source` (element-wise product)
pub fn schur_assign<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: MatrixMut<Element = E::Element> + ?Sized,
    E: Matrix + ?Sized,
{
    dense::<D, E, SchurAssign>(target, source)
}

/// `target = source` for a sparse destination
///
/// Existing non-zeros are dropped; the new ones are appended in the
/// destination's storage order.
pub fn assign_sparse<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: SparseMatrixMut<Element = E::Element> + ?Sized,
    E: Matrix + ?Sized,
{
    check_same_shape("assign", target.dimensions(), source.dimensions())?;
    tracing::trace!(
        rows = target.rows(),
        columns = target.columns(),
        element = %<E::Element as Element>::kind(),
        "sparse assignment"
    );
    target.reset();
    source.assign_to_sparse(target);
    Ok(())
}

/// Compound assignment into a sparse destination by rebuilding it
///
/// There is no specialized path for this; every position is recomputed
/// and the destination is rebuilt from scratch.
fn sparse_compound<D, E, A>(target: &mut D, source: &E) -> Result<()>
where
    D: SparseStorage<Element = E::Element>,
    E: Matrix + ?Sized,
    A: Accumulate,
{
    check_same_shape(A::NAME, target.dimensions(), source.dimensions())?;
    let (rows, columns) = target.dimensions();
    tracing::trace!(rows, columns, op = A::NAME, "generic sparse compound assignment");

    let order = <D::Order as StorageOrder>::ORDER;
    let (majors, minors) = order.major_minor(rows, columns);
    let zero = <E::Element as Element>::zero();
    let mut rebuilt = D::with_shape(rows, columns);
    rebuilt.reserve(target.nnz());
    for major in 0..majors {
        for minor in 0..minors {
            let (i, j) = order.to_row_column(major, minor);
            let mut value = target.get(i, j);
            A::apply(&mut value, source.get(i, j));
            if value != zero {
                rebuilt.append(i, j, value);
            }
        }
        rebuilt.finalize(major);
    }
    *target = rebuilt;
    Ok(())
}

/// `target += source` for a sparse destination
pub fn add_assign_sparse<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: SparseStorage<Element = E::Element>,
    E: Matrix + ?Sized,
{
    sparse_compound::<D, E, AddAssign>(target, source)
}

/// `target -= source` for a sparse destination
pub fn sub_assign_sparse<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: SparseStorage<Element = E::Element>,
    E: Matrix + ?Sized,
{
    sparse_compound::<D, E, SubAssign>(target, source)
}

/// Element-wise `*=` for a sparse destination
pub fn schur_assign_sparse<D, E>(target: &mut D, source: &E) -> Result<()>
where
    D: SparseStorage<Element = E::Element>,
    E: Matrix + ?Sized,
{
    sparse_compound::<D, E, SchurAssign>(target, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DynamicMatrix;
    use crate::sparse::CompressedMatrix;
    use lazymat_core::{ColumnMajor, Error, ErrorCategory};

    fn sample() -> DynamicMatrix<f64> {
        DynamicMatrix::from_rows(&[[1.0, 0.0, 2.0], [0.0, 3.0, 0.0]]).unwrap()
    }

    #[test]
    fn test_assign_and_compound() {
        let a = sample();
        let mut target = DynamicMatrix::<f64, ColumnMajor>::new(2, 3);
        assign(&mut target, &a).unwrap();
        assert_eq!(target, a);

        add_assign(&mut target, &a).unwrap();
        sub_assign(&mut target, &a).unwrap();
        schur_assign(&mut target, &a).unwrap();
        assert_eq!(
            target,
            DynamicMatrix::<f64>::from_rows(&[[1.0, 0.0, 4.0], [0.0, 9.0, 0.0]]).unwrap()
        );
    }

    #[test]
    fn test_shape_checked_before_writing() {
        let a = sample();
        let mut target = DynamicMatrix::<f64>::from_fn(2, 2, |_, _| 7.0);
        let err = assign(&mut target, &a).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidArgument);
        assert!(matches!(err, Error::ShapeMismatch { op: "assign", .. }));
        assert!(target.as_slice().iter().take(2).all(|&v| v == 7.0));

        let err = add_assign(&mut target, &a).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { op: "add_assign", .. }));
    }

    #[test]
    fn test_sparse_assignment() {
        let a = sample();
        let mut sparse = CompressedMatrix::<f64, ColumnMajor>::new(2, 3);
        assign_sparse(&mut sparse, &a).unwrap();
        assert_eq!(sparse.nnz(), 3);
        assert_eq!(evaluate(&sparse), a);

        add_assign_sparse(&mut sparse, &a).unwrap();
        assert_eq!(sparse.get(0, 2), 4.0);
        sub_assign_sparse(&mut sparse, &a).unwrap();
        sub_assign_sparse(&mut sparse, &a).unwrap();
        assert_eq!(sparse.nnz(), 0);

        assign_sparse(&mut sparse, &a).unwrap();
        schur_assign_sparse(&mut sparse, &a).unwrap();
        assert_eq!(sparse.get(1, 1), 9.0);

        let mut wrong = CompressedMatrix::<f64>::new(3, 3);
        assert!(assign_sparse(&mut wrong, &a).is_err());
        assert!(add_assign_sparse(&mut wrong, &a).is_err());
    }
}
