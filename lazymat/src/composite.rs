//! Operand views used by assignment strategies
//!
//! A strategy that needs cheap element access asks for a [`Composite`] of
//! each operand. Operands whose type requires evaluation are materialized
//! into their result type exactly once; everything else is borrowed. The
//! choice depends only on the operand's type.

use lazymat_core::{Accumulate, Matrix, MatrixMut, SparseMatrixMut, Structure};

use crate::assign::evaluate;
use crate::config::AssignConfig;
use crate::smp::{smp_evaluate, SmpAssign, SmpDestination};

/// An operand either borrowed as-is or evaluated into a temporary
pub enum Composite<'a, M: Matrix> {
    Borrowed(&'a M),
    Evaluated(M::ResultType),
}

impl<'a, M: Matrix> Composite<'a, M> {
    /// Materialize through the serial evaluator if the type requires it
    pub fn serial(operand: &'a M) -> Self {
        if M::REQUIRES_EVALUATION {
            tracing::debug!(
                rows = operand.rows(),
                columns = operand.columns(),
                element = %<M::Element as lazymat_core::Element>::kind(),
                "materializing operand"
            );
            Composite::Evaluated(evaluate(operand))
        } else {
            Composite::Borrowed(operand)
        }
    }

    /// Materialize through the parallel evaluator if the type requires it
    pub fn parallel(operand: &'a M, config: &AssignConfig) -> Self
    where
        M: SmpAssign,
        M::ResultType: SmpDestination,
    {
        if M::REQUIRES_EVALUATION {
            tracing::debug!(
                rows = operand.rows(),
                columns = operand.columns(),
                element = %<M::Element as lazymat_core::Element>::kind(),
                "materializing operand in parallel"
            );
            Composite::Evaluated(smp_evaluate(operand, config))
        } else {
            Composite::Borrowed(operand)
        }
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self, Composite::Evaluated(_))
    }
}

impl<M: Matrix> Matrix for Composite<'_, M> {
    type Element = M::Element;
    type Order = M::Order;
    type ResultType = M::ResultType;

    const STRUCTURE: Structure = M::STRUCTURE;
    const ROWS: usize = M::ROWS;
    const COLUMNS: usize = M::COLUMNS;
    const SMP_ASSIGNABLE: bool = M::SMP_ASSIGNABLE || M::REQUIRES_EVALUATION;

    fn rows(&self) -> usize {
        match self {
            Composite::Borrowed(m) => m.rows(),
            Composite::Evaluated(m) => m.rows(),
        }
    }

    fn columns(&self) -> usize {
        match self {
            Composite::Borrowed(m) => m.columns(),
            Composite::Evaluated(m) => m.columns(),
        }
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Self::Element {
        match self {
            Composite::Borrowed(m) => m.get(row, column),
            Composite::Evaluated(m) => m.get(row, column),
        }
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        match self {
            Composite::Borrowed(m) => m.can_alias(alias),
            Composite::Evaluated(_) => false,
        }
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        match self {
            Composite::Borrowed(m) => m.is_aliased(alias),
            Composite::Evaluated(m) => m.is_aliased(alias),
        }
    }

    fn is_aligned(&self) -> bool {
        match self {
            Composite::Borrowed(m) => m.is_aligned(),
            Composite::Evaluated(m) => m.is_aligned(),
        }
    }

    fn can_smp_assign(&self) -> bool {
        match self {
            Composite::Borrowed(m) => m.can_smp_assign(),
            Composite::Evaluated(_) => true,
        }
    }

    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        match self {
            Composite::Borrowed(m) => m.assign_to::<D, A>(target),
            Composite::Evaluated(m) => m.assign_to::<D, A>(target),
        }
    }

    fn assign_to_sparse<D>(&self, target: &mut D)
    where
        D: SparseMatrixMut<Element = Self::Element> + ?Sized,
    {
        match self {
            Composite::Borrowed(m) => m.assign_to_sparse(target),
            Composite::Evaluated(m) => m.assign_to_sparse(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DynamicMatrix;
    use crate::expr::mul;

    #[test]
    fn test_storage_is_borrowed() {
        let a = DynamicMatrix::<f64>::from_fn(2, 2, |i, j| (i + j) as f64);
        let composite = Composite::serial(&a);
        assert!(!composite.is_evaluated());
        assert!(composite.is_aliased(a.address()));
        assert!(composite.can_alias(a.address()));
    }

    #[test]
    fn test_products_are_evaluated_once() {
        let a = DynamicMatrix::<i32>::from_rows(&[[1, 2], [3, 4]]).unwrap();
        let product = mul(&a, &a).unwrap();
        let composite = Composite::serial(&product);
        assert!(composite.is_evaluated());
        assert_eq!(composite.get(1, 1), 22);
        assert!(!composite.can_alias(a.address()));

        let parallel = Composite::parallel(&product, &AssignConfig::default());
        assert!(parallel.is_evaluated());
        assert_eq!(parallel.get(0, 1), 10);
    }
}
