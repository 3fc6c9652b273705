//! Opt-out of the parallel tier

use lazymat_core::{Accumulate, Matrix, MatrixMut, SparseMatrixMut, Structure};

use crate::config::AssignConfig;
use crate::smp::{SmpAssign, SmpDestination};

/// Wrapper forcing serial assignment of its operand
#[derive(Debug, Clone)]
pub struct SerialExpr<M> {
    operand: M,
}

impl<M: Matrix> SerialExpr<M> {
    pub fn operand(&self) -> &M {
        &self.operand
    }
}

impl<M: Matrix> Matrix for SerialExpr<M> {
    type Element = M::Element;
    type Order = M::Order;
    type ResultType = M::ResultType;

    const STRUCTURE: Structure = M::STRUCTURE;
    const ROWS: usize = M::ROWS;
    const COLUMNS: usize = M::COLUMNS;
    const IS_EXPRESSION: bool = true;
    const REQUIRES_EVALUATION: bool = M::REQUIRES_EVALUATION;
    const SMP_ASSIGNABLE: bool = false;

    fn rows(&self) -> usize {
        self.operand.rows()
    }

    fn columns(&self) -> usize {
        self.operand.columns()
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Self::Element {
        self.operand.get(row, column)
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        self.operand.can_alias(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        self.operand.is_aliased(alias)
    }

    fn is_aligned(&self) -> bool {
        self.operand.is_aligned()
    }

    fn can_smp_assign(&self) -> bool {
        false
    }

    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        self.operand.assign_to::<D, A>(target);
    }

    fn assign_to_sparse<D>(&self, target: &mut D)
    where
        D: SparseMatrixMut<Element = Self::Element> + ?Sized,
    {
        self.operand.assign_to_sparse(target);
    }
}

impl<M: Matrix + Sync> SmpAssign for SerialExpr<M> {
    fn smp_assign_to<D, A>(&self, target: &mut D, _config: &AssignConfig)
    where
        D: SmpDestination<Element = Self::Element>,
        A: Accumulate,
    {
        tracing::trace!(rows = self.rows(), columns = self.columns(), op = A::NAME, "serial section");
        self.operand.assign_to::<D, A>(target);
    }
}

/// Keep `operand` out of the parallel tier
pub fn serial<M: Matrix>(operand: M) -> SerialExpr<M> {
    SerialExpr { operand }
}
