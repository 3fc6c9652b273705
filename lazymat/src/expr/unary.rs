//! Unary element-wise map expression

use lazymat_core::{
    Abs, Accumulate, Matrix, MatrixMut, Neg, Scale, Structure, UnaryMapTrait, UnaryOp,
};

use crate::assign::kernel::unary_kernel;
use crate::composite::Composite;
use crate::config::AssignConfig;
use crate::smp::{default_smp_assign, parallel_fill, SmpAssign, SmpDestination};

/// Element-wise `op(operand(i, j))`
#[derive(Debug, Clone)]
pub struct UnaryMapExpr<M, OP> {
    operand: M,
    op: OP,
}

impl<M, OP> UnaryMapExpr<M, OP>
where
    M: Matrix,
    OP: UnaryOp<M::Element>,
{
    pub fn operand(&self) -> &M {
        &self.operand
    }

    pub fn operation(&self) -> OP {
        self.op.clone()
    }
}

impl<M, OP> Matrix for UnaryMapExpr<M, OP>
where
    M: Matrix,
    OP: UnaryOp<M::Element>,
    M::ResultType: UnaryMapTrait<OP::Output>,
{
    type Element = OP::Output;
    type Order = <Self::ResultType as Matrix>::Order;
    type ResultType = <M::ResultType as UnaryMapTrait<OP::Output>>::Output;

    const STRUCTURE: Structure = OP::RULE.apply(M::STRUCTURE);
    const ROWS: usize = M::ROWS;
    const COLUMNS: usize = M::COLUMNS;
    const IS_EXPRESSION: bool = true;
    const REQUIRES_EVALUATION: bool = M::REQUIRES_EVALUATION;
    const SMP_ASSIGNABLE: bool = M::SMP_ASSIGNABLE;

    fn rows(&self) -> usize {
        self.operand.rows()
    }

    fn columns(&self) -> usize {
        self.operand.columns()
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Self::Element {
        self.op.apply(self.operand.get(row, column))
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        M::IS_EXPRESSION && self.operand.can_alias(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        self.operand.is_aliased(alias)
    }

    fn is_aligned(&self) -> bool {
        self.operand.is_aligned()
    }

    fn can_smp_assign(&self) -> bool {
        self.operand.can_smp_assign()
    }

    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        if M::REQUIRES_EVALUATION {
            let operand = Composite::serial(&self.operand);
            unary_kernel::<_, OP, D, A>(target, &operand, &self.op);
        } else {
            unary_kernel::<M, OP, D, A>(target, &self.operand, &self.op);
        }
    }
}

impl<M, OP> SmpAssign for UnaryMapExpr<M, OP>
where
    M: SmpAssign,
    OP: UnaryOp<M::Element> + Sync,
    M::ResultType: UnaryMapTrait<OP::Output> + SmpDestination,
{
    fn smp_assign_to<D, A>(&self, target: &mut D, config: &AssignConfig)
    where
        D: SmpDestination<Element = Self::Element>,
        A: Accumulate,
    {
        if !M::REQUIRES_EVALUATION {
            default_smp_assign::<Self, D, A>(self, target, config);
            return;
        }
        let (rows, columns) = self.dimensions();
        if !config.goes_parallel(rows * columns) || !self.can_smp_assign() || !target.can_smp_assign()
        {
            self.assign_to::<D, A>(target);
            return;
        }
        let operand = Composite::parallel(&self.operand, config);
        parallel_fill::<D, A, _>(target, config, |i, j| self.op.apply(operand.get(i, j)));
    }
}

/// Compose `op(operand)` element-wise
pub fn map_unary<M, OP>(operand: M, op: OP) -> UnaryMapExpr<M, OP>
where
    M: Matrix,
    OP: UnaryOp<M::Element>,
{
    UnaryMapExpr { operand, op }
}

/// Element-wise absolute value
pub fn abs<M: Matrix>(operand: M) -> UnaryMapExpr<M, Abs> {
    map_unary(operand, Abs)
}

/// Element-wise negation
pub fn neg<M>(operand: M) -> UnaryMapExpr<M, Neg>
where
    M: Matrix,
    Neg: UnaryOp<M::Element>,
{
    map_unary(operand, Neg)
}

/// Multiply every element by `factor`
pub fn scale<M: Matrix>(operand: M, factor: M::Element) -> UnaryMapExpr<M, Scale<M::Element>> {
    map_unary(operand, Scale(factor))
}
