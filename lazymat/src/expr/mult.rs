//! Dense matrix product
//!
//! Element access on a product costs a full inner product, so the node
//! reports `REQUIRES_EVALUATION` and every enclosing map materializes it
//! once before traversal.

use lazymat_core::validation::check_product_shape;
use lazymat_core::{
    Accumulate, Assign, BinaryRule, Element, Matrix, MatrixMut, Order, Result,
    SparseMatrixMut, StorageOrder, Structure,
};

use crate::composite::Composite;
use crate::config::AssignConfig;
use crate::dense::DynamicMatrix;
use crate::smp::{parallel_fill, SmpAssign, SmpDestination};

/// `lhs * rhs`, evaluated on assignment
#[derive(Debug, Clone)]
pub struct MultExpr<L, R> {
    lhs: L,
    rhs: R,
}

impl<L: Matrix, R: Matrix<Element = L::Element>> MultExpr<L, R> {
    pub fn left_operand(&self) -> &L {
        &self.lhs
    }

    pub fn right_operand(&self) -> &R {
        &self.rhs
    }
}

#[inline]
fn dot<L, R>(lhs: &L, rhs: &R, row: usize, column: usize) -> L::Element
where
    L: Matrix + ?Sized,
    R: Matrix<Element = L::Element> + ?Sized,
{
    (0..lhs.columns()).fold(<L::Element as Element>::zero(), |sum, k| {
        sum + lhs.get(row, k) * rhs.get(k, column)
    })
}

/// Accumulate the product into a zeroed temporary, walking it in its own
/// storage order
fn multiply_into<L, R, O>(tmp: &mut DynamicMatrix<L::Element, O>, lhs: &L, rhs: &R)
where
    L: Matrix + ?Sized,
    R: Matrix<Element = L::Element> + ?Sized,
    O: StorageOrder,
{
    let (rows, columns) = tmp.dimensions();
    let inner = lhs.columns();
    match O::ORDER {
        Order::RowMajor => {
            for i in 0..rows {
                for k in 0..inner {
                    let a = lhs.get(i, k);
                    for j in 0..columns {
                        let slot = tmp.get_mut(i, j);
                        *slot = *slot + a * rhs.get(k, j);
                    }
                }
            }
        }
        Order::ColumnMajor => {
            for j in 0..columns {
                for k in 0..inner {
                    let b = rhs.get(k, j);
                    for i in 0..rows {
                        let slot = tmp.get_mut(i, j);
                        *slot = *slot + lhs.get(i, k) * b;
                    }
                }
            }
        }
    }
}

impl<L, R> Matrix for MultExpr<L, R>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
{
    type Element = L::Element;
    type Order = L::Order;
    type ResultType = DynamicMatrix<L::Element, L::Order>;

    const STRUCTURE: Structure = BinaryRule::Product.apply(L::STRUCTURE, R::STRUCTURE).numeric();
    const ROWS: usize = L::ROWS;
    const COLUMNS: usize = R::COLUMNS;
    const IS_EXPRESSION: bool = true;
    const REQUIRES_EVALUATION: bool = true;
    const SMP_ASSIGNABLE: bool = L::SMP_ASSIGNABLE && R::SMP_ASSIGNABLE;

    fn rows(&self) -> usize {
        self.lhs.rows()
    }

    fn columns(&self) -> usize {
        self.rhs.columns()
    }

    fn get(&self, row: usize, column: usize) -> Self::Element {
        debug_assert!(row < self.rows(), "Invalid row access index");
        debug_assert!(column < self.columns(), "Invalid column access index");
        dot(&self.lhs, &self.rhs, row, column)
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        self.lhs.is_aliased(alias) || self.rhs.is_aliased(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        self.lhs.is_aliased(alias) || self.rhs.is_aliased(alias)
    }

    fn is_aligned(&self) -> bool {
        false
    }

    fn can_smp_assign(&self) -> bool {
        self.lhs.can_smp_assign() && self.rhs.can_smp_assign()
    }

    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        let lhs = Composite::serial(&self.lhs);
        let rhs = Composite::serial(&self.rhs);
        let (rows, columns) = self.dimensions();
        let mut tmp = DynamicMatrix::<Self::Element, D::Order>::new(rows, columns);
        multiply_into(&mut tmp, &lhs, &rhs);
        tmp.assign_to::<D, A>(target);
    }

    fn assign_to_sparse<D>(&self, target: &mut D)
    where
        D: SparseMatrixMut<Element = Self::Element> + ?Sized,
    {
        let (rows, columns) = self.dimensions();
        let mut tmp = DynamicMatrix::<Self::Element, D::Order>::new(rows, columns);
        self.assign_to::<_, Assign>(&mut tmp);
        tmp.assign_to_sparse(target);
    }
}

impl<L, R> SmpAssign for MultExpr<L, R>
where
    L: SmpAssign,
    R: SmpAssign<Element = L::Element>,
    L::ResultType: SmpDestination,
    R::ResultType: SmpDestination,
{
    fn smp_assign_to<D, A>(&self, target: &mut D, config: &AssignConfig)
    where
        D: SmpDestination<Element = Self::Element>,
        A: Accumulate,
    {
        let (rows, columns) = self.dimensions();
        if !config.goes_parallel(rows * columns) || !self.can_smp_assign() || !target.can_smp_assign()
        {
            self.assign_to::<D, A>(target);
            return;
        }
        let lhs = Composite::parallel(&self.lhs, config);
        let rhs = Composite::parallel(&self.rhs, config);
        parallel_fill::<D, A, _>(target, config, |i, j| dot(&lhs, &rhs, i, j));
    }
}

/// Matrix product `lhs * rhs`
///
/// Fails with [`Error::ShapeMismatch`](lazymat_core::Error::ShapeMismatch)
/// unless the inner dimensions agree.
pub fn mul<L, R>(lhs: L, rhs: R) -> Result<MultExpr<L, R>>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
{
    check_product_shape(lhs.dimensions(), rhs.dimensions())?;
    Ok(MultExpr { lhs, rhs })
}
