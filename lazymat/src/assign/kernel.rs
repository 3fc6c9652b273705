//! Element kernels shared by the serial and parallel tiers

use lazymat_core::validation::check_property;
use lazymat_core::{
    Accumulate, BinaryOp, Matrix, MatrixMut, Property, StorageOrder, Sweep, UnaryOp,
};
use lazymat_core::traversal::assign_with;

use super::strategy::Plan;
use crate::config::AssignConfig;
use crate::smp::{parallel_fill, SmpDestination};

/// Traversal plan for a binary map into a `D`-ordered destination
pub(crate) fn map_plan<L, R, D>() -> Plan
where
    L: Matrix + ?Sized,
    R: Matrix + ?Sized,
    D: Matrix + ?Sized,
{
    Plan::select(
        <L::Order as StorageOrder>::ORDER,
        <R::Order as StorageOrder>::ORDER,
        L::STRUCTURE,
        R::STRUCTURE,
        <D::Order as StorageOrder>::ORDER,
    )
}

fn debug_check_transposition<L, R>(plan: &Plan, lhs: &L, rhs: &R)
where
    L: Matrix + ?Sized,
    R: Matrix + ?Sized,
{
    debug_assert!(
        !plan.transpose_lhs || check_property(lhs, Property::Symmetric).is_ok(),
        "Left operand is declared symmetric but is not"
    );
    debug_assert!(
        !plan.transpose_rhs || check_property(rhs, Property::Symmetric).is_ok(),
        "Right operand is declared symmetric but is not"
    );
}

/// Serial direct map: `target (op)= op(lhs, rhs)`
pub(crate) fn map_kernel<L, R, OP, D, A>(target: &mut D, lhs: &L, rhs: &R, op: &OP)
where
    L: Matrix + ?Sized,
    R: Matrix + ?Sized,
    OP: BinaryOp<L::Element, R::Element>,
    D: MatrixMut<Element = OP::Output> + ?Sized,
    A: Accumulate,
{
    debug_assert_eq!(target.dimensions(), lhs.dimensions(), "Invalid matrix sizes");
    let plan = map_plan::<L, R, D>();
    debug_check_transposition(&plan, lhs, rhs);

    match (plan.transpose_lhs, plan.transpose_rhs) {
        (false, false) => assign_with::<D, A, _>(target, plan.sweep, |i, j| {
            op.apply(lhs.get(i, j), rhs.get(i, j))
        }),
        (true, false) => assign_with::<D, A, _>(target, plan.sweep, |i, j| {
            op.apply(lhs.get(j, i), rhs.get(i, j))
        }),
        (false, true) => assign_with::<D, A, _>(target, plan.sweep, |i, j| {
            op.apply(lhs.get(i, j), rhs.get(j, i))
        }),
        (true, true) => assign_with::<D, A, _>(target, plan.sweep, |i, j| {
            op.apply(lhs.get(j, i), rhs.get(j, i))
        }),
    }
}

/// Parallel direct map over operands that are cheap to index
pub(crate) fn smp_map_kernel<L, R, OP, D, A>(
    target: &mut D,
    lhs: &L,
    rhs: &R,
    op: &OP,
    config: &AssignConfig,
) where
    L: Matrix + Sync + ?Sized,
    R: Matrix + Sync + ?Sized,
    OP: BinaryOp<L::Element, R::Element> + Sync,
    D: SmpDestination<Element = OP::Output>,
    A: Accumulate,
{
    let (rows, columns) = target.dimensions();
    if !config.goes_parallel(rows * columns) {
        map_kernel::<L, R, OP, D, A>(target, lhs, rhs, op);
        return;
    }
    let plan = map_plan::<L, R, D>();
    debug_check_transposition(&plan, lhs, rhs);

    match (plan.transpose_lhs, plan.transpose_rhs) {
        (false, false) => parallel_fill::<D, A, _>(target, config, |i, j| {
            op.apply(lhs.get(i, j), rhs.get(i, j))
        }),
        (true, false) => parallel_fill::<D, A, _>(target, config, |i, j| {
            op.apply(lhs.get(j, i), rhs.get(i, j))
        }),
        (false, true) => parallel_fill::<D, A, _>(target, config, |i, j| {
            op.apply(lhs.get(i, j), rhs.get(j, i))
        }),
        (true, true) => parallel_fill::<D, A, _>(target, config, |i, j| {
            op.apply(lhs.get(j, i), rhs.get(j, i))
        }),
    }
}

/// Serial unary map: `target (op)= op(operand)`
pub(crate) fn unary_kernel<M, OP, D, A>(target: &mut D, operand: &M, op: &OP)
where
    M: Matrix + ?Sized,
    OP: UnaryOp<M::Element>,
    D: MatrixMut<Element = OP::Output> + ?Sized,
    A: Accumulate,
{
    debug_assert_eq!(target.dimensions(), operand.dimensions(), "Invalid matrix sizes");
    let sweep = Sweep::for_orders(
        <M::Order as StorageOrder>::ORDER,
        <D::Order as StorageOrder>::ORDER,
    );
    assign_with::<D, A, _>(target, sweep, |i, j| op.apply(operand.get(i, j)));
}
