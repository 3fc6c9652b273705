//! Binary element-wise map expression
//!
//! `MapExpr` represents `op(A, B)` applied element by element without
//! evaluating it. Operands are either expressions moved in by value or
//! storage borrowed as `&M`; the node itself is immutable.

use lazymat_core::constants::max_extent;
use lazymat_core::validation::check_same_shape;
use lazymat_core::{
    Accumulate, Assign, BinaryOp, MapTrait, Matrix, MatrixMut, Max, Min, Minus, Plus,
    Result, Schur, SparseMatrixMut, Structure,
};

use crate::assign::kernel::{map_kernel, smp_map_kernel};
use crate::assign::{SmpStrategy, Strategy};
use crate::composite::Composite;
use crate::config::AssignConfig;
use crate::dense::DynamicMatrix;
use crate::smp::{default_smp_assign, SmpAssign, SmpDestination};

/// Element-wise `op(lhs(i, j), rhs(i, j))`
#[derive(Debug, Clone)]
pub struct MapExpr<L, R, OP> {
    lhs: L,
    rhs: R,
    op: OP,
}

impl<L, R, OP> MapExpr<L, R, OP>
where
    L: Matrix,
    R: Matrix,
    OP: BinaryOp<L::Element, R::Element>,
{
    /// Serial assignment tier of this node type
    pub const STRATEGY: Strategy =
        Strategy::select(L::REQUIRES_EVALUATION || R::REQUIRES_EVALUATION);

    /// Parallel assignment tier of this node type
    pub const SMP_STRATEGY: SmpStrategy = SmpStrategy::select(
        L::SMP_ASSIGNABLE,
        R::SMP_ASSIGNABLE,
        L::REQUIRES_EVALUATION || R::REQUIRES_EVALUATION,
    );

    /// Shapes must already have been validated
    pub(crate) fn new(lhs: L, rhs: R, op: OP) -> Self {
        debug_assert_eq!(lhs.dimensions(), rhs.dimensions(), "Invalid matrix sizes");
        Self { lhs, rhs, op }
    }

    pub fn left_operand(&self) -> &L {
        &self.lhs
    }

    pub fn right_operand(&self) -> &R {
        &self.rhs
    }

    pub fn operation(&self) -> OP {
        self.op.clone()
    }
}

impl<L, R, OP> Matrix for MapExpr<L, R, OP>
where
    L: Matrix,
    R: Matrix,
    OP: BinaryOp<L::Element, R::Element>,
    L::ResultType: MapTrait<R::ResultType, OP::Output>,
{
    type Element = OP::Output;
    type Order = <Self::ResultType as Matrix>::Order;
    type ResultType = <L::ResultType as MapTrait<R::ResultType, OP::Output>>::Output;

    const STRUCTURE: Structure = OP::RULE.apply(L::STRUCTURE, R::STRUCTURE);
    const ROWS: usize = max_extent(L::ROWS, R::ROWS);
    const COLUMNS: usize = max_extent(L::COLUMNS, R::COLUMNS);
    const IS_EXPRESSION: bool = true;
    const REQUIRES_EVALUATION: bool = L::REQUIRES_EVALUATION || R::REQUIRES_EVALUATION;
    const SMP_ASSIGNABLE: bool = L::SMP_ASSIGNABLE && R::SMP_ASSIGNABLE;

    fn rows(&self) -> usize {
        self.lhs.rows()
    }

    fn columns(&self) -> usize {
        self.lhs.columns()
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Self::Element {
        debug_assert!(row < self.lhs.rows(), "Invalid row access index");
        debug_assert!(column < self.lhs.columns(), "Invalid column access index");
        self.op.apply(self.lhs.get(row, column), self.rhs.get(row, column))
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        (L::IS_EXPRESSION && self.lhs.can_alias(alias))
            || (R::IS_EXPRESSION && self.rhs.can_alias(alias))
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        self.lhs.is_aliased(alias) || self.rhs.is_aliased(alias)
    }

    fn is_aligned(&self) -> bool {
        self.lhs.is_aligned() && self.rhs.is_aligned()
    }

    fn can_smp_assign(&self) -> bool {
        self.lhs.can_smp_assign() && self.rhs.can_smp_assign()
    }

    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        debug_assert_eq!(target.dimensions(), self.dimensions(), "Invalid matrix sizes");
        match Self::STRATEGY {
            Strategy::Direct => {
                map_kernel::<L, R, OP, D, A>(target, &self.lhs, &self.rhs, &self.op);
            }
            Strategy::Evaluated => {
                let lhs = Composite::serial(&self.lhs);
                let rhs = Composite::serial(&self.rhs);
                map_kernel::<_, _, OP, D, A>(target, &lhs, &rhs, &self.op);
            }
        }
    }

    /// Evaluate densely in the destination's storage order, then copy the
    /// non-zeros over
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

impl<L, R, OP> SmpAssign for MapExpr<L, R, OP>
where
    L: SmpAssign,
    R: SmpAssign,
    OP: BinaryOp<L::Element, R::Element> + Sync,
    L::ResultType: MapTrait<R::ResultType, OP::Output> + SmpDestination,
    R::ResultType: SmpDestination,
{
    fn smp_assign_to<D, A>(&self, target: &mut D, config: &AssignConfig)
    where
        D: SmpDestination<Element = Self::Element>,
        A: Accumulate,
    {
        match Self::SMP_STRATEGY {
            SmpStrategy::Default if !Self::REQUIRES_EVALUATION => {
                default_smp_assign::<Self, D, A>(self, target, config)
            }
            SmpStrategy::Default => {
                let (rows, columns) = self.dimensions();
                if !config.goes_parallel(rows * columns)
                    || !self.can_smp_assign()
                    || !target.can_smp_assign()
                {
                    self.assign_to::<D, A>(target);
                    return;
                }
                let lhs = Composite::parallel(&self.lhs, config);
                let rhs = Composite::parallel(&self.rhs, config);
                smp_map_kernel::<_, _, OP, D, A>(target, &lhs, &rhs, &self.op, config);
            }
            SmpStrategy::Evaluated => {
                let lhs = Composite::parallel(&self.lhs, config);
                let rhs = Composite::parallel(&self.rhs, config);
                smp_map_kernel::<_, _, OP, D, A>(target, &lhs, &rhs, &self.op, config);
            }
        }
    }
}

/// Compose `op(lhs, rhs)` element-wise
///
/// Fails with [`Error::ShapeMismatch`](lazymat_core::Error::ShapeMismatch)
/// unless both operands have the same shape.
pub fn map<L, R, OP>(lhs: L, rhs: R, op: OP) -> Result<MapExpr<L, R, OP>>
where
    L: Matrix,
    R: Matrix,
    OP: BinaryOp<L::Element, R::Element>,
{
    check_same_shape("map", lhs.dimensions(), rhs.dimensions())?;
    Ok(MapExpr::new(lhs, rhs, op))
}

fn named<L, R, OP>(name: &'static str, lhs: L, rhs: R, op: OP) -> Result<MapExpr<L, R, OP>>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
    OP: BinaryOp<L::Element, L::Element>,
{
    check_same_shape(name, lhs.dimensions(), rhs.dimensions())?;
    Ok(MapExpr::new(lhs, rhs, op))
}

/// Element-wise minimum
pub fn min<L, R>(lhs: L, rhs: R) -> Result<MapExpr<L, R, Min>>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
{
    named("min", lhs, rhs, Min)
}

/// Element-wise maximum
pub fn max<L, R>(lhs: L, rhs: R) -> Result<MapExpr<L, R, Max>>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
{
    named("max", lhs, rhs, Max)
}

/// Matrix addition
pub fn add<L, R>(lhs: L, rhs: R) -> Result<MapExpr<L, R, Plus>>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
{
    named("add", lhs, rhs, Plus)
}

/// Matrix subtraction
pub fn sub<L, R>(lhs: L, rhs: R) -> Result<MapExpr<L, R, Minus>>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
{
    named("sub", lhs, rhs, Minus)
}

/// Element-wise (Schur) product
pub fn schur<L, R>(lhs: L, rhs: R) -> Result<MapExpr<L, R, Schur>>
where
    L: Matrix,
    R: Matrix<Element = L::Element>,
{
    named("schur", lhs, rhs, Schur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::{assign, evaluate};
    use crate::expr::{declsym, mul, serial, MultExpr, SerialExpr};
    use crate::fixed::StaticMatrix;
    use lazymat_core::{ColumnMajor, Error, ErrorCategory, MatrixOperations, RowMajor};

    fn rows_a() -> DynamicMatrix<f64> {
        DynamicMatrix::from_rows(&[[1.0, 5.0, 3.0], [4.0, 2.0, 6.0], [7.0, 8.0, 0.0]]).unwrap()
    }

    fn cols_b() -> DynamicMatrix<f64, ColumnMajor> {
        DynamicMatrix::from_rows(&[[9.0, 1.0, 2.0], [0.0, 5.0, 4.0], [3.0, 7.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_max_over_mixed_orders() {
        let a = rows_a();
        let b = cols_b();
        let expr = max(&a, &b).unwrap();
        assert_eq!(expr.dimensions(), (3, 3));
        assert_eq!(expr.get(0, 0), 9.0);
        assert_eq!(expr.at(2, 2), Ok(6.0));
        assert_eq!(expr.at(3, 0), Err(Error::RowOutOfRange { row: 3, rows: 3 }));
        assert_eq!(
            evaluate(&expr).to_rows(),
            vec![vec![9.0, 5.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 6.0]]
        );
    }

    #[test]
    fn test_mismatched_shapes_are_rejected() {
        let a = DynamicMatrix::<f64>::new(3, 4);
        let b = DynamicMatrix::<f64>::new(4, 3);
        let Err(err) = map(&a, &b, |x: f64, y: f64| x + y) else {
            panic!("3x4 and 4x3 operands must not compose");
        };
        assert_eq!(err.category(), ErrorCategory::InvalidArgument);
        assert_eq!(err, Error::shape_mismatch("map", (3, 4), (4, 3)));
        assert!(matches!(add(&a, &b), Err(Error::ShapeMismatch { op: "add", .. })));
    }

    #[test]
    fn test_closure_with_different_output_type() {
        let a = DynamicMatrix::<i32>::from_fn(2, 2, |i, j| (i + 2 * j) as i32);
        let b = DynamicMatrix::<i32, ColumnMajor>::from_fn(2, 2, |_, _| 3);
        let expr = map(&a, &b, |x: i32, y: i32| (x * y) as f64 / 2.0).unwrap();
        let result: DynamicMatrix<f64, RowMajor> = evaluate(&expr);
        assert_eq!(result.get(1, 1), 4.5);
    }

    #[test]
    fn test_static_traits() {
        type Plain = MapExpr<&'static DynamicMatrix<f64>, &'static DynamicMatrix<f64, ColumnMajor>, Max>;
        assert_eq!(Plain::STRATEGY, Strategy::Direct);
        assert_eq!(Plain::SMP_STRATEGY, SmpStrategy::Default);
        assert!(Plain::IS_EXPRESSION);
        assert!(!Plain::REQUIRES_EVALUATION);
        assert!(Plain::STRUCTURE.is_padded());

        type Product = MultExpr<&'static DynamicMatrix<f64>, &'static DynamicMatrix<f64>>;
        type Nested = MapExpr<Product, &'static DynamicMatrix<f64>, Plus>;
        assert_eq!(Nested::STRATEGY, Strategy::Evaluated);
        assert_eq!(Nested::SMP_STRATEGY, SmpStrategy::Default);

        type Serialized = MapExpr<SerialExpr<Product>, &'static DynamicMatrix<f64>, Plus>;
        assert_eq!(Serialized::SMP_STRATEGY, SmpStrategy::Evaluated);
    }

    #[test]
    fn test_static_shape_is_the_larger_extent() {
        type Mixed = MapExpr<&'static StaticMatrix<f64, 2, 3>, &'static DynamicMatrix<f64>, Min>;
        assert_eq!(<Mixed as Matrix>::ROWS, 2);
        assert_eq!(<Mixed as Matrix>::COLUMNS, 3);
        assert!(!<Mixed as Matrix>::STRUCTURE.is_aligned());

        type Fixed = MapExpr<&'static StaticMatrix<f64, 2, 3>, &'static StaticMatrix<f64, 2, 3>, Min>;
        assert!(<Fixed as Matrix>::STRUCTURE.is_aligned());
        let a = StaticMatrix::<f64, 2, 3>::from_fn(|i, j| (i + j) as f64);
        let result: StaticMatrix<f64, 2, 3> = evaluate(&min(&a, &a).unwrap());
        assert_eq!(result, a);
    }

    fn structure_of<M: Matrix>(_: &M) -> Structure {
        M::STRUCTURE
    }

    #[test]
    fn test_min_max_keep_shared_symmetry() {
        let s = DynamicMatrix::<f64>::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
        let t = DynamicMatrix::<f64, ColumnMajor>::from_rows(&[[0.0, 3.0], [3.0, 4.0]]).unwrap();

        let both = max(declsym(&s).unwrap(), declsym(&t).unwrap()).unwrap();
        assert!(structure_of(&both).is_symmetric());

        let one = max(declsym(&s).unwrap(), &t).unwrap();
        assert!(!structure_of(&one).is_symmetric());

        let opaque = map(declsym(&s).unwrap(), declsym(&t).unwrap(), |x: f64, y: f64| x - y)
            .unwrap();
        assert!(!structure_of(&opaque).is_symmetric());
    }

    #[test]
    fn test_aliasing_queries() {
        let a = rows_a();
        let b = cols_b();
        let expr = max(&a, &b).unwrap();
        assert!(expr.is_aliased(a.address()));
        assert!(expr.is_aliased(b.address()));
        assert!(!expr.is_aliased(DynamicMatrix::<f64>::new(3, 3).address()));
        // plain storage operands are not expressions
        assert!(!expr.can_alias(a.address()));

        let s = DynamicMatrix::<f64>::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
        let declared = max(declsym(&s).unwrap(), &s).unwrap();
        assert!(declared.can_alias(s.address()));
        assert!(!declared.can_alias(a.address()));
    }

    #[test]
    fn test_compound_assignment_through_the_node() {
        let a = rows_a();
        let b = cols_b();
        let mut target = DynamicMatrix::<f64, ColumnMajor>::from_fn(3, 3, |_, _| 1.0);
        crate::assign::add_assign(&mut target, &max(&a, &b).unwrap()).unwrap();
        assert_eq!(target.get(0, 0), 10.0);
        assert_eq!(target.get(2, 2), 7.0);
    }

    #[test]
    fn test_evaluated_tier_matches_direct() {
        let a = DynamicMatrix::<i64>::from_fn(5, 5, |i, j| (i * 5 + j) as i64);
        let b = DynamicMatrix::<i64, ColumnMajor>::from_fn(5, 5, |i, j| (i as i64) - (j as i64));
        let product = mul(&a, &b).unwrap();
        let expected = evaluate(&product);

        let expr = sub(mul(&a, &b).unwrap(), &a).unwrap();
        let mut target = DynamicMatrix::<i64>::new(5, 5);
        assign(&mut target, &expr).unwrap();
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(target.get(i, j), expected.get(i, j) - a.get(i, j));
            }
        }

        let serial_expr = sub(serial(mul(&a, &b).unwrap()), &a).unwrap();
        let parallel = crate::smp::smp_evaluate(&serial_expr, &AssignConfig::default().with_smp_threshold(0));
        assert_eq!(parallel, target);
    }
}
