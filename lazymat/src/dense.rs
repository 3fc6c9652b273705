//! Dynamically sized dense matrix
//!
//! Storage is a single `Vec` laid out lane by lane in the matrix's storage
//! order. Each lane is padded up to a whole number of vector registers so
//! lanes start on the same boundary relative to the allocation.

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use rayon::prelude::*;

use lazymat_core::constants::{simd_lanes, SIMD_BYTES};
use lazymat_core::validation::{align_to_boundary, check_index, check_same_shape, is_aligned_to};
use lazymat_core::{
    Assign, CombineOrder, DenseStorage, Element, MapTrait, Matrix, MatrixMut, Order,
    Result, RowMajor, StorageOrder, Structure, UnaryMapTrait,
};

use crate::fixed::StaticMatrix;
use crate::smp::{SmpAssign, SmpDestination, Stripe};

/// Dense matrix with run-time shape
#[derive(Clone)]
pub struct DynamicMatrix<T, O = RowMajor> {
    data: Vec<T>,
    rows: usize,
    columns: usize,
    spacing: usize,
    order: PhantomData<O>,
}

impl<T: Element, O: StorageOrder> DynamicMatrix<T, O> {
    /// Zero-filled matrix of the given shape
    pub fn new(rows: usize, columns: usize) -> Self {
        let (majors, minors) = O::ORDER.major_minor(rows, columns);
        let spacing = Self::padded(minors);
        Self {
            data: vec![T::zero(); majors * spacing],
            rows,
            columns,
            spacing,
            order: PhantomData,
        }
    }

    /// Matrix whose element `(i, j)` is `f(i, j)`
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut matrix = Self::new(rows, columns);
        for i in 0..rows {
            for j in 0..columns {
                *matrix.slot_mut(i, j) = f(i, j);
            }
        }
        matrix
    }

    /// Matrix built from logical rows, independent of storage order
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());
        for row in rows {
            check_same_shape("from_rows", (1, columns), (1, row.as_ref().len()))?;
        }
        Ok(Self::from_fn(rows.len(), columns, |i, j| rows[i].as_ref()[j]))
    }

    /// Evaluate any matrix-like value into a new container
    pub fn from_matrix<M>(source: &M) -> Self
    where
        M: Matrix<Element = T> + ?Sized,
    {
        let (rows, columns) = source.dimensions();
        let mut matrix = Self::new(rows, columns);
        source.assign_to::<_, Assign>(&mut matrix);
        matrix
    }

    /// Distance in elements between the starts of two lanes
    pub fn spacing(&self) -> usize {
        self.spacing
    }

    /// Raw storage including lane padding
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Change the shape; all elements are reset to zero
    pub fn resize(&mut self, rows: usize, columns: usize) {
        *self = Self::new(rows, columns);
    }

    /// Copy of this matrix in the other storage order
    pub fn to_opposite(&self) -> DynamicMatrix<T, O::Opposite> {
        DynamicMatrix::from_matrix(self)
    }

    /// Replace `self` with the result of an expression that may read `self`
    ///
    /// `build` receives the current contents and a zeroed temporary of the
    /// same shape to assign into. `self` is only replaced once `build`
    /// succeeds, so a source such as `map(c, &b, f)` never observes
    /// partially written elements.
    pub fn assign_with<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&Self, &mut Self) -> Result<()>,
    {
        tracing::debug!(
            rows = self.rows,
            columns = self.columns,
            "self-referencing assignment through a temporary"
        );
        let mut tmp = Self::new(self.rows, self.columns);
        build(&*self, &mut tmp)?;
        *self = tmp;
        Ok(())
    }

    fn padded(minors: usize) -> usize {
        if minors == 0 {
            0
        } else {
            align_to_boundary(minors, simd_lanes::<T>())
        }
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        match O::ORDER {
            Order::RowMajor => row * self.spacing + column,
            Order::ColumnMajor => column * self.spacing + row,
        }
    }

    #[inline]
    fn slot_mut(&mut self, row: usize, column: usize) -> &mut T {
        let offset = self.offset(row, column);
        &mut self.data[offset]
    }
}

impl<T: Element, O: StorageOrder> Matrix for DynamicMatrix<T, O> {
    type Element = T;
    type Order = O;
    type ResultType = Self;

    const STRUCTURE: Structure = Structure::PADDED;

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> T {
        debug_assert!(row < self.rows, "Invalid row access index");
        debug_assert!(column < self.columns, "Invalid column access index");
        self.data[self.offset(row, column)]
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        self.is_aliased(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        core::ptr::eq(self.address(), alias)
    }

    fn is_aligned(&self) -> bool {
        is_aligned_to(self.data.as_ptr() as *const u8, SIMD_BYTES)
    }
}

impl<T: Element, O: StorageOrder> MatrixMut for DynamicMatrix<T, O> {
    #[inline]
    fn get_mut(&mut self, row: usize, column: usize) -> &mut T {
        debug_assert!(row < self.rows, "Invalid row access index");
        debug_assert!(column < self.columns, "Invalid column access index");
        self.slot_mut(row, column)
    }

    fn address(&self) -> *const u8 {
        self as *const Self as *const u8
    }
}

impl<T: Element, O: StorageOrder> DenseStorage for DynamicMatrix<T, O> {
    fn zeroed(rows: usize, columns: usize) -> Self {
        Self::new(rows, columns)
    }
}

impl<T: Element, O: StorageOrder> SmpDestination for DynamicMatrix<T, O> {
    fn for_each_stripe<F>(&mut self, stripe_len: usize, f: F)
    where
        F: Fn(Stripe<'_, T>) + Send + Sync,
    {
        let order = O::ORDER;
        let spacing = self.spacing;
        let (_, minors) = order.major_minor(self.rows, self.columns);
        let stripe_len = stripe_len.max(1);
        self.data
            .par_chunks_mut((stripe_len * spacing).max(1))
            .enumerate()
            .for_each(|(index, data)| {
                f(Stripe::new(order, index * stripe_len, spacing, minors, data));
            });
    }
}

impl<T: Element, O: StorageOrder> SmpAssign for DynamicMatrix<T, O> {}

impl<T, U, O1, O2, V> MapTrait<DynamicMatrix<U, O2>, V> for DynamicMatrix<T, O1>
where
    O1: CombineOrder<O2>,
    O2: StorageOrder,
    V: Element,
{
    type Output = DynamicMatrix<V, <O1 as CombineOrder<O2>>::Output>;
}

impl<T, U, O, V, const M: usize, const N: usize> MapTrait<StaticMatrix<U, M, N>, V>
    for DynamicMatrix<T, O>
where
    O: CombineOrder<RowMajor>,
    V: Element,
{
    type Output = DynamicMatrix<V, <O as CombineOrder<RowMajor>>::Output>;
}

impl<T, O: StorageOrder, V: Element> UnaryMapTrait<V> for DynamicMatrix<T, O> {
    type Output = DynamicMatrix<V, O>;
}

impl<T: Element, O: StorageOrder> Index<(usize, usize)> for DynamicMatrix<T, O> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        if let Err(err) = check_index(row, column, self.rows, self.columns) {
            panic!("{err}");
        }
        &self.data[self.offset(row, column)]
    }
}

impl<T: Element, O: StorageOrder> IndexMut<(usize, usize)> for DynamicMatrix<T, O> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        if let Err(err) = check_index(row, column, self.rows, self.columns) {
            panic!("{err}");
        }
        self.slot_mut(row, column)
    }
}

impl<T, O1, O2> PartialEq<DynamicMatrix<T, O2>> for DynamicMatrix<T, O1>
where
    T: Element,
    O1: StorageOrder,
    O2: StorageOrder,
{
    fn eq(&self, other: &DynamicMatrix<T, O2>) -> bool {
        self.dimensions() == other.dimensions()
            && (0..self.rows).all(|i| (0..self.columns).all(|j| self.get(i, j) == other.get(i, j)))
    }
}

impl<T: Element, O: StorageOrder> fmt::Debug for DynamicMatrix<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DynamicMatrix<{}, {}> {}x{} [", T::kind(), O::ORDER, self.rows, self.columns)?;
        for i in 0..self.rows {
            write!(f, "  ")?;
            f.debug_list()
                .entries((0..self.columns).map(|j| self.get(i, j)))
                .finish()?;
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazymat_core::{ColumnMajor, Error, MatrixOperations};

    #[test]
    fn test_layout_is_padded() {
        let m = DynamicMatrix::<f64>::new(3, 5);
        assert_eq!(m.spacing(), 8);
        assert_eq!(m.as_slice().len(), 24);

        let c = DynamicMatrix::<f32, ColumnMajor>::new(3, 5);
        assert_eq!(c.spacing(), 8);
        assert_eq!(c.as_slice().len(), 40);

        let empty = DynamicMatrix::<f64>::new(4, 0);
        assert_eq!(empty.as_slice().len(), 0);
    }

    #[test]
    fn test_from_rows_in_both_orders() {
        let rows = [[1, 2, 3], [4, 5, 6]];
        let r = DynamicMatrix::<i32>::from_rows(&rows).unwrap();
        let c = DynamicMatrix::<i32, ColumnMajor>::from_rows(&rows).unwrap();
        assert_eq!(r, c);
        assert_eq!(c.get(1, 0), 4);
        assert_eq!(c.as_slice()[1], 4);
        assert_eq!(r.row(1), vec![4, 5, 6]);
        assert_eq!(c.column(2), vec![3, 6]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let ragged: [&[i32]; 2] = [&[1, 2, 3], &[4, 5]];
        let err = DynamicMatrix::<i32>::from_rows(&ragged).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { op: "from_rows", .. }));
    }

    #[test]
    fn test_checked_access() {
        let m = DynamicMatrix::<i32>::from_fn(2, 3, |i, j| (i * 3 + j) as i32);
        assert_eq!(m.at(1, 2), Ok(5));
        assert_eq!(m.at(2, 0), Err(Error::RowOutOfRange { row: 2, rows: 2 }));
        assert_eq!(
            m.at(0, 3),
            Err(Error::ColumnOutOfRange {
                column: 3,
                columns: 3
            })
        );
    }

    #[test]
    fn test_index_and_opposite() {
        let mut m = DynamicMatrix::<f64>::new(2, 2);
        m[(0, 1)] = 3.0;
        m[(1, 0)] = -1.0;
        let t = m.to_opposite();
        assert_eq!(t.get(0, 1), 3.0);
        assert_eq!(t, m);
    }

    #[test]
    fn test_aliasing_is_by_identity() {
        let a = DynamicMatrix::<f64>::new(2, 2);
        let b = a.clone();
        assert!(a.is_aliased(a.address()));
        assert!(!a.is_aliased(b.address()));
        assert!((&a).can_alias(a.address()));
    }

    #[test]
    fn test_stripes_cover_every_lane() {
        let mut m = DynamicMatrix::<i64, ColumnMajor>::new(5, 7);
        m.for_each_stripe(2, |mut stripe| {
            stripe.fill::<Assign, _>(|i, j| (i * 10 + j) as i64);
        });
        assert_eq!(m, DynamicMatrix::<i64>::from_fn(5, 7, |i, j| (i * 10 + j) as i64));
    }
}
