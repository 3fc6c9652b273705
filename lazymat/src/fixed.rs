//! Fixed-size dense matrix
//!
//! Row-major storage with the shape in the type, aligned to the vector
//! register width so it reports `ALIGNED` statically.

use rayon::prelude::*;

use lazymat_core::validation::check_index;
use lazymat_core::{
    CombineOrder, DenseStorage, Element, MapTrait, Matrix, MatrixMut, Order,
    RowMajor, StorageOrder, Structure, UnaryMapTrait,
};

use crate::dense::DynamicMatrix;
use crate::smp::{SmpAssign, SmpDestination, Stripe};

/// `M x N` matrix stored inline
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(32))]
pub struct StaticMatrix<T, const M: usize, const N: usize> {
    data: [[T; N]; M],
}

impl<T: Element, const M: usize, const N: usize> StaticMatrix<T, M, N> {
    pub fn new() -> Self {
        Self {
            data: [[T::zero(); N]; M],
        }
    }

    pub fn from_rows(rows: [[T; N]; M]) -> Self {
        Self { data: rows }
    }

    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut matrix = Self::new();
        for (i, row) in matrix.data.iter_mut().enumerate() {
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = f(i, j);
            }
        }
        matrix
    }

    pub fn as_rows(&self) -> &[[T; N]; M] {
        &self.data
    }
}

impl<T: Element, const M: usize, const N: usize> Default for StaticMatrix<T, M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, const M: usize, const N: usize> Matrix for StaticMatrix<T, M, N> {
    type Element = T;
    type Order = RowMajor;
    type ResultType = Self;

    const STRUCTURE: Structure = Structure::ALIGNED;
    const ROWS: usize = M;
    const COLUMNS: usize = N;

    fn rows(&self) -> usize {
        M
    }

    fn columns(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> T {
        debug_assert!(check_index(row, column, M, N).is_ok());
        self.data[row][column]
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        self.is_aliased(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        core::ptr::eq(self.address(), alias)
    }

    fn is_aligned(&self) -> bool {
        true
    }
}

impl<T: Element, const M: usize, const N: usize> MatrixMut for StaticMatrix<T, M, N> {
    #[inline]
    fn get_mut(&mut self, row: usize, column: usize) -> &mut T {
        debug_assert!(check_index(row, column, M, N).is_ok());
        &mut self.data[row][column]
    }

    fn address(&self) -> *const u8 {
        self as *const Self as *const u8
    }
}

impl<T: Element, const M: usize, const N: usize> DenseStorage for StaticMatrix<T, M, N> {
    fn zeroed(rows: usize, columns: usize) -> Self {
        debug_assert_eq!((rows, columns), (M, N), "Invalid matrix sizes");
        Self::new()
    }
}

impl<T: Element, const M: usize, const N: usize> SmpDestination for StaticMatrix<T, M, N> {
    fn for_each_stripe<F>(&mut self, stripe_len: usize, f: F)
    where
        F: Fn(Stripe<'_, T>) + Send + Sync,
    {
        let stripe_len = stripe_len.max(1);
        self.data
            .as_flattened_mut()
            .par_chunks_mut((stripe_len * N).max(1))
            .enumerate()
            .for_each(|(index, data)| {
                f(Stripe::new(Order::RowMajor, index * stripe_len, N, N, data));
            });
    }
}

impl<T: Element, const M: usize, const N: usize> SmpAssign for StaticMatrix<T, M, N> {}

impl<T, U, V, const M: usize, const N: usize> MapTrait<StaticMatrix<U, M, N>, V>
    for StaticMatrix<T, M, N>
where
    V: Element,
{
    type Output = StaticMatrix<V, M, N>;
}

impl<T, U, O, V, const M: usize, const N: usize> MapTrait<DynamicMatrix<U, O>, V>
    for StaticMatrix<T, M, N>
where
    O: StorageOrder,
    RowMajor: CombineOrder<O>,
    V: Element,
{
    type Output = DynamicMatrix<V, <RowMajor as CombineOrder<O>>::Output>;
}

impl<T, V: Element, const M: usize, const N: usize> UnaryMapTrait<V> for StaticMatrix<T, M, N> {
    type Output = StaticMatrix<V, M, N>;
}
