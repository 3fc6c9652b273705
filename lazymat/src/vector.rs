//! Dynamically sized dense column vector
//!
//! A vector of length `n` is an `n x 1` operand, so every expression node,
//! the assignment dispatcher and the parallel tier accept it unchanged.
//! Elements are contiguous without padding. The type reports row-major
//! order: each element is its own major lane, which lets parallel
//! assignment split the vector into stripes.

use core::fmt;
use core::ops::{Index, IndexMut};

use rayon::prelude::*;

use lazymat_core::constants::SIMD_BYTES;
use lazymat_core::validation::{check_index, is_aligned_to};
use lazymat_core::{
    Assign, DenseStorage, Element, MapTrait, Matrix, MatrixMut, Order, Result, RowMajor,
    StorageOrder, UnaryMapTrait,
};

use crate::dense::DynamicMatrix;
use crate::smp::{SmpAssign, SmpDestination, Stripe};

/// Dense column vector with run-time length
#[derive(Clone, PartialEq)]
pub struct DynamicVector<T> {
    data: Vec<T>,
}

impl<T: Element> DynamicVector<T> {
    /// Zero-filled vector of length `len`
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }

    pub fn from_fn<F>(len: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self {
            data: (0..len).map(f).collect(),
        }
    }

    /// Evaluate any `n x 1` matrix-like value into a new vector
    pub fn from_matrix<M>(source: &M) -> Self
    where
        M: Matrix<Element = T> + ?Sized,
    {
        debug_assert_eq!(source.columns(), 1, "Invalid vector size");
        let mut vector = Self::new(source.rows());
        source.assign_to::<_, Assign>(&mut vector);
        vector
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }

    /// Checked element access by position
    pub fn at_index(&self, index: usize) -> Result<T> {
        check_index(index, 0, self.len(), 1)?;
        Ok(self.data[index])
    }

    /// Replace `self` with the result of an expression that may read `self`
    ///
    /// Same contract as [`DynamicMatrix::assign_with`].
    pub fn assign_with<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&Self, &mut Self) -> Result<()>,
    {
        tracing::debug!(len = self.len(), "self-referencing assignment through a temporary");
        let mut tmp = Self::new(self.len());
        build(&*self, &mut tmp)?;
        *self = tmp;
        Ok(())
    }
}

impl<T: Element> Matrix for DynamicVector<T> {
    type Element = T;
    type Order = RowMajor;
    type ResultType = Self;

    const COLUMNS: usize = 1;

    fn rows(&self) -> usize {
        self.data.len()
    }

    fn columns(&self) -> usize {
        1
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> T {
        debug_assert!(row < self.data.len(), "Invalid vector access index");
        debug_assert_eq!(column, 0, "Invalid column access index");
        self.data[row]
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

impl<T: Element> MatrixMut for DynamicVector<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, column: usize) -> &mut T {
        debug_assert!(row < self.data.len(), "Invalid vector access index");
        debug_assert_eq!(column, 0, "Invalid column access index");
        &mut self.data[row]
    }

    fn address(&self) -> *const u8 {
        self as *const Self as *const u8
    }
}

impl<T: Element> DenseStorage for DynamicVector<T> {
    fn zeroed(rows: usize, columns: usize) -> Self {
        debug_assert_eq!(columns, 1, "Invalid vector size");
        Self::new(rows)
    }
}

impl<T: Element> SmpDestination for DynamicVector<T> {
    fn for_each_stripe<F>(&mut self, stripe_len: usize, f: F)
    where
        F: Fn(Stripe<'_, T>) + Send + Sync,
    {
        let stripe_len = stripe_len.max(1);
        self.data
            .par_chunks_mut(stripe_len)
            .enumerate()
            .for_each(|(index, data)| {
                f(Stripe::new(Order::RowMajor, index * stripe_len, 1, 1, data));
            });
    }
}

impl<T: Element> SmpAssign for DynamicVector<T> {}

impl<T, U, V: Element> MapTrait<DynamicVector<U>, V> for DynamicVector<T> {
    type Output = DynamicVector<V>;
}

// A matrix operand can only meet a vector once it is n x 1, e.g. a
// matrix-vector product.
impl<T, U, O: StorageOrder, V: Element> MapTrait<DynamicMatrix<U, O>, V> for DynamicVector<T> {
    type Output = DynamicVector<V>;
}

impl<T, U, O: StorageOrder, V: Element> MapTrait<DynamicVector<U>, V> for DynamicMatrix<T, O> {
    type Output = DynamicVector<V>;
}

impl<T, V: Element> UnaryMapTrait<V> for DynamicVector<T> {
    type Output = DynamicVector<V>;
}

impl<T: Element> Index<usize> for DynamicVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        if let Err(err) = check_index(index, 0, self.len(), 1) {
            panic!("{err}");
        }
        &self.data[index]
    }
}

impl<T: Element> IndexMut<usize> for DynamicVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        if let Err(err) = check_index(index, 0, self.len(), 1) {
            panic!("{err}");
        }
        &mut self.data[index]
    }
}

impl<T: Element> fmt::Debug for DynamicVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicVector<{}> ", T::kind())?;
        f.debug_list().entries(self.data.iter()).finish()
    }
}
