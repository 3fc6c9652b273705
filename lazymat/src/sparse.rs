//! Compressed sparse matrix (CSR for row-major, CSC for column-major)
//!
//! Filled through the ordered insertion interface: elements are appended
//! lane by lane with strictly increasing minor index, and every major lane
//! is closed with `finalize`.

use core::fmt;
use core::marker::PhantomData;

use lazymat_core::{
    Element, Matrix, RowMajor, SparseMatrixMut, SparseStorage, StorageOrder, Structure,
};

use crate::dense::DynamicMatrix;
use crate::smp::SmpAssign;

/// Sparse matrix in compressed lane format
#[derive(Clone)]
pub struct CompressedMatrix<T, O = RowMajor> {
    rows: usize,
    columns: usize,
    /// `pointers[k]..pointers[k + 1]` spans lane `k` in `indices`/`values`
    pointers: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<T>,
    /// Number of lanes closed so far
    finalized: usize,
    order: PhantomData<O>,
}

impl<T: Element, O: StorageOrder> CompressedMatrix<T, O> {
    /// Empty matrix of the given shape
    pub fn new(rows: usize, columns: usize) -> Self {
        let (majors, _) = O::ORDER.major_minor(rows, columns);
        Self {
            rows,
            columns,
            pointers: vec![0; majors + 1],
            indices: Vec::new(),
            values: Vec::new(),
            finalized: majors,
            order: PhantomData,
        }
    }

    /// Stored elements of major lane `major` as `(minor, value)` pairs
    pub fn lane(&self, major: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let span = self.pointers[major]..self.pointers[major + 1];
        self.indices[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    fn majors(&self) -> usize {
        self.pointers.len() - 1
    }

    fn find(&self, row: usize, column: usize) -> Option<T> {
        let (major, minor) = O::ORDER.major_minor(row, column);
        let span = self.pointers[major]..self.pointers[major + 1];
        self.indices[span.clone()]
            .binary_search(&minor)
            .ok()
            .map(|offset| self.values[span.start + offset])
    }
}

impl<T: Element, O: StorageOrder> Matrix for CompressedMatrix<T, O> {
    type Element = T;
    type Order = O;
    type ResultType = DynamicMatrix<T, O>;

    const STRUCTURE: Structure = Structure::EMPTY;

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn get(&self, row: usize, column: usize) -> T {
        debug_assert!(row < self.rows, "Invalid row access index");
        debug_assert!(column < self.columns, "Invalid column access index");
        self.find(row, column).unwrap_or_else(T::zero)
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        self.is_aliased(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        core::ptr::eq(self as *const Self as *const u8, alias)
    }
}

impl<T: Element, O: StorageOrder> SparseMatrixMut for CompressedMatrix<T, O> {
    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn reset(&mut self) {
        self.indices.clear();
        self.values.clear();
        self.pointers.fill(0);
        self.finalized = 0;
    }

    fn reserve(&mut self, nonzeros: usize) {
        self.indices.reserve(nonzeros);
        self.values.reserve(nonzeros);
    }

    fn append(&mut self, row: usize, column: usize, value: T) {
        let (major, minor) = O::ORDER.major_minor(row, column);
        debug_assert_eq!(major, self.finalized, "Append outside the current lane");
        debug_assert!(
            self.values.len() == self.pointers[major]
                || self.indices.last().is_some_and(|&last| last < minor),
            "Appended index out of order"
        );
        self.indices.push(minor);
        self.values.push(value);
    }

    fn finalize(&mut self, major: usize) {
        debug_assert_eq!(major, self.finalized, "Lanes must be finalized in order");
        self.pointers[major + 1] = self.values.len();
        self.finalized = major + 1;
        if major + 1 < self.majors() {
            self.pointers[major + 2..].fill(self.values.len());
        }
    }
}

impl<T: Element, O: StorageOrder> SparseStorage for CompressedMatrix<T, O> {
    fn with_shape(rows: usize, columns: usize) -> Self {
        let mut matrix = Self::new(rows, columns);
        matrix.finalized = 0;
        matrix
    }
}

impl<T: Element, O: StorageOrder> SmpAssign for CompressedMatrix<T, O> {}

impl<T: Element, O: StorageOrder> fmt::Debug for CompressedMatrix<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedMatrix")
            .field("order", &O::ORDER)
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("pointers", &self.pointers)
            .field("indices", &self.indices)
            .field("values", &self.values)
            .finish()
    }
}
