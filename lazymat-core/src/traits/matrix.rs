//! Matrix capability traits
//!
//! These traits are the contract between expression nodes, storage
//! containers and the assignment dispatcher. Every operand and every
//! expression is a [`Matrix`]; destinations are [`MatrixMut`] (dense) or
//! [`SparseMatrixMut`] (sparse).

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::element::Element;
use super::op::Accumulate;
use crate::error::Result;
use crate::order::StorageOrder;
use crate::structure::Structure;
use crate::traversal;
use crate::validation::check_index;

/// Read access to a matrix-like operand
///
/// Associated constants are the per-type facts the dispatcher selects on;
/// they never depend on a particular instance.
pub trait Matrix {
    /// The element type produced by element access
    type Element: Element;

    /// Storage order of the type (or of its natural result for expressions)
    type Order: StorageOrder;

    /// Container an instance evaluates into
    type ResultType: DenseStorage<Element = Self::Element, Order = Self::Order>;

    /// Structural properties proven for every instance
    const STRUCTURE: Structure = Structure::EMPTY;

    /// Statically known row count, 0 if only known at run time
    const ROWS: usize = 0;

    /// Statically known column count, 0 if only known at run time
    const COLUMNS: usize = 0;

    /// True for expression nodes, false for storage
    const IS_EXPRESSION: bool = false;

    /// Element access is expensive and must be materialized before blocked
    /// traversal
    const REQUIRES_EVALUATION: bool = false;

    /// The type may take part in parallel assignment
    const SMP_ASSIGNABLE: bool = true;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Get matrix dimensions as (rows, columns)
    fn dimensions(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    /// Unchecked element access; indices are asserted in debug builds only
    fn get(&self, row: usize, column: usize) -> Self::Element;

    /// Checked element access
    fn at(&self, row: usize, column: usize) -> Result<Self::Element> {
        check_index(row, column, self.rows(), self.columns())?;
        Ok(self.get(row, column))
    }

    /// Whether evaluating this value could read from memory at `alias`
    fn can_alias(&self, alias: *const u8) -> bool;

    /// Whether this value concretely reads from memory at `alias`
    fn is_aliased(&self, alias: *const u8) -> bool;

    /// Storage is aligned for vectorized access
    fn is_aligned(&self) -> bool {
        Self::STRUCTURE.is_aligned()
    }

    /// This instance may be assigned in parallel
    fn can_smp_assign(&self) -> bool {
        Self::SMP_ASSIGNABLE
    }

    /// Write (or accumulate) every element into a dense destination
    ///
    /// The default sweeps the destination directly; expression nodes
    /// override this with their own strategy.
    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        traversal::assign_elementwise::<Self, D, A>(self, target);
    }

    /// Write every non-zero element into a reset sparse destination
    fn assign_to_sparse<D>(&self, target: &mut D)
    where
        D: SparseMatrixMut<Element = Self::Element> + ?Sized,
    {
        traversal::assign_sparse_elementwise(self, target);
    }
}

/// Dense destination with indexed write access
pub trait MatrixMut: Matrix {
    /// Unchecked mutable element access
    fn get_mut(&mut self, row: usize, column: usize) -> &mut Self::Element;

    fn set(&mut self, row: usize, column: usize, value: Self::Element) {
        *self.get_mut(row, column) = value;
    }

    /// Address compared against operands' aliasing queries
    fn address(&self) -> *const u8;
}

/// Dense container that can be created to hold an evaluated result
pub trait DenseStorage: MatrixMut + Sized {
    /// A zero-filled container of the given shape
    fn zeroed(rows: usize, columns: usize) -> Self;
}

/// Sparse destination filled through ordered insertion
///
/// Elements are appended lane by lane in storage order and each major lane
/// is closed with [`finalize`](Self::finalize), including empty ones.
pub trait SparseMatrixMut: Matrix {
    /// Get number of non-zero elements stored
    fn nnz(&self) -> usize;

    /// Drop every stored element, keeping the shape
    fn reset(&mut self);

    /// Reserve room for `nonzeros` additional elements
    fn reserve(&mut self, nonzeros: usize);

    /// Append an element behind the last one of the current lane
    fn append(&mut self, row: usize, column: usize, value: Self::Element);

    /// Close major lane `major`
    fn finalize(&mut self, major: usize);
}

/// Sparse container that can be created empty
pub trait SparseStorage: SparseMatrixMut + Sized {
    fn with_shape(rows: usize, columns: usize) -> Self;
}

/// Result container deduction for a binary map producing `T`
///
/// Implemented per container pair, so e.g. two fixed-size operands can map
/// into a fixed-size result while anything involving a dynamic operand maps
/// into a dynamic one.
pub trait MapTrait<Rhs, T: Element> {
    type Output: DenseStorage<Element = T>;
}

/// Result container deduction for a unary map producing `T`
pub trait UnaryMapTrait<T: Element> {
    type Output: DenseStorage<Element = T>;
}

impl<M: Matrix + ?Sized> Matrix for &M {
    type Element = M::Element;
    type Order = M::Order;
    type ResultType = M::ResultType;

    const STRUCTURE: Structure = M::STRUCTURE;
    const ROWS: usize = M::ROWS;
    const COLUMNS: usize = M::COLUMNS;
    const IS_EXPRESSION: bool = M::IS_EXPRESSION;
    const REQUIRES_EVALUATION: bool = M::REQUIRES_EVALUATION;
    const SMP_ASSIGNABLE: bool = M::SMP_ASSIGNABLE;

    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn columns(&self) -> usize {
        (**self).columns()
    }

    fn get(&self, row: usize, column: usize) -> Self::Element {
        (**self).get(row, column)
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        (**self).can_alias(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        (**self).is_aliased(alias)
    }

    fn is_aligned(&self) -> bool {
        (**self).is_aligned()
    }

    fn can_smp_assign(&self) -> bool {
        (**self).can_smp_assign()
    }

    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        (**self).assign_to::<D, A>(target);
    }

    fn assign_to_sparse<D>(&self, target: &mut D)
    where
        D: SparseMatrixMut<Element = Self::Element> + ?Sized,
    {
        (**self).assign_to_sparse(target);
    }
}

/// Extension trait for row/column extraction (requires alloc feature)
#[cfg(feature = "alloc")]
pub trait MatrixOperations: Matrix {
    /// All elements of a row, in column order
    fn row(&self, row_index: usize) -> Vec<Self::Element> {
        (0..self.columns()).map(|j| self.get(row_index, j)).collect()
    }

    /// All elements of a column, in row order
    fn column(&self, column_index: usize) -> Vec<Self::Element> {
        (0..self.rows()).map(|i| self.get(i, column_index)).collect()
    }

    /// Every element, row by row
    fn to_rows(&self) -> Vec<Vec<Self::Element>> {
        (0..self.rows()).map(|i| self.row(i)).collect()
    }
}

#[cfg(feature = "alloc")]
impl<M: Matrix + ?Sized> MatrixOperations for M {}
