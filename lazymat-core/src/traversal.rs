//! Serial traversal kernels
//!
//! Every dense assignment ends up in [`assign_with`], which walks the
//! destination either linearly along one storage order or in square tiles.
//! The element closure decides how each value is computed; the
//! [`Accumulate`] policy decides how it lands in the destination.

use core::ops::Range;

use crate::constants::BLOCK_SIZE;
use crate::order::{Order, StorageOrder};
use crate::traits::{Accumulate, Element, Matrix, MatrixMut, SparseMatrixMut};

/// Loop structure used to visit every destination position once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Full sweep along the given storage order
    Linear(Order),
    /// Row-blocks then column-blocks of the given edge length
    Blocked(usize),
}

impl Sweep {
    /// Linear when the source and destination agree, tiles otherwise
    pub const fn for_orders(source: Order, target: Order) -> Self {
        if source.same_as(target) {
            Sweep::Linear(target)
        } else {
            Sweep::Blocked(BLOCK_SIZE)
        }
    }
}

/// Visit a `rows x columns` index space in square tiles
pub fn for_each_block<F>(rows: usize, columns: usize, block: usize, mut f: F)
where
    F: FnMut(Range<usize>, Range<usize>),
{
    let block = block.max(1);
    for ii in (0..rows).step_by(block) {
        let iend = (ii + block).min(rows);
        for jj in (0..columns).step_by(block) {
            let jend = (jj + block).min(columns);
            f(ii..iend, jj..jend);
        }
    }
}

/// Write `element(i, j)` into every position of `target`
pub fn assign_with<D, A, F>(target: &mut D, sweep: Sweep, mut element: F)
where
    D: MatrixMut + ?Sized,
    A: Accumulate,
    F: FnMut(usize, usize) -> D::Element,
{
    let (rows, columns) = target.dimensions();
    match sweep {
        Sweep::Linear(Order::RowMajor) => {
            for i in 0..rows {
                for j in 0..columns {
                    A::apply(target.get_mut(i, j), element(i, j));
                }
            }
        }
        Sweep::Linear(Order::ColumnMajor) => {
            for j in 0..columns {
                for i in 0..rows {
                    A::apply(target.get_mut(i, j), element(i, j));
                }
            }
        }
        Sweep::Blocked(block) => {
            for_each_block(rows, columns, block, |row_range, column_range| {
                for i in row_range {
                    for j in column_range.clone() {
                        A::apply(target.get_mut(i, j), element(i, j));
                    }
                }
            });
        }
    }
}

/// Default dense assignment of any source by plain element access
pub fn assign_elementwise<S, D, A>(source: &S, target: &mut D)
where
    S: Matrix + ?Sized,
    D: MatrixMut<Element = S::Element> + ?Sized,
    A: Accumulate,
{
    debug_assert_eq!(source.dimensions(), target.dimensions(), "Invalid matrix sizes");
    let sweep = Sweep::for_orders(
        <S::Order as StorageOrder>::ORDER,
        <D::Order as StorageOrder>::ORDER,
    );
    assign_with::<D, A, _>(target, sweep, |i, j| source.get(i, j));
}

/// Default dense-to-sparse assignment: append every non-zero in the
/// destination's storage order, closing each lane
pub fn assign_sparse_elementwise<S, D>(source: &S, target: &mut D)
where
    S: Matrix + ?Sized,
    D: SparseMatrixMut<Element = S::Element> + ?Sized,
{
    debug_assert_eq!(source.dimensions(), target.dimensions(), "Invalid matrix sizes");
    let order = <D::Order as StorageOrder>::ORDER;
    let (rows, columns) = source.dimensions();
    let (majors, minors) = order.major_minor(rows, columns);
    let zero = <S::Element as Element>::zero();

    for major in 0..majors {
        for minor in 0..minors {
            let (i, j) = order.to_row_column(major, minor);
            let value = source.get(i, j);
            if value != zero {
                target.append(i, j, value);
            }
        }
        target.finalize(major);
    }
}
