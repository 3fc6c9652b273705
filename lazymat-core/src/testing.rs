//! Small fixed-size matrix used by the unit tests of this crate

use crate::order::RowMajor;
use crate::traits::{DenseStorage, Matrix, MatrixMut};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Grid3(pub [[i32; 3]; 3]);

impl Matrix for Grid3 {
    type Element = i32;
    type Order = RowMajor;
    type ResultType = Grid3;

    const ROWS: usize = 3;
    const COLUMNS: usize = 3;

    fn rows(&self) -> usize {
        3
    }

    fn columns(&self) -> usize {
        3
    }

    fn get(&self, row: usize, column: usize) -> i32 {
        self.0[row][column]
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        self.is_aliased(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        core::ptr::eq(self.address(), alias)
    }
}

impl MatrixMut for Grid3 {
    fn get_mut(&mut self, row: usize, column: usize) -> &mut i32 {
        &mut self.0[row][column]
    }

    fn address(&self) -> *const u8 {
        self as *const Self as *const u8
    }
}

impl DenseStorage for Grid3 {
    fn zeroed(rows: usize, columns: usize) -> Self {
        debug_assert_eq!((rows, columns), (3, 3));
        Grid3::default()
    }
}
