//! Index bounds and pointer alignment validation

use crate::error::{Error, Result};

/// Validate a `(row, column)` index against a matrix shape
pub const fn check_index(row: usize, column: usize, rows: usize, columns: usize) -> Result<()> {
    if row >= rows {
        return Err(Error::RowOutOfRange { row, rows });
    }
    if column >= columns {
        return Err(Error::ColumnOutOfRange { column, columns });
    }
    Ok(())
}

/// True if `ptr` sits on a multiple of `boundary` bytes
///
/// `boundary` must be a power of two.
pub fn is_aligned_to(ptr: *const u8, boundary: usize) -> bool {
    debug_assert!(boundary.is_power_of_two());
    (ptr as usize) & (boundary - 1) == 0
}
