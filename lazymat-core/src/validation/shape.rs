//! Shape compatibility checks performed at composition time

use crate::error::{Error, Result};
use crate::structure::Property;

/// Both shapes must be identical
pub const fn check_same_shape(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Result<()> {
    if lhs.0 != rhs.0 || lhs.1 != rhs.1 {
        return Err(Error::shape_mismatch(op, lhs, rhs));
    }
    Ok(())
}

/// Inner dimensions of a product must agree
pub const fn check_product_shape(lhs: (usize, usize), rhs: (usize, usize)) -> Result<()> {
    if lhs.1 != rhs.0 {
        return Err(Error::shape_mismatch("mul", lhs, rhs));
    }
    Ok(())
}

/// Structural declarations only apply to square matrices
pub const fn check_square(property: Property, rows: usize, columns: usize) -> Result<()> {
    if rows != columns {
        return Err(Error::NotSquare {
            property,
            rows,
            columns,
        });
    }
    Ok(())
}
