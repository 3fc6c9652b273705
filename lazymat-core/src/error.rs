//! Error types for matrix expression composition and access

use crate::structure::Property;

/// Errors that can occur while composing, declaring or assigning expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Operand or destination shapes disagree
    #[error(
        "matrix sizes do not match in {op}: {lhs_rows}x{lhs_columns} vs {rhs_rows}x{rhs_columns}"
    )]
    ShapeMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_columns: usize,
        rhs_rows: usize,
        rhs_columns: usize,
    },
    /// Checked access with a row index past the last row
    #[error("invalid row access index {row} for a matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
    /// Checked access with a column index past the last column
    #[error("invalid column access index {column} for a matrix with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },
    /// A structural declaration was applied to a non-square operand
    #[error("{property} declaration requires a square matrix, got {rows}x{columns}")]
    NotSquare {
        property: Property,
        rows: usize,
        columns: usize,
    },
    /// A checked declaration found an element contradicting the property
    #[error("element ({row}, {column}) violates the {property} declaration")]
    PropertyViolation {
        property: Property,
        row: usize,
        column: usize,
    },
    /// Rejected assignment configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller passed operands or settings that cannot be combined
    InvalidArgument,
    /// A checked accessor was given an index outside the matrix
    OutOfRange,
}

impl Error {
    /// Classify the error the way callers usually branch on it
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Error::RowOutOfRange { .. } | Error::ColumnOutOfRange { .. } => {
                ErrorCategory::OutOfRange
            }
            Error::ShapeMismatch { .. }
            | Error::NotSquare { .. }
            | Error::PropertyViolation { .. }
            | Error::InvalidConfig(_) => ErrorCategory::InvalidArgument,
        }
    }

    /// Build a shape mismatch from two `(rows, columns)` pairs
    pub const fn shape_mismatch(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            op,
            lhs_rows: lhs.0,
            lhs_columns: lhs.1,
            rhs_rows: rhs.0,
            rhs_columns: rhs.1,
        }
    }
}

/// Result type for matrix expression operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_categories() {
        let mismatch = Error::shape_mismatch("map", (3, 4), (4, 3));
        assert_eq!(mismatch.category(), ErrorCategory::InvalidArgument);

        let row = Error::RowOutOfRange { row: 5, rows: 3 };
        assert_eq!(row.category(), ErrorCategory::OutOfRange);

        let square = Error::NotSquare {
            property: Property::Upper,
            rows: 2,
            columns: 3,
        };
        assert_eq!(square.category(), ErrorCategory::InvalidArgument);
    }

    #[test]
    fn test_messages_name_the_violation() {
        let mismatch = Error::shape_mismatch("map", (3, 4), (4, 3));
        assert_eq!(
            mismatch.to_string(),
            "matrix sizes do not match in map: 3x4 vs 4x3"
        );

        let violation = Error::PropertyViolation {
            property: Property::StrictlyLower,
            row: 1,
            column: 1,
        };
        assert_eq!(
            violation.to_string(),
            "element (1, 1) violates the strictly lower declaration"
        );
    }
}
