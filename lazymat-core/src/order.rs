//! Storage orders, both as run-time values and as type-level markers

use core::fmt;

/// Memory layout of a dense or sparse matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Elements of a row are contiguous
    RowMajor,
    /// Elements of a column are contiguous
    ColumnMajor,
}

impl Order {
    /// The other storage order
    pub const fn opposite(self) -> Self {
        match self {
            Order::RowMajor => Order::ColumnMajor,
            Order::ColumnMajor => Order::RowMajor,
        }
    }

    /// `const` equality
    pub const fn same_as(self, other: Order) -> bool {
        matches!(
            (self, other),
            (Order::RowMajor, Order::RowMajor) | (Order::ColumnMajor, Order::ColumnMajor)
        )
    }

    /// Extents along the major and minor axis of a `rows x columns` matrix
    pub const fn major_minor(self, rows: usize, columns: usize) -> (usize, usize) {
        match self {
            Order::RowMajor => (rows, columns),
            Order::ColumnMajor => (columns, rows),
        }
    }

    /// Map a `(major, minor)` position back to `(row, column)`
    pub const fn to_row_column(self, major: usize, minor: usize) -> (usize, usize) {
        match self {
            Order::RowMajor => (major, minor),
            Order::ColumnMajor => (minor, major),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::RowMajor => write!(f, "row-major"),
            Order::ColumnMajor => write!(f, "column-major"),
        }
    }
}

/// Type-level storage order carried by every matrix type
pub trait StorageOrder: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Run-time value of this order
    const ORDER: Order;

    /// The marker for the other order
    type Opposite: StorageOrder<Opposite = Self>;
}

/// Row-major marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

/// Column-major marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColumnMajor;

impl StorageOrder for RowMajor {
    const ORDER: Order = Order::RowMajor;
    type Opposite = ColumnMajor;
}

impl StorageOrder for ColumnMajor {
    const ORDER: Order = Order::ColumnMajor;
    type Opposite = RowMajor;
}

/// Storage order of a result combining operands in `Self` and `Rhs` order
///
/// Operands that agree keep their order; a mixed pair produces row-major.
pub trait CombineOrder<Rhs: StorageOrder>: StorageOrder {
    type Output: StorageOrder;
}

impl CombineOrder<RowMajor> for RowMajor {
    type Output = RowMajor;
}

impl CombineOrder<ColumnMajor> for ColumnMajor {
    type Output = ColumnMajor;
}

impl CombineOrder<ColumnMajor> for RowMajor {
    type Output = RowMajor;
}

impl CombineOrder<RowMajor> for ColumnMajor {
    type Output = RowMajor;
}
