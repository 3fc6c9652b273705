//! lazymat - Lazily evaluated dense and sparse vector and matrix expressions
//!
//! This library builds element-wise vector and matrix expressions as
//! immutable trees and evaluates them only when they are assigned to a
//! destination. The assignment strategy (direct loop, evaluated
//! temporaries, dense temporary for sparse destinations, parallel stripes)
//! is selected from the types of the operands at compile time.
//!
//! ## Architecture
//!
//! lazymat follows a clean specification/implementation separation:
//!
//! - **lazymat-core**: Capability traits, storage orders, structural
//!   properties and their propagation rules, serial kernels, validation
//!   (`no_std`)
//! - **lazymat**: Dense matrices and vectors, sparse matrices, expression
//!   nodes, the assignment dispatcher and the rayon-backed parallel tier
//!
//! ## Quick Start
//!
//! ```rust
//! use lazymat::{assign, max, ColumnMajor, DynamicMatrix, Matrix, MatrixOperations};
//!
//! fn example() -> lazymat::Result<()> {
//!     let a = DynamicMatrix::<f64>::from_rows(&[[1.0, 5.0], [4.0, 2.0]])?;
//!     let b = DynamicMatrix::<f64, ColumnMajor>::from_rows(&[[9.0, 1.0], [0.0, 5.0]])?;
//!
//!     // Nothing is computed here
//!     let expr = max(&a, &b)?;
//!     assert_eq!(expr.get(0, 0), 9.0);
//!
//!     // Evaluate into a destination of matching shape
//!     let mut c = DynamicMatrix::<f64>::new(2, 2);
//!     assign(&mut c, &expr)?;
//!     assert_eq!(c.to_rows(), vec![vec![9.0, 5.0], vec![4.0, 5.0]]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Expression templates**: `map`, `min`, `max`, `add`, `sub`, `schur`,
//!   unary maps and matrix products without intermediate allocations
//! - **Property propagation**: symmetry and triangularity carried through
//!   expressions and asserted with `decl*` declarations
//! - **Aliasing safety**: self-referencing assignment through
//!   [`DynamicMatrix::assign_with`]
//! - **Parallel assignment**: destination striping on rayon's pool via
//!   [`Evaluator`]

// Re-export core abstractions
pub use lazymat_core::{
    // Core traits
    DenseStorage, Element, ElementKind, Matrix, MatrixMut, MatrixOperations, SparseMatrixMut, SparseStorage,
    // Operations
    Abs, Accumulate, AddAssign, Assign, BinaryOp, Max, Min, Minus, Neg, Plus, Scale, Schur, SchurAssign,
    SubAssign, UnaryOp,
    // Orders and structure
    ColumnMajor, Order, Property, RowMajor, StorageOrder, Structure,
    // Error handling
    Error, ErrorCategory, Result,
};
pub use lazymat_core::validation::check_property;

// Implementation modules
pub mod assign;
pub mod composite;
pub mod config;
pub mod dense;
pub mod evaluator;
pub mod expr;
pub mod fixed;
pub mod smp;
pub mod sparse;
pub mod vector;

mod proptests;

// Public exports
pub use assign::{
    add_assign, add_assign_sparse, assign, assign_sparse, evaluate, schur_assign,
    schur_assign_sparse, sub_assign, sub_assign_sparse,
};
pub use config::AssignConfig;
pub use dense::DynamicMatrix;
pub use evaluator::Evaluator;
pub use expr::*;
pub use fixed::StaticMatrix;
pub use smp::{smp_evaluate, SmpAssign, SmpDestination};
pub use sparse::CompressedMatrix;
pub use vector::DynamicVector;
