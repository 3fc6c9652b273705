//! Abstract interfaces for matrix expressions
//!
//! Traits are pure interfaces; storage containers and expression nodes live
//! in the `lazymat` crate.

pub mod element;
pub mod matrix;
pub mod op;

pub use element::{Element, ElementKind};
#[cfg(feature = "alloc")]
pub use matrix::MatrixOperations;
pub use matrix::{
    DenseStorage, MapTrait, Matrix, MatrixMut, SparseMatrixMut, SparseStorage, UnaryMapTrait,
};
pub use op::{
    Abs, Accumulate, AddAssign, Assign, BinaryOp, Max, Min, Minus, Neg, Plus, Scale, Schur,
    SchurAssign, SubAssign, UnaryOp,
};
