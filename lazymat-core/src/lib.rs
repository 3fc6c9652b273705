#![no_std]

//! lazymat core - traits and rules for lazily evaluated matrix expressions
//!
//! This crate provides the capability traits every operand and destination
//! implements, storage orders, structural-property flags with their
//! propagation tables, operation functors, serial traversal kernels and the
//! validation helpers used when composing expressions.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod constants;
pub mod error;
pub mod order;
pub mod structure;
pub mod traits;
pub mod traversal;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::*;
pub use order::{ColumnMajor, CombineOrder, Order, RowMajor, StorageOrder};
pub use structure::{BinaryRule, Property, Structure, UnaryRule};
pub use traits::*;
pub use traversal::Sweep;
