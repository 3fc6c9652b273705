//! Validation utilities
//!
//! Shape and index checks return typed errors so composition functions can
//! reject bad input before an expression node exists. Property checks scan
//! a matrix and report the first offending element.

pub mod bounds;
pub mod layout;
pub mod shape;
pub mod structure;

pub use bounds::{check_index, is_aligned_to};
pub use layout::align_to_boundary;
pub use shape::{check_product_shape, check_same_shape, check_square};
pub use structure::check_property;
