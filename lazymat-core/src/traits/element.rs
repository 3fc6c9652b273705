//! Element type constraints for matrix expressions
//!
//! This module defines the trait that constrains what types can be stored
//! in matrices and flow through expression nodes.

use core::fmt;
use core::ops::{Add, Mul, Sub};

/// Run-time tag naming an element type in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    F32,
    F64,
    I32,
    I64,
    U32,
    U64,
}

impl ElementKind {
    /// Get the size in bytes for this element kind
    pub const fn size_bytes(&self) -> usize {
        match self {
            ElementKind::F32 | ElementKind::I32 | ElementKind::U32 => 4,
            ElementKind::F64 | ElementKind::I64 | ElementKind::U64 => 8,
        }
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, ElementKind::F32 | ElementKind::F64)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::F32 => write!(f, "f32"),
            ElementKind::F64 => write!(f, "f64"),
            ElementKind::I32 => write!(f, "i32"),
            ElementKind::I64 => write!(f, "i64"),
            ElementKind::U32 => write!(f, "u32"),
            ElementKind::U64 => write!(f, "u64"),
        }
    }
}

/// Trait for types that can be stored as matrix elements
///
/// All element types must be:
/// - Copy: read out of storage without allocation
/// - PartialOrd: comparable for min/max
/// - Send + Sync: shareable with the parallel tier
/// - Zeroable: storage can be created zero-initialized
pub trait Element:
    Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + Send
    + Sync
    + 'static
    + bytemuck::Zeroable
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// Get the kind tag for this element type
    fn kind() -> ElementKind;

    /// Additive identity
    fn zero() -> Self {
        Self::zeroed()
    }

    /// Multiplicative identity
    fn one() -> Self;

    /// Complex conjugate; the identity for real types
    fn conj(self) -> Self {
        self
    }

    /// Absolute value; the identity for unsigned types
    fn abs(self) -> Self;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Convert from f64 for generic construction
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for generic reporting
    fn to_f64(self) -> f64;
}

impl Element for f32 {
    fn kind() -> ElementKind {
        ElementKind::F32
    }

    fn one() -> Self {
        1.0
    }

    fn abs(self) -> Self {
        if self < 0.0 {
            -self
        } else {
            self
        }
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Element for f64 {
    fn kind() -> ElementKind {
        ElementKind::F64
    }

    fn one() -> Self {
        1.0
    }

    fn abs(self) -> Self {
        if self < 0.0 {
            -self
        } else {
            self
        }
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Element for i32 {
    fn kind() -> ElementKind {
        ElementKind::I32
    }

    fn one() -> Self {
        1
    }

    fn abs(self) -> Self {
        self.wrapping_abs()
    }

    fn from_f64(value: f64) -> Self {
        value as i32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Element for i64 {
    fn kind() -> ElementKind {
        ElementKind::I64
    }

    fn one() -> Self {
        1
    }

    fn abs(self) -> Self {
        self.wrapping_abs()
    }

    fn from_f64(value: f64) -> Self {
        value as i64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Element for u32 {
    fn kind() -> ElementKind {
        ElementKind::U32
    }

    fn one() -> Self {
        1
    }

    fn abs(self) -> Self {
        self
    }

    fn from_f64(value: f64) -> Self {
        value as u32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Element for u64 {
    fn kind() -> ElementKind {
        ElementKind::U64
    }

    fn one() -> Self {
        1
    }

    fn abs(self) -> Self {
        self
    }

    fn from_f64(value: f64) -> Self {
        value as u64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(u32::one(), 1);
        assert_eq!(i64::zero() + i64::one(), 1);
    }

    #[test]
    fn test_abs() {
        assert_eq!(Element::abs(-2.5f64), 2.5);
        assert_eq!(Element::abs(-3i32), 3);
        assert_eq!(Element::abs(7u64), 7);
    }

    #[test]
    fn test_kind_matches_size() {
        assert_eq!(f32::kind().size_bytes(), f32::size_bytes());
        assert_eq!(i64::kind().size_bytes(), i64::size_bytes());
        assert!(f64::kind().is_float());
        assert!(!u32::kind().is_float());
    }
}
