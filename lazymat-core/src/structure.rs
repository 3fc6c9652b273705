//! Structural properties of matrix types
//!
//! A [`Structure`] is a set of compile-time facts attached to a matrix type
//! through [`Matrix::STRUCTURE`](crate::Matrix::STRUCTURE). Flags must never
//! overclaim: a type tagged symmetric is symmetric for every instance, while
//! a missing flag only means "not proven".

use core::fmt;
use core::ops::{BitAnd, BitOr};

pub mod rules;

pub use rules::{BinaryRule, UnaryRule};

/// Bit set of structural and layout properties
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Structure(u16);

impl Structure {
    /// No property known
    pub const EMPTY: Self = Self(0);
    /// `A(i,j) == A(j,i)`
    pub const SYMMETRIC: Self = Self(1 << 0);
    /// `A(i,j) == conj(A(j,i))`
    pub const HERMITIAN: Self = Self(1 << 1);
    /// Zero above the diagonal
    pub const LOWER: Self = Self(1 << 2);
    /// Zero below the diagonal
    pub const UPPER: Self = Self(1 << 3);
    /// Zero on and above the diagonal
    pub const STRICTLY_LOWER: Self = Self(1 << 4);
    /// Zero on and below the diagonal
    pub const STRICTLY_UPPER: Self = Self(1 << 5);
    /// Lower with a unit diagonal
    pub const UNI_LOWER: Self = Self(1 << 6);
    /// Upper with a unit diagonal
    pub const UNI_UPPER: Self = Self(1 << 7);
    /// Storage start is aligned for vectorized access
    pub const ALIGNED: Self = Self(1 << 8);
    /// Each major lane is padded to a whole vector register
    pub const PADDED: Self = Self(1 << 9);

    /// Numeric properties, the ones an operation can create or destroy
    pub const NUMERIC: Self = Self(0x00ff);
    /// Memory layout properties
    pub const LAYOUT: Self = Self::ALIGNED.union(Self::PADDED);

    const NAMES: [(Structure, &'static str); 10] = [
        (Self::SYMMETRIC, "symmetric"),
        (Self::HERMITIAN, "hermitian"),
        (Self::LOWER, "lower"),
        (Self::UPPER, "upper"),
        (Self::STRICTLY_LOWER, "strictly-lower"),
        (Self::STRICTLY_UPPER, "strictly-upper"),
        (Self::UNI_LOWER, "uni-lower"),
        (Self::UNI_UPPER, "uni-upper"),
        (Self::ALIGNED, "aligned"),
        (Self::PADDED, "padded"),
    ];

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & 0x03ff)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any flag of `other` is set in `self`
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Add every property implied by the ones already present
    ///
    /// Strict and unit triangularity imply plain triangularity, and a matrix
    /// both lower and upper is diagonal and therefore symmetric.
    pub const fn closure(self) -> Self {
        let mut bits = self.0;
        if bits & (Self::STRICTLY_LOWER.0 | Self::UNI_LOWER.0) != 0 {
            bits |= Self::LOWER.0;
        }
        if bits & (Self::STRICTLY_UPPER.0 | Self::UNI_UPPER.0) != 0 {
            bits |= Self::UPPER.0;
        }
        if bits & Self::LOWER.0 != 0 && bits & Self::UPPER.0 != 0 {
            bits |= Self::SYMMETRIC.0;
        }
        Self(bits)
    }

    pub const fn numeric(self) -> Self {
        self.intersection(Self::NUMERIC)
    }

    pub const fn layout(self) -> Self {
        self.intersection(Self::LAYOUT)
    }

    pub const fn is_symmetric(self) -> bool {
        self.contains(Self::SYMMETRIC)
    }

    pub const fn is_hermitian(self) -> bool {
        self.contains(Self::HERMITIAN)
    }

    pub const fn is_lower(self) -> bool {
        self.contains(Self::LOWER)
    }

    pub const fn is_upper(self) -> bool {
        self.contains(Self::UPPER)
    }

    pub const fn is_diagonal(self) -> bool {
        self.contains(Self::LOWER.union(Self::UPPER))
    }

    pub const fn is_aligned(self) -> bool {
        self.contains(Self::ALIGNED)
    }

    pub const fn is_padded(self) -> bool {
        self.contains(Self::PADDED)
    }
}

impl BitOr for Structure {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for Structure {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Structure({self})")
    }
}

/// A single property that can be declared on a square operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    Symmetric,
    Hermitian,
    Lower,
    Upper,
    StrictlyLower,
    StrictlyUpper,
    UniLower,
    UniUpper,
    Diagonal,
}

impl Property {
    /// Flags a declaration of this property adds, including what it implies
    pub const fn flags(self) -> Structure {
        let flags = match self {
            Property::Symmetric => Structure::SYMMETRIC,
            Property::Hermitian => Structure::HERMITIAN,
            Property::Lower => Structure::LOWER,
            Property::Upper => Structure::UPPER,
            Property::StrictlyLower => Structure::STRICTLY_LOWER,
            Property::StrictlyUpper => Structure::STRICTLY_UPPER,
            Property::UniLower => Structure::UNI_LOWER,
            Property::UniUpper => Structure::UNI_UPPER,
            Property::Diagonal => Structure::LOWER.union(Structure::UPPER),
        };
        flags.closure()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Property::Symmetric => "symmetric",
            Property::Hermitian => "hermitian",
            Property::Lower => "lower",
            Property::Upper => "upper",
            Property::StrictlyLower => "strictly lower",
            Property::StrictlyUpper => "strictly upper",
            Property::UniLower => "unilower",
            Property::UniUpper => "uniupper",
            Property::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
