//! Property propagation tables keyed by operation
//!
//! Every operation declares which rule describes it. Rules are conservative:
//! they only keep a property when it holds for all inputs the operation can
//! see, never because it happens to hold for particular values.

use super::Structure;

const SYMMETRY: Structure = Structure::SYMMETRIC.union(Structure::HERMITIAN);
const ZERO_PATTERNS: Structure = Structure::LOWER
    .union(Structure::UPPER)
    .union(Structure::STRICTLY_LOWER)
    .union(Structure::STRICTLY_UPPER);
const UNIT_DIAGONALS: Structure = Structure::UNI_LOWER.union(Structure::UNI_UPPER);

/// How a binary element-wise operation carries operand structure over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryRule {
    /// Nothing numeric is known about the result
    Opaque,
    /// Minimum/maximum: a property holds iff both operands have it
    Intersect,
    /// Addition and subtraction: shared symmetry and zero patterns survive,
    /// unit diagonals do not
    Additive,
    /// Element-wise product: zeros of either operand survive
    Multiplicative,
    /// Matrix product
    Product,
}

impl BinaryRule {
    /// Structure of the result given the structure of both operands
    pub const fn apply(self, lhs: Structure, rhs: Structure) -> Structure {
        let layout = lhs.layout().intersection(rhs.layout());
        let both = lhs.numeric().closure().intersection(rhs.numeric().closure());
        let numeric = match self {
            BinaryRule::Opaque => Structure::EMPTY,
            BinaryRule::Intersect => both,
            BinaryRule::Additive => both.difference(UNIT_DIAGONALS),
            BinaryRule::Multiplicative => {
                let either = lhs.union(rhs).closure().intersection(ZERO_PATTERNS);
                both.intersection(SYMMETRY.union(UNIT_DIAGONALS)).union(either)
            }
            BinaryRule::Product => {
                let lhs = lhs.closure();
                let rhs = rhs.closure();
                let mut result = both.intersection(
                    Structure::LOWER.union(Structure::UPPER).union(UNIT_DIAGONALS),
                );
                if result.is_lower()
                    && lhs.union(rhs).contains(Structure::STRICTLY_LOWER)
                {
                    result = result.union(Structure::STRICTLY_LOWER);
                }
                if result.is_upper()
                    && lhs.union(rhs).contains(Structure::STRICTLY_UPPER)
                {
                    result = result.union(Structure::STRICTLY_UPPER);
                }
                result
            }
        };
        numeric.closure().union(layout)
    }
}

/// How a unary element-wise operation carries operand structure over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryRule {
    /// Nothing numeric is known about the result
    Opaque,
    /// Applied independently per element: symmetry survives
    Pointwise,
    /// Pointwise with `f(0) == 0`: zero patterns survive too
    ZeroPreserving,
    /// Zero preserving with `f(1) == 1`: unit diagonals survive too
    UnitPreserving,
}

impl UnaryRule {
    /// Structure of the result given the structure of the operand
    pub const fn apply(self, operand: Structure) -> Structure {
        let operand_numeric = operand.numeric().closure();
        let kept = match self {
            UnaryRule::Opaque => Structure::EMPTY,
            UnaryRule::Pointwise => Structure::SYMMETRIC,
            UnaryRule::ZeroPreserving => Structure::SYMMETRIC.union(ZERO_PATTERNS),
            UnaryRule::UnitPreserving => Structure::SYMMETRIC
                .union(ZERO_PATTERNS)
                .union(UNIT_DIAGONALS),
        };
        operand_numeric
            .intersection(kept)
            .closure()
            .union(operand.layout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_requires_both() {
        let sym = Structure::SYMMETRIC;
        let upper = Structure::UPPER;
        assert!(BinaryRule::Intersect.apply(sym, sym).is_symmetric());
        assert!(!BinaryRule::Intersect.apply(sym, upper).is_symmetric());
        assert!(!BinaryRule::Intersect.apply(sym, upper).is_upper());
        assert!(BinaryRule::Intersect
            .apply(Structure::UNI_LOWER, Structure::UNI_LOWER)
            .contains(Structure::UNI_LOWER));
    }

    #[test]
    fn test_opaque_keeps_only_layout() {
        let flags = Structure::SYMMETRIC | Structure::ALIGNED;
        let result = BinaryRule::Opaque.apply(flags, flags);
        assert_eq!(result, Structure::ALIGNED);
    }

    #[test]
    fn test_layout_needs_both_operands() {
        let result = BinaryRule::Intersect.apply(Structure::ALIGNED, Structure::PADDED);
        assert!(!result.is_aligned());
        assert!(!result.is_padded());
    }

    #[test]
    fn test_additive_drops_unit_diagonal() {
        let result = BinaryRule::Additive.apply(Structure::UNI_UPPER, Structure::UNI_UPPER);
        assert!(result.is_upper());
        assert!(!result.contains(Structure::UNI_UPPER));
    }

    #[test]
    fn test_multiplicative_keeps_either_zero_pattern() {
        let result = BinaryRule::Multiplicative.apply(Structure::STRICTLY_LOWER, Structure::EMPTY);
        assert!(result.contains(Structure::STRICTLY_LOWER));
        assert!(result.is_lower());
        assert!(!result.is_symmetric());

        let diagonal = BinaryRule::Multiplicative.apply(Structure::LOWER, Structure::UPPER);
        assert!(diagonal.is_diagonal());
    }

    #[test]
    fn test_product_triangularity() {
        let lower = BinaryRule::Product.apply(Structure::LOWER, Structure::STRICTLY_LOWER);
        assert!(lower.contains(Structure::STRICTLY_LOWER));

        let mixed = BinaryRule::Product.apply(Structure::LOWER, Structure::UPPER);
        assert!(mixed.numeric().is_empty());

        let sym = BinaryRule::Product.apply(Structure::SYMMETRIC, Structure::SYMMETRIC);
        assert!(!sym.is_symmetric());
    }

    #[test]
    fn test_unary_rules() {
        let flags = Structure::UNI_LOWER.closure() | Structure::PADDED;
        assert_eq!(UnaryRule::Opaque.apply(flags), Structure::PADDED);
        assert!(!UnaryRule::Pointwise.apply(flags).is_lower());
        assert!(UnaryRule::ZeroPreserving.apply(flags).is_lower());
        assert!(!UnaryRule::ZeroPreserving
            .apply(flags)
            .contains(Structure::UNI_LOWER));
        assert!(UnaryRule::UnitPreserving
            .apply(flags)
            .contains(Structure::UNI_LOWER));
        assert!(UnaryRule::Pointwise
            .apply(Structure::HERMITIAN)
            .numeric()
            .is_empty());
    }
}
