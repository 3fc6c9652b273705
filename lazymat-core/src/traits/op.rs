//! Operation functors and accumulation policies
//!
//! Operations are small `Clone` values stored inside expression nodes. Each
//! one names the rule that tells the property tables what survives it;
//! closures get the conservative default.

use super::element::Element;
use crate::structure::{BinaryRule, UnaryRule};

/// Binary element-wise operation
pub trait BinaryOp<A, B>: Clone {
    /// Element type produced by the operation
    type Output: Element;

    /// Property propagation rule for this operation
    const RULE: BinaryRule = BinaryRule::Opaque;

    fn apply(&self, a: A, b: B) -> Self::Output;
}

impl<F, A, B, C> BinaryOp<A, B> for F
where
    F: Fn(A, B) -> C + Clone,
    C: Element,
{
    type Output = C;

    fn apply(&self, a: A, b: B) -> C {
        self(a, b)
    }
}

/// Unary element-wise operation
pub trait UnaryOp<A>: Clone {
    /// Element type produced by the operation
    type Output: Element;

    /// Property propagation rule for this operation
    const RULE: UnaryRule = UnaryRule::Opaque;

    fn apply(&self, a: A) -> Self::Output;
}

impl<F, A, C> UnaryOp<A> for F
where
    F: Fn(A) -> C + Clone,
    C: Element,
{
    type Output = C;

    fn apply(&self, a: A) -> C {
        self(a)
    }
}

/// Element-wise minimum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

/// Element-wise maximum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

/// Element-wise addition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plus;

/// Element-wise subtraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minus;

/// Element-wise (Schur) product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schur;

impl<T: Element> BinaryOp<T, T> for Min {
    type Output = T;
    const RULE: BinaryRule = BinaryRule::Intersect;

    fn apply(&self, a: T, b: T) -> T {
        if b < a {
            b
        } else {
            a
        }
    }
}

impl<T: Element> BinaryOp<T, T> for Max {
    type Output = T;
    const RULE: BinaryRule = BinaryRule::Intersect;

    fn apply(&self, a: T, b: T) -> T {
        if b > a {
            b
        } else {
            a
        }
    }
}

impl<T: Element> BinaryOp<T, T> for Plus {
    type Output = T;
    const RULE: BinaryRule = BinaryRule::Additive;

    fn apply(&self, a: T, b: T) -> T {
        a + b
    }
}

impl<T: Element> BinaryOp<T, T> for Minus {
    type Output = T;
    const RULE: BinaryRule = BinaryRule::Additive;

    fn apply(&self, a: T, b: T) -> T {
        a - b
    }
}

impl<T: Element> BinaryOp<T, T> for Schur {
    type Output = T;
    const RULE: BinaryRule = BinaryRule::Multiplicative;

    fn apply(&self, a: T, b: T) -> T {
        a * b
    }
}

/// Absolute value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Abs;

/// Negation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neg;

/// Multiplication by a fixed scalar
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scale<T>(pub T);

impl<T: Element> UnaryOp<T> for Abs {
    type Output = T;
    const RULE: UnaryRule = UnaryRule::UnitPreserving;

    fn apply(&self, a: T) -> T {
        a.abs()
    }
}

impl<T> UnaryOp<T> for Neg
where
    T: Element + core::ops::Neg<Output = T>,
{
    type Output = T;
    const RULE: UnaryRule = UnaryRule::ZeroPreserving;

    fn apply(&self, a: T) -> T {
        -a
    }
}

impl<T: Element> UnaryOp<T> for Scale<T> {
    type Output = T;
    const RULE: UnaryRule = UnaryRule::ZeroPreserving;

    fn apply(&self, a: T) -> T {
        a * self.0
    }
}

/// How a computed value is combined with the destination slot
pub trait Accumulate: Send + Sync + 'static {
    /// Name used in diagnostics
    const NAME: &'static str;

    fn apply<T: Element>(slot: &mut T, value: T);
}

/// Plain write
#[derive(Debug, Clone, Copy, Default)]
pub struct Assign;

/// `+=`
#[derive(Debug, Clone, Copy, Default)]
pub struct AddAssign;

/// `-=`
#[derive(Debug, Clone, Copy, Default)]
pub struct SubAssign;

/// Element-wise `*=`
#[derive(Debug, Clone, Copy, Default)]
pub struct SchurAssign;

impl Accumulate for Assign {
    const NAME: &'static str = "assign";

    #[inline]
    fn apply<T: Element>(slot: &mut T, value: T) {
        *slot = value;
    }
}

impl Accumulate for AddAssign {
    const NAME: &'static str = "add_assign";

    #[inline]
    fn apply<T: Element>(slot: &mut T, value: T) {
        *slot = *slot + value;
    }
}

impl Accumulate for SubAssign {
    const NAME: &'static str = "sub_assign";

    #[inline]
    fn apply<T: Element>(slot: &mut T, value: T) {
        *slot = *slot - value;
    }
}

impl Accumulate for SchurAssign {
    const NAME: &'static str = "schur_assign";

    #[inline]
    fn apply<T: Element>(slot: &mut T, value: T) {
        *slot = *slot * value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_of<Op: BinaryOp<f64, f64>>(_: &Op) -> BinaryRule {
        Op::RULE
    }

    #[test]
    fn test_named_ops() {
        assert_eq!(BinaryOp::<i32, i32>::apply(&Max, 3, 7), 7);
        assert_eq!(BinaryOp::<i32, i32>::apply(&Min, 3, 7), 3);
        assert_eq!(BinaryOp::<f64, f64>::apply(&Minus, 1.5, 0.5), 1.0);
        assert_eq!(BinaryOp::<u32, u32>::apply(&Schur, 4, 5), 20);
        assert_eq!(UnaryOp::<i64>::apply(&Neg, 4), -4);
        assert_eq!(UnaryOp::<f32>::apply(&Scale(2.0f32), 1.5), 3.0);
    }

    #[test]
    fn test_closures_are_opaque() {
        let op = |a: f64, b: f64| a * 2.0 + b;
        assert_eq!(op.apply(1.0, 1.0), 3.0);
        assert_eq!(rule_of(&op), BinaryRule::Opaque);
        assert_eq!(rule_of(&Max), BinaryRule::Intersect);
    }

    #[test]
    fn test_accumulate() {
        let mut slot = 3.0f64;
        AddAssign::apply(&mut slot, 2.0);
        assert_eq!(slot, 5.0);
        SubAssign::apply(&mut slot, 1.0);
        assert_eq!(slot, 4.0);
        SchurAssign::apply(&mut slot, 0.5);
        assert_eq!(slot, 2.0);
        Assign::apply(&mut slot, 9.0);
        assert_eq!(slot, 9.0);
    }
}
