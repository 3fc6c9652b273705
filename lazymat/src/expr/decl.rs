//! Declaration expressions
//!
//! A declaration asserts a structural property of its operand without
//! touching any value. It forwards every numeric query and adds the
//! property to [`Matrix::STRUCTURE`], which lets later compositions and
//! strategies rely on it.

use core::marker::PhantomData;

use lazymat_core::validation::{check_property, check_square};
use lazymat_core::{
    Accumulate, Matrix, MatrixMut, Property, Result, SparseMatrixMut, Structure,
};

use crate::config::AssignConfig;
use crate::smp::{SmpAssign, SmpDestination};

/// Type-level tag naming the declared property
pub trait Declaration: Copy + Default + Send + Sync + 'static {
    const PROPERTY: Property;
}

macro_rules! declarations {
    ($($(#[$doc:meta])* $name:ident => $property:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl Declaration for $name {
                const PROPERTY: Property = Property::$property;
            }
        )*
    };
}

declarations! {
    /// Zero above the diagonal
    Lower => Lower,
    /// Zero below the diagonal
    Upper => Upper,
    /// Zero on and above the diagonal
    StrictlyLower => StrictlyLower,
    /// Zero on and below the diagonal
    StrictlyUpper => StrictlyUpper,
    /// Lower with a unit diagonal
    UniLower => UniLower,
    /// Upper with a unit diagonal
    UniUpper => UniUpper,
    Symmetric => Symmetric,
    Hermitian => Hermitian,
    /// Zero off the diagonal
    Diagonal => Diagonal,
}

/// Operand `M` declared to have property `P`
#[derive(Debug, Clone)]
pub struct DeclExpr<M, P> {
    operand: M,
    property: PhantomData<P>,
}

impl<M: Matrix, P: Declaration> DeclExpr<M, P> {
    pub fn operand(&self) -> &M {
        &self.operand
    }

    pub fn into_operand(self) -> M {
        self.operand
    }
}

impl<M: Matrix, P: Declaration> Matrix for DeclExpr<M, P> {
    type Element = M::Element;
    type Order = M::Order;
    type ResultType = M::ResultType;

    const STRUCTURE: Structure = M::STRUCTURE.union(P::PROPERTY.flags());
    const ROWS: usize = M::ROWS;
    const COLUMNS: usize = M::COLUMNS;
    const IS_EXPRESSION: bool = true;
    const REQUIRES_EVALUATION: bool = M::REQUIRES_EVALUATION;
    const SMP_ASSIGNABLE: bool = M::SMP_ASSIGNABLE;

    fn rows(&self) -> usize {
        self.operand.rows()
    }

    fn columns(&self) -> usize {
        self.operand.columns()
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Self::Element {
        self.operand.get(row, column)
    }

    fn can_alias(&self, alias: *const u8) -> bool {
        self.operand.can_alias(alias)
    }

    fn is_aliased(&self, alias: *const u8) -> bool {
        self.operand.is_aliased(alias)
    }

    fn is_aligned(&self) -> bool {
        self.operand.is_aligned()
    }

    fn can_smp_assign(&self) -> bool {
        self.operand.can_smp_assign()
    }

    fn assign_to<D, A>(&self, target: &mut D)
    where
        D: MatrixMut<Element = Self::Element> + ?Sized,
        A: Accumulate,
    {
        self.operand.assign_to::<D, A>(target);
    }

    fn assign_to_sparse<D>(&self, target: &mut D)
    where
        D: SparseMatrixMut<Element = Self::Element> + ?Sized,
    {
        self.operand.assign_to_sparse(target);
    }
}

impl<M: SmpAssign, P: Declaration> SmpAssign for DeclExpr<M, P> {
    fn smp_assign_to<D, A>(&self, target: &mut D, config: &AssignConfig)
    where
        D: SmpDestination<Element = Self::Element>,
        A: Accumulate,
    {
        self.operand.smp_assign_to::<D, A>(target, config);
    }
}

/// Declare `P` on a square operand
///
/// The property itself is only verified in debug builds; use
/// [`declare_checked`] to have it verified unconditionally.
pub fn declare<P: Declaration, M: Matrix>(operand: M) -> Result<DeclExpr<M, P>> {
    check_square(P::PROPERTY, operand.rows(), operand.columns())?;
    debug_assert!(
        check_property(&operand, P::PROPERTY).is_ok(),
        "Operand does not satisfy the {} declaration",
        P::PROPERTY
    );
    Ok(DeclExpr {
        operand,
        property: PhantomData,
    })
}

/// Declare `P` after verifying every element
pub fn declare_checked<P: Declaration, M: Matrix>(operand: M) -> Result<DeclExpr<M, P>> {
    check_property(&operand, P::PROPERTY)?;
    Ok(DeclExpr {
        operand,
        property: PhantomData,
    })
}

pub fn decllow<M: Matrix>(operand: M) -> Result<DeclExpr<M, Lower>> {
    declare(operand)
}

pub fn declupp<M: Matrix>(operand: M) -> Result<DeclExpr<M, Upper>> {
    declare(operand)
}

pub fn declstrlow<M: Matrix>(operand: M) -> Result<DeclExpr<M, StrictlyLower>> {
    declare(operand)
}

pub fn declstrupp<M: Matrix>(operand: M) -> Result<DeclExpr<M, StrictlyUpper>> {
    declare(operand)
}

pub fn declunilow<M: Matrix>(operand: M) -> Result<DeclExpr<M, UniLower>> {
    declare(operand)
}

pub fn decluniupp<M: Matrix>(operand: M) -> Result<DeclExpr<M, UniUpper>> {
    declare(operand)
}

pub fn declsym<M: Matrix>(operand: M) -> Result<DeclExpr<M, Symmetric>> {
    declare(operand)
}

pub fn declherm<M: Matrix>(operand: M) -> Result<DeclExpr<M, Hermitian>> {
    declare(operand)
}

pub fn decldiag<M: Matrix>(operand: M) -> Result<DeclExpr<M, Diagonal>> {
    declare(operand)
}
