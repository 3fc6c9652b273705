//! Strategy selection for expression assignment
//!
//! Everything here is `const`: strategies are associated constants of the
//! node types, so each source/destination pairing resolves to one code path
//! at compile time.

use core::fmt;

use lazymat_core::constants::BLOCK_SIZE;
use lazymat_core::{Order, Structure, Sweep};

/// Serial assignment tier of a binary expression node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Both operands are cheap to index; compute straight into the target
    Direct,
    /// Operands requiring evaluation are materialized serially first
    Evaluated,
}

impl Strategy {
    pub const fn select(requires_evaluation: bool) -> Self {
        if requires_evaluation {
            Strategy::Evaluated
        } else {
            Strategy::Direct
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Direct => write!(f, "direct"),
            Strategy::Evaluated => write!(f, "evaluated"),
        }
    }
}

/// Parallel assignment tier of a binary expression node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmpStrategy {
    /// Stripe the destination and read the node by element access
    Default,
    /// Materialize the operands with the parallel evaluator, then stripe
    Evaluated,
}

impl SmpStrategy {
    /// The default parallel strategy is unsuitable when an operand must be
    /// evaluated and at least one operand refuses parallel assignment
    pub const fn select(lhs_smp: bool, rhs_smp: bool, requires_evaluation: bool) -> Self {
        if (!lhs_smp || !rhs_smp) && requires_evaluation {
            SmpStrategy::Evaluated
        } else {
            SmpStrategy::Default
        }
    }
}

/// Traversal plan of the direct map kernel for one destination order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub sweep: Sweep,
    /// Read the left operand at `(j, i)`
    pub transpose_lhs: bool,
    /// Read the right operand at `(j, i)`
    pub transpose_rhs: bool,
}

impl Plan {
    /// Choose how to walk a map over operands stored in `lhs` and `rhs`
    /// order into a `target`-ordered destination
    ///
    /// A symmetric operand stored against the grain is read transposed,
    /// which is the same as reading it in the opposite order. Preference
    /// goes to the transposition that lines everything up with the target.
    pub const fn select(
        lhs: Order,
        rhs: Order,
        lhs_structure: Structure,
        rhs_structure: Structure,
        target: Order,
    ) -> Self {
        let lhs_sym = lhs_structure.is_symmetric();
        let rhs_sym = rhs_structure.is_symmetric();
        let (transpose_lhs, transpose_rhs) = if lhs.same_as(rhs) {
            (false, false)
        } else if lhs_sym && rhs.same_as(target) {
            (true, false)
        } else if rhs_sym && lhs.same_as(target) {
            (false, true)
        } else if lhs_sym {
            (true, false)
        } else if rhs_sym {
            (false, true)
        } else {
            (false, false)
        };

        let lhs = if transpose_lhs { lhs.opposite() } else { lhs };
        let rhs = if transpose_rhs { rhs.opposite() } else { rhs };
        let sweep = if lhs.same_as(rhs) && lhs.same_as(target) {
            Sweep::Linear(target)
        } else {
            Sweep::Blocked(BLOCK_SIZE)
        };

        Self {
            sweep,
            transpose_lhs,
            transpose_rhs,
        }
    }
}
