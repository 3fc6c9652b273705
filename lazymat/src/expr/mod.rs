//! Expression nodes
//!
//! Every node is an immutable [`Matrix`](lazymat_core::Matrix) that only
//! describes a computation. Nothing is evaluated until the node is handed
//! to an assignment entry point or an [`Evaluator`](crate::Evaluator).

mod decl;
mod map;
mod mult;
mod serial;
mod unary;

pub use decl::{
    declare, declare_checked, decldiag, declherm, decllow, declstrlow, declstrupp, declsym,
    declunilow, decluniupp, declupp, DeclExpr, Declaration, Diagonal, Hermitian, Lower,
    StrictlyLower, StrictlyUpper, Symmetric, UniLower, UniUpper, Upper,
};
pub use map::{add, map, max, min, schur, sub, MapExpr};
pub use mult::{mul, MultExpr};
pub use serial::{serial, SerialExpr};
pub use unary::{abs, map_unary, neg, scale, UnaryMapExpr};
