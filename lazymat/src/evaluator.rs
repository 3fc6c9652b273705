//! Parallel-capable assignment facade
//!
//! An [`Evaluator`] owns a validated [`AssignConfig`] and routes every
//! assignment through the source's [`SmpAssign`] implementation. Sources
//! that cannot be assigned in parallel, or destinations below the
//! configured threshold, fall back to the serial tiers.

use lazymat_core::validation::check_same_shape;
use lazymat_core::{Accumulate, AddAssign, Assign, Element, Result, SchurAssign, SubAssign};

use crate::config::AssignConfig;
use crate::smp::{smp_evaluate, SmpAssign, SmpDestination};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluator {
    config: AssignConfig,
}

impl Evaluator {
    /// Create an evaluator, rejecting an invalid configuration
    pub fn new(config: AssignConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AssignConfig {
        &self.config
    }

    fn run<D, E, A>(&self, target: &mut D, source: &E) -> Result<()>
    where
        D: SmpDestination<Element = E::Element>,
        E: SmpAssign + ?Sized,
        A: Accumulate,
    {
        check_same_shape(A::NAME, target.dimensions(), source.dimensions())?;
        let (rows, columns) = target.dimensions();
        tracing::trace!(
            rows,
            columns,
            op = A::NAME,
            element = %<E::Element as Element>::kind(),
            parallel = self.config.goes_parallel(rows * columns),
            "evaluator assignment"
        );
        source.smp_assign_to::<D, A>(target, &self.config);
        Ok(())
    }

    /// `target = source`
    pub fn assign<D, E>(&self, target: &mut D, source: &E) -> Result<()>
    where
        D: SmpDestination<Element = E::Element>,
        E: SmpAssign + ?Sized,
    {
        self.run::<D, E, Assign>(target, source)
    }

    /// `target += source`
    pub fn add_assign<D, E>(&self, target: &mut D, source: &E) -> Result<()>
    where
        D: SmpDestination<Element = E::Element>,
        E: SmpAssign + ?Sized,
    {
        self.run::<D, E, AddAssign>(target, source)
    }

    /// `target -= source`
    pub fn sub_assign<D, E>(&self, target: &mut D, source: &E) -> Result<()>
    where
        D: SmpDestination<Element = E::Element>,
        E: SmpAssign + ?Sized,
    {
        self.run::<D, E, SubAssign>(target, source)
    }

    /// Element-wise `target *= source`
    pub fn schur_assign<D, E>(&self, target: &mut D, source: &E) -> Result<()>
    where
        D: SmpDestination<Element = E::Element>,
        E: SmpAssign + ?Sized,
    {
        self.run::<D, E, SchurAssign>(target, source)
    }

    /// Evaluate `expr` into a fresh container of its result type
    pub fn evaluate<E>(&self, expr: &E) -> E::ResultType
    where
        E: SmpAssign + ?Sized,
        E::ResultType: SmpDestination,
    {
        smp_evaluate(expr, &self.config)
    }
}
