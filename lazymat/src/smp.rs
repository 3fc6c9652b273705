//! Parallel (SMP) assignment tier
//!
//! The destination is cut into disjoint stripes of major lanes which rayon's
//! global pool fills concurrently. Expression nodes may override
//! [`SmpAssign::smp_assign_to`] to prepare their operands first; everything
//! else uses [`default_smp_assign`], which falls back to the serial path
//! below the configured threshold or when either side refuses parallel
//! assignment.

use core::ops::Range;

use lazymat_core::{Accumulate, Assign, DenseStorage, Element, Matrix, Order, StorageOrder};

use crate::config::AssignConfig;

/// A run of consecutive major lanes owned by one worker
pub struct Stripe<'a, T> {
    order: Order,
    first: usize,
    spacing: usize,
    minors: usize,
    data: &'a mut [T],
}

impl<'a, T: Element> Stripe<'a, T> {
    pub(crate) fn new(
        order: Order,
        first: usize,
        spacing: usize,
        minors: usize,
        data: &'a mut [T],
    ) -> Self {
        Self {
            order,
            first,
            spacing,
            minors,
            data,
        }
    }

    /// Major lanes covered by this stripe
    pub fn majors(&self) -> Range<usize> {
        let lanes = if self.spacing == 0 {
            0
        } else {
            self.data.len() / self.spacing
        };
        self.first..self.first + lanes
    }

    /// Write `element(i, j)` into every position of the stripe
    pub fn fill<A, F>(&mut self, element: F)
    where
        A: Accumulate,
        F: Fn(usize, usize) -> T,
    {
        if self.spacing == 0 {
            return;
        }
        for (offset, lane) in self.data.chunks_mut(self.spacing).enumerate() {
            let major = self.first + offset;
            for (minor, slot) in lane[..self.minors].iter_mut().enumerate() {
                let (i, j) = self.order.to_row_column(major, minor);
                A::apply(slot, element(i, j));
            }
        }
    }
}

/// Dense destination that can hand out disjoint stripes to worker threads
pub trait SmpDestination: DenseStorage + Send + Sync {
    /// Call `f` once per stripe of `stripe_len` major lanes, in parallel
    fn for_each_stripe<F>(&mut self, stripe_len: usize, f: F)
    where
        F: Fn(Stripe<'_, Self::Element>) + Send + Sync;
}

/// Source that can be assigned through the parallel tier
pub trait SmpAssign: Matrix + Sync {
    fn smp_assign_to<D, A>(&self, target: &mut D, config: &AssignConfig)
    where
        D: SmpDestination<Element = Self::Element>,
        A: Accumulate,
    {
        default_smp_assign::<Self, D, A>(self, target, config);
    }
}

/// Default parallel strategy: stripe the destination, read the source by
/// element access
///
/// A source whose type requires evaluation is never read element by element
/// here; it takes its own serial path, which materializes each expensive
/// sub-expression once. Nodes override [`SmpAssign::smp_assign_to`] to
/// materialize in parallel instead.
pub fn default_smp_assign<S, D, A>(source: &S, target: &mut D, config: &AssignConfig)
where
    S: Matrix + Sync + ?Sized,
    D: SmpDestination<Element = S::Element>,
    A: Accumulate,
{
    let (rows, columns) = source.dimensions();
    if S::REQUIRES_EVALUATION
        || !config.goes_parallel(rows * columns)
        || !source.can_smp_assign()
        || !target.can_smp_assign()
    {
        tracing::trace!(rows, columns, op = A::NAME, "serial fallback");
        source.assign_to::<D, A>(target);
        return;
    }
    parallel_fill::<D, A, _>(target, config, |i, j| source.get(i, j));
}

/// Fill every destination position from `element` across the worker pool
pub(crate) fn parallel_fill<D, A, F>(target: &mut D, config: &AssignConfig, element: F)
where
    D: SmpDestination,
    A: Accumulate,
    F: Fn(usize, usize) -> D::Element + Send + Sync,
{
    let (rows, columns) = target.dimensions();
    let (majors, _) = <D::Order as StorageOrder>::ORDER.major_minor(rows, columns);
    let stripe_len = config.stripe_len(majors);
    tracing::trace!(rows, columns, stripe_len, op = A::NAME, "parallel assignment");
    target.for_each_stripe(stripe_len, |mut stripe| stripe.fill::<A, _>(&element));
}

/// Evaluate `expr` into its result type through the parallel tier
///
/// The returned container is complete before this function returns.
pub fn smp_evaluate<E>(expr: &E, config: &AssignConfig) -> E::ResultType
where
    E: SmpAssign + ?Sized,
    E::ResultType: SmpDestination,
{
    let (rows, columns) = expr.dimensions();
    let mut result = E::ResultType::zeroed(rows, columns);
    expr.smp_assign_to::<_, Assign>(&mut result, config);
    result
}

impl<M: SmpAssign + ?Sized> SmpAssign for &M {
    fn smp_assign_to<D, A>(&self, target: &mut D, config: &AssignConfig)
    where
        D: SmpDestination<Element = Self::Element>,
        A: Accumulate,
    {
        (**self).smp_assign_to::<D, A>(target, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DynamicMatrix;
    use lazymat_core::{AddAssign, ColumnMajor};

    #[test]
    fn test_stripe_majors() {
        let mut data = [0i32; 12];
        let stripe = Stripe::new(Order::RowMajor, 4, 4, 3, &mut data);
        assert_eq!(stripe.majors(), 4..7);
    }

    #[test]
    fn test_stripe_skips_padding() {
        let mut data = [-1i32; 8];
        let mut stripe = Stripe::new(Order::ColumnMajor, 2, 4, 3, &mut data);
        stripe.fill::<Assign, _>(|i, j| (i * 10 + j) as i32);
        assert_eq!(data, [2, 12, 22, -1, 3, 13, 23, -1]);
    }

    #[test]
    fn test_default_smp_assign_parallel_and_serial_agree() {
        let source = DynamicMatrix::<f64>::from_fn(40, 30, |i, j| (i * 30 + j) as f64);
        let parallel = AssignConfig::default().with_smp_threshold(1);

        let mut a = DynamicMatrix::<f64, ColumnMajor>::new(40, 30);
        default_smp_assign::<_, _, Assign>(&source, &mut a, &parallel);
        let mut b = DynamicMatrix::<f64, ColumnMajor>::new(40, 30);
        default_smp_assign::<_, _, Assign>(&source, &mut b, &AssignConfig::serial());
        assert_eq!(a, source);
        assert_eq!(b, source);

        default_smp_assign::<_, _, AddAssign>(&source, &mut a, &parallel);
        assert_eq!(a, DynamicMatrix::<f64>::from_fn(40, 30, |i, j| 2.0 * (i * 30 + j) as f64));
    }

    #[test]
    fn test_smp_evaluate() {
        let source = DynamicMatrix::<i32>::from_fn(9, 9, |i, j| (i + j) as i32);
        let config = AssignConfig::default().with_smp_threshold(0);
        let result = smp_evaluate(&source, &config);
        assert_eq!(result, source);
    }
}
