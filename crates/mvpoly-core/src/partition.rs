//! Axis partitions of lex-sorted term ranges.
//!
//! Under lex order, terms sharing their exponents on axes `0..=a` form
//! contiguous runs. A partition records where those runs start, so that
//! evaluation and differentiation can treat a whole run at once.
//!
//! ```text
//! index:
//! 0:  1 1 1 1 2 2 2 2
//! 1:  3 3 2 2 2 2 1 0
//! partition by axis 0:
//!     0       4       8(end)
//! refined by axis 1:
//!     0   2   4   6 7 8(end)
//! ```
//!
//! Positions are plain offsets into the term slice the partition was built
//! from. They are meaningless for any other slice, and stale once that
//! slice is reordered or resized.

use std::ops::Range;

use crate::store::Term;

/// Maximal runs of equal exponent at one axis within a sorted term range.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AxisPartition {
    /// Axis the last split was made on.
    axis: usize,
    /// Run starts followed by the end marker.
    bounds: Vec<usize>,
}

impl AxisPartition {
    /// Splits `terms[range]` into runs of equal exponent at `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds for `terms`.
    #[must_use]
    pub fn build<R>(terms: &[Term<R>], range: Range<usize>, axis: usize) -> Self {
        let mut bounds = Vec::new();
        push_runs(&mut bounds, terms, range.clone(), axis);
        bounds.push(range.end);
        Self { axis, bounds }
    }

    /// Subdivides every run of `self` by the exponent at `axis`.
    #[must_use]
    pub fn refine<R>(&self, terms: &[Term<R>], axis: usize) -> Self {
        let mut bounds = Vec::with_capacity(self.bounds.len());
        for run in self.runs() {
            push_runs(&mut bounds, terms, run, axis);
        }
        if let Some(&end) = self.bounds.last() {
            bounds.push(end);
        }
        Self { axis, bounds }
    }

    /// Returns the axis of the last split.
    #[must_use]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Returns the run starts followed by the end marker.
    #[must_use]
    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }

    /// Returns the number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len().saturating_sub(1)
    }

    /// Returns true if there are no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the runs as position ranges.
    pub fn runs(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.bounds.windows(2).map(|w| w[0]..w[1])
    }
}

/// Builds one partition per axis in `0..depth`, each refining the previous.
///
/// The last partition groups terms whose exponents agree on every axis
/// below `depth`.
#[must_use]
pub fn chain<R>(terms: &[Term<R>], depth: usize) -> Vec<AxisPartition> {
    let mut partitions: Vec<AxisPartition> = Vec::with_capacity(depth);
    for axis in 0..depth {
        let next = match partitions.last() {
            Some(prev) => prev.refine(terms, axis),
            None => AxisPartition::build(terms, 0..terms.len(), axis),
        };
        partitions.push(next);
    }
    partitions
}

/// Returns the end of the run starting at `start` whose terms share the
/// exponent at `axis`, searching no further than `end`.
///
/// # Panics
///
/// Panics if `start >= end` or `end > terms.len()`.
#[must_use]
pub fn run_end<R>(terms: &[Term<R>], start: usize, end: usize, axis: usize) -> usize {
    let exponent = terms[start].0[axis];
    start
        + terms[start..end].partition_point(|(index, _)| index[axis] == exponent)
}

/// Returns the end of the run starting at `start` whose terms share every
/// exponent on axes `0..=last_axis`.
#[must_use]
pub fn nested_run_end<R>(terms: &[Term<R>], start: usize, last_axis: usize) -> usize {
    (0..=last_axis).fold(terms.len(), |end, axis| run_end(terms, start, end, axis))
}

fn push_runs<R>(bounds: &mut Vec<usize>, terms: &[Term<R>], range: Range<usize>, axis: usize) {
    let mut start = range.start;
    while start < range.end {
        bounds.push(start);
        start = run_end(terms, start, range.end, axis);
    }
}
