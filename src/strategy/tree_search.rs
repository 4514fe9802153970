//! Exhaustive search over layout trees.
//!
//! Every tagged tree shape with `n` leaves is arranged once for every
//! assignment of images to leaves. The search space is
//! `2^(n-1) · Catalan(n-1) · n!` candidates, so it is capped by
//! [`SearchLimits`] before any work starts.

use alloc::vec::Vec;

use super::Strategy;
use crate::geometry::{CollageError, FitMode, Placement, Size, validate};
use crate::search::{Best, MaxArea, Objective, Permutations, SearchLimits, Selection, factorial};
use crate::tree::{shape_count, shapes};

/// All tree shapes × all permutations, scored by an [`Objective`].
///
/// Contains every layout [`Greedy`](super::Greedy) can produce, so with
/// [`MaxArea`] its result never covers less area than the greedy one.
///
/// ```
/// use zencollage::{SearchLimits, Size, Strategy, TreeSearch};
///
/// let images = [Size::new(640.0, 480.0), Size::new(480.0, 640.0), Size::new(500.0, 500.0)];
/// let layout = TreeSearch::new().build(&images).unwrap();
/// assert_eq!(layout.len(), 3);
///
/// // 4 images: 40 shapes × 24 orderings.
/// let tight = TreeSearch::new().limits(SearchLimits::new(6, 100));
/// assert!(tight.build(&[Size::new(1.0, 1.0); 4]).is_err());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TreeSearch<O = MaxArea> {
    objective: O,
    limits: SearchLimits,
}

impl TreeSearch<MaxArea> {
    pub fn new() -> Self {
        Self::with_objective(MaxArea)
    }
}

impl<O: Objective> TreeSearch<O> {
    /// Score plain `build` candidates with `objective`.
    pub fn with_objective(objective: O) -> Self {
        Self {
            objective,
            limits: SearchLimits::default(),
        }
    }

    /// Replace the default search limits.
    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Number of candidates a search over `count` images would score.
    /// `None` on overflow.
    pub fn candidate_count(count: usize) -> Option<u64> {
        shape_count(count)?.checked_mul(factorial(count)?)
    }

    fn search(&self, images: &[Size], selection: Selection<'_>) -> Result<Vec<Placement>, CollageError> {
        let count = images.len();
        let budget = self.limits.check(count, Self::candidate_count(count))?;

        let mut best = Best::new(selection);
        for tree in shapes(count) {
            for order in Permutations::new(count) {
                best.offer(tree.arrange_permuted(images, &order).placements)?;
            }
        }
        log::debug!(
            "tree search: {} images, {} of {} candidates scored",
            count,
            best.scored(),
            budget
        );
        best.into_layout()
    }
}

impl<O: Objective> Strategy for TreeSearch<O> {
    fn name(&self) -> &'static str {
        "tree search"
    }

    fn build(&self, images: &[Size]) -> Result<Vec<Placement>, CollageError> {
        validate(images)?;
        if images.is_empty() {
            return Ok(Vec::new());
        }
        self.search(images, Selection::Objective(&self.objective))
    }

    fn build_within(
        &self,
        images: &[Size],
        target: Size,
        mode: FitMode,
    ) -> Result<Vec<Placement>, CollageError> {
        validate(images)?;
        if !target.is_valid() {
            return Err(CollageError::InvalidTarget);
        }
        if images.is_empty() {
            return Ok(Vec::new());
        }
        self.search(images, Selection::Target { target, mode })
    }
}
