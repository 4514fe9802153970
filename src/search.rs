//! Building blocks for the exhaustive strategies: lazy permutations,
//! scoring objectives, search limits, and best-candidate selection.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::geometry::{
    CollageError, FitMode, Placement, Size, bounds, check_tiles, fit_within, total_area,
};

/// Scores a candidate layout. Higher is better.
///
/// Implemented for any `Fn(&[Placement]) -> f64`, so a closure can stand in
/// for a named objective.
pub trait Objective {
    fn score(&self, layout: &[Placement]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[Placement]) -> f64,
{
    fn score(&self, layout: &[Placement]) -> f64 {
        self(layout)
    }
}

/// Prefer the layout covering the most total area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaxArea;

impl Objective for MaxArea {
    fn score(&self, layout: &[Placement]) -> f64 {
        total_area(layout)
    }
}

/// Prefer the layout leaving the least empty space inside its bounding box.
///
/// Tree layouts never leave gaps, so this mostly separates template layouts
/// whose rows end up with different widths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MinWaste;

impl Objective for MinWaste {
    fn score(&self, layout: &[Placement]) -> f64 {
        -(bounds(layout).area() - total_area(layout)).abs()
    }
}

/// Caps on how much work an exhaustive search may do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchLimits {
    /// Largest item count accepted.
    pub max_items: usize,
    /// Largest number of candidate layouts scored in one call.
    pub max_candidates: u64,
}

impl SearchLimits {
    pub const fn new(max_items: usize, max_candidates: u64) -> Self {
        Self {
            max_items,
            max_candidates,
        }
    }

    /// Check `count` items producing `candidates` layouts (`None` = overflowed).
    pub(crate) fn check(&self, count: usize, candidates: Option<u64>) -> Result<u64, CollageError> {
        if count > self.max_items {
            return Err(CollageError::UnsupportedCount {
                count,
                max: self.max_items,
            });
        }
        let candidates = candidates.unwrap_or(u64::MAX);
        if candidates > self.max_candidates {
            return Err(CollageError::SearchBudgetExceeded {
                candidates,
                budget: self.max_candidates,
            });
        }
        Ok(candidates)
    }
}

impl Default for SearchLimits {
    /// Six items: 720 permutations × 1344 tree shapes fits the budget.
    fn default() -> Self {
        Self::new(6, 1_000_000)
    }
}

/// `n!`, or `None` on overflow.
pub fn factorial(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// Every ordering of `0..n`, in lexicographic order, generated lazily.
///
/// `n = 0` yields one empty ordering.
#[derive(Clone, Debug)]
pub struct Permutations {
    current: Vec<usize>,
    started: bool,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            started: false,
            done: false,
        }
    }

    /// Step `current` to the next ordering. Returns false after the last one.
    fn advance(&mut self) -> bool {
        let v = &mut self.current;
        let Some(i) = (1..v.len()).rev().find(|&i| v[i - 1] < v[i]) else {
            return false;
        };
        let pivot = i - 1;
        // A successor exists: v[i] > v[pivot].
        let Some(j) = (i..v.len()).rev().find(|&j| v[j] > v[pivot]) else {
            return false;
        };
        v.swap(pivot, j);
        v[i..].reverse();
        true
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started && !self.advance() {
            self.done = true;
            return None;
        }
        self.started = true;
        Some(self.current.clone())
    }
}

/// How candidates are compared while searching.
pub(crate) enum Selection<'a> {
    /// Highest objective score wins.
    Objective(&'a dyn Objective),
    /// Fit each candidate into the target; smallest `|target area − layout area|` wins.
    Target { target: Size, mode: FitMode },
}

/// Keeps the best candidate seen so far. The first of equal scores wins.
///
/// A NaN score ranks below every number. Candidates with a collapsed or
/// non-finite tile are counted but never kept.
pub(crate) struct Best<'a> {
    selection: Selection<'a>,
    best: Option<(f64, Vec<Placement>)>,
    scored: u64,
}

impl<'a> Best<'a> {
    pub(crate) fn new(selection: Selection<'a>) -> Self {
        Self {
            selection,
            best: None,
            scored: 0,
        }
    }

    /// Score `layout` and keep it if it beats the current best.
    pub(crate) fn offer(&mut self, layout: Vec<Placement>) -> Result<(), CollageError> {
        self.scored += 1;
        if check_tiles(&layout).is_err() {
            log::trace!("candidate {} skipped: degenerate tile", self.scored);
            return Ok(());
        }
        let (score, layout) = match &self.selection {
            Selection::Objective(objective) => (objective.score(&layout), layout),
            Selection::Target { target, mode } => {
                let fitted = match fit_within(&layout, *target, *mode) {
                    Err(CollageError::DegenerateLayout) => {
                        log::trace!("candidate {} skipped: degenerate when fitted", self.scored);
                        return Ok(());
                    }
                    other => other?,
                };
                // Negated so that higher is better in both modes.
                let deviation = (target.area() - total_area(&fitted)).abs();
                (-deviation, fitted)
            }
        };
        let score = if score.is_nan() { f64::NEG_INFINITY } else { score };
        let better = match &self.best {
            None => true,
            Some((best, _)) => score > *best,
        };
        if better {
            log::trace!("candidate {} is the new best (score {score})", self.scored);
            self.best = Some((score, layout));
        }
        Ok(())
    }

    pub(crate) fn scored(&self) -> u64 {
        self.scored
    }

    /// The winning layout. Empty if nothing was offered, an error if every
    /// candidate was degenerate.
    pub(crate) fn into_layout(self) -> Result<Vec<Placement>, CollageError> {
        match self.best {
            Some((_, layout)) => Ok(layout),
            None if self.scored == 0 => Ok(Vec::new()),
            None => Err(CollageError::DegenerateLayout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // ── Permutations ────────────────────────────────────────────────────

    #[test]
    fn permutations_of_three_in_order() {
        let all: Vec<_> = Permutations::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn permutation_counts_match_factorial() {
        for n in 0..=6 {
            assert_eq!(
                Permutations::new(n).count() as u64,
                factorial(n).unwrap(),
                "n={n}"
            );
        }
    }

    #[test]
    fn permutations_of_zero_and_one() {
        assert_eq!(Permutations::new(0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Permutations::new(1).collect::<Vec<_>>(), vec![vec![0]]);
    }

    #[test]
    fn factorial_overflow() {
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(21), None);
    }

    // ── Objectives ──────────────────────────────────────────────────────

    #[test]
    fn max_area_sums_tiles() {
        let layout = [
            Placement::new(0, 0.0, 0.0, 10.0, 10.0),
            Placement::new(1, 10.0, 0.0, 5.0, 10.0),
        ];
        assert_eq!(MaxArea.score(&layout), 150.0);
    }

    #[test]
    fn min_waste_penalizes_ragged_rows() {
        let flush = [
            Placement::new(0, 0.0, 0.0, 10.0, 10.0),
            Placement::new(1, 0.0, 10.0, 10.0, 10.0),
        ];
        let ragged = [
            Placement::new(0, 0.0, 0.0, 20.0, 10.0),
            Placement::new(1, 0.0, 10.0, 10.0, 10.0),
        ];
        assert_eq!(MinWaste.score(&flush), 0.0);
        assert_eq!(MinWaste.score(&ragged), -100.0);
    }

    #[test]
    fn closure_is_an_objective() {
        let fewest = |layout: &[Placement]| -(layout.len() as f64);
        assert_eq!(fewest.score(&[]), 0.0);
    }

    // ── Limits ──────────────────────────────────────────────────────────

    #[test]
    fn limits_reject_count_then_budget() {
        let limits = SearchLimits::new(4, 100);
        assert_eq!(
            limits.check(5, Some(10)),
            Err(CollageError::UnsupportedCount { count: 5, max: 4 })
        );
        assert_eq!(
            limits.check(4, Some(101)),
            Err(CollageError::SearchBudgetExceeded {
                candidates: 101,
                budget: 100
            })
        );
        assert_eq!(
            limits.check(4, None),
            Err(CollageError::SearchBudgetExceeded {
                candidates: u64::MAX,
                budget: 100
            })
        );
        assert_eq!(limits.check(4, Some(100)), Ok(100));
    }

    // ── Best ────────────────────────────────────────────────────────────

    #[test]
    fn best_keeps_first_of_equal_scores() {
        let mut best = Best::new(Selection::Objective(&MaxArea));
        best.offer(vec![Placement::new(0, 0.0, 0.0, 2.0, 2.0)]).unwrap();
        best.offer(vec![Placement::new(1, 0.0, 0.0, 4.0, 1.0)]).unwrap();
        best.offer(vec![Placement::new(2, 0.0, 0.0, 1.0, 1.0)]).unwrap();
        assert_eq!(best.scored(), 3);
        assert_eq!(best.into_layout().unwrap()[0].source, 0);
    }

    #[test]
    fn best_tracks_running_maximum() {
        let mut best = Best::new(Selection::Objective(&MaxArea));
        for (i, side) in [2.0, 5.0, 3.0, 4.0].into_iter().enumerate() {
            best.offer(vec![Placement::new(i, 0.0, 0.0, side, side)]).unwrap();
        }
        assert_eq!(best.into_layout().unwrap()[0].source, 1);
    }

    #[test]
    fn best_by_target_returns_fitted_layout() {
        let mut best = Best::new(Selection::Target {
            target: Size::new(100.0, 100.0),
            mode: FitMode::Within,
        });
        // Both shrink to fit; the square one fills the target exactly.
        best.offer(vec![Placement::new(0, 0.0, 0.0, 400.0, 200.0)]).unwrap();
        best.offer(vec![Placement::new(1, 0.0, 0.0, 200.0, 200.0)]).unwrap();
        let layout = best.into_layout().unwrap();
        assert_eq!(layout, vec![Placement::new(1, 0.0, 0.0, 100.0, 100.0)]);
    }

    #[test]
    fn empty_best_is_empty() {
        assert_eq!(Best::new(Selection::Objective(&MaxArea)).into_layout(), Ok(vec![]));
    }

    #[test]
    fn nan_score_never_beats_a_number() {
        let first_is_nan = |layout: &[Placement]| {
            if layout[0].source == 0 {
                f64::NAN
            } else {
                total_area(layout)
            }
        };
        let mut best = Best::new(Selection::Objective(&first_is_nan));
        best.offer(vec![Placement::new(0, 0.0, 0.0, 9.0, 9.0)]).unwrap();
        best.offer(vec![Placement::new(1, 0.0, 0.0, 2.0, 2.0)]).unwrap();
        best.offer(vec![Placement::new(2, 0.0, 0.0, 3.0, 3.0)]).unwrap();
        assert_eq!(best.into_layout().unwrap()[0].source, 2);
    }

    #[test]
    fn all_nan_scores_keep_the_first() {
        let nan = |_: &[Placement]| f64::NAN;
        let mut best = Best::new(Selection::Objective(&nan));
        best.offer(vec![Placement::new(0, 0.0, 0.0, 1.0, 1.0)]).unwrap();
        best.offer(vec![Placement::new(1, 0.0, 0.0, 2.0, 2.0)]).unwrap();
        assert_eq!(best.into_layout().unwrap()[0].source, 0);
    }

    #[test]
    fn degenerate_candidates_are_skipped() {
        let mut best = Best::new(Selection::Objective(&MaxArea));
        best.offer(vec![Placement::new(0, 0.0, 0.0, 0.0, 5.0)]).unwrap();
        best.offer(vec![Placement::new(1, 0.0, 0.0, 1.0, 1.0)]).unwrap();
        assert_eq!(best.scored(), 2);
        assert_eq!(best.into_layout().unwrap()[0].source, 1);
    }

    #[test]
    fn only_degenerate_candidates_is_an_error() {
        let mut best = Best::new(Selection::Target {
            target: Size::new(10.0, 10.0),
            mode: FitMode::Fit,
        });
        best.offer(vec![Placement::new(0, 0.0, 0.0, f64::INFINITY, 1.0)]).unwrap();
        assert_eq!(best.into_layout(), Err(CollageError::DegenerateLayout));
    }
}
