//! Exhaustive search over hand-enumerated position templates.
//!
//! A template lists grid slots `(col, row)` in row-major order. Walking a
//! template left to right, each image after the first in a row is scaled to
//! the height of the image before it; each new row starts at `x = 0` below the
//! previous row. Rows may end up with different widths.
//!
//! ```text
//!   3 items:  ┌─┬─┬─┐   ┌─┬─┐   ┌───┐   ┌─┐
//!             │0│1│2│   │0│1│   │ 0 │   │0│
//!             └─┴─┴─┘   ├─┴─┘   ├─┬─┤   ├─┤
//!                       │2│     │1│2│   │1│
//!                       └─┘     └─┴─┘   ├─┤
//!                                       │2│
//!                                       └─┘
//! ```

use alloc::vec::Vec;

use super::Strategy;
use crate::geometry::{CollageError, FitMode, Placement, Size, scale_factor, validate};
use crate::search::{Best, MaxArea, Objective, Permutations, Selection};

/// A grid slot in a position template.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub col: u8,
    pub row: u8,
}

const fn s(col: u8, row: u8) -> Slot {
    Slot { col, row }
}

/// Largest item count with templates in the catalog.
pub const MAX_TEMPLATE_ITEMS: usize = 4;

const ONE: &[&[Slot]] = &[&[s(0, 0)]];

const TWO: &[&[Slot]] = &[
    &[s(0, 0), s(1, 0)],
    &[s(0, 0), s(0, 1)],
];

const THREE: &[&[Slot]] = &[
    &[s(0, 0), s(1, 0), s(2, 0)],
    &[s(0, 0), s(1, 0), s(0, 1)],
    &[s(0, 0), s(0, 1), s(1, 1)],
    &[s(0, 0), s(0, 1), s(0, 2)],
];

const FOUR: &[&[Slot]] = &[
    &[s(0, 0), s(1, 0), s(2, 0), s(3, 0)],
    &[s(0, 0), s(1, 0), s(2, 0), s(0, 1)],
    &[s(0, 0), s(1, 0), s(0, 1), s(1, 1)],
    &[s(0, 0), s(0, 1), s(1, 1), s(2, 1)],
    &[s(0, 0), s(1, 0), s(0, 1), s(0, 2)],
    &[s(0, 0), s(0, 1), s(1, 1), s(0, 2)],
    &[s(0, 0), s(0, 1), s(0, 2), s(1, 2)],
    &[s(0, 0), s(0, 1), s(0, 2), s(0, 3)],
];

/// Position templates for `count` items. Empty outside `1..=4`.
pub fn templates(count: usize) -> &'static [&'static [Slot]] {
    match count {
        1 => ONE,
        2 => TWO,
        3 => THREE,
        4 => FOUR,
        _ => &[],
    }
}

/// Every template × every permutation, for up to four images.
///
/// `build` keeps the candidate with the highest objective score (total area
/// by default). `build_within` fits every candidate into the target and
/// keeps the one whose area is closest to the target's. On equal scores the
/// earliest candidate wins: templates in catalog order, permutations in
/// lexicographic order.
///
/// ```
/// use zencollage::{Size, Strategy, TemplateSearch};
///
/// let squares = [Size::new(100.0, 100.0); 3];
/// let layout = TemplateSearch::new().build(&squares).unwrap();
/// assert_eq!(layout.len(), 3);
///
/// let too_many = [Size::new(100.0, 100.0); 5];
/// assert!(TemplateSearch::new().build(&too_many).is_err());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TemplateSearch<O = MaxArea> {
    objective: O,
}

impl TemplateSearch<MaxArea> {
    pub fn new() -> Self {
        Self { objective: MaxArea }
    }
}

impl<O: Objective> TemplateSearch<O> {
    /// Score plain `build` candidates with `objective` instead of total area.
    pub fn with_objective(objective: O) -> Self {
        Self { objective }
    }

    fn search(&self, images: &[Size], selection: Selection<'_>) -> Result<Vec<Placement>, CollageError> {
        let count = images.len();
        let catalog = templates(count);
        if catalog.is_empty() {
            return Err(CollageError::UnsupportedCount {
                count,
                max: MAX_TEMPLATE_ITEMS,
            });
        }

        let mut best = Best::new(selection);
        for template in catalog {
            for order in Permutations::new(count) {
                best.offer(walk(template, &order, images))?;
            }
        }
        log::debug!(
            "template search: {} images, {} candidates scored",
            count,
            best.scored()
        );
        best.into_layout()
    }
}

impl<O: Objective> Strategy for TemplateSearch<O> {
    fn name(&self) -> &'static str {
        "template search"
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

/// Place `images[order[i]]` into `template[i]`.
fn walk(template: &[Slot], order: &[usize], images: &[Size]) -> Vec<Placement> {
    let mut out: Vec<Placement> = Vec::with_capacity(order.len());
    let mut prev_row = 0;
    for (slot, &source) in template.iter().zip(order) {
        let size = images[source];
        let placement = match out.last() {
            None => Placement::at_origin(source, size),
            Some(last) if slot.row == prev_row => {
                // Next column: match the previous tile's height.
                let f = scale_factor(size.height, last.height);
                Placement::new(source, last.right(), last.y, size.width * f, last.height)
            }
            Some(last) => Placement::new(source, 0.0, last.bottom(), size.width, size.height),
        };
        prev_row = slot.row;
        out.push(placement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{bounds, total_area};
    use crate::search::MinWaste;
    use alloc::vec;

    fn sq(side: f64) -> Size {
        Size::new(side, side)
    }

    // ── catalog ─────────────────────────────────────────────────────────

    #[test]
    fn catalog_sizes() {
        assert!(templates(0).is_empty());
        assert_eq!(templates(1).len(), 1);
        assert_eq!(templates(2).len(), 2);
        assert_eq!(templates(3).len(), 4);
        assert_eq!(templates(4).len(), 8);
        assert!(templates(5).is_empty());
    }

    #[test]
    fn templates_are_row_major() {
        for n in 1..=MAX_TEMPLATE_ITEMS {
            for template in templates(n) {
                assert_eq!(template.len(), n);
                assert_eq!(template[0], s(0, 0));
                for pair in template.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let next_col = b.row == a.row && b.col == a.col + 1;
                    let next_row = b.row == a.row + 1 && b.col == 0;
                    assert!(next_col || next_row, "{template:?}");
                }
            }
        }
    }

    // ── walk ────────────────────────────────────────────────────────────

    #[test]
    fn walk_matches_heights_within_a_row() {
        let images = [Size::new(200.0, 100.0), Size::new(100.0, 200.0)];
        let out = walk(TWO[0], &[0, 1], &images);
        assert_eq!(out[1], Placement::new(1, 200.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn walk_new_row_keeps_size() {
        let images = [Size::new(200.0, 100.0), Size::new(100.0, 200.0)];
        let out = walk(TWO[1], &[0, 1], &images);
        assert_eq!(out[1], Placement::new(1, 0.0, 100.0, 100.0, 200.0));
    }

    #[test]
    fn walk_two_over_one() {
        let images = [sq(100.0), sq(50.0), sq(80.0)];
        let out = walk(THREE[1], &[0, 1, 2], &images);
        assert_eq!(out[1], Placement::new(1, 100.0, 0.0, 100.0, 100.0));
        assert_eq!(out[2], Placement::new(2, 0.0, 100.0, 80.0, 80.0));
    }

    // ── build ───────────────────────────────────────────────────────────

    #[test]
    fn empty_and_unsupported_counts() {
        assert_eq!(TemplateSearch::new().build(&[]), Ok(vec![]));
        assert_eq!(
            TemplateSearch::new().build(&[sq(1.0); 5]),
            Err(CollageError::UnsupportedCount { count: 5, max: 4 })
        );
    }

    #[test]
    fn single_image_is_unscaled() {
        let out = TemplateSearch::new().build(&[Size::new(30.0, 40.0)]).unwrap();
        assert_eq!(out, vec![Placement::new(0, 0.0, 0.0, 30.0, 40.0)]);
    }

    #[test]
    fn collapsed_candidates_are_skipped() {
        // Row 0,1 shrinks image 1 to zero width; row 1,0 enlarges image 0 instead.
        let images = [Size::new(1.0, 1e-200), Size::new(1e-200, 1.0)];
        let out = TemplateSearch::new().build(&images).unwrap();
        assert_eq!(out[0].source, 1);
        assert!(out.iter().all(|p| p.width > 0.0 && p.height > 0.0));
    }

    #[test]
    fn nan_objective_for_first_candidate_is_ignored() {
        let images = [Size::new(200.0, 100.0), Size::new(100.0, 200.0)];
        let nan_first = |layout: &[Placement]| {
            if layout[0].source == 0 && layout[1].x > 0.0 {
                f64::NAN
            } else {
                total_area(layout)
            }
        };
        let out = TemplateSearch::with_objective(nan_first).build(&images).unwrap();
        let plain = TemplateSearch::new().build(&images).unwrap();
        assert_eq!(total_area(&out), total_area(&plain));
    }

    #[test]
    fn picks_global_maximum_area() {
        // Row with the portrait first scales the landscape up to 400×200.
        let images = [Size::new(200.0, 100.0), Size::new(100.0, 200.0)];
        let out = TemplateSearch::new().build(&images).unwrap();
        assert_eq!(
            out,
            vec![
                Placement::new(1, 0.0, 0.0, 100.0, 200.0),
                Placement::new(0, 100.0, 0.0, 400.0, 200.0),
            ]
        );
        assert_eq!(total_area(&out), 100_000.0);
    }

    #[test]
    fn identical_squares_keep_their_area() {
        let out = TemplateSearch::new().build(&[sq(100.0); 3]).unwrap();
        assert_eq!(total_area(&out), 30_000.0);
        // All candidates tie; the first template (a row) wins.
        let xs: Vec<f64> = out.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0]);
    }

    #[test]
    fn custom_objective() {
        let images = [Size::new(200.0, 100.0), Size::new(100.0, 200.0)];
        let out = TemplateSearch::with_objective(MinWaste).build(&images).unwrap();
        // First zero-waste candidate: the row in input order.
        assert_eq!(out[0].source, 0);
        assert_eq!(out[1], Placement::new(1, 200.0, 0.0, 50.0, 100.0));

        let tallest = |layout: &[Placement]| bounds(layout).height;
        let out = TemplateSearch::with_objective(tallest).build(&images).unwrap();
        assert_eq!(bounds(&out).height, 300.0);
    }

    #[test]
    fn four_images_cover_every_input() {
        let images = [
            Size::new(640.0, 480.0),
            Size::new(480.0, 640.0),
            Size::new(1000.0, 500.0),
            sq(300.0),
        ];
        let out = TemplateSearch::new().build(&images).unwrap();
        let mut seen: Vec<usize> = out.iter().map(|p| p.source).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    // ── build_within ────────────────────────────────────────────────────

    #[test]
    fn within_picks_closest_area_and_centers() {
        let images = [Size::new(200.0, 100.0), Size::new(100.0, 200.0)];
        let out = TemplateSearch::new()
            .build_within(&images, sq(300.0), FitMode::Within)
            .unwrap();
        // Both columns are 200×300 (deviation 50000); the first one wins.
        assert_eq!(
            out,
            vec![
                Placement::new(0, 50.0, 0.0, 200.0, 100.0),
                Placement::new(1, 50.0, 100.0, 100.0, 200.0),
            ]
        );
    }

    #[test]
    fn within_rejects_bad_target() {
        assert_eq!(
            TemplateSearch::new().build_within(&[sq(1.0)], Size::new(-1.0, 5.0), FitMode::Within),
            Err(CollageError::InvalidTarget)
        );
    }

    #[test]
    fn within_stays_inside_target() {
        let images = [Size::new(1920.0, 1080.0), sq(800.0), Size::new(600.0, 900.0)];
        let target = Size::new(1200.0, 630.0);
        let out = TemplateSearch::new()
            .build_within(&images, target, FitMode::Within)
            .unwrap();
        assert_eq!(out.len(), 3);
        for p in &out {
            assert!(p.x >= -1e-9 && p.y >= -1e-9, "{p:?}");
            assert!(p.right() <= target.width + 1e-9, "{p:?}");
            assert!(p.bottom() <= target.height + 1e-9, "{p:?}");
        }
    }
}
