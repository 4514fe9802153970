//! Greedy pairwise merging.
//!
//! Repeatedly takes the first unpaired item and pairs it with whichever other
//! item is closest in width or in height, stacking the pair along the
//! dimension that matched best. Pairs become items of the next round until one
//! tree remains, which is then arranged with the shared split rule.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use super::Strategy;
use crate::geometry::{CollageError, Placement, Size, check_tiles, validate};
use crate::tree::{Axis, LayoutTree, stacked_size};

/// Nearest-size pairwise merge tree.
///
/// Deterministic: ties go to the earliest candidate, and an exact tie between
/// the width and height mismatch places the pair side by side.
///
/// ```
/// use zencollage::{Greedy, Placement, Size, Strategy};
///
/// let layout = Greedy.build(&[Size::new(200.0, 100.0), Size::new(100.0, 100.0)]).unwrap();
/// assert_eq!(layout[1], Placement::new(1, 200.0, 0.0, 100.0, 100.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Greedy;

impl Strategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn build(&self, images: &[Size]) -> Result<Vec<Placement>, CollageError> {
        validate(images)?;
        let pool = images
            .iter()
            .enumerate()
            .map(|(i, &size)| Node {
                tree: LayoutTree::Leaf(i),
                size,
            })
            .collect();
        let Some(root) = merge_pool(pool) else {
            return Ok(Vec::new());
        };
        let shape = root.tree.arrange(images);
        check_tiles(&shape.placements)?;
        log::debug!(
            "greedy: {} images -> {:.1}x{:.1}",
            images.len(),
            shape.width,
            shape.height
        );
        Ok(shape.placements)
    }
}

/// A subtree and the size it will have once arranged.
struct Node {
    tree: LayoutTree,
    size: Size,
}

/// Merge a pool down to a single node. `None` for an empty pool.
fn merge_pool(mut pool: Vec<Node>) -> Option<Node> {
    let mut merged = Vec::with_capacity(pool.len() / 2);
    while pool.len() > 1 {
        let a = pool.remove(0);
        let (axis, index) = best_partner(a.size, &pool);
        let b = pool.remove(index);
        merged.push(join(axis, a, b));
    }

    let rest = pool.pop();
    if merged.is_empty() {
        return rest;
    }
    let root = merge_pool(merged)?;
    Some(match rest {
        Some(rest) => {
            let axis = choose_axis(root.size, rest.size);
            join(axis, root, rest)
        }
        None => root,
    })
}

/// Index of the best partner for `a` among `candidates` (non-empty) and the
/// axis to stack along.
fn best_partner(a: Size, candidates: &[Node]) -> (Axis, usize) {
    let mut by_width = (0, f64::INFINITY);
    let mut by_height = (0, f64::INFINITY);
    for (i, candidate) in candidates.iter().enumerate() {
        let dw = (a.width - candidate.size.width).abs();
        let dh = (a.height - candidate.size.height).abs();
        if dw < by_width.1 {
            by_width = (i, dw);
        }
        if dh < by_height.1 {
            by_height = (i, dh);
        }
    }
    if by_width.1 < by_height.1 {
        (Axis::Vertical, by_width.0)
    } else {
        (Axis::Horizontal, by_height.0)
    }
}

/// Stack vertically when widths are strictly closer than heights.
fn choose_axis(a: Size, b: Size) -> Axis {
    if (a.width - b.width).abs() < (a.height - b.height).abs() {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

fn join(axis: Axis, a: Node, b: Node) -> Node {
    log::trace!(
        "greedy: {axis:?} merge {:.1}x{:.1} + {:.1}x{:.1}",
        a.size.width,
        a.size.height,
        b.size.width,
        b.size.height
    );
    Node {
        size: stacked_size(axis, a.size, b.size),
        tree: LayoutTree::split(axis, a.tree, b.tree),
    }
}
