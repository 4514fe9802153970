//! Binary layout trees: leaves are images, inner nodes stack two sub-layouts.
//!
//! A tree is only a grouping decision. [`LayoutTree::arrange`] turns it into
//! placements by applying one rule at every split: the sub-layout that is
//! larger along the shared dimension is shrunk (uniformly) to match the other,
//! then the second sub-layout is moved past the first.
//!
//! ```text
//!     Vertical { top, bottom }      Horizontal { left, right }
//!     ┌──────────┐                  ┌──────┬───────┐
//!     │   top    │                  │      │       │
//!     ├──────────┤                  │ left │ right │
//!     │  bottom  │                  │      │       │
//!     └──────────┘                  └──────┴───────┘
//!     shared width                  shared height
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::geometry::{Placement, Size, scale_factor};

/// Direction in which a split stacks its two children.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// One above the other, sharing width.
    Vertical,
    /// Side by side, sharing height.
    Horizontal,
}

/// A full binary tree of split decisions.
///
/// Leaves hold a slot number. [`arrange`](Self::arrange) reads slot `i` as
/// image `i`; [`arrange_permuted`](Self::arrange_permuted) looks the image up
/// through an assignment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutTree {
    Leaf(usize),
    Vertical {
        top: Box<LayoutTree>,
        bottom: Box<LayoutTree>,
    },
    Horizontal {
        left: Box<LayoutTree>,
        right: Box<LayoutTree>,
    },
}

impl LayoutTree {
    /// Join two trees along `axis`, `first` on top / to the left.
    pub fn split(axis: Axis, first: LayoutTree, second: LayoutTree) -> Self {
        match axis {
            Axis::Vertical => Self::Vertical {
                top: Box::new(first),
                bottom: Box::new(second),
            },
            Axis::Horizontal => Self::Horizontal {
                left: Box::new(first),
                right: Box::new(second),
            },
        }
    }

    #[cfg(test)]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Vertical { top: a, bottom: b } | Self::Horizontal { left: a, right: b } => {
                a.leaf_count() + b.leaf_count()
            }
        }
    }

    /// Number of inner nodes. Always `leaf_count() - 1`.
    #[cfg(test)]
    pub fn split_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Vertical { top: a, bottom: b } | Self::Horizontal { left: a, right: b } => {
                1 + a.split_count() + b.split_count()
            }
        }
    }

    /// Lay the tree out with leaf slot `i` holding `images[i]`.
    ///
    /// Every leaf slot must index `images`. Trees only come from [`shapes`]
    /// and the greedy builder, which number slots `0..images.len()`.
    pub fn arrange(&self, images: &[Size]) -> Shape {
        self.arrange_with(&|slot| (slot, images[slot]))
    }

    /// Lay the tree out with leaf slot `i` holding `images[assignment[i]]`.
    ///
    /// `assignment` is a permutation of `0..images.len()` with one entry per slot.
    pub fn arrange_permuted(&self, images: &[Size], assignment: &[usize]) -> Shape {
        self.arrange_with(&|slot| {
            let source = assignment[slot];
            (source, images[source])
        })
    }

    fn arrange_with(&self, leaf: &dyn Fn(usize) -> (usize, Size)) -> Shape {
        match self {
            Self::Leaf(slot) => {
                let (source, size) = leaf(*slot);
                Shape::leaf(source, size)
            }
            Self::Vertical { top, bottom } => {
                Shape::stack(Axis::Vertical, top.arrange_with(leaf), bottom.arrange_with(leaf))
            }
            Self::Horizontal { left, right } => {
                Shape::stack(Axis::Horizontal, left.arrange_with(leaf), right.arrange_with(leaf))
            }
        }
    }
}

/// An arranged sub-layout in its own coordinates (origin at its top-left).
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub width: f64,
    pub height: f64,
    /// Placements in depth-first leaf order.
    pub placements: Vec<Placement>,
}

impl Shape {
    /// One image, unscaled, at the origin.
    pub fn leaf(source: usize, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            placements: alloc::vec![Placement::at_origin(source, size)],
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Uniformly scale the whole shape, descendants included.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            placements: self.placements.into_iter().map(|p| p.scaled(factor)).collect(),
        }
    }

    fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            placements: self
                .placements
                .into_iter()
                .map(|p| p.translated(dx, dy))
                .collect(),
            ..self
        }
    }

    /// Join two shapes along `axis`.
    ///
    /// The one larger along the shared dimension shrinks to the other's,
    /// keeping its aspect ratio; `second` then sits below or right of `first`.
    pub fn stack(axis: Axis, first: Shape, second: Shape) -> Shape {
        match axis {
            Axis::Vertical => {
                let width = first.width.min(second.width);
                let (first, second) = if first.width > second.width {
                    let f = scale_factor(first.width, second.width);
                    (first.scaled(f), second)
                } else {
                    let f = scale_factor(second.width, first.width);
                    (first, second.scaled(f))
                };
                let second = second.translated(0.0, first.height);
                let height = first.height + second.height;
                let mut placements = first.placements;
                placements.extend(second.placements);
                Shape {
                    width,
                    height,
                    placements,
                }
            }
            Axis::Horizontal => {
                let height = first.height.min(second.height);
                let (first, second) = if first.height > second.height {
                    let f = scale_factor(first.height, second.height);
                    (first.scaled(f), second)
                } else {
                    let f = scale_factor(second.height, first.height);
                    (first, second.scaled(f))
                };
                let second = second.translated(first.width, 0.0);
                let width = first.width + second.width;
                let mut placements = first.placements;
                placements.extend(second.placements);
                Shape {
                    width,
                    height,
                    placements,
                }
            }
        }
    }
}

/// Size of `first` and `second` joined along `axis`, without placing anything.
///
/// Agrees exactly with the size [`Shape::stack`] produces for the same inputs.
pub fn stacked_size(axis: Axis, first: Size, second: Size) -> Size {
    match axis {
        Axis::Vertical => {
            if first.width > second.width {
                let f = scale_factor(first.width, second.width);
                Size::new(second.width, first.height * f + second.height)
            } else {
                let f = scale_factor(second.width, first.width);
                Size::new(first.width, first.height + second.height * f)
            }
        }
        Axis::Horizontal => {
            if first.height > second.height {
                let f = scale_factor(first.height, second.height);
                Size::new(first.width * f + second.width, second.height)
            } else {
                let f = scale_factor(second.height, first.height);
                Size::new(first.width + second.width * f, first.height)
            }
        }
    }
}

/// Every full binary tree with `leaves` leaves and each split tagged
/// vertical or horizontal.
///
/// Leaf slots are numbered `0..leaves` left to right. All vertical-rooted
/// trees come before horizontal-rooted ones; within an axis, trees are
/// ordered by the size of the first subtree. There are
/// `2^(n-1) · Catalan(n-1)` trees; mirror images are kept because the
/// permutation search assigns images to slots independently.
pub fn shapes(leaves: usize) -> Vec<LayoutTree> {
    shapes_from(0, leaves)
}

fn shapes_from(first_slot: usize, leaves: usize) -> Vec<LayoutTree> {
    match leaves {
        0 => Vec::new(),
        1 => alloc::vec![LayoutTree::Leaf(first_slot)],
        n => {
            let mut out = Vec::new();
            for axis in [Axis::Vertical, Axis::Horizontal] {
                for k in 1..n {
                    let firsts = shapes_from(first_slot, k);
                    let seconds = shapes_from(first_slot + k, n - k);
                    for a in &firsts {
                        for b in &seconds {
                            out.push(LayoutTree::split(axis, a.clone(), b.clone()));
                        }
                    }
                }
            }
            out
        }
    }
}

/// `shapes(leaves).len()` without building them. `None` on overflow.
pub fn shape_count(leaves: usize) -> Option<u64> {
    if leaves == 0 {
        return Some(0);
    }
    // counts[k] = number of tagged trees with k leaves.
    let mut counts: Vec<u64> = alloc::vec![0, 1];
    for n in 2..=leaves {
        let mut total: u64 = 0;
        for k in 1..n {
            total = total.checked_add(counts[k].checked_mul(counts[n - k])?)?;
        }
        counts.push(total.checked_mul(2)?);
    }
    Some(counts[leaves])
}
