//! Strip growth in order of increasing area.

use alloc::vec::Vec;

use super::Strategy;
use crate::geometry::{CollageError, Placement, Size, check_tiles, validate};
use crate::tree::{Axis, Shape};

/// Grows one shape image by image, smallest area first.
///
/// A landscape image joining a landscape shape goes underneath it; anything
/// else goes to the right. Whichever side is larger along the shared edge is
/// shrunk to match. Placements come back in the order they were added.
///
/// ```
/// use zencollage::{Sequential, Size, Strategy};
///
/// let layout = Sequential.build(&[Size::new(200.0, 200.0), Size::new(100.0, 100.0)]).unwrap();
/// // The smaller image is placed first; the larger one shrinks to its height.
/// assert_eq!(layout[0].source, 1);
/// assert_eq!((layout[1].x, layout[1].width), (100.0, 100.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sequential;

impl Strategy for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn build(&self, images: &[Size]) -> Result<Vec<Placement>, CollageError> {
        validate(images)?;
        let mut order: Vec<usize> = (0..images.len()).collect();
        // Stable: equal areas keep input order.
        order.sort_by(|&a, &b| images[a].area().total_cmp(&images[b].area()));

        let mut items = order.into_iter().map(|i| Shape::leaf(i, images[i]));
        let Some(first) = items.next() else {
            return Ok(Vec::new());
        };
        let shape = items.fold(first, |shape, item| {
            let axis = if shape.size().is_landscape() && item.size().is_landscape() {
                Axis::Vertical
            } else {
                Axis::Horizontal
            };
            Shape::stack(axis, shape, item)
        });
        check_tiles(&shape.placements)?;
        log::debug!(
            "sequential: {} images -> {:.1}x{:.1}",
            images.len(),
            shape.width,
            shape.height
        );
        Ok(shape.placements)
    }
}
