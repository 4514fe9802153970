//! Collage strategies.
//!
//! A strategy turns a list of image sizes into one [`Placement`] per image.
//! Strategies are plain values; pick one and pass it to the call site.
//!
//! | Strategy | Search | Target overload |
//! |---|---|---|
//! | [`Greedy`] | nearest-size pairing, one tree | no |
//! | [`Sequential`] | area-ordered strip growth | no |
//! | [`TemplateSearch`] | position templates × permutations, 1–4 items | yes |
//! | [`TreeSearch`] | all tree shapes × permutations, bounded | yes |

mod greedy;
mod sequential;
mod template;
mod tree_search;

pub use greedy::Greedy;
pub use sequential::Sequential;
pub use template::{MAX_TEMPLATE_ITEMS, Slot, TemplateSearch, templates};
pub use tree_search::TreeSearch;

use alloc::vec::Vec;

use crate::geometry::{CollageError, FitMode, Placement, Size};

/// Arranges images into a collage.
///
/// Every implementation returns one placement per input, each wrapping a
/// distinct input index, and returns an empty list for empty input.
pub trait Strategy {
    /// Short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Lay out `images` anchored at the origin.
    fn build(&self, images: &[Size]) -> Result<Vec<Placement>, CollageError>;

    /// Lay out `images` scaled to fit inside `target` and centered in it.
    fn build_within(
        &self,
        images: &[Size],
        target: Size,
        mode: FitMode,
    ) -> Result<Vec<Placement>, CollageError> {
        let _ = (images, target, mode);
        Err(CollageError::NotSupported {
            strategy: self.name(),
        })
    }
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn build(&self, images: &[Size]) -> Result<Vec<Placement>, CollageError> {
        (**self).build(images)
    }

    fn build_within(
        &self,
        images: &[Size],
        target: Size,
        mode: FitMode,
    ) -> Result<Vec<Placement>, CollageError> {
        (**self).build_within(images, target, mode)
    }
}
