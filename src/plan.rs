//! Render plan: what a compositor needs to draw a collage.
//!
//! Strategies produce float placements. A [`CollagePlan`] runs one, fixes the
//! canvas size, and rounds every placement to an integer [`Rect`] so the
//! caller can decode each source image and paste it into its tile.

use alloc::vec::Vec;

use crate::geometry::{
    CollageError, FitMode, ImageHandle, PixelSize, Placement, Rect, Size, bounds, fit_within,
    total_area, validate,
};
use crate::strategy::Strategy;

/// One source image's destination on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Index into the image list the plan was built from.
    pub source: usize,
    /// Pixel bounds on the canvas.
    pub rect: Rect,
}

/// A finished layout ready for compositing.
#[derive(Clone, Debug, PartialEq)]
pub struct CollagePlan {
    /// Name of the strategy that produced the layout.
    pub strategy: &'static str,
    /// Float placements, one per input image.
    pub placements: Vec<Placement>,
    /// Output canvas. The target size when one was given, otherwise the
    /// rounded extent of the placements.
    pub canvas: PixelSize,
}

impl CollagePlan {
    /// Lay out `images` at their natural scale.
    ///
    /// ```
    /// use zencollage::{CollagePlan, Greedy, PixelSize, Rect, Size};
    ///
    /// let plan = CollagePlan::new(&Greedy, &[Size::new(200.0, 100.0), Size::new(100.0, 100.0)]).unwrap();
    /// assert_eq!(plan.canvas, PixelSize::new(300, 100));
    /// assert_eq!(plan.tiles()[1].rect, Rect::new(200, 0, 100, 100));
    /// ```
    pub fn new<S, I>(strategy: &S, images: &[I]) -> Result<Self, CollageError>
    where
        S: Strategy + ?Sized,
        I: ImageHandle,
    {
        let sizes = sizes_of(images)?;
        let placements = strategy.build(&sizes)?;
        let canvas = if placements.is_empty() {
            PixelSize::default()
        } else {
            PixelSize::from_size(bounds(&placements))
        };
        Ok(Self {
            strategy: strategy.name(),
            placements,
            canvas,
        })
    }

    /// Lay out `images` fitted into and centered in `target`.
    ///
    /// Strategies without a target overload are run plainly and their
    /// result is passed through [`fit_within`].
    pub fn within<S, I>(
        strategy: &S,
        images: &[I],
        target: Size,
        mode: FitMode,
    ) -> Result<Self, CollageError>
    where
        S: Strategy + ?Sized,
        I: ImageHandle,
    {
        if !target.is_valid() {
            return Err(CollageError::InvalidTarget);
        }
        let sizes = sizes_of(images)?;
        let placements = match strategy.build_within(&sizes, target, mode) {
            Err(CollageError::NotSupported { strategy: name }) => {
                log::debug!("{name}: no target overload, fitting plain layout");
                fit_within(&strategy.build(&sizes)?, target, mode)?
            }
            other => other?,
        };
        Ok(Self {
            strategy: strategy.name(),
            placements,
            canvas: PixelSize::from_size(target),
        })
    }

    /// Integer tiles in placement order.
    pub fn tiles(&self) -> Vec<Tile> {
        self.placements
            .iter()
            .map(|p| Tile {
                source: p.source,
                rect: p.to_pixels(),
            })
            .collect()
    }

    /// Fraction of the canvas covered by tiles. Zero for an empty plan.
    pub fn coverage(&self) -> f64 {
        let canvas = f64::from(self.canvas.width) * f64::from(self.canvas.height);
        if self.placements.is_empty() || canvas == 0.0 {
            return 0.0;
        }
        total_area(&self.placements) / canvas
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

fn sizes_of<I: ImageHandle>(images: &[I]) -> Result<Vec<Size>, CollageError> {
    validate(images)?;
    Ok(images.iter().map(ImageHandle::size).collect())
}
