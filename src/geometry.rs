//! Geometry shared by every strategy: image sizes, placements, bounds,
//! fit-and-center, and pixel rounding.
//!
//! All coordinates are `f64` until a layout is handed to a renderer, at which
//! point [`Placement::to_pixels`] rounds them to integer [`Rect`]s.
//!
//! # Example
//!
//! ```
//! use zencollage::{FitMode, Placement, Size, fit_within};
//!
//! // Two 100×100 tiles side by side, fitted into a 100×100 box.
//! let layout = [
//!     Placement::new(0, 0.0, 0.0, 100.0, 100.0),
//!     Placement::new(1, 100.0, 0.0, 100.0, 100.0),
//! ];
//! let fitted = fit_within(&layout, Size::new(100.0, 100.0), FitMode::Within).unwrap();
//!
//! // Scaled by half and centered vertically.
//! assert_eq!(fitted[1], Placement::new(1, 50.0, 25.0, 50.0, 50.0));
//! ```

use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Width × height of an image or layout, in abstract units (usually pixels).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in abstract units.
    pub width: f64,
    /// Height in abstract units.
    pub height: f64,
}

impl Size {
    /// Create a size without validation.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a size, rejecting non-finite or non-positive dimensions with
    /// [`CollageError::InvalidSize`].
    pub fn checked(width: f64, height: f64) -> Result<Self, CollageError> {
        let size = Self { width, height };
        if size.is_valid() {
            Ok(size)
        } else {
            Err(CollageError::InvalidSize)
        }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Strictly wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Uniformly scale by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Anything that exposes a width and a height.
///
/// This is the only thing the layout strategies know about an image. Pixel
/// data, file paths and the like stay with the caller.
pub trait ImageHandle {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl ImageHandle for Size {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

impl<T: ImageHandle + ?Sized> ImageHandle for &T {
    fn width(&self) -> f64 {
        (**self).width()
    }

    fn height(&self) -> f64 {
        (**self).height()
    }
}

/// A validated image handle carrying caller data (a path, an id, a decoded
/// buffer) next to its dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage<T> {
    size: Size,
    data: T,
}

impl<T> SourceImage<T> {
    /// Wrap `data` with its dimensions. Fails with [`CollageError::InvalidSize`]
    /// on non-finite or non-positive sizes.
    pub fn new(data: T, width: f64, height: f64) -> Result<Self, CollageError> {
        Ok(Self {
            size: Size::checked(width, height)?,
            data,
        })
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> ImageHandle for SourceImage<T> {
    fn width(&self) -> f64 {
        self.size.width
    }

    fn height(&self) -> f64 {
        self.size.height
    }
}

/// One image positioned and sized within a layout.
///
/// `source` is the index of the placed image in the slice handed to the
/// strategy. Placements are values: scaling and moving return new ones.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Index of the placed image in the strategy's input.
    pub source: usize,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Scaled width.
    pub width: f64,
    /// Scaled height.
    pub height: f64,
}

impl Placement {
    pub const fn new(source: usize, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            source,
            x,
            y,
            width,
            height,
        }
    }

    /// Unscaled placement of `size` at the origin.
    pub const fn at_origin(source: usize, size: Size) -> Self {
        Self::new(source, 0.0, 0.0, size.width, size.height)
    }

    /// Scale position and size about the origin.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            source: self.source,
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Round to integer pixel bounds.
    ///
    /// Edges are rounded independently so adjacent tiles stay adjacent.
    /// Width and height are at least 1.
    pub fn to_pixels(&self) -> Rect {
        let x = round_px(self.x);
        let y = round_px(self.y);
        let right = round_px(self.right());
        let bottom = round_px(self.bottom());
        Rect {
            x,
            y,
            width: right.saturating_sub(x).max(1),
            height: bottom.saturating_sub(y).max(1),
        }
    }
}

impl ImageHandle for Placement {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// Axis-aligned rectangle in integer pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// Canvas dimensions in integer pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Round a float size, clamping each axis to at least 1.
    pub fn from_size(size: Size) -> Self {
        Self {
            width: round_px(size.width).max(1),
            height: round_px(size.height).max(1),
        }
    }
}

/// How [`fit_within`] treats layouts smaller than the target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Only ever shrink. Layouts already inside the target are centered unscaled.
    #[default]
    Within,
    /// Scale up or down so the layout touches the target on one axis.
    Fit,
}

/// Collage layout error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollageError {
    /// Input at `index` has a width or height that is not finite and positive.
    InvalidDimensions { index: usize },
    /// A standalone size is not finite and positive.
    InvalidSize,
    /// Target width or height is not finite and positive.
    InvalidTarget,
    /// The strategy cannot lay out `count` items; it handles at most `max`.
    UnsupportedCount { count: usize, max: usize },
    /// An exhaustive search would score more candidates than allowed.
    SearchBudgetExceeded { candidates: u64, budget: u64 },
    /// The strategy has no target-size overload.
    NotSupported { strategy: &'static str },
    /// Scaling shrank a tile to zero or pushed it out of `f64` range.
    /// Happens only with extreme aspect ratios.
    DegenerateLayout,
}

impl fmt::Display for CollageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { index } => {
                write!(f, "image {index} has invalid dimensions")
            }
            Self::InvalidSize => f.write_str("width and height must be finite and positive"),
            Self::InvalidTarget => f.write_str("target size must be finite and positive"),
            Self::UnsupportedCount { count, max } => {
                write!(f, "cannot lay out {count} images (at most {max} supported)")
            }
            Self::SearchBudgetExceeded { candidates, budget } => write!(
                f,
                "search needs {candidates} candidates, budget is {budget}"
            ),
            Self::NotSupported { strategy } => {
                write!(f, "{strategy} does not support target-size layout")
            }
            Self::DegenerateLayout => {
                f.write_str("layout collapses a tile to zero or non-finite size")
            }
        }
    }
}

impl core::error::Error for CollageError {}

/// Check every input, reporting the first invalid one by index.
pub fn validate<I: ImageHandle>(images: &[I]) -> Result<(), CollageError> {
    match images.iter().position(|img| !img.size().is_valid()) {
        Some(index) => Err(CollageError::InvalidDimensions { index }),
        None => Ok(()),
    }
}

/// Extent of a layout measured from the origin (max right edge, max bottom edge).
///
/// Empty layouts have zero size.
pub fn bounds(layout: &[Placement]) -> Size {
    layout.iter().fold(Size::default(), |acc, p| {
        Size::new(acc.width.max(p.right()), acc.height.max(p.bottom()))
    })
}

/// Sum of the areas of all placements.
pub fn total_area(layout: &[Placement]) -> f64 {
    layout.iter().map(Placement::area).sum()
}

/// Scale a layout to fit inside `target`, then center it.
///
/// The layout is treated as anchored at the origin; its extent is
/// [`bounds`]. Scaling is uniform so no tile is distorted. With
/// [`FitMode::Within`] layouts already inside the target keep their size.
/// Fails with [`CollageError::DegenerateLayout`] if scaling would shrink a
/// tile to nothing.
pub fn fit_within(
    layout: &[Placement],
    target: Size,
    mode: FitMode,
) -> Result<Vec<Placement>, CollageError> {
    if !target.is_valid() {
        return Err(CollageError::InvalidTarget);
    }
    let extent = bounds(layout);
    if !extent.is_valid() {
        return Ok(layout.to_vec());
    }

    let ratio = (target.width / extent.width).min(target.height / extent.height);
    let factor = match mode {
        FitMode::Within => ratio.min(1.0),
        FitMode::Fit => ratio,
    };
    let scaled = extent.scaled(factor);
    let dx = (target.width - scaled.width) / 2.0;
    let dy = (target.height - scaled.height) / 2.0;

    let fitted: Vec<Placement> = layout
        .iter()
        .map(|p| p.scaled(factor).translated(dx, dy))
        .collect();
    check_tiles(&fitted)?;
    Ok(fitted)
}

/// Fail with [`CollageError::DegenerateLayout`] unless every tile has a
/// finite position and a finite, strictly positive size.
pub(crate) fn check_tiles(layout: &[Placement]) -> Result<(), CollageError> {
    let sound = |p: &Placement| {
        p.x.is_finite() && p.y.is_finite() && Size::new(p.width, p.height).is_valid()
    };
    if layout.iter().all(sound) {
        Ok(())
    } else {
        Err(CollageError::DegenerateLayout)
    }
}

/// Factor that takes `from` to `to`.
///
/// Every rescale in the crate goes through this so that a dimension scaled
/// alone and the same dimension scaled as part of a group agree bit for bit.
pub(crate) fn scale_factor(from: f64, to: f64) -> f64 {
    to / from
}

fn round_px(v: f64) -> u32 {
    // Negative and NaN saturate to 0.
    v.round() as u32
}
