//! Photo collage layout: arrange images of arbitrary aspect ratios into one
//! gap-free rectangle.
//!
//! Pure geometry. No pixel operations, no I/O, `no_std` compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`geometry`] — Sizes, placements, bounds, fit-and-center, pixel rounding
//! - [`search`] — Objectives, search limits, permutation enumeration
//! - [`strategy`] — The [`Strategy`] trait and the four layout strategies
//! - [`plan`] — Render plan: canvas size and integer tiles for a compositor
//! - `svg` — SVG preview of a plan (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zencollage::{CollagePlan, FitMode, Greedy, Size, TreeSearch};
//!
//! let photos = [Size::new(640.0, 480.0), Size::new(480.0, 640.0), Size::new(500.0, 500.0)];
//!
//! let quick = CollagePlan::new(&Greedy, &photos).unwrap();
//! assert_eq!(quick.tiles().len(), 3);
//!
//! let best = CollagePlan::within(&TreeSearch::new(), &photos, Size::new(800.0, 600.0), FitMode::Fit)
//!     .unwrap();
//! assert_eq!((best.canvas.width, best.canvas.height), (800, 600));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod geometry;
pub mod plan;
pub mod search;
pub mod strategy;
mod tree;

#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: core types from geometry module
pub use geometry::{
    CollageError, FitMode, ImageHandle, PixelSize, Placement, Rect, Size, SourceImage, bounds,
    fit_within, total_area, validate,
};
pub use plan::{CollagePlan, Tile};
pub use search::{MaxArea, MinWaste, Objective, Permutations, SearchLimits};
pub use strategy::{Greedy, Sequential, Slot, Strategy, TemplateSearch, TreeSearch, templates};
