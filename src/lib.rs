//! rectmask is a CPU reference engine for rectangle-driven raster
//! operations on batched float images.
//!
//! Images are dense `f32` buffers in `[batch, height, width, channel]`
//! layout; masks are `[batch, height, width]` weights in `[0,1]`. Four
//! operations are exposed, each a pure function over its inputs:
//!
//! 1. **Select**: clamp a rectangle proposal against an image's grid
//! 2. **Crop**: slice an image to a rectangle
//! 3. **Fill**: paint a rectangle (filled or outlined, optionally
//!    feathered) into an image with a blended color
//! 4. **Mask**: derive a soft-edged coverage mask from a rectangle and
//!    composite it with an existing mask
//!
//! The engine stages underneath are exposed individually as well:
//! [`Rect`] clamping, [`rasterize`], [`feather`], [`reconcile`],
//! [`combine`] and [`blend`]. Hosts that drive operations by name with
//! JSON parameter records use [`ops::registry`].
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Stateless**: nothing outlives a call; every stage that changes
//!   values produces a new buffer.
//! - **Recover where a picture is better than an error**: malformed rect
//!   records and degenerate geometry clamp to defaults; only irreducible
//!   buffer shapes are fatal.
#![forbid(unsafe_code)]

mod composite;
mod feather;
mod foundation;
mod geometry;
mod raster;
mod reconcile;

pub mod ops;

pub use composite::{CombineMode, Rgb8, blend, combine, invert};
pub use feather::{feather, gaussian_kernel};
pub use foundation::buffer::{ImageBuffer, MaskBuffer, MaskTensor};
pub use foundation::error::{RectError, RectResult};
pub use geometry::Rect;
pub use ops::fill::FillParams;
pub use ops::mask::MaskParams;
pub use ops::registry::{OPS, OpDescriptor, OpKind, OpOutput};
pub use ops::select::SelectOutput;
pub use raster::{FillMode, rasterize};
pub use reconcile::reconcile;
