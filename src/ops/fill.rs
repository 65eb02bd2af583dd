//! Fill: paint a rectangle (filled or outlined) into an image with a
//! blended color.

use crate::{
    composite::{self, Rgb8},
    feather,
    foundation::{buffer::ImageBuffer, error::RectResult},
    geometry::Rect,
    raster::{self, FillMode},
};

/// Parameters for the fill operation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FillParams {
    /// Color painted into the covered region.
    pub color: Rgb8,
    /// Blend opacity in `[0,1]`.
    pub opacity: f32,
    /// Filled interior or outline-only coverage.
    pub mode: FillMode,
    /// Outline border width in pixels (ignored for [`FillMode::Fill`]).
    pub thickness: u32,
    /// Gaussian feather radius in pixels; 0 leaves edges hard.
    pub feather: u32,
}

impl Default for FillParams {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            opacity: 1.0,
            mode: FillMode::Fill,
            thickness: 4,
            feather: 0,
        }
    }
}

/// Rasterize `rect` over `image`, optionally feather the coverage, then
/// alpha-blend `params.color` into the covered pixels.
#[tracing::instrument(skip(image))]
pub fn run(image: &ImageBuffer, rect: Rect, params: &FillParams) -> RectResult<ImageBuffer> {
    let rect = rect.clamp_for_crop(image.width as i64, image.height as i64);
    let coverage = raster::rasterize(
        rect,
        image.batch,
        image.height,
        image.width,
        params.mode,
        params.thickness,
    );
    let coverage = feather::feather(&coverage, params.feather);
    composite::blend(image, &coverage, params.color, params.opacity)
}
