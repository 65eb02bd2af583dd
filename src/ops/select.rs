//! Select: propose a clamped rectangle against an image's pixel grid.

use crate::{foundation::buffer::ImageBuffer, geometry::Rect};

/// The clamped rectangle plus its four components, kept separate for
/// hosts that wire individual integers downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectOutput {
    /// The clamped rectangle record.
    pub rect: Rect,
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width.
    pub w: i64,
    /// Height.
    pub h: i64,
}

/// Clamp `(x, y, w, h)` select-style against `image`'s size.
///
/// The corner is kept where the caller put it (within the image, the far
/// edge included); only the extent shrinks to fit.
#[tracing::instrument(skip(image))]
pub fn run(image: &ImageBuffer, x: i64, y: i64, w: i64, h: i64) -> SelectOutput {
    let rect =
        Rect::new(x, y, w, h).clamp_for_select(image.width as i64, image.height as i64);
    SelectOutput {
        rect,
        x: rect.x,
        y: rect.y,
        w: rect.w,
        h: rect.h,
    }
}
