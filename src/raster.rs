//! Turns a clamped rectangle into a binary per-pixel coverage buffer.

use crate::{foundation::buffer::MaskBuffer, geometry::Rect};

/// How a rectangle is rasterized into coverage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Cover every pixel inside the rectangle.
    Fill,
    /// Cover only a border of `thickness` pixels just inside the rectangle.
    Outline,
}

/// Rasterize `rect` into a fresh `[batch, height, width]` coverage buffer.
///
/// Coverage is 1.0 inside the covered region and 0.0 elsewhere; the same
/// rectangle applies identically to every batch element. The rectangle is
/// clamped crop-style against `(width, height)`, so the covered region is
/// always non-empty and in bounds. A zero-sized target (any axis 0)
/// yields an empty mask of that shape.
///
/// In [`FillMode::Outline`] the rectangle interior is cleared again, inset
/// by `thickness` pixels on every side. When the inset leaves no positive
/// interior (`w - 2*thickness <= 0` or `h - 2*thickness <= 0`) the outline
/// degenerates to a filled rectangle.
pub fn rasterize(
    rect: Rect,
    batch: usize,
    height: usize,
    width: usize,
    mode: FillMode,
    thickness: u32,
) -> MaskBuffer {
    if batch == 0 || height == 0 || width == 0 {
        return MaskBuffer::zeros(batch, height, width);
    }

    let rect = rect.clamp_for_crop(width as i64, height as i64);
    let (x, y, w, h) = (
        rect.x as usize,
        rect.y as usize,
        rect.w as usize,
        rect.h as usize,
    );

    let mut mask = MaskBuffer::zeros(batch, height, width);
    for b in 0..batch {
        for row in y..y + h {
            let start = mask.idx(b, row, x);
            mask.data[start..start + w].fill(1.0);
        }
    }

    if mode == FillMode::Outline {
        let t = thickness as i64;
        let inner_w = rect.w - 2 * t;
        let inner_h = rect.h - 2 * t;
        if inner_w > 0 && inner_h > 0 {
            let ix = x + t as usize;
            let iy = y + t as usize;
            for b in 0..batch {
                for row in iy..iy + inner_h as usize {
                    let start = mask.idx(b, row, ix);
                    mask.data[start..start + inner_w as usize].fill(0.0);
                }
            }
        }
    }

    mask
}
