//! Crop: slice an image to a rectangle.

use crate::{foundation::buffer::ImageBuffer, geometry::Rect};

/// Crop `image` to `rect`.
///
/// The rectangle is re-clamped crop-style against the image's own size, so
/// the result always contains at least one pixel. Rows `[y, y+h)` and
/// columns `[x, x+w)` are selected across every batch element and channel;
/// the batched/unbatched layout of the input carries through.
#[tracing::instrument(skip(image))]
pub fn run(image: &ImageBuffer, rect: Rect) -> ImageBuffer {
    let rect = rect.clamp_for_crop(image.width as i64, image.height as i64);
    let (x, y, w, h) = (
        rect.x as usize,
        rect.y as usize,
        rect.w as usize,
        rect.h as usize,
    );

    let row_len = w * image.channels;
    let mut data = Vec::with_capacity(image.batch * h * row_len);
    for b in 0..image.batch {
        for row in y..y + h {
            let start = image.idx(b, row, x, 0);
            data.extend_from_slice(&image.data[start..start + row_len]);
        }
    }

    ImageBuffer {
        batch: image.batch,
        height: h,
        width: w,
        channels: image.channels,
        batched: image.batched,
        data,
    }
}
