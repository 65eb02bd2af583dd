use crate::foundation::error::{RectError, RectResult};

/// A dense batch of float images, row-major, logically `[batch, height, width, channel]`.
///
/// `batched` records whether the caller supplied a batch axis; operations
/// that return an image preserve the flag so an unbatched `[H,W,C]` input
/// never gains an axis on the way out. Sample values are nominally in
/// `[0,1]` but out-of-range data is passed through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    /// Number of batch elements (1 when unbatched).
    pub batch: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Image width in pixels.
    pub width: usize,
    /// Samples per pixel.
    pub channels: usize,
    /// Whether the source carried an explicit batch axis.
    pub batched: bool,
    /// Samples, tightly packed `[batch][height][width][channel]`.
    pub data: Vec<f32>,
}

impl ImageBuffer {
    /// Build an unbatched `[H,W,C]` image.
    pub fn hwc(height: usize, width: usize, channels: usize, data: Vec<f32>) -> RectResult<Self> {
        let img = Self {
            batch: 1,
            height,
            width,
            channels,
            batched: false,
            data,
        };
        img.check_len()?;
        Ok(img)
    }

    /// Build a batched `[B,H,W,C]` image.
    pub fn bhwc(
        batch: usize,
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> RectResult<Self> {
        let img = Self {
            batch,
            height,
            width,
            channels,
            batched: true,
            data,
        };
        img.check_len()?;
        Ok(img)
    }

    fn check_len(&self) -> RectResult<()> {
        if self.batch == 0 || self.height == 0 || self.width == 0 || self.channels == 0 {
            return Err(RectError::shape("image axes must all be non-zero"));
        }
        let expected = self
            .batch
            .checked_mul(self.height)
            .and_then(|v| v.checked_mul(self.width))
            .and_then(|v| v.checked_mul(self.channels))
            .ok_or_else(|| RectError::shape("image buffer size overflow"))?;
        if self.data.len() != expected {
            return Err(RectError::shape(format!(
                "image data length {} does not match {}x{}x{}x{}",
                self.data.len(),
                self.batch,
                self.height,
                self.width,
                self.channels
            )));
        }
        Ok(())
    }

    /// Flat index of sample `(b, y, x, c)`.
    #[inline]
    pub fn idx(&self, b: usize, y: usize, x: usize, c: usize) -> usize {
        ((b * self.height + y) * self.width + x) * self.channels + c
    }
}

/// A canonical `[batch, height, width]` coverage/mask buffer, values in `[0,1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskBuffer {
    /// Number of batch elements.
    pub batch: usize,
    /// Mask height in pixels.
    pub height: usize,
    /// Mask width in pixels.
    pub width: usize,
    /// Weights, tightly packed `[batch][height][width]`.
    pub data: Vec<f32>,
}

impl MaskBuffer {
    /// A fully transparent mask.
    pub fn zeros(batch: usize, height: usize, width: usize) -> Self {
        Self {
            batch,
            height,
            width,
            data: vec![0.0; batch * height * width],
        }
    }

    /// Build from existing weights, checking the length.
    pub fn from_parts(
        batch: usize,
        height: usize,
        width: usize,
        data: Vec<f32>,
    ) -> RectResult<Self> {
        let expected = batch
            .checked_mul(height)
            .and_then(|v| v.checked_mul(width))
            .ok_or_else(|| RectError::shape("mask buffer size overflow"))?;
        if data.len() != expected {
            return Err(RectError::shape(format!(
                "mask data length {} does not match {}x{}x{}",
                data.len(),
                batch,
                height,
                width
            )));
        }
        Ok(Self {
            batch,
            height,
            width,
            data,
        })
    }

    /// Flat index of weight `(b, y, x)`.
    #[inline]
    pub fn idx(&self, b: usize, y: usize, x: usize) -> usize {
        (b * self.height + y) * self.width + x
    }
}

/// An externally supplied mask of arbitrary rank, prior to reconciliation.
///
/// Hosts hand masks over in whatever layout they carry them: `[H,W]`,
/// `[B,H,W]`, or the quirky `[B,1,H,1]` some producers emit. Only the
/// element count is validated here; rank normalization happens in
/// [`crate::reconcile`].
#[derive(Clone, Debug, PartialEq)]
pub struct MaskTensor {
    /// Axis lengths, outermost first.
    pub shape: Vec<usize>,
    /// Weights, tightly packed in `shape` order.
    pub data: Vec<f32>,
}

impl MaskTensor {
    /// Build from a shape and matching data.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> RectResult<Self> {
        let mut expected = 1usize;
        for &axis in &shape {
            expected = expected
                .checked_mul(axis)
                .ok_or_else(|| RectError::shape("mask tensor size overflow"))?;
        }
        if data.len() != expected {
            return Err(RectError::shape(format!(
                "mask tensor data length {} does not match shape {:?}",
                data.len(),
                shape
            )));
        }
        Ok(Self { shape, data })
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }
}
