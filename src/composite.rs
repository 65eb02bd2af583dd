//! Mask algebra and solid-color alpha blending.

use crate::foundation::{
    buffer::{ImageBuffer, MaskBuffer},
    error::{RectError, RectResult},
};

/// An 8-bit RGB color, normalized to `[0,1]` at blend time.
pub type Rgb8 = [u8; 3];

/// How a freshly built mask is combined with an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Ignore the existing mask and keep the new one.
    Replace,
    /// Elementwise `max(existing, new)`.
    Union,
    /// Elementwise `min(existing, new)`.
    Intersect,
    /// `clamp(existing - new, 0, 1)`.
    Subtract,
    /// `clamp(existing * new, 0, 1)`.
    Multiply,
}

/// Elementwise `1 - v` over a mask.
pub fn invert(mask: &MaskBuffer) -> MaskBuffer {
    let mut out = mask.clone();
    for v in &mut out.data {
        *v = 1.0 - *v;
    }
    out
}

/// Combine `base` (the freshly built mask) with `existing` under `mode`.
///
/// Both masks must already be in the same canonical `[B,H,W]` shape; run
/// the existing mask through [`crate::reconcile::reconcile`] first.
pub fn combine(
    base: &MaskBuffer,
    existing: &MaskBuffer,
    mode: CombineMode,
) -> RectResult<MaskBuffer> {
    if (existing.batch, existing.height, existing.width) != (base.batch, base.height, base.width) {
        return Err(RectError::shape(format!(
            "combine shape mismatch: existing {}x{}x{} vs base {}x{}x{}",
            existing.batch, existing.height, existing.width, base.batch, base.height, base.width
        )));
    }

    let mut out = base.clone();
    for (o, (&e, &b)) in out
        .data
        .iter_mut()
        .zip(existing.data.iter().zip(base.data.iter()))
    {
        *o = match mode {
            CombineMode::Replace => b,
            CombineMode::Union => e.max(b),
            CombineMode::Intersect => e.min(b),
            CombineMode::Subtract => (e - b).clamp(0.0, 1.0),
            CombineMode::Multiply => (e * b).clamp(0.0, 1.0),
        };
    }
    Ok(out)
}

/// Alpha-blend a solid color into `image` under `coverage` and `opacity`.
///
/// Per pixel: `a = clamp(coverage * opacity, 0, 1)`, then
/// `out = a*color + (1-a)*image`, clamped to `[0,1]`. The color is
/// broadcast across batch and spatial positions, `a` across channels.
/// Input samples are not pre-clamped; out-of-range (HDR-like) data flows
/// through the blend as-is.
pub fn blend(
    image: &ImageBuffer,
    coverage: &MaskBuffer,
    color: Rgb8,
    opacity: f32,
) -> RectResult<ImageBuffer> {
    if (coverage.batch, coverage.height, coverage.width) != (image.batch, image.height, image.width)
    {
        return Err(RectError::shape(format!(
            "blend coverage {}x{}x{} does not match image {}x{}x{}",
            coverage.batch,
            coverage.height,
            coverage.width,
            image.batch,
            image.height,
            image.width
        )));
    }
    if image.channels != 3 {
        return Err(RectError::shape(format!(
            "blend expects a 3-channel image, got {} channels",
            image.channels
        )));
    }

    let rgb = [
        f32::from(color[0]) / 255.0,
        f32::from(color[1]) / 255.0,
        f32::from(color[2]) / 255.0,
    ];

    let mut out = image.clone();
    for (pixel_i, px) in out.data.chunks_exact_mut(3).enumerate() {
        let a = (coverage.data[pixel_i] * opacity).clamp(0.0, 1.0);
        for (c, v) in px.iter_mut().enumerate() {
            *v = (a * rgb[c] + (1.0 - a) * *v).clamp(0.0, 1.0);
        }
    }
    Ok(out)
}
