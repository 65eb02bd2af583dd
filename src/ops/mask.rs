//! Mask: derive a coverage mask from a rectangle and composite it with an
//! optional pre-existing mask.

use crate::{
    composite::{self, CombineMode},
    feather,
    foundation::{
        buffer::{ImageBuffer, MaskBuffer, MaskTensor},
        error::RectResult,
    },
    geometry::Rect,
    raster::{self, FillMode},
    reconcile,
};

/// Parameters for the mask operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MaskParams {
    /// Gaussian feather radius in pixels; 0 leaves edges hard.
    pub feather: u32,
    /// Invert the built mask before any combination.
    pub invert: bool,
    /// How the built mask meets an existing one.
    pub combine: CombineMode,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            feather: 0,
            invert: false,
            combine: CombineMode::Replace,
        }
    }
}

/// Build a `[B,H,W]` mask from `rect` against `image`'s grid.
///
/// Stages: crop-style clamp, filled rasterization, optional feather,
/// optional invert, then combination with `existing` (reconciled to the
/// image's shape first). Without an existing mask the combine stage is
/// skipped and the (post-invert) base mask is returned.
#[tracing::instrument(skip(image, existing))]
pub fn run(
    image: &ImageBuffer,
    rect: Rect,
    params: &MaskParams,
    existing: Option<&MaskTensor>,
) -> RectResult<MaskBuffer> {
    let rect = rect.clamp_for_crop(image.width as i64, image.height as i64);
    let mut mask = raster::rasterize(
        rect,
        image.batch,
        image.height,
        image.width,
        FillMode::Fill,
        1,
    );
    mask = feather::feather(&mask, params.feather);
    if params.invert {
        mask = composite::invert(&mask);
    }

    match existing {
        None => Ok(mask),
        Some(em) => {
            let em = reconcile::reconcile(em, image.batch, image.height, image.width)?;
            composite::combine(&mask, &em, params.combine)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(b: usize, h: usize, w: usize) -> ImageBuffer {
        ImageBuffer::bhwc(b, h, w, 3, vec![0.0; b * h * w * 3]).unwrap()
    }

    #[test]
    fn base_mask_covers_the_rect() {
        let img = blank(1, 8, 8);
        let m = run(&img, Rect::new(2, 2, 4, 4), &MaskParams::default(), None).unwrap();
        assert_eq!(m.data[m.idx(0, 3, 3)], 1.0);
        assert_eq!(m.data[m.idx(0, 0, 0)], 0.0);
    }

    #[test]
    fn invert_flips_the_base_mask() {
        let img = blank(1, 4, 4);
        let params = MaskParams {
            invert: true,
            ..MaskParams::default()
        };
        let m = run(&img, Rect::new(0, 0, 2, 2), &params, None).unwrap();
        assert_eq!(m.data[m.idx(0, 0, 0)], 0.0);
        assert_eq!(m.data[m.idx(0, 3, 3)], 1.0);
    }

    #[test]
    fn replace_returns_base_even_with_existing() {
        let img = blank(1, 4, 4);
        let existing = MaskTensor::new(vec![4, 4], vec![1.0; 16]).unwrap();
        let m = run(
            &img,
            Rect::new(0, 0, 2, 2),
            &MaskParams::default(),
            Some(&existing),
        )
        .unwrap();
        assert_eq!(m.data[m.idx(0, 3, 3)], 0.0);
    }

    #[test]
    fn union_with_existing_mask() {
        let img = blank(1, 4, 4);
        let existing = MaskTensor::new(vec![4, 4], {
            let mut d = vec![0.0; 16];
            d[15] = 1.0;
            d
        })
        .unwrap();
        let params = MaskParams {
            combine: CombineMode::Union,
            ..MaskParams::default()
        };
        let m = run(&img, Rect::new(0, 0, 2, 2), &params, Some(&existing)).unwrap();
        assert_eq!(m.data[m.idx(0, 0, 0)], 1.0);
        assert_eq!(m.data[m.idx(0, 3, 3)], 1.0);
        assert_eq!(m.data[m.idx(0, 0, 3)], 0.0);
    }

    #[test]
    fn existing_mask_is_reconciled_to_target_shape() {
        let img = blank(4, 64, 64);
        let existing = MaskTensor::new(vec![1, 30, 30], vec![1.0; 900]).unwrap();
        let params = MaskParams {
            combine: CombineMode::Intersect,
            ..MaskParams::default()
        };
        let m = run(&img, Rect::new(0, 0, 64, 64), &params, Some(&existing)).unwrap();
        assert_eq!((m.batch, m.height, m.width), (4, 64, 64));
        // Rect covers everything and the existing mask is all ones.
        assert!(m.data.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn irreducible_existing_mask_is_fatal() {
        let img = blank(1, 4, 4);
        let existing = MaskTensor::new(vec![16], vec![0.0; 16]).unwrap();
        let res = run(
            &img,
            Rect::new(0, 0, 2, 2),
            &MaskParams::default(),
            Some(&existing),
        );
        assert!(res.is_err());
    }

    #[test]
    fn feather_then_invert_ordering() {
        // With invert, corners far from the rect must be fully 1.0 even
        // when feathered, because the blur ran before inversion.
        let img = blank(1, 16, 16);
        let params = MaskParams {
            feather: 2,
            invert: true,
            ..MaskParams::default()
        };
        let m = run(&img, Rect::new(6, 6, 4, 4), &params, None).unwrap();
        assert!((m.data[m.idx(0, 0, 0)] - 1.0).abs() < 1e-6);
        assert!(m.data[m.idx(0, 8, 8)] < 0.5);
    }
}
