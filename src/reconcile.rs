//! Normalizes an externally supplied mask to the canonical `[B,H,W]` form
//! of a target buffer.
//!
//! Shape polymorphism is handled once, here; every downstream consumer
//! sees only the canonical shape.

use crate::foundation::{
    buffer::{MaskBuffer, MaskTensor},
    error::{RectError, RectResult},
};

/// Reconcile `mask` against a target `[batch, height, width]`.
///
/// Accepted input ranks: `[H,W]` (a batch axis of 1 is added), `[B,H,W]`,
/// and the quirky `[B,1,H,1]` layout some producers emit (the singleton
/// second axis is dropped, leaving `[B,H,1]`). Anything else is a shape
/// error.
///
/// Batch reconciliation: a supplied batch of 1 broadcasts to `batch`; any
/// other mismatch keeps only the first element and broadcasts it. The
/// latter is lossy and inherited for compatibility, so it is logged.
/// Spatial mismatches are resolved by bilinear resampling without corner
/// alignment. The result is clamped to `[0,1]`.
pub fn reconcile(
    mask: &MaskTensor,
    batch: usize,
    height: usize,
    width: usize,
) -> RectResult<MaskBuffer> {
    let (src_b, src_h, src_w) = match mask.shape.as_slice() {
        [h, w] => (1, *h, *w),
        [b, h, w] => (*b, *h, *w),
        [b, 1, h, 1] => (*b, *h, 1),
        other => {
            return Err(RectError::shape(format!(
                "unsupported mask shape {other:?}"
            )));
        }
    };
    if src_b == 0 || src_h == 0 || src_w == 0 {
        return Err(RectError::shape(format!(
            "mask axes must be non-zero, got {:?}",
            mask.shape
        )));
    }

    let plane = src_h * src_w;
    let mut normalized = MaskBuffer::zeros(batch, src_h, src_w);
    if src_b == batch {
        normalized.data.copy_from_slice(&mask.data);
    } else {
        if src_b != 1 {
            tracing::debug!(
                supplied = src_b,
                target = batch,
                "mask batch mismatch; broadcasting first element"
            );
        }
        for b in 0..batch {
            normalized.data[b * plane..(b + 1) * plane].copy_from_slice(&mask.data[..plane]);
        }
    }

    let mut out = if src_h == height && src_w == width {
        normalized
    } else {
        resample_bilinear(&normalized, height, width)
    };

    for v in &mut out.data {
        *v = v.clamp(0.0, 1.0);
    }
    Ok(out)
}

/// Bilinear resample of every batch plane to `(height, width)`.
///
/// Source coordinates are derived without corner alignment:
/// `src = (dst + 0.5) * (src_len / dst_len) - 0.5`, with neighbor indices
/// clamped to the source plane.
fn resample_bilinear(src: &MaskBuffer, height: usize, width: usize) -> MaskBuffer {
    let mut out = MaskBuffer::zeros(src.batch, height, width);
    let scale_y = src.height as f32 / height as f32;
    let scale_x = src.width as f32 / width as f32;

    for b in 0..src.batch {
        for oy in 0..height {
            let sy = (oy as f32 + 0.5) * scale_y - 0.5;
            let y0 = sy.floor();
            let ty = sy - y0;
            let y0i = (y0 as i64).clamp(0, src.height as i64 - 1) as usize;
            let y1i = (y0 as i64 + 1).clamp(0, src.height as i64 - 1) as usize;

            for ox in 0..width {
                let sx = (ox as f32 + 0.5) * scale_x - 0.5;
                let x0 = sx.floor();
                let tx = sx - x0;
                let x0i = (x0 as i64).clamp(0, src.width as i64 - 1) as usize;
                let x1i = (x0 as i64 + 1).clamp(0, src.width as i64 - 1) as usize;

                let top = src.data[src.idx(b, y0i, x0i)] * (1.0 - tx)
                    + src.data[src.idx(b, y0i, x1i)] * tx;
                let bottom = src.data[src.idx(b, y1i, x0i)] * (1.0 - tx)
                    + src.data[src.idx(b, y1i, x1i)] * tx;
                let i = out.idx(b, oy, ox);
                out.data[i] = top * (1.0 - ty) + bottom * ty;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_2_gains_a_batch_axis() {
        let m = MaskTensor::new(vec![2, 3], vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        let out = reconcile(&m, 1, 2, 3).unwrap();
        assert_eq!((out.batch, out.height, out.width), (1, 2, 3));
        assert_eq!(out.data, m.data);
    }

    #[test]
    fn quirky_4d_shape_is_accepted() {
        let m = MaskTensor::new(vec![2, 1, 3, 1], vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        let out = reconcile(&m, 2, 3, 1).unwrap();
        assert_eq!((out.batch, out.height, out.width), (2, 3, 1));
        assert_eq!(out.data, m.data);
    }

    #[test]
    fn irreducible_shapes_are_rejected() {
        let m = MaskTensor::new(vec![6], vec![0.0; 6]).unwrap();
        assert!(reconcile(&m, 1, 2, 3).is_err());
        let m = MaskTensor::new(vec![1, 2, 3, 4], vec![0.0; 24]).unwrap();
        assert!(reconcile(&m, 1, 3, 4).is_err());
        let m = MaskTensor::new(vec![1, 1, 2, 3, 4], vec![0.0; 24]).unwrap();
        assert!(reconcile(&m, 1, 3, 4).is_err());
    }

    #[test]
    fn singleton_batch_broadcasts() {
        let m = MaskTensor::new(vec![1, 2, 2], vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        let out = reconcile(&m, 3, 2, 2).unwrap();
        assert_eq!(out.batch, 3);
        for b in 0..3 {
            assert_eq!(&out.data[b * 4..(b + 1) * 4], &[0.1, 0.2, 0.3, 0.4]);
        }
    }

    #[test]
    fn batch_mismatch_keeps_first_element() {
        let m = MaskTensor::new(vec![2, 1, 2], vec![0.25, 0.5, 0.75, 1.0]).unwrap();
        let out = reconcile(&m, 3, 1, 2).unwrap();
        for b in 0..3 {
            assert_eq!(&out.data[b * 2..(b + 1) * 2], &[0.25, 0.5]);
        }
    }

    #[test]
    fn matching_shape_passes_through() {
        let data = vec![0.9, 0.1, 0.4, 0.6];
        let m = MaskTensor::new(vec![1, 2, 2], data.clone()).unwrap();
        let out = reconcile(&m, 1, 2, 2).unwrap();
        assert_eq!(out.data, data);
    }

    #[test]
    fn constant_plane_survives_resampling() {
        let m = MaskTensor::new(vec![1, 3, 3], vec![0.5; 9]).unwrap();
        let out = reconcile(&m, 1, 8, 8).unwrap();
        assert_eq!((out.height, out.width), (8, 8));
        for &v in &out.data {
            assert!((v - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn upsampling_interpolates_between_samples() {
        // 1x2 plane [0, 1] upsampled to 1x4: interior samples blend.
        let m = MaskTensor::new(vec![1, 1, 2], vec![0.0, 1.0]).unwrap();
        let out = reconcile(&m, 1, 1, 4).unwrap();
        assert_eq!(out.data.len(), 4);
        assert_eq!(out.data[0], 0.0);
        assert_eq!(out.data[3], 1.0);
        assert!((out.data[1] - 0.25).abs() < 1e-6);
        assert!((out.data[2] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let m = MaskTensor::new(vec![1, 1, 2], vec![-0.5, 1.5]).unwrap();
        let out = reconcile(&m, 1, 1, 2).unwrap();
        assert_eq!(out.data, vec![0.0, 1.0]);
    }

    #[test]
    fn batch_and_spatial_reconcile_together() {
        let m = MaskTensor::new(vec![1, 30, 30], vec![1.0; 900]).unwrap();
        let out = reconcile(&m, 4, 64, 64).unwrap();
        assert_eq!((out.batch, out.height, out.width), (4, 64, 64));
        assert!(out.data.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }
}
