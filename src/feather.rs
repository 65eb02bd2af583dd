//! Separable Gaussian feathering of a coverage/mask buffer.
//!
//! The blur is applied as two 1-D passes (width first, then height) with
//! reflect padding, so edge pixels see the same kernel mass as interior
//! pixels: no out-of-bounds sampling, no darkening at borders.

use crate::foundation::buffer::MaskBuffer;

/// Soften `mask` with a Gaussian of half-width `radius` pixels.
///
/// Identity when `radius < 1`. The kernel has length `2*radius + 1` with
/// `sigma = max(0.5, radius / 2.5)`, normalized to unit sum. Output weights
/// are clamped to `[0,1]`; input values are taken as-is.
pub fn feather(mask: &MaskBuffer, radius: u32) -> MaskBuffer {
    if radius < 1 {
        return mask.clone();
    }

    let kernel = gaussian_kernel(radius);
    let mut tmp = MaskBuffer::zeros(mask.batch, mask.height, mask.width);
    let mut out = MaskBuffer::zeros(mask.batch, mask.height, mask.width);

    horizontal_pass(mask, &mut tmp, &kernel);
    vertical_pass(&tmp, &mut out, &kernel);

    for v in &mut out.data {
        *v = v.clamp(0.0, 1.0);
    }
    out
}

/// Unit-sum 1-D Gaussian weights of length `2*radius + 1`.
pub fn gaussian_kernel(radius: u32) -> Vec<f32> {
    let r = radius as i64;
    let sigma = (radius as f32 / 2.5).max(0.5);
    let denom = 2.0 * sigma * sigma;

    let mut weights = Vec::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f32;
    for i in -r..=r {
        let x = i as f32;
        let w = (-x * x / denom).exp();
        weights.push(w);
        sum += w;
    }

    // Floor the denominator so a vanishing kernel cannot divide by zero.
    let sum = sum.max(1e-8);
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Reflect an out-of-range sample position back into `[0, n)`.
///
/// Mirrors about the first/last sample without duplicating the edge,
/// folding repeatedly so radii larger than the axis stay in range.
#[inline]
fn reflect_index(mut p: i64, n: i64) -> usize {
    if n == 1 {
        return 0;
    }
    loop {
        if p < 0 {
            p = -p;
        } else if p >= n {
            p = 2 * n - 2 - p;
        } else {
            return p as usize;
        }
    }
}

fn horizontal_pass(src: &MaskBuffer, dst: &mut MaskBuffer, kernel: &[f32]) {
    let radius = (kernel.len() / 2) as i64;
    let w = src.width as i64;
    for b in 0..src.batch {
        for y in 0..src.height {
            for x in 0..w {
                let mut acc = 0.0f32;
                for (ki, &kw) in kernel.iter().enumerate() {
                    let sx = reflect_index(x + ki as i64 - radius, w);
                    acc += kw * src.data[src.idx(b, y, sx)];
                }
                let i = dst.idx(b, y, x as usize);
                dst.data[i] = acc;
            }
        }
    }
}

fn vertical_pass(src: &MaskBuffer, dst: &mut MaskBuffer, kernel: &[f32]) {
    let radius = (kernel.len() / 2) as i64;
    let h = src.height as i64;
    for b in 0..src.batch {
        for y in 0..h {
            for x in 0..src.width {
                let mut acc = 0.0f32;
                for (ki, &kw) in kernel.iter().enumerate() {
                    let sy = reflect_index(y + ki as i64 - radius, h);
                    acc += kw * src.data[src.idx(b, sy, x)];
                }
                let i = dst.idx(b, y as usize, x);
                dst.data[i] = acc;
            }
        }
    }
}
