use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::math::mul_div255_u8;

/// Gaussian sigma for a blur radius, matching the usual mask-filter convention.
pub(crate) fn sigma_for_radius(radius: f32) -> f32 {
    radius * 0.57735 + 0.5
}

/// Half-width of the kernel needed to cover `sigma`.
pub(crate) fn kernel_radius(sigma: f32) -> u32 {
    (sigma * 3.0).ceil().max(0.0) as u32
}

/// Blur a premultiplied RGBA8 buffer. Pixels outside the buffer count as transparent.
pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ClockResult<Vec<u8>> {
    let expected_len = buffer_len(width, height)?;
    if src.len() != expected_len {
        return Err(ClockError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Outer-glow filter with a reusable scratch buffer.
///
/// The filter blurs the painted coverage and then keeps the halo only where the original layer
/// was transparent, so the crisp shape itself is knocked out.
#[derive(Default)]
pub(crate) struct GlowFilter {
    region: Vec<u8>,
}

impl GlowFilter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace `rgba` with its outer glow for `radius` (pixels).
    ///
    /// Only the bounding box of painted pixels, padded by the kernel, is processed.
    pub(crate) fn apply_outer(
        &mut self,
        rgba: &mut [u8],
        width: u32,
        height: u32,
        radius: f32,
    ) -> ClockResult<()> {
        if !radius.is_finite() || radius <= 0.0 {
            return Ok(());
        }
        if rgba.len() != buffer_len(width, height)? {
            return Err(ClockError::render("glow buffer size mismatch"));
        }
        let Some(bounds) = alpha_bounds(rgba, width, height) else {
            return Ok(());
        };

        let sigma = sigma_for_radius(radius);
        let kr = kernel_radius(sigma);

        let x0 = bounds.x0.saturating_sub(kr);
        let y0 = bounds.y0.saturating_sub(kr);
        let x1 = bounds.x1.saturating_add(kr).min(width);
        let y1 = bounds.y1.saturating_add(kr).min(height);
        let (rw, rh) = (x1 - x0, y1 - y0);
        let region_len = (rw as usize) * (rh as usize) * 4;

        self.region.resize(region_len, 0);

        let stride = (width as usize) * 4;
        let row_bytes = (rw as usize) * 4;
        for ry in 0..rh as usize {
            let src_start = (y0 as usize + ry) * stride + (x0 as usize) * 4;
            self.region[ry * row_bytes..(ry + 1) * row_bytes]
                .copy_from_slice(&rgba[src_start..src_start + row_bytes]);
        }

        let blurred = blur_rgba8_premul(&self.region, rw, rh, kr, sigma)?;

        for ry in 0..rh as usize {
            let dst_start = (y0 as usize + ry) * stride + (x0 as usize) * 4;
            let dst_row = &mut rgba[dst_start..dst_start + row_bytes];
            let src_row = &self.region[ry * row_bytes..(ry + 1) * row_bytes];
            let blur_row = &blurred[ry * row_bytes..(ry + 1) * row_bytes];
            for ((d, s), b) in dst_row
                .chunks_exact_mut(4)
                .zip(src_row.chunks_exact(4))
                .zip(blur_row.chunks_exact(4))
            {
                let outside = 255u16 - u16::from(s[3]);
                for c in 0..4 {
                    d[c] = mul_div255_u8(u16::from(b[c]), outside);
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelBounds {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    /// Exclusive.
    pub(crate) x1: u32,
    /// Exclusive.
    pub(crate) y1: u32,
}

pub(crate) fn alpha_bounds(rgba: &[u8], width: u32, height: u32) -> Option<PixelBounds> {
    let mut out: Option<PixelBounds> = None;
    let w = width as usize;
    for (i, px) in rgba.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = ((i % w) as u32, (i / w) as u32);
        if y >= height {
            break;
        }
        out = Some(match out {
            None => PixelBounds {
                x0: x,
                y0: y,
                x1: x + 1,
                y1: y + 1,
            },
            Some(b) => PixelBounds {
                x0: b.x0.min(x),
                y0: b.y0.min(y),
                x1: b.x1.max(x + 1),
                y1: b.y1.max(y + 1),
            },
        });
    }
    out
}

fn buffer_len(width: u32, height: u32) -> ClockResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ClockError::render("blur buffer size overflow"))
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ClockResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ClockError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ClockError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the rounding remainder into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = x + ki as i32 - radius;
                if sx < 0 || sx >= w {
                    continue;
                }
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = y + ki as i32 - radius;
                if sy < 0 || sy >= h {
                    continue;
                }
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
