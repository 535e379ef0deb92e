use crate::foundation::error::{PosterError, PosterResult};

/// Gaussian parameters equivalent to a 2D-canvas `shadowBlur` of `blur` pixels.
///
/// The canvas model defines the shadow as a gaussian with standard deviation `blur / 2`.
/// Returns `(radius, sigma)`; a non-positive blur yields radius 0 (no blur).
pub(crate) fn shadow_blur_params(blur: f32) -> (u32, f32) {
    if !blur.is_finite() || blur <= 0.0 {
        return (0, 0.0);
    }
    let sigma = blur / 2.0;
    ((3.0 * sigma).ceil() as u32, sigma)
}

/// Separable gaussian blur over premultiplied RGBA8 with Q16 fixed-point weights.
///
/// Edge samples are clamped; output stays deterministic across platforms.
pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> PosterResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PosterError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(PosterError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    blur_pass(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    blur_pass(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> PosterResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PosterError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(PosterError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Put the rounding remainder on the center tap so the kernel sums to exactly 1.0 (Q16).
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
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
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
