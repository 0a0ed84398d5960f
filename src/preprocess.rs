//! Photograph normalization ahead of thresholding.
//!
//! Stages, in order:
//! 1. 8-bit grayscale input to `ImageF32` in [0, 1].
//! 2. 3×3 median filter — edge-preserving denoise for sensor speckle and
//!    paper texture.
//! 3. Min/max contrast stretch to the full [0, 1] range.
//! 4. 5-tap separable Gaussian blur (kernel ≈ [1,4,6,4,1]/16) to suppress
//!    residual noise before the adaptive threshold.
//!
//! Borders are handled by clamping (replicate edge). The transform is
//! deterministic and total; it fails only on zero-sized input.
use crate::image::{ImageF32, ImageU8};

/// Run the full preprocessing chain on a grayscale view.
pub fn preprocess(gray: ImageU8) -> Result<ImageF32, String> {
    if gray.is_empty() {
        return Err(format!(
            "Cannot preprocess empty image ({}x{})",
            gray.w, gray.h
        ));
    }
    let mut img = to_f32(gray);
    img = median3x3(&img);
    stretch_contrast(&mut img);
    Ok(gaussian5x5_sep(&img))
}

fn to_f32(gray: ImageU8) -> ImageF32 {
    let mut out = ImageF32::new(gray.w, gray.h);
    for y in 0..gray.h {
        let src = gray.row(y);
        let dst = out.row_mut(y);
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s as f32 / 255.0;
        }
    }
    out
}

/// 3×3 median filter with clamped borders.
fn median3x3(inp: &ImageF32) -> ImageF32 {
    let (w, h) = (inp.w, inp.h);
    let mut out = ImageF32::new(w, h);
    let mut window = [0.0f32; 9];
    for y in 0..h {
        let ym1 = y.saturating_sub(1);
        let yp1 = (y + 1).min(h - 1);
        let rows = [inp.row(ym1), inp.row(y), inp.row(yp1)];
        for x in 0..w {
            let xm1 = x.saturating_sub(1);
            let xp1 = (x + 1).min(w - 1);
            let mut k = 0;
            for row in rows {
                window[k] = row[xm1];
                window[k + 1] = row[x];
                window[k + 2] = row[xp1];
                k += 3;
            }
            window.sort_unstable_by(|a, b| a.total_cmp(b));
            out.set(x, y, window[4]);
        }
    }
    out
}

/// Linear stretch of the value range to [0, 1]. Flat images are left as-is.
fn stretch_contrast(img: &mut ImageF32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in &img.data {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let range = hi - lo;
    if range < 1e-6 {
        return;
    }
    let inv = 1.0 / range;
    for v in &mut img.data {
        *v = (*v - lo) * inv;
    }
}

/// 5-tap separable Gaussian (sigma ≈ 1), clamped borders.
fn gaussian5x5_sep(inp: &ImageF32) -> ImageF32 {
    let (w, h) = (inp.w, inp.h);
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    // horizontal
    for y in 0..h {
        for x in 0..w {
            let xm1 = x.saturating_sub(1);
            let xm2 = x.saturating_sub(2);
            let xp1 = (x + 1).min(w - 1);
            let xp2 = (x + 2).min(w - 1);
            let v = (inp.get(xm2, y)
                + 4.0 * inp.get(xm1, y)
                + 6.0 * inp.get(x, y)
                + 4.0 * inp.get(xp1, y)
                + inp.get(xp2, y))
                * (1.0 / 16.0);
            tmp.set(x, y, v);
        }
    }
    // vertical
    for y in 0..h {
        let ym1 = y.saturating_sub(1);
        let ym2 = y.saturating_sub(2);
        let yp1 = (y + 1).min(h - 1);
        let yp2 = (y + 2).min(h - 1);
        for x in 0..w {
            let v = (tmp.get(x, ym2)
                + 4.0 * tmp.get(x, ym1)
                + 6.0 * tmp.get(x, y)
                + 4.0 * tmp.get(x, yp1)
                + tmp.get(x, yp2))
                * (1.0 / 16.0);
            out.set(x, y, v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_is_rejected() {
        let img = ImageU8::from_slice(0, 0, &[]);
        assert!(preprocess(img).is_err());
    }

    #[test]
    fn flat_image_stays_flat() {
        let data = vec![128u8; 16 * 16];
        let img = ImageU8::from_slice(16, 16, &data);
        let out = preprocess(img).unwrap();
        let expected = 128.0 / 255.0;
        for &v in &out.data {
            assert!((v - expected).abs() < 1e-5, "v={v}");
        }
    }

    #[test]
    fn contrast_stretch_reaches_full_range() {
        // Two large flat halves, far enough apart that median and blur leave
        // the interior untouched.
        let w = 32;
        let h = 16;
        let mut data = vec![100u8; w * h];
        for y in 0..h {
            for x in 0..w / 2 {
                data[y * w + x] = 60;
            }
        }
        let out = preprocess(ImageU8::from_slice(w, h, &data)).unwrap();
        // interior of the dark half maps to ~0, bright half to ~1
        assert!(out.get(4, 8) < 0.01);
        assert!(out.get(w - 4, 8) > 0.99);
    }

    #[test]
    fn median_removes_single_pixel_speckle() {
        let w = 9;
        let h = 9;
        let mut data = vec![200u8; w * h];
        data[4 * w + 4] = 0; // lone dark pixel
        let out = preprocess(ImageU8::from_slice(w, h, &data)).unwrap();
        // after median the speckle is gone, so the buffer is flat and the
        // contrast stretch leaves it alone
        let center = out.get(4, 4);
        let corner = out.get(0, 0);
        assert!((center - corner).abs() < 1e-5);
    }
}
