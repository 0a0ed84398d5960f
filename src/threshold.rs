//! Adaptive thresholding and binary morphology.
//!
//! Pellet holes photograph darker than the surrounding paper, so a pixel is
//! foreground when it sits below the local mean by more than a fixed offset
//! (the mean-C rule). Local means come from an integral image, making the
//! pass O(W·H) for any window size. A morphological open removes speckle and
//! a close fills pinholes inside strikes before blob extraction.
use crate::image::ImageF32;
use serde::{Deserialize, Serialize};

/// Knobs for the adaptive threshold stage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThresholdParams {
    /// Side of the square local-mean window (odd, pixels).
    pub window: usize,
    /// How far below the local mean a pixel must sit to count as foreground,
    /// in [0, 1] intensity units.
    pub offset: f32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            window: 15,
            offset: 0.04,
        }
    }
}

/// Packed binary mask, one byte per pixel (0 background, 1 foreground).
#[derive(Clone, Debug)]
pub struct BinaryMask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl BinaryMask {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.data[y * self.w + x] = v as u8;
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Binarize `src` with the darker-than-local-mean rule.
pub fn adaptive_mean_threshold(src: &ImageF32, params: &ThresholdParams) -> BinaryMask {
    let (w, h) = (src.w, src.h);
    let mut mask = BinaryMask::new(w, h);
    if w == 0 || h == 0 {
        return mask;
    }
    let integral = integral_image(src);
    let half = (params.window.max(1) / 2) as isize;

    for y in 0..h {
        let y0 = (y as isize - half).max(0) as usize;
        let y1 = ((y as isize + half) as usize).min(h - 1);
        for x in 0..w {
            let x0 = (x as isize - half).max(0) as usize;
            let x1 = ((x as isize + half) as usize).min(w - 1);
            let area = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            let sum = window_sum(&integral, w, x0, y0, x1, y1);
            let mean = (sum / area) as f32;
            mask.set(x, y, src.get(x, y) < mean - params.offset);
        }
    }
    mask
}

/// Summed-area table with a zero top row and left column ((w+1)×(h+1)).
fn integral_image(src: &ImageF32) -> Vec<f64> {
    let (w, h) = (src.w, src.h);
    let stride = w + 1;
    let mut table = vec![0.0f64; stride * (h + 1)];
    for y in 0..h {
        let row = src.row(y);
        let mut row_sum = 0.0f64;
        for x in 0..w {
            row_sum += row[x] as f64;
            table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
        }
    }
    table
}

#[inline]
fn window_sum(integral: &[f64], w: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
    let stride = w + 1;
    integral[(y1 + 1) * stride + x1 + 1] + integral[y0 * stride + x0]
        - integral[y0 * stride + x1 + 1]
        - integral[(y1 + 1) * stride + x0]
}

/// Erosion followed by dilation: removes isolated speckle.
pub fn morph_open(mask: &BinaryMask) -> BinaryMask {
    dilate3x3(&erode3x3(mask))
}

/// Dilation followed by erosion: fills small holes inside blobs.
pub fn morph_close(mask: &BinaryMask) -> BinaryMask {
    erode3x3(&dilate3x3(mask))
}

fn erode3x3(mask: &BinaryMask) -> BinaryMask {
    morph3x3(mask, true)
}

fn dilate3x3(mask: &BinaryMask) -> BinaryMask {
    morph3x3(mask, false)
}

/// 3×3 min (erode) or max (dilate) with clamped borders.
fn morph3x3(mask: &BinaryMask, erode: bool) -> BinaryMask {
    let (w, h) = (mask.w, mask.h);
    let mut out = BinaryMask::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    for y in 0..h {
        let ym1 = y.saturating_sub(1);
        let yp1 = (y + 1).min(h - 1);
        for x in 0..w {
            let xm1 = x.saturating_sub(1);
            let xp1 = (x + 1).min(w - 1);
            let mut acc = erode;
            'kernel: for yy in [ym1, y, yp1] {
                for xx in [xm1, x, xp1] {
                    let v = mask.get(xx, yy);
                    if erode {
                        if !v {
                            acc = false;
                            break 'kernel;
                        }
                    } else if v {
                        acc = true;
                        break 'kernel;
                    }
                }
            }
            out.set(x, y, acc);
        }
    }
    out
}
