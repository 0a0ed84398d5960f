//! Borrowed 8-bit grayscale view over caller-owned pixel bytes.
//!
//! The analyzer never takes ownership of the photograph; callers keep the
//! decoded bytes alive for the duration of one detection call.

/// Read-only 8-bit grayscale view, row-major with an explicit stride.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    /// Bytes between consecutive rows (>= `w`).
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// View over a tightly packed `w × h` buffer.
    pub fn from_slice(w: usize, h: usize, data: &'a [u8]) -> Self {
        debug_assert!(data.len() >= w * h, "buffer too short for {w}x{h}");
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_access_skips_padding() {
        // 2x2 view inside a 3-byte-wide buffer.
        let data = [1u8, 2, 99, 3, 4, 99];
        let img = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            data: &data,
        };
        assert_eq!(img.get(1, 0), 2);
        assert_eq!(img.get(0, 1), 3);
        assert_eq!(img.row(1), &[3, 4]);
    }

    #[test]
    fn zero_sized_view_is_empty() {
        let img = ImageU8::from_slice(0, 0, &[]);
        assert!(img.is_empty());
    }
}
