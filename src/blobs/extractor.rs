//! Stack-based region growing over the binary mask.
//!
//! Seeds every unvisited foreground pixel, grows its 8-connected component,
//! and accumulates first moments plus the count of exposed 4-neighbor faces
//! (the digital perimeter). Buffers are reused across components so one pass
//! allocates O(W·H) once.
use super::Blob;
use crate::threshold::BinaryMask;
use nalgebra::Point2;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

struct ComponentAccumulator {
    count: usize,
    sum_x: f32,
    sum_y: f32,
    perimeter_faces: usize,
}

impl ComponentAccumulator {
    fn new() -> Self {
        Self {
            count: 0,
            sum_x: 0.0,
            sum_y: 0.0,
            perimeter_faces: 0,
        }
    }

    fn reset(&mut self) {
        self.count = 0;
        self.sum_x = 0.0;
        self.sum_y = 0.0;
        self.perimeter_faces = 0;
    }

    fn push(&mut self, x: usize, y: usize, exposed_faces: usize) {
        self.count += 1;
        self.sum_x += x as f32;
        self.sum_y += y as f32;
        self.perimeter_faces += exposed_faces;
    }

    fn to_blob(&self) -> Option<Blob> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f32;
        let area = n;
        let perimeter = self.perimeter_faces as f32;
        let circularity = if perimeter > 0.0 {
            4.0 * std::f32::consts::PI * area / (perimeter * perimeter)
        } else {
            0.0
        };
        Some(Blob {
            centroid: Point2::new(self.sum_x / n, self.sum_y / n),
            area,
            circularity,
        })
    }
}

/// Extract all 8-connected foreground components of `mask`.
pub fn extract_blobs(mask: &BinaryMask) -> Vec<Blob> {
    let (w, h) = (mask.w, mask.h);
    let n = w * h;
    let mut visited = vec![0u8; n];
    let mut stack: Vec<usize> = Vec::with_capacity(64);
    let mut acc = ComponentAccumulator::new();
    let mut blobs = Vec::new();

    for seed in 0..n {
        if visited[seed] != 0 || mask.data[seed] == 0 {
            continue;
        }
        acc.reset();
        stack.clear();
        visited[seed] = 1;
        stack.push(seed);

        while let Some(idx) = stack.pop() {
            let x = idx % w;
            let y = idx / w;
            acc.push(x, y, exposed_faces(mask, x, y));

            for (dx, dy) in NEIGH_OFFSETS {
                let xn = x as isize + dx;
                let yn = y as isize + dy;
                if xn < 0 || yn < 0 || xn >= w as isize || yn >= h as isize {
                    continue;
                }
                let nidx = yn as usize * w + xn as usize;
                if visited[nidx] != 0 || mask.data[nidx] == 0 {
                    continue;
                }
                visited[nidx] = 1;
                stack.push(nidx);
            }
        }

        if let Some(blob) = acc.to_blob() {
            blobs.push(blob);
        }
    }
    blobs
}

/// Number of 4-neighbor faces of (x, y) touching background or the image
/// border.
#[inline]
fn exposed_faces(mask: &BinaryMask, x: usize, y: usize) -> usize {
    let mut faces = 0;
    if x == 0 || !mask.get(x - 1, y) {
        faces += 1;
    }
    if x + 1 >= mask.w || !mask.get(x + 1, y) {
        faces += 1;
    }
    if y == 0 || !mask.get(x, y - 1) {
        faces += 1;
    }
    if y + 1 >= mask.h || !mask.get(x, y + 1) {
        faces += 1;
    }
    faces
}
