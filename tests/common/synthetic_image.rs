//! Painters for synthetic target photographs: light paper with dark pellet
//! strikes and an optional calibration ring.

/// Uniform light-paper background.
pub fn blank_target(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    vec![220u8; width * height]
}

/// Paint a filled dark disk (a pellet strike) centered at (cx, cy).
pub fn paint_disk(buf: &mut [u8], width: usize, cx: f32, cy: f32, radius: f32, value: u8) {
    let height = buf.len() / width;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if (dx * dx + dy * dy).sqrt() <= radius {
                buf[y * width + x] = value;
            }
        }
    }
}

/// Paint a dark circle outline (the calibration ring).
pub fn paint_ring(buf: &mut [u8], width: usize, cx: f32, cy: f32, radius: f32, band: f32, value: u8) {
    let height = buf.len() / width;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius).abs() <= band {
                buf[y * width + x] = value;
            }
        }
    }
}
