//! Magic eraser: clears the alpha of the 4-connected region around a seed pixel.
//!
//! Every candidate is compared against the color of the seed itself, never against the
//! neighbor it was reached from. A slow gradient therefore stops once it drifts more than
//! `threshold` away from the seed. Diagonal neighbors are not connected.

use std::collections::VecDeque;

use log::debug;

use crate::{ColorSample, PixelBuffer, Point};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FloodFillError {
    #[error("Seed {seed:?} is outside of the {width}x{height} buffer")]
    SeedOutOfBounds { seed: Point, width: u32, height: u32 },
}

/// Euclidean distance over RGB. Alpha does not contribute.
pub fn color_distance(a: ColorSample, b: ColorSample) -> f32 {
    let dr = a.r as f32 - b.r as f32;
    let dg = a.g as f32 - b.g as f32;
    let db = a.b as f32 - b.b as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Erases the region reachable from `seed` and returns the number of erased pixels.
///
/// Erased pixels keep their RGB values, only alpha is set to 0. A transparent seed erases
/// nothing. `threshold` is not clamped: negative or NaN values erase nothing, values above
/// ~442 erase every opaque pixel reachable from the seed.
pub fn erase(buffer: &mut PixelBuffer, seed: Point, threshold: f32) -> Result<usize, FloodFillError> {
    if !buffer.contains(seed) {
        return Err(FloodFillError::SeedOutOfBounds {
            seed,
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    let (width, height) = (buffer.width(), buffer.height());
    let (seed_x, seed_y) = (seed.x as u32, seed.y as u32);
    let reference = buffer.get(seed_x, seed_y);
    if reference.is_transparent() {
        debug!("Seed {seed:?} already transparent");
        return Ok(0);
    }

    let mut visited = vec![false; buffer.pixel_count()];
    let mut queue = VecDeque::new();
    queue.push_back((seed_x, seed_y));
    visited[buffer.index(seed_x, seed_y)] = true;
    let mut erased = 0;

    while let Some((x, y)) = queue.pop_front() {
        let idx = buffer.index(x, y);
        let color = buffer.sample_at(idx);
        let within = color_distance(color, reference) <= threshold;
        if color.is_transparent() || !within {
            continue;
        }
        buffer.clear_alpha_at(idx);
        erased += 1;

        let neighbors = [
            (x > 0).then(|| (x - 1, y)),
            (x + 1 < width).then(|| (x + 1, y)),
            (y > 0).then(|| (x, y - 1)),
            (y + 1 < height).then(|| (x, y + 1)),
        ];
        for (nx, ny) in neighbors.into_iter().flatten() {
            let nidx = buffer.index(nx, ny);
            if !visited[nidx] {
                visited[nidx] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    debug!("Flood fill from {seed:?} with threshold {threshold} erased {erased} pixels");
    Ok(erased)
}
