//! Lasso cutout. The polygon is rasterized with the even-odd rule into a mask aligned to
//! the buffer, then everything outside the mask is made transparent.
//!
//! A pixel belongs to the polygon iff its center `(x + 0.5, y + 0.5)` is inside. Edges
//! cross a scanline on the half-open interval `y1 <= yc < y2`, so shared vertices are
//! counted once and horizontal edges never contribute. Spans are filled on `[x0, x1)`.

use itertools::Itertools;
use log::debug;

use crate::{PixelBuffer, Point};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolygonError {
    #[error("Polygon requires at least 3 points, got {0}")]
    TooFewPoints(usize),
}

/// Closed lasso path of at least three points. The edge from the last point back to the
/// first is implied. Self intersections are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self, PolygonError> {
        if points.len() < 3 {
            return Err(PolygonError::TooFewPoints(points.len()));
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0.iter().copied().circular_tuple_windows()
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = PolygonError;

    fn try_from(value: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

pub struct PolygonMask {
    width: u32,
    height: u32,
    inside: Vec<bool>,
}

impl PolygonMask {
    pub fn rasterize(polygon: &Polygon, width: u32, height: u32) -> Self {
        let mut inside = vec![false; width as usize * height as usize];
        let mut crossings = Vec::with_capacity(polygon.points().len());

        let (min_y, max_y) = polygon
            .points()
            .iter()
            .map(|p| p.y)
            .minmax()
            .into_option()
            .unwrap_or((0, -1));
        let first_row = min_y.max(0);
        let last_row = max_y.min(height as i32 - 1);

        for y in first_row..=last_row {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for (a, b) in polygon.edges() {
                let (y1, y2) = (a.y as f64, b.y as f64);
                if (y1 <= yc && yc < y2) || (y2 <= yc && yc < y1) {
                    let (x1, x2) = (a.x as f64, b.x as f64);
                    crossings.push(x1 + (yc - y1) / (y2 - y1) * (x2 - x1));
                }
            }
            crossings.sort_unstable_by(f64::total_cmp);

            let row = y as usize * width as usize;
            for span in crossings.chunks_exact(2) {
                let start = pixel_column(span[0], width);
                let end = pixel_column(span[1], width);
                if start < end {
                    inside[row + start..row + end].fill(true);
                }
            }
        }

        Self {
            width,
            height,
            inside,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.inside[y as usize * self.width as usize + x as usize]
    }

    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|x| **x).count()
    }

    /// Sets alpha to 0 for every pixel outside the mask and returns how many pixels that were.
    /// Pixels inside are left untouched.
    pub fn apply(&self, buffer: &mut PixelBuffer) -> usize {
        debug_assert_eq!((self.width, self.height), (buffer.width(), buffer.height()));
        let mut cleared = 0;
        for (idx, _) in self.inside.iter().enumerate().filter(|(_, inside)| !**inside) {
            buffer.clear_alpha_at(idx);
            cleared += 1;
        }
        cleared
    }
}

/// First pixel column whose center lies at or right of `x`, clamped to the row.
fn pixel_column(x: f64, width: u32) -> usize {
    (x - 0.5).ceil().clamp(0.0, width as f64) as usize
}

/// Keeps the polygon interior and erases everything else.
pub fn cut(buffer: &mut PixelBuffer, polygon: &Polygon) -> usize {
    let mask = PolygonMask::rasterize(polygon, buffer.width(), buffer.height());
    let cleared = mask.apply(buffer);
    debug!(
        "Lasso with {} points keeps {} pixels, cleared {cleared}",
        polygon.points().len(),
        mask.inside_count()
    );
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorSample;

    fn opaque(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_raw(
            width,
            height,
            [10, 20, 30, 255].repeat(width as usize * height as usize),
        )
        .unwrap()
    }

    fn polygon(points: &[(i32, i32)]) -> Polygon {
        Polygon::new(points.iter().copied().map(Point::from).collect()).unwrap()
    }

    #[test]
    fn rejects_two_points() {
        assert_eq!(
            Polygon::new(vec![Point::new(0, 0), Point::new(3, 3)]),
            Err(PolygonError::TooFewPoints(2))
        );
    }

    #[test]
    fn square_keeps_interior_only() {
        let mut image = opaque(8, 8);
        let cleared = cut(&mut image, &polygon(&[(2, 2), (6, 2), (6, 6), (2, 6)]));
        assert_eq!(cleared, 64 - 16);
        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..6).contains(&x) && (2..6).contains(&y);
                assert_eq!(image.alpha(x, y) == 255, inside, "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn convex_quad_outside_erased_inside_kept() {
        let mut image = opaque(20, 20);
        image.set(10, 10, ColorSample::new(1, 2, 3, 0));
        let quad = polygon(&[(10, 1), (18, 10), (10, 18), (2, 10)]);
        cut(&mut image, &quad);

        // Strictly inside
        for (x, y) in [(10, 5), (10, 15), (5, 10), (15, 10), (9, 9)] {
            assert_eq!(image.alpha(x, y), 255, "pixel {x},{y}");
        }
        // Strictly outside
        for (x, y) in [(0, 0), (19, 19), (2, 2), (17, 3), (3, 17), (19, 10)] {
            assert_eq!(image.alpha(x, y), 0, "pixel {x},{y}");
        }
        // Already erased inside stays erased
        assert_eq!(image.get(10, 10), ColorSample::new(1, 2, 3, 0));
    }

    #[test]
    fn collinear_points_give_empty_interior() {
        let mask = PolygonMask::rasterize(&polygon(&[(0, 0), (2, 2), (4, 4)]), 6, 6);
        assert_eq!(mask.inside_count(), 0);

        let mut image = opaque(6, 6);
        assert_eq!(cut(&mut image, &polygon(&[(0, 3), (2, 3), (5, 3)])), 36);
    }

    #[test]
    fn self_intersecting_uses_even_odd() {
        // Pentagram: the center is crossed twice on each side and stays outside.
        let star = polygon(&[(50, 0), (79, 90), (2, 35), (98, 35), (21, 90)]);
        let mask = PolygonMask::rasterize(&star, 100, 100);
        assert!(!mask.contains(50, 50));
        assert!(mask.contains(50, 10));
        assert!(mask.contains(15, 36));
        assert!(!mask.contains(0, 0));
    }

    #[test]
    fn polygon_may_extend_beyond_buffer() {
        let mask = PolygonMask::rasterize(&polygon(&[(-5, -5), (20, -5), (20, 20), (-5, 20)]), 4, 4);
        assert_eq!(mask.inside_count(), 16);
    }

    #[test]
    fn implicit_closing_edge() {
        // Triangle given without repeating the first point
        let mask = PolygonMask::rasterize(&polygon(&[(0, 0), (8, 0), (0, 8)]), 8, 8);
        assert!(mask.contains(1, 1));
        assert!(!mask.contains(7, 7));
    }
}
