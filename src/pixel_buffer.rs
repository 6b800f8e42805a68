use std::num::NonZeroU32;

/// Integer position in buffer space. May lie outside the buffer, e.g. for lasso vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorSample {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PixelBufferError {
    #[error("Image dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Expected {expected} channel bytes for RGBA image, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// RGBA8 raster with fixed dimensions. Pixel `(x, y)` lives at `(y * width + x) * 4`.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: NonZeroU32,
    height: NonZeroU32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        let (Some(nz_width), Some(nz_height)) = (NonZeroU32::new(width), NonZeroU32::new(height))
        else {
            return Err(PixelBufferError::ZeroDimension { width, height });
        };
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width: nz_width,
            height: nz_height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }

    pub fn pixel_count(&self) -> usize {
        self.width.get() as usize * self.height.get() as usize
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width() && (p.y as u32) < self.height()
    }

    /// Linear pixel index, not byte offset.
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width.get() as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> ColorSample {
        self.sample_at(self.index(x, y))
    }

    pub fn set(&mut self, x: u32, y: u32, color: ColorSample) {
        let offset = self.index(x, y) * 4;
        self.data[offset..offset + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    pub(crate) fn sample_at(&self, idx: usize) -> ColorSample {
        let [r, g, b, a] = [
            self.data[idx * 4],
            self.data[idx * 4 + 1],
            self.data[idx * 4 + 2],
            self.data[idx * 4 + 3],
        ];
        ColorSample { r, g, b, a }
    }

    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y) * 4 + 3]
    }

    pub(crate) fn clear_alpha_at(&mut self, idx: usize) {
        self.data[idx * 4 + 3] = 0;
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn transparent_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] == 0).count()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transparent", &self.transparent_count())
            .finish()
    }
}

impl TryFrom<image::RgbaImage> for PixelBuffer {
    type Error = PixelBufferError;

    fn try_from(value: image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = value.dimensions();
        Self::from_raw(width, height, value.into_raw())
    }
}

impl From<&PixelBuffer> for image::RgbaImage {
    fn from(value: &PixelBuffer) -> Self {
        image::RgbaImage::from_raw(value.width(), value.height(), value.data.clone())
            .expect("PixelBuffer always holds width * height * 4 bytes")
    }
}
