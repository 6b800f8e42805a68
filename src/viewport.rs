use crate::Point;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.25;

pub fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Display scale of the image. Zoom only changes how device coordinates map onto the
/// buffer, it never touches pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f32,
    buffer_size: [u32; 2],
    // On-screen size at zoom 1.0
    display_size: [f32; 2],
    // Device position of the image's top-left corner
    offset: [f32; 2],
}

impl Viewport {
    pub fn new(buffer_width: u32, buffer_height: u32) -> Self {
        Self {
            zoom: 1.0,
            buffer_size: [buffer_width, buffer_height],
            display_size: [buffer_width as f32, buffer_height as f32],
            offset: [0.0, 0.0],
        }
    }

    pub fn with_display_size(mut self, width: f32, height: f32) -> Self {
        self.display_size = [width, height];
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.set_offset(x, y);
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.modify_zoom(|_| zoom);
        self
    }

    pub fn offset(&self) -> [f32; 2] {
        self.offset
    }

    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.offset = [x, y];
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = [0.0, 0.0];
    }

    pub fn modify_zoom(&mut self, zoom: impl Fn(f32) -> f32) {
        self.zoom = clamp_zoom(zoom(self.zoom));
    }

    pub fn set_zoom(&mut self, delta: f32) {
        self.modify_zoom(|z| z + delta);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(-ZOOM_STEP);
    }

    /// Size of the image on screen after zoom.
    pub fn displayed_size(&self) -> [f32; 2] {
        [self.display_size[0] * self.zoom, self.display_size[1] * self.zoom]
    }

    pub fn to_buffer_coords(&self, device_x: f32, device_y: f32) -> Point {
        let [displayed_w, displayed_h] = self.displayed_size();
        let scale_x = self.buffer_size[0] as f32 / displayed_w;
        let scale_y = self.buffer_size[1] as f32 / displayed_h;
        Point::new(
            ((device_x - self.offset[0]) * scale_x).floor() as i32,
            ((device_y - self.offset[1]) * scale_y).floor() as i32,
        )
    }
}
