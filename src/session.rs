//! Edit session state machine.
//!
//! `NoImage` accepts nothing but `load`, threshold and zoom changes. Zoom chosen before
//! loading carries over to the image's viewport. Once loaded, every buffer mutation is preceded by
//! a snapshot into the undo history, so undo always restores the exact pre-edit state.

use log::{debug, info, warn};

use crate::{
    flood_fill, polygon_mask,
    viewport::{clamp_zoom, ZOOM_STEP},
    PixelBuffer, Point, Polygon, UndoHistory, Viewport,
};

pub const DEFAULT_THRESHOLD: f32 = 20.0;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    FloodFill,
    Lasso,
}

/// Discrete input events, already separated from the device that produced them.
/// Click coordinates are in device space and mapped through the viewport.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    Click { x: f32, y: f32 },
    Finalize,
    SelectTool { tool: ToolMode },
    Undo,
    Reset,
    ZoomIn,
    ZoomOut,
    SetThreshold { threshold: f32 },
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The pixel buffer changed
    Mutated,
    /// Session state changed, pixels did not
    Updated,
    Ignored,
    /// The caller should hand `EditSession::export` to persistence
    ExportRequested,
}

enum SessionState {
    NoImage { zoom: f32 },
    Ready(Loaded),
}

struct Loaded {
    buffer: PixelBuffer,
    history: UndoHistory,
    viewport: Viewport,
    tool: ToolMode,
    // Some while a lasso path is in progress
    lasso: Option<Vec<Point>>,
}

pub struct EditSession {
    state: SessionState,
    threshold: f32,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl EditSession {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: SessionState::NoImage { zoom: 1.0 },
            threshold,
        }
    }

    pub fn load(&mut self, buffer: PixelBuffer) {
        info!("Loaded {}x{} image", buffer.width(), buffer.height());
        let viewport = Viewport::new(buffer.width(), buffer.height()).with_zoom(self.zoom());
        self.state = SessionState::Ready(Loaded {
            history: UndoHistory::new(buffer.clone()),
            buffer,
            viewport,
            tool: ToolMode::default(),
            lasso: None,
        });
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.loaded().map(|l| &l.buffer)
    }

    pub fn tool(&self) -> Option<ToolMode> {
        self.loaded().map(|l| l.tool)
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.loaded().map(|l| &l.viewport)
    }

    pub fn viewport_mut(&mut self) -> Option<&mut Viewport> {
        self.loaded_mut().map(|l| &mut l.viewport)
    }

    pub fn zoom(&self) -> f32 {
        match &self.state {
            SessionState::NoImage { zoom } => *zoom,
            SessionState::Ready(l) => l.viewport.zoom(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn history_len(&self) -> usize {
        self.loaded().map(|l| l.history.len()).unwrap_or_default()
    }

    pub fn is_lasso_in_progress(&self) -> bool {
        self.loaded().is_some_and(|l| l.lasso.is_some())
    }

    pub fn lasso_points(&self) -> &[Point] {
        self.loaded()
            .and_then(|l| l.lasso.as_deref())
            .unwrap_or_default()
    }

    /// Path to draw as an overlay. Only available from the second point on.
    pub fn lasso_preview(&self) -> Option<&[Point]> {
        Some(self.lasso_points()).filter(|p| p.len() >= 2)
    }

    pub fn handle(&mut self, gesture: Gesture) -> GestureOutcome {
        debug!("Gesture {gesture:?}");
        match gesture {
            Gesture::Click { x, y } => self.click(x, y),
            Gesture::Finalize => self.finalize_lasso(),
            Gesture::SelectTool { tool } => self.select_tool(tool),
            Gesture::Undo => self.undo(),
            Gesture::Reset => self.reset(),
            Gesture::ZoomIn => self.zoom_in(),
            Gesture::ZoomOut => self.zoom_out(),
            Gesture::SetThreshold { threshold } => {
                self.set_threshold(threshold);
                GestureOutcome::Updated
            }
            Gesture::Export => match self.export() {
                Some(_) => GestureOutcome::ExportRequested,
                None => GestureOutcome::Ignored,
            },
        }
    }

    pub fn select_tool(&mut self, tool: ToolMode) -> GestureOutcome {
        let Some(loaded) = self.loaded_mut() else {
            return GestureOutcome::Ignored;
        };
        if loaded.lasso.take().is_some() {
            debug!("Discarded lasso path on tool switch");
        }
        loaded.tool = tool;
        GestureOutcome::Updated
    }

    /// Click in device coordinates.
    pub fn click(&mut self, device_x: f32, device_y: f32) -> GestureOutcome {
        let Some(loaded) = self.loaded() else {
            return GestureOutcome::Ignored;
        };
        let point = loaded.viewport.to_buffer_coords(device_x, device_y);
        debug!("Device ({device_x}, {device_y}) -> buffer {point:?}");
        self.click_at(point)
    }

    /// Click in buffer coordinates.
    pub fn click_at(&mut self, point: Point) -> GestureOutcome {
        let threshold = self.threshold;
        let Some(loaded) = self.loaded_mut() else {
            return GestureOutcome::Ignored;
        };
        match loaded.tool {
            ToolMode::FloodFill => {
                if !loaded.buffer.contains(point) {
                    warn!("Ignoring magic eraser click outside of image at {point:?}");
                    return GestureOutcome::Ignored;
                }
                loaded.history.snapshot(&loaded.buffer);
                match flood_fill::erase(&mut loaded.buffer, point, threshold) {
                    Ok(erased) => {
                        info!("Magic eraser at {point:?} erased {erased} pixels");
                        GestureOutcome::Mutated
                    }
                    Err(e) => {
                        warn!("{e}");
                        loaded.history.pop();
                        GestureOutcome::Ignored
                    }
                }
            }
            ToolMode::Lasso => {
                loaded.lasso.get_or_insert_with(Vec::new).push(point);
                GestureOutcome::Updated
            }
        }
    }

    pub fn finalize_lasso(&mut self) -> GestureOutcome {
        let Some(loaded) = self.loaded_mut() else {
            return GestureOutcome::Ignored;
        };
        if loaded.tool != ToolMode::Lasso {
            return GestureOutcome::Ignored;
        }
        let Some(points) = loaded.lasso.take_if(|p| p.len() >= 3) else {
            debug!("Lasso needs at least 3 points to cut");
            return GestureOutcome::Ignored;
        };
        let polygon = match Polygon::new(points) {
            Ok(polygon) => polygon,
            Err(e) => {
                warn!("{e}");
                return GestureOutcome::Ignored;
            }
        };
        loaded.history.snapshot(&loaded.buffer);
        let cleared = polygon_mask::cut(&mut loaded.buffer, &polygon);
        info!(
            "Lasso with {} points cleared {cleared} pixels",
            polygon.points().len()
        );
        GestureOutcome::Mutated
    }

    pub fn undo(&mut self) -> GestureOutcome {
        let Some(loaded) = self.loaded_mut() else {
            return GestureOutcome::Ignored;
        };
        if loaded.history.undo(&mut loaded.buffer) {
            info!("Undo, {} steps left", loaded.history.len());
            GestureOutcome::Mutated
        } else {
            debug!("Nothing to undo");
            GestureOutcome::Ignored
        }
    }

    pub fn reset(&mut self) -> GestureOutcome {
        let Some(loaded) = self.loaded_mut() else {
            return GestureOutcome::Ignored;
        };
        loaded.history.reset(&mut loaded.buffer);
        info!("Reset to original image");
        GestureOutcome::Mutated
    }

    pub fn zoom_in(&mut self) -> GestureOutcome {
        self.step_zoom(ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> GestureOutcome {
        self.step_zoom(-ZOOM_STEP)
    }

    pub fn export(&self) -> Option<&PixelBuffer> {
        self.buffer()
    }

    fn step_zoom(&mut self, delta: f32) -> GestureOutcome {
        let zoom = match &mut self.state {
            SessionState::NoImage { zoom } => {
                *zoom = clamp_zoom(*zoom + delta);
                *zoom
            }
            SessionState::Ready(l) => {
                l.viewport.set_zoom(delta);
                l.viewport.zoom()
            }
        };
        debug!("Zoom: {zoom:.2}x");
        GestureOutcome::Updated
    }

    fn loaded(&self) -> Option<&Loaded> {
        match &self.state {
            SessionState::Ready(l) => Some(l),
            SessionState::NoImage { .. } => None,
        }
    }

    fn loaded_mut(&mut self) -> Option<&mut Loaded> {
        match &mut self.state {
            SessionState::Ready(l) => Some(l),
            SessionState::NoImage { .. } => None,
        }
    }
}
