mod app;
pub mod config;
pub mod flood_fill;
pub mod history;
pub mod image_utils;
pub mod pixel_buffer;
pub mod polygon_mask;
pub mod session;
pub mod storage;
pub mod viewport;

pub use app::{edit_pending, run_native, Args, Error};
pub use config::Config;
pub use history::UndoHistory;
pub use pixel_buffer::{ColorSample, PixelBuffer, PixelBufferError, Point};
pub use polygon_mask::{Polygon, PolygonMask};
pub use session::{EditSession, Gesture, GestureOutcome, ToolMode};
pub use viewport::Viewport;
