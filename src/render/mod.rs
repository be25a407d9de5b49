//! Presentation: interpolated frame snapshots and the terminal view.

pub mod interpolation;
pub mod renderer;

pub use interpolation::{FrameSnapshot, VisualSegment, visual_position};
pub use renderer::Renderer;
