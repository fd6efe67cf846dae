mod frame;
mod null_renderer;

pub use frame::{AxisTick, RenderFrame};
pub use null_renderer::NullRenderer;

use crate::error::TimelineResult;

/// Contract implemented by any drawing backend (SVG, canvas, terminal...).
///
/// Backends receive a fully materialized `RenderFrame`; drawing code never
/// touches transform or clustering state directly.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()>;
}
