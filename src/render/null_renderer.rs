use crate::error::TimelineResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_timeline_cluster_count: usize,
    pub last_map_cluster_count: usize,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_timeline_cluster_count = frame.timeline_clusters.len();
        self.last_map_cluster_count = frame.map_clusters.len();
        self.last_tick_count = frame.ticks.len();
        Ok(())
    }
}
