//! State shared by every element during one render pass.

use super::{RenderStats, Sink};
use crate::error::Result;
use crate::model::Resources;

/// Render pass state: the injected sink, the collected resources and
/// running statistics.
pub struct RenderContext<'a> {
    sink: &'a mut dyn Sink,
    resources: &'a Resources,
    stats: RenderStats,
}

impl<'a> RenderContext<'a> {
    /// Create a context writing to `sink`.
    pub fn new(sink: &'a mut dyn Sink, resources: &'a Resources) -> Self {
        Self {
            sink,
            resources,
            stats: RenderStats::new(),
        }
    }

    /// Append markup to the sink.
    pub fn write(&mut self, markup: &str) -> Result<()> {
        self.stats.bytes += markup.len() as u64;
        self.sink.write(markup)
    }

    /// Font and color tables.
    pub fn resources(&self) -> &'a Resources {
        self.resources
    }

    /// Running statistics.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Mutable statistics, for elements counting themselves.
    pub fn stats_mut(&mut self) -> &mut RenderStats {
        &mut self.stats
    }

    /// Finish the pass and return the statistics.
    pub fn into_stats(self) -> RenderStats {
        self.stats
    }
}
