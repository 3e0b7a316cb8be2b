//! Rendering infrastructure: sinks, the per-pass context and statistics.

mod context;
mod result;
mod sink;

pub use context::RenderContext;
pub use result::RenderStats;
pub use sink::{Sink, StreamSink};
