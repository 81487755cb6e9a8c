//! Measurement-and-resize engine behind [`AutosizeTextarea`](crate::components::AutosizeTextarea).
//!
//! The engine never lays text out itself. A [`RenderSurface`] reports its computed style
//! and lays out an offscreen [`ShadowSurface`]; the [`ResizeController`] turns the
//! shadow's natural height into a clamped row count and commits a height back to the
//! surface only when that row count changes.

mod controller;
mod metrics;
mod shadow;
mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{
    ResizeCommit, ResizeController, ResizeOutcome, ResizeState, RowBounds,
    rows_for_content_height,
};
pub use metrics::{StyleMetrics, StyleMetricsCache};
pub use shadow::{MirroredStyle, ShadowMeasurer, ShadowPresentation, ShadowSurface};
pub use surface::{
    BoxSizing, ComputedStyle, Edges, FontSpec, RenderSurface, SurfaceKey, WhiteSpace, WordBreak,
};
