use super::surface::{BoxSizing, ComputedStyle, RenderSurface, SurfaceKey};

/// Geometry needed for row-count math, resolved from a surface's computed style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleMetrics {
    pub box_sizing: BoxSizing,
    pub line_height: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub border_top: f32,
    pub border_bottom: f32,
}

impl StyleMetrics {
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            box_sizing: style.box_sizing,
            line_height: non_negative(style.line_height),
            padding_top: non_negative(style.padding.top),
            padding_bottom: non_negative(style.padding.bottom),
            border_top: non_negative(style.border.top),
            border_bottom: non_negative(style.border.bottom),
        }
    }

    pub fn vertical_padding(&self) -> f32 {
        self.padding_top + self.padding_bottom
    }

    pub fn vertical_border(&self) -> f32 {
        self.border_top + self.border_bottom
    }

    /// Height to write for `rows` rows under this box-sizing mode.
    pub fn height_for_rows(&self, rows: usize) -> f32 {
        let content = rows as f32 * self.line_height;
        match self.box_sizing {
            BoxSizing::ContentBox => content,
            BoxSizing::BorderBox => content + self.vertical_padding() + self.vertical_border(),
        }
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Single-slot memo of [`StyleMetrics`] keyed by surface identity.
///
/// Stale values are never refreshed on their own; call [`StyleMetricsCache::invalidate`]
/// when the surface is restyled or resized.
#[derive(Debug, Default)]
pub struct StyleMetricsCache {
    slot: Option<(SurfaceKey, StyleMetrics)>,
}

impl StyleMetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<S: RenderSurface + ?Sized>(&mut self, surface: &S) -> StyleMetrics {
        let key = surface.surface_key();
        if let Some((cached_key, metrics)) = self.slot
            && cached_key == key
        {
            return metrics;
        }

        let metrics = StyleMetrics::from_computed(&surface.computed_style());
        log::debug!(
            "resolved style metrics for surface {:016x}: {:?}",
            key.raw(),
            metrics
        );
        self.slot = Some((key, metrics));
        metrics
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.is_some()
    }
}
