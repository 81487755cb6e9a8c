use super::metrics::{StyleMetrics, StyleMetricsCache};
use super::shadow::ShadowMeasurer;
use super::surface::RenderSurface;

/// Pixels absorbed before ceiling rounding, so float error on exact multiples of the
/// line height never adds a row.
const ROW_EPSILON_PX: f32 = 1e-3;

/// Configured row bounds. `max_rows: None` is unbounded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RowBounds {
    pub min_rows: usize,
    pub max_rows: Option<usize>,
}

impl Default for RowBounds {
    fn default() -> Self {
        Self {
            min_rows: 1,
            max_rows: None,
        }
    }
}

impl RowBounds {
    pub fn new(min_rows: usize, max_rows: Option<usize>) -> Self {
        Self {
            min_rows: min_rows.max(1),
            max_rows: max_rows.map(|rows| rows.max(1)),
        }
    }

    /// `min(max_rows, max(min_rows, rows))`, never below one row. Bounds are not
    /// validated, so inverted bounds always resolve to `max_rows`.
    pub fn clamp(&self, rows: usize) -> usize {
        let floored = rows.max(self.min_rows).max(1);
        match self.max_rows {
            Some(max_rows) => floored.min(max_rows.max(1)),
            None => floored,
        }
    }
}

/// Rows needed for `content_height`, rounded up.
pub fn rows_for_content_height(content_height: f32, line_height: f32) -> usize {
    if !line_height.is_finite() || line_height <= 0.0 || !content_height.is_finite() {
        return 0;
    }
    let content_height = (content_height.max(0.0) - ROW_EPSILON_PX).max(0.0);
    (content_height / line_height).ceil() as usize
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeCommit {
    pub rows: usize,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResizeState {
    current_rows: Option<usize>,
    content_rows: usize,
}

impl ResizeState {
    /// Committed rows, or the clamped `min_rows` before the first commit.
    pub fn rows(&self, bounds: RowBounds) -> usize {
        self.current_rows.unwrap_or_else(|| bounds.clamp(bounds.min_rows))
    }

    pub fn current_rows(&self) -> Option<usize> {
        self.current_rows
    }

    /// Unclamped rows from the last measurement.
    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    /// Whether the last measured content needs more rows than were committed.
    pub fn overflows(&self) -> bool {
        self.current_rows.is_some_and(|rows| self.content_rows > rows)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// No input changed since the last sync; nothing was measured.
    Clean,
    /// Measured, but the clamped row count matched the committed one.
    Unchanged { rows: usize },
    Committed(ResizeCommit),
}

impl ResizeOutcome {
    pub fn commit(&self) -> Option<ResizeCommit> {
        match self {
            Self::Committed(commit) => Some(*commit),
            Self::Clean | Self::Unchanged { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SyncedInputs {
    text: String,
    bounds: RowBounds,
}

/// Per-widget resize engine: owns the metrics cache, the measurement shadow and the
/// committed row state.
#[derive(Debug, Default)]
pub struct ResizeController {
    metrics: StyleMetricsCache,
    measurer: ShadowMeasurer,
    state: ResizeState,
    synced: Option<SyncedInputs>,
    layout_signature: Option<u64>,
    force_commit: bool,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn measurer(&self) -> &ShadowMeasurer {
        &self.measurer
    }

    /// Drops cached metrics and re-mirrors the shadow on next use. The next
    /// [`sync`](Self::sync) measures and commits even if no input changed.
    pub fn invalidate_style(&mut self) {
        self.metrics.invalidate();
        self.measurer.invalidate();
        self.force_commit = true;
    }

    /// Feeds a cheap fingerprint of the surface's layout inputs (width, font, size
    /// preset). A changed fingerprint invalidates the style.
    pub fn observe_layout(&mut self, signature: u64) {
        match self.layout_signature.replace(signature) {
            Some(previous) if previous != signature => {
                log::debug!("layout signature changed, invalidating style metrics");
                self.invalidate_style();
            }
            _ => {}
        }
    }

    /// Resizes only if `text`, `min_rows` or `max_rows` changed since the previous
    /// sync, or the style was invalidated.
    pub fn sync<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: &str,
        bounds: RowBounds,
    ) -> ResizeOutcome {
        let dirty = self.force_commit
            || self
                .synced
                .as_ref()
                .is_none_or(|synced| synced.text != text || synced.bounds != bounds);
        if !dirty {
            return ResizeOutcome::Clean;
        }

        let outcome = self.resize(surface, text, bounds);
        match self.synced.as_mut() {
            Some(synced) => {
                if synced.text != text {
                    synced.text.clear();
                    synced.text.push_str(text);
                }
                synced.bounds = bounds;
            }
            None => {
                self.synced = Some(SyncedInputs {
                    text: text.to_string(),
                    bounds,
                });
            }
        }
        outcome
    }

    /// Measures `text` and commits a new row count and height when it changed.
    pub fn resize<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: &str,
        bounds: RowBounds,
    ) -> ResizeOutcome {
        let metrics = self.metrics.get(&*surface);
        let content_height = self.measurer.measure(&*surface, text);
        let raw_rows = rows_for_content_height(content_height, metrics.line_height);
        let rows = bounds.clamp(raw_rows);
        self.state.content_rows = raw_rows;

        if self.state.current_rows == Some(rows) && !self.force_commit {
            return ResizeOutcome::Unchanged { rows };
        }

        let commit = Self::commit_for(&metrics, rows);
        self.state.current_rows = Some(rows);
        self.force_commit = false;
        log::debug!(
            "resizing surface {:016x} to {} rows ({}px)",
            surface.surface_key().raw(),
            commit.rows,
            commit.height
        );
        surface.commit(commit);
        ResizeOutcome::Committed(commit)
    }

    fn commit_for(metrics: &StyleMetrics, rows: usize) -> ResizeCommit {
        ResizeCommit {
            rows,
            height: metrics.height_for_rows(rows),
        }
    }
}
