use std::cell::Cell;

use super::controller::ResizeCommit;
use super::shadow::ShadowSurface;
use super::surface::{BoxSizing, ComputedStyle, Edges, RenderSurface, SurfaceKey};

/// Deterministic surface: every character advances `char_width`, wrapping is greedy
/// per character, and each hard line break starts a new row.
pub(crate) struct FixedAdvanceSurface {
    pub key: SurfaceKey,
    pub style: ComputedStyle,
    pub char_width: f32,
    pub commits: Vec<ResizeCommit>,
    pub style_queries: Cell<usize>,
    pub layouts: Cell<usize>,
}

impl FixedAdvanceSurface {
    pub fn new(box_sizing: BoxSizing) -> Self {
        Self {
            key: SurfaceKey::from_id("fixed-advance"),
            style: ComputedStyle {
                box_sizing,
                width: Some(110.0),
                line_height: 20.0,
                padding: Edges::all(4.0),
                border: Edges::all(1.0),
                ..ComputedStyle::default()
            },
            char_width: 10.0,
            commits: Vec::new(),
            style_queries: Cell::new(0),
            layouts: Cell::new(0),
        }
    }

    pub fn last_commit(&self) -> Option<ResizeCommit> {
        self.commits.last().copied()
    }

    pub fn rows_for(&self, text: &str, wrap_width: Option<f32>) -> usize {
        let per_row = wrap_width
            .map(|width| ((width / self.char_width).floor() as usize).max(1))
            .unwrap_or(usize::MAX);
        text.split('\n')
            .map(|line| {
                let chars = line.chars().count();
                if chars == 0 { 1 } else { chars.div_ceil(per_row) }
            })
            .sum()
    }
}

impl RenderSurface for FixedAdvanceSurface {
    fn surface_key(&self) -> SurfaceKey {
        self.key
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style_queries.set(self.style_queries.get() + 1);
        self.style.clone()
    }

    fn shadow_scroll_height(&self, shadow: &ShadowSurface) -> f32 {
        self.layouts.set(self.layouts.get() + 1);
        let style = shadow.style();
        let rows = self.rows_for(shadow.content(), shadow.wrap_width());
        rows as f32 * style.line_height + style.padding.vertical()
    }

    fn commit(&mut self, commit: ResizeCommit) {
        self.commits.push(commit);
    }
}

/// Surface that reports a fixed natural content height regardless of text.
pub(crate) struct FixedHeightSurface {
    pub style: ComputedStyle,
    pub content_height: f32,
    pub commits: Vec<ResizeCommit>,
}

impl FixedHeightSurface {
    pub fn new(line_height: f32, content_height: f32) -> Self {
        Self {
            style: ComputedStyle {
                line_height,
                padding: Edges::all(3.0),
                ..ComputedStyle::default()
            },
            content_height,
            commits: Vec::new(),
        }
    }
}

impl RenderSurface for FixedHeightSurface {
    fn surface_key(&self) -> SurfaceKey {
        SurfaceKey::new(42)
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style.clone()
    }

    fn shadow_scroll_height(&self, shadow: &ShadowSurface) -> f32 {
        self.content_height + shadow.style().padding.vertical()
    }

    fn commit(&mut self, commit: ResizeCommit) {
        self.commits.push(commit);
    }
}
