use crate::id::fnv1a64;

use super::controller::ResizeCommit;
use super::shadow::ShadowSurface;

/// Identity of a visible rendering surface. Metrics and shadows are keyed by it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SurfaceKey(u64);

impl SurfaceKey {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn from_id(id: &str) -> Self {
        Self(fnv1a64(id.as_bytes()))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WhiteSpace {
    #[default]
    Normal,
    PreWrap,
    Pre,
    NoWrap,
}

impl WhiteSpace {
    pub const fn wraps(self) -> bool {
        matches!(self, Self::Normal | Self::PreWrap)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WordBreak {
    #[default]
    Normal,
    BreakAll,
    KeepAll,
    BreakWord,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: String::new(),
            size: 16.0,
            weight: 400.0,
        }
    }
}

/// Fully resolved geometry of a rendering surface, in device-independent pixels.
///
/// `width` follows `box_sizing`: the border-box width for [`BoxSizing::BorderBox`],
/// the content width for [`BoxSizing::ContentBox`]. It is `None` until the surface
/// has been laid out at least once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedStyle {
    pub box_sizing: BoxSizing,
    pub width: Option<f32>,
    pub font: FontSpec,
    pub line_height: f32,
    pub padding: Edges,
    pub border: Edges,
    pub white_space: WhiteSpace,
    pub word_break: WordBreak,
}

/// The visible text surface the resize engine measures and writes to.
///
/// Implementations must only be handed to the engine while attached to a layout
/// context; the engine performs no attachment checks.
pub trait RenderSurface {
    fn surface_key(&self) -> SurfaceKey;

    /// Resolves the live computed style. Called at most once per surface identity
    /// unless the metrics cache is invalidated.
    fn computed_style(&self) -> ComputedStyle;

    /// Lays out `shadow` next to this surface, in the same formatting context, and
    /// returns its natural scroll height: content plus vertical padding, no border.
    fn shadow_scroll_height(&self, shadow: &ShadowSurface) -> f32;

    /// Applies a new row count and height to the visible presentation state.
    fn commit(&mut self, commit: ResizeCommit);
}
