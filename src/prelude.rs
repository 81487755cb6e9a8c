pub use crate::autosize::{
    BoxSizing, ComputedStyle, Edges, FontSpec, RenderSurface, ResizeCommit, ResizeController,
    ResizeOutcome, RowBounds, ShadowMeasurer, StyleMetricsCache, SurfaceKey, WhiteSpace,
    WordBreak,
};
pub use crate::components::{AutosizeTextarea, ChangeSource, TextareaChangeEvent};
pub use crate::contracts::{ComponentThemeOverridable, Disableable, RowBounded, Sizeable};
pub use crate::id::ComponentId;
pub use crate::style::Size;
pub use crate::theme::{ColorScheme, ColorValue, Theme};
