use gpui::{FontWeight, SharedString, Window, px};

use crate::autosize::{
    BoxSizing, ComputedStyle, Edges, FontSpec, RenderSurface, ResizeCommit, ResizeController,
    RowBounds, ShadowSurface, SurfaceKey, WhiteSpace, WordBreak,
};
use crate::id::{ComponentId, fnv1a64};
use crate::style::FieldSizePreset;

use super::control;

/// Style of a textarea box at `preset`, laid out `width` wide (border box).
pub(crate) fn field_computed_style(
    preset: FieldSizePreset,
    width: Option<f32>,
    font_family: &str,
) -> ComputedStyle {
    ComputedStyle {
        box_sizing: BoxSizing::BorderBox,
        width,
        font: FontSpec {
            family: font_family.to_string(),
            size: preset.font_size,
            weight: FontWeight::NORMAL.0,
        },
        line_height: preset.line_height,
        padding: Edges::symmetric(preset.padding_y, preset.padding_x),
        border: Edges::all(preset.border),
        white_space: WhiteSpace::PreWrap,
        word_break: WordBreak::BreakWord,
    }
}

/// Fingerprint of the layout inputs the textarea owns. Changes invalidate cached metrics.
pub(crate) fn layout_signature(
    preset: FieldSizePreset,
    width: Option<f32>,
    font_family: &str,
) -> u64 {
    let mut seed = Vec::with_capacity(32 + font_family.len());
    for value in [
        preset.font_size,
        preset.line_height,
        preset.padding_x,
        preset.padding_y,
        preset.border,
        width.unwrap_or(-1.0),
    ] {
        seed.extend_from_slice(&value.to_bits().to_le_bytes());
    }
    seed.extend_from_slice(font_family.as_bytes());
    fnv1a64(&seed)
}

/// Border-box width of a field whose content area is `content_width` wide.
pub(crate) fn border_box_width(preset: FieldSizePreset, content_width: f32) -> f32 {
    content_width.max(0.0) + (preset.padding_x + preset.border) * 2.0
}

/// Border-box width to measure with: the width layout resolved this pass, else the last
/// one observed for the field.
pub(crate) fn resolve_field_width(
    preset: FieldSizePreset,
    content_width: Option<f32>,
    last_width: Option<f32>,
) -> Option<f32> {
    content_width
        .filter(|width| width.is_finite())
        .map(|width| border_box_width(preset, width))
        .or(last_width)
}

/// Feeds the layout signature and current inputs to `controller` and returns the rows
/// the field occupies after any resulting commit.
pub(crate) fn measure_rows<S: RenderSurface + ?Sized>(
    controller: &mut ResizeController,
    surface: &mut S,
    text: &str,
    bounds: RowBounds,
    signature: u64,
) -> usize {
    controller.observe_layout(signature);
    controller.sync(surface, text, bounds);
    controller.state().rows(bounds)
}

/// The visible textarea box as seen by the resize engine. Shadows are laid out with the
/// window's text system, which never touches the element tree.
pub(crate) struct WindowSurface<'a> {
    window: &'a Window,
    id: &'a ComponentId,
    style: ComputedStyle,
}

impl<'a> WindowSurface<'a> {
    pub(crate) fn new(window: &'a Window, id: &'a ComponentId, style: ComputedStyle) -> Self {
        Self { window, id, style }
    }

    fn hard_line_height(text: &str, line_height: f32) -> f32 {
        let lines = text.chars().filter(|ch| *ch == '\n').count() + 1;
        lines as f32 * line_height
    }
}

impl RenderSurface for WindowSurface<'_> {
    fn surface_key(&self) -> SurfaceKey {
        SurfaceKey::from_id(self.id.as_str())
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style.clone()
    }

    fn shadow_scroll_height(&self, shadow: &ShadowSurface) -> f32 {
        let style = shadow.style();
        let font_size = px(style.font.size);
        let line_height = style.line_height;

        let mut text_style = self.window.text_style();
        if !style.font.family.is_empty() {
            text_style.font_family = SharedString::from(style.font.family.clone());
        }
        text_style.font_size = font_size.into();
        text_style.font_weight = FontWeight(style.font.weight);

        let text = SharedString::from(shadow.content().to_string());
        let run = text_style.to_run(text.len());
        let content_height = match self.window.text_system().shape_text(
            text,
            font_size,
            &[run],
            shadow.wrap_width().map(px),
            None,
        ) {
            Ok(lines) => lines
                .iter()
                .map(|line| f32::from(line.size(px(line_height)).height))
                .sum::<f32>(),
            Err(err) => {
                log::warn!("failed to shape textarea {} for measurement: {err:#}", self.id);
                Self::hard_line_height(shadow.content(), line_height)
            }
        };

        content_height.max(line_height) + style.padding.vertical()
    }

    fn commit(&mut self, commit: ResizeCommit) {
        control::set_presentation(self.id.as_str(), commit);
    }
}
