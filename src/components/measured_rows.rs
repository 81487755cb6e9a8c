use gpui::{
    App, AvailableSpace, Bounds, Element, ElementId, GlobalElementId, InspectorElementId,
    IntoElement, LayoutId, Pixels, Style, Window, px, size,
};

use crate::autosize::RowBounds;
use crate::id::ComponentId;
use crate::style::FieldSizePreset;

use super::control;
use super::window_surface::{
    WindowSurface, field_computed_style, layout_signature, measure_rows, resolve_field_width,
};

/// Layout leaf that sizes a textarea's content area to its committed rows.
///
/// The measure callback runs inside taffy's layout pass with the width the box resolves
/// to, so a wrap-width change is measured and committed before anything is painted.
pub(crate) struct MeasuredRows {
    id: ComponentId,
    value: String,
    bounds: RowBounds,
    preset: FieldSizePreset,
    font_family: String,
}

impl MeasuredRows {
    pub(crate) fn new(
        id: ComponentId,
        value: impl Into<String>,
        bounds: RowBounds,
        preset: FieldSizePreset,
        font_family: impl Into<String>,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            bounds,
            preset,
            font_family: font_family.into(),
        }
    }
}

impl IntoElement for MeasuredRows {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for MeasuredRows {
    type RequestLayoutState = ();
    type PrepaintState = ();

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        _cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let id = self.id.clone();
        let value = std::mem::take(&mut self.value);
        let bounds = self.bounds;
        let preset = self.preset;
        let font_family = std::mem::take(&mut self.font_family);

        let layout_id = window.request_measured_layout(Style::default(), {
            move |known_dimensions, available_space, window, _cx| {
                let content_width = known_dimensions.width.or(match available_space.width {
                    AvailableSpace::Definite(width) => Some(width),
                    _ => None,
                });
                let width = resolve_field_width(
                    preset,
                    content_width.map(f32::from),
                    control::layout_width(id.as_str()),
                );
                if let Some(width) = width {
                    control::set_layout_width(id.as_str(), width);
                }

                let style = field_computed_style(preset, width, &font_family);
                let signature = layout_signature(preset, width, &font_family);
                let mut surface = WindowSurface::new(window, &id, style);
                let rows = control::with_resize_controller(id.as_str(), |controller| {
                    measure_rows(controller, &mut surface, &value, bounds, signature)
                })
                .unwrap_or_else(|| bounds.clamp(bounds.min_rows));

                size(
                    content_width.unwrap_or(Pixels::ZERO),
                    px(rows as f32 * preset.line_height),
                )
            }
        });

        (layout_id, ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Self::PrepaintState {
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _prepaint: &mut Self::PrepaintState,
        _window: &mut Window,
        _cx: &mut App,
    ) {
    }
}
