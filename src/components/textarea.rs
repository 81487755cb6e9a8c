use std::{rc::Rc, time::Duration};

use gpui::{
    Animation, AnimationExt, AnyElement, App, Bounds, ClipboardItem, FocusHandle,
    HighlightStyle, InteractiveElement, IntoElement, KeyDownEvent, MouseButton, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, StyledText, TextLayout, Window,
    canvas, div, fill, point, px, size,
};

use crate::autosize::RowBounds;
use crate::contracts::{ComponentThemeOverridable, Sizeable};
use crate::id::ComponentId;
use crate::style::Size;
use crate::theme::LocalTheme;

use super::control;
use super::measured_rows::MeasuredRows;
use super::text_edit_state::{TextEditState, byte_index_at_char, char_index_at_byte};
use super::utils::{quantized_stroke_px, resolve_hsla};

type ChangeHandler = Rc<dyn Fn(&TextareaChangeEvent, &mut Window, &mut App)>;

const CARET_BLINK_TOGGLE_MS: u64 = 680;
const CARET_BLINK_CYCLE_MS: u64 = CARET_BLINK_TOGGLE_MS * 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChangeSource {
    Typed,
    Newline,
    DeleteBackward,
    DeleteForward,
    Cut,
    Paste,
}

/// A user edit, delivered to the `on_change` handler as produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextareaChangeEvent {
    pub value: SharedString,
    pub previous: SharedString,
    pub caret: usize,
    pub source: ChangeSource,
}

/// Keystroke fields the editor looks at, detached from gpui's event type.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct KeyInput<'a> {
    pub key: &'a str,
    pub key_char: Option<&'a str>,
    pub shift: bool,
    pub command: bool,
}

impl<'a> KeyInput<'a> {
    fn from_event(event: &'a KeyDownEvent) -> Self {
        let modifiers = &event.keystroke.modifiers;
        Self {
            key: event.keystroke.key.as_str(),
            key_char: event.keystroke.key_char.as_deref(),
            shift: modifiers.shift,
            command: modifiers.control || modifiers.platform || modifiers.function,
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) enum KeyboardFocus<'a> {
    Tracked(&'a FocusHandle),
    Owned,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum KeyOutcome {
    Ignored,
    Moved,
    Edited(ChangeSource),
}

/// Applies a non-clipboard keystroke to `state`.
pub(crate) fn apply_key(
    state: &mut TextEditState,
    input: KeyInput<'_>,
    max_length: Option<usize>,
) -> KeyOutcome {
    let extend = input.shift;
    match input.key {
        "left" => {
            state.move_left(extend);
            return KeyOutcome::Moved;
        }
        "right" => {
            state.move_right(extend);
            return KeyOutcome::Moved;
        }
        "up" => {
            state.move_up(extend);
            return KeyOutcome::Moved;
        }
        "down" => {
            state.move_down(extend);
            return KeyOutcome::Moved;
        }
        "home" => {
            state.move_line_start(extend);
            return KeyOutcome::Moved;
        }
        "end" => {
            state.move_line_end(extend);
            return KeyOutcome::Moved;
        }
        "backspace" => {
            return if state.delete_backward() {
                KeyOutcome::Edited(ChangeSource::DeleteBackward)
            } else {
                KeyOutcome::Ignored
            };
        }
        "delete" => {
            return if state.delete_forward() {
                KeyOutcome::Edited(ChangeSource::DeleteForward)
            } else {
                KeyOutcome::Ignored
            };
        }
        _ => {}
    }

    if input.command {
        if input.key == "a" {
            state.select_all();
            return KeyOutcome::Moved;
        }
        return KeyOutcome::Ignored;
    }

    let (inserted, source) = if input.key == "enter" {
        ("\n", ChangeSource::Newline)
    } else {
        let inserted = input
            .key_char
            .filter(|value| !value.is_empty())
            .or_else(|| (input.key.chars().count() == 1).then_some(input.key));
        match inserted {
            Some(text) if !text.contains('\u{7f}') => (text, ChangeSource::Typed),
            _ => return KeyOutcome::Ignored,
        }
    };

    state.insert_text(inserted);
    state.clamp_to_max_length(max_length);
    KeyOutcome::Edited(source)
}

/// A multi-line text field whose height follows its content between `min_rows` and
/// `max_rows`.
///
/// The value is controlled: edits are reported through [`on_change`](Self::on_change)
/// and show up once the caller passes the new value back in. The row count is owned by
/// the resize engine and cannot be set directly.
#[derive(IntoElement)]
pub struct AutosizeTextarea {
    id: ComponentId,
    value: SharedString,
    placeholder: Option<SharedString>,
    bounds: RowBounds,
    disabled: bool,
    read_only: bool,
    max_length: Option<usize>,
    size: Size,
    theme: LocalTheme,
    style: gpui::StyleRefinement,
    focus_handle: Option<FocusHandle>,
    on_change: Option<ChangeHandler>,
}

impl AutosizeTextarea {
    #[track_caller]
    pub fn new(value: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("autosize-textarea"),
            value: value.into(),
            placeholder: None,
            bounds: RowBounds::default(),
            disabled: false,
            read_only: false,
            max_length: None,
            size: Size::Md,
            theme: LocalTheme::default(),
            style: gpui::StyleRefinement::default(),
            focus_handle: None,
            on_change: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(&TextareaChangeEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    pub fn min_rows(mut self, rows: usize) -> Self {
        self.bounds.min_rows = rows.max(1);
        self
    }

    /// Upper bound on rows, floored at 1. Not checked against `min_rows`; when it is
    /// smaller, it wins.
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.bounds.max_rows = Some(rows.max(1));
        self
    }

    pub fn unlimited_rows(mut self) -> Self {
        self.bounds.max_rows = None;
        self
    }

    pub fn row_bounds(&self) -> RowBounds {
        self.bounds
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.disabled = value;
        self
    }

    pub fn read_only(mut self, value: bool) -> Self {
        self.read_only = value;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length.max(1));
        self
    }

    pub fn with_size(mut self, value: Size) -> Self {
        self.size = value;
        self
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    /// Frees the caret, resize controller and measurement shadow kept for `id`.
    pub fn release(id: &ComponentId) {
        control::release(id.as_str());
    }

    fn editable(&self) -> bool {
        !self.disabled && !self.read_only
    }

    /// How the box becomes the keyboard target. Without a caller handle the box owns
    /// one, so key events reach it after a click.
    pub(crate) fn keyboard_focus(&self) -> KeyboardFocus<'_> {
        match &self.focus_handle {
            Some(handle) => KeyboardFocus::Tracked(handle),
            None => KeyboardFocus::Owned,
        }
    }

    fn render_caret(&self, layout: TextLayout, byte_index: usize, window: &Window) -> AnyElement {
        let theme = self.theme.theme();
        let color = resolve_hsla(theme, &theme.textarea.caret);
        let preset = self.size.field_preset();
        let caret_width = quantized_stroke_px(window, 1.5);
        let caret_height = px(preset.caret_height);
        let inset = px(((preset.line_height - preset.caret_height) / 2.0).max(0.0));

        let caret = canvas(
            |_, _, _| {},
            move |bounds, _, window, _cx| {
                let origin = layout.position_for_index(byte_index).unwrap_or(bounds.origin);
                window.paint_quad(fill(
                    Bounds::new(
                        point(origin.x, origin.y + inset),
                        size(caret_width, caret_height),
                    ),
                    color,
                ));
            },
        )
        .size_full();

        div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .child(caret)
            .with_animation(
                self.id.slot("caret-blink"),
                Animation::new(Duration::from_millis(CARET_BLINK_CYCLE_MS))
                    .repeat()
                    .with_easing(gpui::linear),
                |this, delta| {
                    let visible = ((delta * 2.0).fract()) < 0.5;
                    this.opacity(if visible { 1.0 } else { 0.0 })
                },
            )
            .into_any_element()
    }

    /// The whole value as one shaped text element, so it wraps exactly like the
    /// measurement shadow. Returns the text layout for caret placement and hit testing.
    fn render_text(
        &self,
        state: &TextEditState,
        focused: bool,
        window: &Window,
    ) -> (AnyElement, TextLayout) {
        let theme = self.theme.theme();
        let mut text = StyledText::new(SharedString::from(state.value.clone()));
        if let Some(range) = state.selection_bytes() {
            text = text.with_highlights(vec![(
                range,
                HighlightStyle {
                    background_color: Some(resolve_hsla(theme, &theme.textarea.selection)),
                    ..HighlightStyle::default()
                },
            )]);
        }
        let layout = text.layout().clone();

        let mut content = div().relative().w_full().child(text);
        if focused && self.editable() && state.selection().is_none() {
            let caret_byte = byte_index_at_char(&state.value, state.caret);
            content = content.child(self.render_caret(layout.clone(), caret_byte, window));
        }
        (content.into_any_element(), layout)
    }

    fn render_box(&self, window: &mut Window) -> AnyElement {
        let theme = self.theme.theme();
        let tokens = &theme.textarea;
        let preset = self.size.field_preset();
        let id = self.id.as_str();
        let value = self.value.to_string();

        let focused = self
            .focus_handle
            .as_ref()
            .is_some_and(|handle| handle.is_focused(window))
            || control::focused_state(id, None, false);
        let state = control::edit_state(id, &value);

        let border = if focused {
            resolve_hsla(theme, &tokens.border_focus)
        } else {
            resolve_hsla(theme, &tokens.border)
        };
        let mut input = div()
            .id(self.id.slot("box"))
            .relative()
            .flex()
            .flex_col()
            .w_full()
            .px(px(preset.padding_x))
            .py(px(preset.padding_y))
            .text_size(px(preset.font_size))
            .line_height(px(preset.line_height))
            .bg(resolve_hsla(theme, &tokens.bg))
            .text_color(resolve_hsla(theme, &tokens.fg))
            .border(quantized_stroke_px(window, preset.border))
            .border_color(border)
            .rounded(px(6.0))
            .overflow_y_scroll();
        if !theme.font_family.is_empty() {
            input = input.font_family(SharedString::from(theme.font_family.clone()));
        }
        input = if self.disabled {
            input.cursor_default().opacity(0.55)
        } else {
            input.cursor_text()
        };

        input = match self.keyboard_focus() {
            KeyboardFocus::Tracked(handle) => input.track_focus(handle),
            KeyboardFocus::Owned => input.focusable(),
        };

        let (content, layout) = if value.is_empty() && !focused {
            let placeholder = div()
                .w_full()
                .text_color(resolve_hsla(theme, &tokens.placeholder))
                .child(self.placeholder.clone().unwrap_or_default())
                .into_any_element();
            (placeholder, None)
        } else {
            let (text, layout) = self.render_text(&state, focused, window);
            (text, Some(layout))
        };

        let id_for_click = self.id.clone();
        let handle_for_click = self.focus_handle.clone();
        let value_for_click = value.clone();
        input = input.on_mouse_down(MouseButton::Left, move |event, window, cx| {
            let id = id_for_click.as_str();
            control::set_focused_state(id, true);
            if let Some(layout) = layout.as_ref() {
                let byte_index = match layout.index_for_position(event.position) {
                    Ok(index) | Err(index) => index,
                };
                let mut state = control::edit_state(id, &value_for_click);
                state.place_caret(
                    char_index_at_byte(&value_for_click, byte_index),
                    event.modifiers.shift,
                );
                control::set_edit_cursor(id, state.cursor());
            }
            if let Some(handle) = handle_for_click.as_ref() {
                window.focus(handle, cx);
            }
            window.refresh();
        });

        let id_for_blur = self.id.clone();
        input = input.on_mouse_down_out(move |_, window, _cx| {
            control::set_focused_state(id_for_blur.as_str(), false);
            window.refresh();
        });

        if self.editable() {
            let id_for_keys = self.id.clone();
            let on_change = self.on_change.clone();
            let max_length = self.max_length;
            let previous = self.value.clone();
            input = input.on_key_down(move |event: &KeyDownEvent, window, cx| {
                let id = id_for_keys.as_str();
                control::set_focused_state(id, true);
                let mut state = control::edit_state(id, previous.as_ref());
                let keys = KeyInput::from_event(event);

                let outcome = match (keys.command, keys.key) {
                    (true, "c") => {
                        let selected = state.selected_text();
                        if !selected.is_empty() {
                            cx.write_to_clipboard(ClipboardItem::new_string(selected));
                        }
                        KeyOutcome::Ignored
                    }
                    (true, "x") => {
                        let selected = state.selected_text();
                        if selected.is_empty() {
                            KeyOutcome::Ignored
                        } else {
                            cx.write_to_clipboard(ClipboardItem::new_string(selected));
                            state.delete_backward();
                            KeyOutcome::Edited(ChangeSource::Cut)
                        }
                    }
                    (true, "v") => {
                        let pasted = cx
                            .read_from_clipboard()
                            .and_then(|item| item.text())
                            .unwrap_or_default();
                        if state.insert_text(&pasted) {
                            state.clamp_to_max_length(max_length);
                            KeyOutcome::Edited(ChangeSource::Paste)
                        } else {
                            KeyOutcome::Ignored
                        }
                    }
                    _ => apply_key(&mut state, keys, max_length),
                };

                match outcome {
                    KeyOutcome::Ignored => {}
                    KeyOutcome::Moved => {
                        control::set_edit_cursor(id, state.cursor());
                        window.refresh();
                    }
                    KeyOutcome::Edited(source) => {
                        if state.value == previous.as_ref() {
                            return;
                        }
                        let Some(handler) = on_change.as_ref() else {
                            log::trace!("textarea {id} has no change handler, dropping edit");
                            return;
                        };
                        control::set_edit_cursor(id, state.cursor());
                        let change = TextareaChangeEvent {
                            value: state.value.clone().into(),
                            previous: previous.clone(),
                            caret: state.caret,
                            source,
                        };
                        (handler)(&change, window, cx);
                        window.refresh();
                    }
                }
            });
        }

        let rows = MeasuredRows::new(
            self.id.clone(),
            value,
            self.bounds,
            preset,
            theme.font_family.clone(),
        );
        let layer = div()
            .absolute()
            .top(px(preset.padding_y))
            .left(px(preset.padding_x))
            .right(px(preset.padding_x))
            .child(content);

        let mut wrapper = div();
        *wrapper.style() = self.style.clone();
        if self.style.size.width.is_none() {
            wrapper = wrapper.w_full();
        }
        wrapper
            .child(input.child(rows).child(layer))
            .into_any_element()
    }
}

impl Sizeable for AutosizeTextarea {
    fn size(self, value: Size) -> Self {
        self.with_size(value)
    }
}

impl ComponentThemeOverridable for AutosizeTextarea {
    fn local_theme_mut(&mut self) -> &mut LocalTheme {
        &mut self.theme
    }
}

crate::impl_disableable!(AutosizeTextarea);
crate::impl_row_bounded!(AutosizeTextarea);

impl RenderOnce for AutosizeTextarea {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        self.render_box(window)
    }
}

impl Styled for AutosizeTextarea {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style
    }
}
