use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

use crate::autosize::{ResizeCommit, ResizeController};

use super::text_edit_state::TextEditState;

static BOOL_STATE: LazyLock<Mutex<HashMap<String, bool>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static EDIT_STATE: LazyLock<Mutex<HashMap<String, EditCursor>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static LAYOUT_WIDTH: LazyLock<Mutex<HashMap<String, f32>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static PRESENTATION: LazyLock<Mutex<HashMap<String, ResizeCommit>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static RESIZE_CONTROLLERS: LazyLock<Mutex<HashMap<String, ResizeController>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
pub const FOCUSED_SLOT: &str = "focused";

/// Caret and selection anchor, in chars, persisted between frames.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EditCursor {
    pub caret: usize,
    pub anchor: usize,
}

fn key(id: &str, slot: &str) -> String {
    format!("{id}::{slot}")
}

pub fn bool_state(id: &str, slot: &str, controlled: Option<bool>, default: bool) -> bool {
    if let Some(value) = controlled {
        return value;
    }

    let composed = key(id, slot);
    if let Ok(mut state) = BOOL_STATE.lock() {
        return *state.entry(composed).or_insert(default);
    }
    default
}

pub fn set_bool_state(id: &str, slot: &str, value: bool) {
    let composed = key(id, slot);
    if let Ok(mut state) = BOOL_STATE.lock() {
        state.insert(composed, value);
    }
}

pub fn focused_state(id: &str, controlled: Option<bool>, default: bool) -> bool {
    bool_state(id, FOCUSED_SLOT, controlled, default)
}

pub fn set_focused_state(id: &str, value: bool) {
    set_bool_state(id, FOCUSED_SLOT, value);
}

/// Edit state for `value`, with the stored caret clamped to it. A caret that was never
/// stored starts at the end of the text.
pub fn edit_state(id: &str, value: &str) -> TextEditState {
    let len = value.chars().count();
    let cursor = EDIT_STATE
        .lock()
        .ok()
        .and_then(|state| state.get(id).copied())
        .unwrap_or(EditCursor {
            caret: len,
            anchor: len,
        });
    TextEditState::new(value, cursor.caret, cursor.anchor)
}

pub fn set_edit_cursor(id: &str, cursor: EditCursor) {
    if let Ok(mut state) = EDIT_STATE.lock() {
        state.insert(id.to_string(), cursor);
    }
}

pub fn layout_width(id: &str) -> Option<f32> {
    LAYOUT_WIDTH
        .lock()
        .ok()
        .and_then(|state| state.get(id).copied())
}

/// Records the observed box width. Returns `true` when it differs from the last one.
pub fn set_layout_width(id: &str, width: f32) -> bool {
    let Ok(mut state) = LAYOUT_WIDTH.lock() else {
        return false;
    };
    match state.insert(id.to_string(), width) {
        Some(previous) => (previous - width).abs() > f32::EPSILON,
        None => true,
    }
}

/// Row count and height last committed to the visible surface of `id`.
pub fn presentation(id: &str) -> Option<ResizeCommit> {
    PRESENTATION
        .lock()
        .ok()
        .and_then(|state| state.get(id).copied())
}

pub fn set_presentation(id: &str, commit: ResizeCommit) {
    if let Ok(mut state) = PRESENTATION.lock() {
        state.insert(id.to_string(), commit);
    }
}

/// Runs `f` with the resize controller of `id`, creating it on first use. Returns
/// `None` only if the registry lock is poisoned.
pub fn with_resize_controller<R>(
    id: &str,
    f: impl FnOnce(&mut ResizeController) -> R,
) -> Option<R> {
    let mut controllers = RESIZE_CONTROLLERS.lock().ok()?;
    let controller = controllers.entry(id.to_string()).or_default();
    Some(f(controller))
}

/// Drops every piece of state held for `id`, including its measurement shadow.
pub fn release(id: &str) {
    let prefix = format!("{id}::");
    if let Ok(mut state) = BOOL_STATE.lock() {
        state.retain(|composed, _| !composed.starts_with(&prefix));
    }
    if let Ok(mut state) = EDIT_STATE.lock() {
        state.remove(id);
    }
    if let Ok(mut state) = LAYOUT_WIDTH.lock() {
        state.remove(id);
    }
    if let Ok(mut state) = PRESENTATION.lock() {
        state.remove(id);
    }
    if let Ok(mut state) = RESIZE_CONTROLLERS.lock() {
        state.remove(id);
    }
}

#[cfg(test)]
pub(crate) fn clear_all() {
    if let Ok(mut state) = BOOL_STATE.lock() {
        state.clear();
    }
    if let Ok(mut state) = EDIT_STATE.lock() {
        state.clear();
    }
    if let Ok(mut state) = LAYOUT_WIDTH.lock() {
        state.clear();
    }
    if let Ok(mut state) = PRESENTATION.lock() {
        state.clear();
    }
    if let Ok(mut state) = RESIZE_CONTROLLERS.lock() {
        state.clear();
    }
}
