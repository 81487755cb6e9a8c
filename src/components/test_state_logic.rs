use std::sync::{LazyLock, Mutex, MutexGuard};

use super::control::{self, EditCursor};
use super::text_edit_state::{TextEditState, byte_index_at_char, char_index_at_byte};
use super::textarea::{ChangeSource, KeyInput, KeyOutcome, apply_key};
use crate::autosize::{ResizeCommit, RowBounds};
use crate::autosize::testing::FixedHeightSurface;

static STATE_TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct StateTestGuard {
    _lock: MutexGuard<'static, ()>,
}

fn guard() -> StateTestGuard {
    let lock = match STATE_TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    control::clear_all();
    StateTestGuard { _lock: lock }
}

impl Drop for StateTestGuard {
    fn drop(&mut self) {
        control::clear_all();
    }
}

fn key(key: &str) -> KeyInput<'_> {
    KeyInput {
        key,
        ..KeyInput::default()
    }
}

fn typed(ch: &str) -> KeyInput<'_> {
    KeyInput {
        key: ch,
        key_char: Some(ch),
        ..KeyInput::default()
    }
}

#[test]
fn edit_state_inserts_and_deletes_by_char() {
    let mut state = TextEditState::new("héllo", 2, 2);
    assert!(state.insert_text("ß"));
    assert_eq!(state.value, "héßllo");
    assert_eq!(state.caret, 3);

    assert!(state.delete_backward());
    assert_eq!(state.value, "héllo");
    assert!(state.delete_forward());
    assert_eq!(state.value, "hélo");
    assert_eq!(state.caret, 2);

    let mut at_start = TextEditState::new("ab", 0, 0);
    assert!(!at_start.delete_backward());
    let mut at_end = TextEditState::new("ab", 2, 2);
    assert!(!at_end.delete_forward());
}

#[test]
fn edit_state_replaces_selection() {
    let mut state = TextEditState::new("hello world", 6, 11);
    assert_eq!(state.selection(), Some((6, 11)));
    assert_eq!(state.selected_text(), "world");
    assert!(state.insert_text("rust"));
    assert_eq!(state.value, "hello rust");
    assert_eq!(state.selection(), None);

    state.select_all();
    assert!(state.delete_backward());
    assert!(state.is_empty());
    assert!(!state.insert_text(""));
}

#[test]
fn edit_state_navigates_lines() {
    let mut state = TextEditState::new("abcd\nx\nlonger", 3, 3);
    assert_eq!(state.line_count(), 3);
    assert_eq!(state.line_col(3), (0, 3));

    state.move_down(false);
    assert_eq!(state.line_col(state.caret), (1, 1));
    state.move_down(false);
    assert_eq!(state.line_col(state.caret), (2, 1));
    state.move_down(false);
    assert_eq!(state.caret, state.len());

    state.move_line_start(false);
    assert_eq!(state.line_col(state.caret), (2, 0));
    state.move_up(true);
    assert_eq!(state.selection(), Some((5, 7)));
    state.move_up(false);
    state.move_up(false);
    assert_eq!(state.caret, 0);
    state.move_line_end(false);
    assert_eq!(state.caret, 4);
}

#[test]
fn edit_state_collapses_selection_on_plain_moves() {
    let mut state = TextEditState::new("abcdef", 4, 1);
    state.move_left(false);
    assert_eq!(state.cursor(), EditCursor { caret: 1, anchor: 1 });

    let mut state = TextEditState::new("abcdef", 1, 4);
    state.move_right(false);
    assert_eq!(state.cursor(), EditCursor { caret: 4, anchor: 4 });
}

#[test]
fn edit_state_clamps_to_max_length() {
    let mut state = TextEditState::new("abcdef", 6, 6);
    assert!(!state.clamp_to_max_length(None));
    assert!(state.clamp_to_max_length(Some(4)));
    assert_eq!(state.value, "abcd");
    assert_eq!(state.caret, 4);
    assert!(!state.clamp_to_max_length(Some(4)));
}

#[test]
fn byte_index_maps_multibyte_chars() {
    assert_eq!(byte_index_at_char("aé b", 0), 0);
    assert_eq!(byte_index_at_char("aé b", 2), 3);
    assert_eq!(byte_index_at_char("aé b", 99), 5);
}

#[test]
fn char_index_maps_hit_test_bytes_back() {
    assert_eq!(char_index_at_byte("aé b", 0), 0);
    assert_eq!(char_index_at_byte("aé b", 3), 2);
    assert_eq!(char_index_at_byte("aé b", 5), 4);
    assert_eq!(char_index_at_byte("aé b", 99), 4);
}

#[test]
fn selection_highlight_spans_bytes_across_wrapped_lines() {
    let state = TextEditState::new("héllo\nwörld", 8, 2);
    assert_eq!(state.selection_bytes(), Some(3..10));
    assert_eq!(&state.value[3..10], "llo\nwö");
    assert_eq!(TextEditState::new("abc", 1, 1).selection_bytes(), None);
}

#[test]
fn clicked_caret_lands_mid_text_and_extends_with_shift() {
    let value = "first line\nsecond";
    let mut state = TextEditState::new(value, 17, 17);

    state.place_caret(char_index_at_byte(value, 3), false);
    assert_eq!(state.cursor(), EditCursor { caret: 3, anchor: 3 });

    state.place_caret(char_index_at_byte(value, 14), true);
    assert_eq!(state.selected_text(), "st line\nsec");

    state.place_caret(99, false);
    assert_eq!(state.caret, state.len());
}

#[test]
fn key_handler_reports_edit_sources() {
    let mut state = TextEditState::new("ab", 2, 2);
    assert_eq!(
        apply_key(&mut state, typed("c"), None),
        KeyOutcome::Edited(ChangeSource::Typed)
    );
    assert_eq!(
        apply_key(&mut state, key("enter"), None),
        KeyOutcome::Edited(ChangeSource::Newline)
    );
    assert_eq!(state.value, "abc\n");
    assert_eq!(
        apply_key(&mut state, key("backspace"), None),
        KeyOutcome::Edited(ChangeSource::DeleteBackward)
    );
    assert_eq!(apply_key(&mut state, key("delete"), None), KeyOutcome::Ignored);
    assert_eq!(apply_key(&mut state, key("left"), None), KeyOutcome::Moved);
    assert_eq!(
        apply_key(&mut state, key("delete"), None),
        KeyOutcome::Edited(ChangeSource::DeleteForward)
    );
    assert_eq!(state.value, "ab");
}

#[test]
fn key_handler_ignores_commands_and_named_keys() {
    let mut state = TextEditState::new("ab", 1, 1);
    let command = KeyInput {
        key: "b",
        command: true,
        ..KeyInput::default()
    };
    assert_eq!(apply_key(&mut state, command, None), KeyOutcome::Ignored);
    assert_eq!(apply_key(&mut state, key("escape"), None), KeyOutcome::Ignored);
    assert_eq!(apply_key(&mut state, key("tab"), None), KeyOutcome::Ignored);
    assert_eq!(state.value, "ab");

    let select_all = KeyInput {
        key: "a",
        command: true,
        ..KeyInput::default()
    };
    assert_eq!(apply_key(&mut state, select_all, None), KeyOutcome::Moved);
    assert_eq!(state.selection(), Some((0, 2)));
}

#[test]
fn key_handler_respects_max_length() {
    let mut state = TextEditState::new("abc", 3, 3);
    apply_key(&mut state, typed("d"), Some(3));
    assert_eq!(state.value, "abc");
    assert_eq!(state.caret, 3);
}

#[test]
fn key_handler_extends_selection_with_shift() {
    let mut state = TextEditState::new("abc", 3, 3);
    let shift_left = KeyInput {
        key: "left",
        shift: true,
        ..KeyInput::default()
    };
    apply_key(&mut state, shift_left, None);
    apply_key(&mut state, shift_left, None);
    assert_eq!(state.selected_text(), "bc");
}

#[test]
fn edit_state_defaults_caret_to_end_and_clamps_stored_cursor() {
    let _guard = guard();
    let state = control::edit_state("notes", "héllo");
    assert_eq!(state.cursor(), EditCursor { caret: 5, anchor: 5 });

    control::set_edit_cursor("notes", EditCursor { caret: 9, anchor: 1 });
    let state = control::edit_state("notes", "abc");
    assert_eq!(state.cursor(), EditCursor { caret: 3, anchor: 1 });
}

#[test]
fn layout_width_reports_changes_only() {
    let _guard = guard();
    assert_eq!(control::layout_width("notes"), None);
    assert!(control::set_layout_width("notes", 240.0));
    assert!(!control::set_layout_width("notes", 240.0));
    assert!(control::set_layout_width("notes", 300.0));
    assert_eq!(control::layout_width("notes"), Some(300.0));
}

#[test]
fn focus_state_follows_controlled_value() {
    let _guard = guard();
    assert!(!control::focused_state("notes", None, false));
    control::set_focused_state("notes", true);
    assert!(control::focused_state("notes", None, false));
    assert!(!control::focused_state("notes", Some(false), true));
}

#[test]
fn resize_controller_persists_per_id_and_commits_presentation() {
    let _guard = guard();
    let mut surface = FixedHeightSurface::new(20.0, 50.0);
    let first = control::with_resize_controller("notes", |controller| {
        controller.sync(&mut surface, "draft", RowBounds::new(1, Some(3)))
    });
    assert!(first.and_then(|outcome| outcome.commit()).is_some());

    let second = control::with_resize_controller("notes", |controller| {
        controller.sync(&mut surface, "draft", RowBounds::new(1, Some(3)))
    });
    assert!(second.and_then(|outcome| outcome.commit()).is_none());

    control::set_presentation("notes", ResizeCommit { rows: 3, height: 70.0 });
    assert_eq!(control::presentation("notes").map(|commit| commit.rows), Some(3));
}

#[test]
fn release_drops_all_state_for_id() {
    let _guard = guard();
    control::set_focused_state("notes", true);
    control::set_focused_state("other", true);
    control::set_edit_cursor("notes", EditCursor { caret: 1, anchor: 1 });
    control::set_layout_width("notes", 200.0);
    control::set_presentation("notes", ResizeCommit { rows: 2, height: 50.0 });
    let mut surface = FixedHeightSurface::new(20.0, 20.0);
    control::with_resize_controller("notes", |controller| {
        controller.sync(&mut surface, "x", RowBounds::default())
    });

    control::release("notes");

    assert!(!control::focused_state("notes", None, false));
    assert!(control::focused_state("other", None, false));
    assert_eq!(control::layout_width("notes"), None);
    assert_eq!(control::presentation("notes"), None);
    assert_eq!(control::edit_state("notes", "abc").caret, 3);
    let fresh = control::with_resize_controller("notes", |controller| {
        controller.state().current_rows()
    });
    assert_eq!(fresh, Some(None));
}
