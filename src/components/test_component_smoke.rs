use super::textarea::KeyboardFocus;
use super::*;
use crate::contracts::{ComponentThemeOverridable, Disableable, RowBounded, Sizeable};
use crate::id::ComponentId;
use crate::style::Size;
use crate::theme::{ColorScheme, Theme};
use gpui::{AnyElement, IntoElement, Styled, px};

fn into_any(element: impl IntoElement) -> AnyElement {
    element.into_any_element()
}

#[test]
fn smoke_textarea_variants_render_into_any_element() {
    let _ = into_any(AutosizeTextarea::new(""));
    let _ = into_any(AutosizeTextarea::new("line one\nline two").placeholder("Notes"));
    let _ = into_any(
        AutosizeTextarea::new("draft")
            .with_id("notes")
            .min_rows(3)
            .max_rows(8)
            .max_length(280)
            .with_size(Size::Lg),
    );
    let _ = into_any(AutosizeTextarea::new("locked").read_only(true).unlimited_rows());
    let _ = into_any(
        AutosizeTextarea::new("styled")
            .w(px(320.0))
            .theme(Theme::for_scheme(ColorScheme::Dark))
            .on_change(|_, _, _| {}),
    );
}

#[test]
fn smoke_textarea_contract_traits() {
    let textarea = <AutosizeTextarea as RowBounded>::min_rows(AutosizeTextarea::new(""), 0);
    let textarea = <AutosizeTextarea as RowBounded>::max_rows(textarea, 4);
    assert_eq!(textarea.row_bounds().min_rows, 1);
    assert_eq!(textarea.row_bounds().max_rows, Some(4));

    assert_eq!(AutosizeTextarea::new("").max_rows(0).row_bounds().max_rows, Some(1));

    let textarea = <AutosizeTextarea as RowBounded>::unlimited_rows(textarea);
    assert_eq!(textarea.row_bounds().max_rows, None);

    let textarea = <AutosizeTextarea as Sizeable>::size(textarea, Size::Xs);
    let _ = into_any(<AutosizeTextarea as Disableable>::disabled(textarea, true));
}

#[test]
fn auto_ids_are_stable_per_call_site() {
    let make = || AutosizeTextarea::new("");
    let first = make();
    let second = make();
    assert_eq!(first.id(), second.id());
    assert_ne!(first.id(), AutosizeTextarea::new("").id());

    let explicit = AutosizeTextarea::new("").with_id("notes");
    assert_eq!(explicit.id(), &ComponentId::from("notes"));
}

#[test]
fn textarea_owns_keyboard_focus_without_a_caller_handle() {
    let textarea = AutosizeTextarea::new("editable").on_change(|_, _, _| {});
    assert!(matches!(textarea.keyboard_focus(), KeyboardFocus::Owned));

    let read_only = AutosizeTextarea::new("locked").read_only(true);
    assert!(matches!(read_only.keyboard_focus(), KeyboardFocus::Owned));
}
