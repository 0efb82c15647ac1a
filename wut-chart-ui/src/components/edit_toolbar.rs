//! Edit/Done and New buttons.

use crate::state::AppState;
use dioxus::prelude::*;

const BUTTON_STYLE: &str =
    "padding: 4px 12px; border: 1px solid #c9c3e6; border-radius: 12px; background: #fff; cursor: pointer; font-size: 12px;";

#[component]
pub fn EditToolbar() -> Element {
    let mut state = use_context::<AppState>();
    let Some(frame) = (state.frame)() else {
        return rsx! {};
    };
    let affordances = frame.affordances;

    rsx! {
        div {
            style: "display: flex; gap: 8px;",
            button {
                style: BUTTON_STYLE,
                onclick: move |_| state.dispatch(|tracker| tracker.toggle_edit()),
                "{affordances.edit_label}"
            }
            if affordances.show_new {
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| state.dispatch(|tracker| tracker.press_new()),
                    "New"
                }
            }
        }
    }
}
