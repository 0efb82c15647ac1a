//! Add/edit category form.

use crate::components::ErrorDisplay;
use crate::state::AppState;
use dioxus::prelude::*;

const FIELD_STYLE: &str =
    "display: block; width: 100%; box-sizing: border-box; margin-top: 4px; padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;";
const BUTTON_STYLE: &str = "padding: 6px 14px; border: none; border-radius: 6px; cursor: pointer;";

/// Modal form over the chart while an edit session is open.
///
/// Clicking the backdrop dismisses the form; clicks inside the dialog are
/// kept from reaching it.
#[component]
pub fn EditModal() -> Element {
    let mut state = use_context::<AppState>();
    let Some(session) = (state.frame)().and_then(|frame| frame.session) else {
        return rsx! {};
    };
    let label = (state.label_input)();
    let value = (state.value_input)();
    let error = (state.form_error)();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 20;",
            onclick: move |_| state.dispatch(|tracker| tracker.dismiss()),
            div {
                role: "dialog",
                aria_modal: "true",
                style: "background: #fff; border-radius: 12px; padding: 18px; width: 260px; box-shadow: 0 8px 24px rgba(0,0,0,0.2);",
                onclick: move |evt| evt.stop_propagation(),
                h3 {
                    style: "margin: 0 0 12px 0; font-size: 15px;",
                    "{session.title()}"
                }
                label {
                    style: "display: block; font-size: 12px; margin-bottom: 8px;",
                    "Label"
                    input {
                        r#type: "text",
                        value: "{label}",
                        style: FIELD_STYLE,
                        oninput: move |evt| state.label_input.set(evt.value()),
                    }
                }
                label {
                    style: "display: block; font-size: 12px;",
                    "Litres"
                    input {
                        r#type: "text",
                        inputmode: "decimal",
                        value: "{value}",
                        style: FIELD_STYLE,
                        oninput: move |evt| state.value_input.set(evt.value()),
                    }
                }
                if let Some(message) = error {
                    ErrorDisplay { message, inline: true }
                }
                div {
                    style: "display: flex; gap: 8px; justify-content: flex-end; margin-top: 16px;",
                    if session.can_delete() {
                        button {
                            style: "{BUTTON_STYLE} background: #ffe3e3; color: #c62828; margin-right: auto;",
                            onclick: move |_| state.delete(),
                            "Delete"
                        }
                    }
                    button {
                        style: "{BUTTON_STYLE} background: #eee;",
                        onclick: move |_| state.dispatch(|tracker| tracker.cancel()),
                        "Cancel"
                    }
                    button {
                        style: "{BUTTON_STYLE} background: #b29bff; color: #fff;",
                        onclick: move |_| state.submit(),
                        "{session.submit_label()}"
                    }
                }
            }
        }
    }
}
