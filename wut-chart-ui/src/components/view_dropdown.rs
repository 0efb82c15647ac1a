//! View selector menu.

use crate::state::AppState;
use dioxus::prelude::*;
use wut_core::ViewMode;

const MENU_STYLE: &str = "position: absolute; top: 100%; left: 0; z-index: 10; margin: 4px 0 0 0; padding: 4px 0; list-style: none; background: #fff; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); min-width: 200px;";

/// Dropdown listing the three chart views.
#[component]
pub fn ViewDropdown() -> Element {
    let mut state = use_context::<AppState>();
    let open = (state.menu_open)();
    let current = (state.frame)().map(|frame| frame.view).unwrap_or(ViewMode::Breakdown);

    rsx! {
        div {
            style: "position: relative;",
            button {
                aria_haspopup: "listbox",
                aria_expanded: "{open}",
                style: "padding: 4px 10px; border: none; background: none; font-size: 16px; font-weight: bold; cursor: pointer;",
                onclick: move |_| state.menu_open.set(!open),
                "{current.title()} ▾"
            }
            if open {
                ul {
                    role: "listbox",
                    style: MENU_STYLE,
                    for mode in ViewMode::ALL {
                        li {
                            key: "{mode.id()}",
                            role: "option",
                            aria_selected: "{mode == current}",
                            style: if mode == current {
                                "padding: 6px 14px; cursor: pointer; font-weight: bold; background: #f3f0ff;"
                            } else {
                                "padding: 6px 14px; cursor: pointer;"
                            },
                            onclick: move |_| state.select_view(mode),
                            "{mode.title()}"
                        }
                    }
                }
            }
        }
    }
}
