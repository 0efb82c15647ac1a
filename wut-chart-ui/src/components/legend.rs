//! Breakdown legend.

use crate::state::AppState;
use dioxus::prelude::*;

/// One swatch and "{label} ({pct}%)" per category. Hidden outside the breakdown view.
#[component]
pub fn Legend() -> Element {
    let state = use_context::<AppState>();
    let entries = (state.frame)().map(|frame| frame.legend).unwrap_or_default();
    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        ul {
            style: "list-style: none; margin: 12px 0 0 0; padding: 0; display: flex; flex-wrap: wrap; gap: 8px 16px; justify-content: center;",
            for entry in entries {
                li {
                    key: "{entry.text}",
                    style: "display: flex; align-items: center; gap: 6px; font-size: 12px;",
                    span {
                        style: "width: 12px; height: 12px; border-radius: 3px; background: {entry.color};",
                    }
                    "{entry.text}"
                }
            }
        }
    }
}
