//! Summary text under the chart.

use crate::state::AppState;
use dioxus::prelude::*;

/// Title and description for the current view, selection or notice.
#[component]
pub fn SummaryPanel() -> Element {
    let state = use_context::<AppState>();
    let Some(frame) = (state.frame)() else {
        return rsx! {};
    };

    rsx! {
        div {
            aria_live: "polite",
            style: "margin-top: 12px; text-align: center;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{frame.summary.title}"
            }
            p {
                style: "margin: 0; font-size: 13px; color: #555b67;",
                "{frame.summary.description}"
            }
        }
    }
}
