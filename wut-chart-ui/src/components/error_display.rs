//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Smaller inline variant used inside the edit form
    #[props(default = false)]
    pub inline: bool,
}

/// Displays an error message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    if props.inline {
        return rsx! {
            p {
                role: "alert",
                style: "margin: 6px 0 0 0; font-size: 12px; color: #C62828;",
                "{props.message}"
            }
        };
    }
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "Error: " }
            "{props.message}"
        }
    }
}
