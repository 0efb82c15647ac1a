//! Chart canvas component.

use crate::state::AppState;
use dioxus::prelude::*;

/// Props for ChartCanvas
#[derive(Props, Clone, PartialEq)]
pub struct ChartCanvasProps {
    /// The DOM id of the canvas (the redraw effect binds to it)
    pub id: String,
    #[props(default = 320)]
    pub width: u32,
    #[props(default = 320)]
    pub height: u32,
}

/// The drawing canvas. Clicks are forwarded in canvas pixel coordinates.
#[component]
pub fn ChartCanvas(props: ChartCanvasProps) -> Element {
    let mut state = use_context::<AppState>();
    // CSS size equals the backing store size, so element coordinates are canvas pixels
    let style = format!(
        "width: {}px; height: {}px; display: block; margin: 0 auto; cursor: pointer;",
        props.width, props.height
    );

    rsx! {
        canvas {
            id: "{props.id}",
            width: "{props.width}",
            height: "{props.height}",
            style: "{style}",
            onclick: move |evt: Event<MouseData>| {
                let point = evt.element_coordinates();
                state.click(point.x, point.y);
            },
        }
    }
}
