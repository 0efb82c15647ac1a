//! Dioxus RSX components for the water usage chart.

mod chart_canvas;
mod edit_modal;
mod edit_toolbar;
mod error_display;
mod legend;
mod summary_panel;
mod view_dropdown;

pub use chart_canvas::ChartCanvas;
pub use edit_modal::EditModal;
pub use edit_toolbar::EditToolbar;
pub use error_display::ErrorDisplay;
pub use legend::Legend;
pub use summary_panel::SummaryPanel;
pub use view_dropdown::ViewDropdown;
