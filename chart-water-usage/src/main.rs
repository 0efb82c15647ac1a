//! Household Water Usage Tracker
//!
//! A single interactive chart widget with three views:
//! - Water Usage Breakdown: pie chart of today's usage by category, editable
//! - Weekly Trends: line chart of litres per day, Monday to Sunday
//! - Daily Comparison: bar chart of today against yesterday and last week
//!
//! Data flow:
//! 1. On mount, the canvas and (for the clip scheme) the audio element are
//!    bound once, a `WaterTracker` is built from the default `ChartConfig`,
//!    and both are installed into `AppState`. A missing element fails here.
//! 2. Components translate clicks into tracker commands via `AppState::dispatch`,
//!    which bumps `revision` when a redraw is owed.
//! 3. The redraw effect subscribes to `revision`, draws the active view onto
//!    the canvas and publishes the resulting `Frame` for the summary, legend,
//!    toolbar and edit form.

use dioxus::prelude::*;
use wut_chart_ui::audio::WebAudioOutput;
use wut_chart_ui::canvas::CanvasSurface;
use wut_chart_ui::components::{
    ChartCanvas, EditModal, EditToolbar, ErrorDisplay, Legend, SummaryPanel, ViewDropdown,
};
use wut_chart_ui::state::{AppState, CANVAS_ID};
use wut_core::feedback::{SoundScheme, ToneSink};
use wut_core::{ChartConfig, WaterTracker};

/// How interaction feedback sounds.
const SOUND_SCHEME: SoundScheme = SoundScheme::WaterDrop;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("water-usage-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let config = ChartConfig::default();
    let (width, height) = (config.width as u32, config.height as u32);

    // Bind the DOM and build the tracker on mount
    use_effect(move || {
        let built = CanvasSurface::bind(CANVAS_ID).and_then(|surface| {
            let output = WebAudioOutput::for_scheme(SOUND_SCHEME)?;
            let tracker = WaterTracker::new(ChartConfig::default(), ToneSink::new(SOUND_SCHEME, output))?;
            Ok((tracker, surface))
        });
        match built {
            Ok((tracker, surface)) => {
                log::info!("Water usage tracker ready ({} categories)", tracker.categories().len());
                state.install(tracker, surface);
            }
            Err(e) => {
                log::error!("Failed to build tracker: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Chart initialization failed: {}", e)));
            }
        }
    });

    // Redraw whenever a command owes one
    use_effect(move || {
        let revision = (state.revision)();
        if revision == 0 {
            return;
        }
        log::debug!("Redraw #{}", revision);
        state.redraw();
    });

    rsx! {
        div {
            style: "padding: 16px; max-width: 360px; margin: 0 auto; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            }

            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;",
                ViewDropdown {}
                EditToolbar {}
            }

            ChartCanvas {
                id: CANVAS_ID.to_string(),
                width: width,
                height: height,
            }

            SummaryPanel {}
            Legend {}
            EditModal {}
        }
    }
}
