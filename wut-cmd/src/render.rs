//! One-shot headless render of a chart view.

use crate::frame::frame_text;
use crate::svg::SvgSurface;
use crate::RenderFormat;
use log::info;
use wut_core::feedback::LogSink;
use wut_core::geometry::{compute_wedges, polar};
use wut_core::surface::CommandRecorder;
use wut_core::{ChartConfig, WaterTracker};

/// Drive a fresh tracker to the requested state and render it.
///
/// `highlight` taps the middle of that category's wedge, exactly as a user
/// would; in edit mode this opens the editor for it.
pub fn render_view(
    config: ChartConfig,
    view: &str,
    edit: bool,
    highlight: Option<usize>,
    format: RenderFormat,
) -> anyhow::Result<String> {
    let (width, height) = (config.width, config.height);
    let mut tracker = WaterTracker::new(config, LogSink)?;

    let _ = tracker.select_view(view)?;
    if edit {
        let _ = tracker.toggle_edit();
    }
    if let Some(index) = highlight {
        tracker.store().get(index)?;
        let wedges = compute_wedges(tracker.categories());
        let layout = tracker.layout();
        if let Some(span) = wedges.get(index) {
            let _ = tracker.click(polar(layout.center, layout.radius / 2.0, span.mid_angle()));
        }
    }

    info!("Rendering {} view as {:?}", view, format);
    let output = match format {
        RenderFormat::Svg => {
            let mut surface = SvgSurface::new(width, height);
            tracker.render(&mut surface);
            surface.finish()
        }
        RenderFormat::Json => {
            let mut surface = CommandRecorder::new();
            let frame = tracker.render(&mut surface);
            serde_json::to_string_pretty(&serde_json::json!({
                "frame": frame,
                "commands": surface.commands,
            }))?
        }
        RenderFormat::Text => {
            let mut surface = CommandRecorder::new();
            frame_text(&tracker.render(&mut surface))
        }
    };
    Ok(output)
}
