//! Stateless renderers for the three views and their text summaries.
//!
//! Each view is a full redraw: the surface is cleared first, then every
//! primitive is issued in a fixed order.

use crate::category::{percentage_of, CategoryStore, Color, UsageCategory};
use crate::config::ChartConfig;
use crate::geometry::{compute_wedges, Point, WedgeSpan};
use crate::series::{series_max, series_total, LabelValue, DAILY_COLORS};
use crate::surface::{Align, Rect, Stroke, Surface};
use crate::view::ViewMode;
use serde::Serialize;

const AXIS_COLOR: &str = "#c9cedd";
const AXIS_WIDTH: f64 = 2.0;
const LINE_COLOR: &str = "#6fb3ff";
const LINE_WIDTH: f64 = 3.0;
const MARKER_RADIUS: f64 = 4.0;
const MARKER_FILL: &str = "#ffffff";
const BAR_CORNER_RADIUS: f64 = 6.0;
const LABEL_COLOR: &str = "#555b67";
const LABEL_OFFSET: f64 = 14.0;
/// Headroom above the tallest point of line and bar charts.
const Y_HEADROOM: f64 = 1.1;

/// Two-line text panel shown under the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub title: String,
    pub description: String,
}

impl Summary {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Color swatch plus "{label} ({pct}%)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: Color,
    pub text: String,
}

pub fn breakdown_summary(editing: bool) -> Summary {
    let description = if editing {
        "Tap a section to edit or delete it, or use New to add a category."
    } else {
        "Tap a section to view the percentage breakdown."
    };
    Summary::new("Total Usage", description)
}

pub fn weekly_summary(series: &[LabelValue]) -> Summary {
    Summary::new(
        ViewMode::Weekly.title(),
        format!(
            "Total weekly usage: {} L (example data for prototype).",
            series_total(series)
        ),
    )
}

pub fn daily_summary() -> Summary {
    Summary::new(
        ViewMode::Daily.title(),
        "Comparing today's water usage with yesterday and last week (example data).",
    )
}

/// Summary after tapping a wedge.
pub fn selection_summary(category: &UsageCategory, pct: u32, editing: bool) -> Summary {
    let description = if editing {
        format!("Editing mode: {}% of today's water usage.", pct)
    } else {
        format!("{}% of today's water usage (approx.).", pct)
    };
    Summary::new(category.label(), description)
}

/// Summary after tapping the weekly or daily chart.
pub fn chart_tap_summary(mode: ViewMode) -> Summary {
    let chart = match mode {
        ViewMode::Weekly => "weekly chart",
        _ => "daily comparison chart",
    };
    Summary::new(
        mode.title(),
        format!(
            "Tap detected on {} (more interactivity planned for beta version).",
            chart
        ),
    )
}

pub fn editing_unavailable_summary() -> Summary {
    Summary::new(
        "Edit mode",
        "Editing is available only for the Water Usage Breakdown view.",
    )
}

pub fn legend(store: &CategoryStore) -> Vec<LegendEntry> {
    let total = store.total();
    store
        .categories()
        .iter()
        .map(|c| LegendEntry {
            color: c.color().clone(),
            text: format!("{} ({}%)", c.label(), percentage_of(c.value(), total)),
        })
        .collect()
}

/// Draw the breakdown pie. `highlight` widens one wedge; hit-testing still
/// uses the base radius. Returns the spans that were drawn.
pub fn draw_pie(
    surface: &mut dyn Surface,
    store: &CategoryStore,
    config: &ChartConfig,
    highlight: Option<usize>,
) -> Vec<WedgeSpan> {
    surface.clear();
    let (cx, cy) = config.center();
    let center = Point::new(cx, cy);
    let outline = Stroke {
        color: config.wedge_outline.clone(),
        width: config.wedge_outline_width,
    };

    let wedges = compute_wedges(store.categories());
    for (index, (category, span)) in store.categories().iter().zip(&wedges).enumerate() {
        let radius = if highlight == Some(index) {
            config.radius + config.highlight_increment
        } else {
            config.radius
        };
        surface.filled_wedge(center, radius, *span, category.color());
        surface.stroke_wedge(center, radius, *span, &outline);
    }
    wedges
}

struct Plot {
    origin: Point,
    width: f64,
    height: f64,
}

fn plot_area(config: &ChartConfig, padding: f64) -> Plot {
    Plot {
        origin: Point::new(padding, config.height - padding),
        width: (config.width - padding * 2.0).max(0.0),
        height: (config.height - padding * 2.0).max(0.0),
    }
}

fn draw_axes(surface: &mut dyn Surface, plot: &Plot) {
    let Point { x, y } = plot.origin;
    surface.stroke_polyline(
        &[
            Point::new(x + plot.width, y),
            plot.origin,
            Point::new(x, y - plot.height),
        ],
        &Stroke::new(AXIS_COLOR, AXIS_WIDTH),
    );
}

/// Weekly trend line with point markers.
pub fn draw_weekly(surface: &mut dyn Surface, series: &[LabelValue], config: &ChartConfig) {
    surface.clear();
    let plot = plot_area(config, config.line_padding);
    draw_axes(surface, &plot);

    let max = series_max(series) * Y_HEADROOM;
    if series.is_empty() || max <= 0.0 {
        return;
    }
    let step = if series.len() > 1 {
        plot.width / (series.len() - 1) as f64
    } else {
        0.0
    };
    let points: Vec<Point> = series
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Point::new(
                plot.origin.x + step * i as f64,
                plot.origin.y - p.value / max * plot.height,
            )
        })
        .collect();

    surface.stroke_polyline(&points, &Stroke::new(LINE_COLOR, LINE_WIDTH));
    // Outlined markers: a line-colored disc under a smaller white one
    let ring = Color::from(LINE_COLOR);
    let fill = Color::from(MARKER_FILL);
    for point in &points {
        surface.filled_circle(*point, MARKER_RADIUS + LINE_WIDTH / 2.0, &ring);
        surface.filled_circle(*point, MARKER_RADIUS, &fill);
    }
}

/// Daily comparison bars with labels under the x axis.
pub fn draw_daily(surface: &mut dyn Surface, series: &[LabelValue], config: &ChartConfig) {
    surface.clear();
    let plot = plot_area(config, config.bar_padding);
    draw_axes(surface, &plot);

    let max = series_max(series) * Y_HEADROOM;
    if series.is_empty() || max <= 0.0 {
        return;
    }
    let slot = plot.width / series.len() as f64;
    let bar_width = plot.width / (series.len() as f64 * 1.8);
    let label_color = Color::from(LABEL_COLOR);

    for (i, point) in series.iter().enumerate() {
        let x = plot.origin.x + (i as f64 + 0.5) * slot;
        let bar_height = point.value / max * plot.height;
        let rect = Rect {
            x: x - bar_width / 2.0,
            y: plot.origin.y - bar_height,
            width: bar_width,
            height: bar_height,
        };
        let color = Color::from(DAILY_COLORS[i % DAILY_COLORS.len()]);
        surface.filled_rounded_rect(rect, BAR_CORNER_RADIUS, &color);
        surface.text(
            &point.label,
            Point::new(x, plot.origin.y + LABEL_OFFSET),
            Align::Center,
            &label_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{daily_series, weekly_series};
    use crate::surface::{CommandRecorder, DrawCommand};

    fn store() -> CategoryStore {
        CategoryStore::from_config(&ChartConfig::default())
    }

    #[test]
    fn test_pie_draws_one_wedge_per_category() {
        let config = ChartConfig::default();
        let mut recorder = CommandRecorder::new();
        let spans = draw_pie(&mut recorder, &store(), &config, None);

        assert_eq!(recorder.commands[0], DrawCommand::Clear);
        let wedges = recorder.wedges();
        assert_eq!(wedges.len(), 4);
        assert_eq!(spans.len(), 4);
        assert!(wedges.iter().all(|(radius, _, _)| *radius == 120.0));
        assert_eq!(wedges[1].2.as_str(), "#7ee0c8");
    }

    #[test]
    fn test_highlight_widens_only_selected_wedge() {
        let config = ChartConfig::default();
        let mut recorder = CommandRecorder::new();
        draw_pie(&mut recorder, &store(), &config, Some(2));
        let radii: Vec<f64> = recorder.wedges().iter().map(|(r, _, _)| *r).collect();
        assert_eq!(radii, vec![120.0, 120.0, 128.0, 120.0]);
    }

    #[test]
    fn test_pie_is_deterministic() {
        let config = ChartConfig::default();
        let mut first = CommandRecorder::new();
        let mut second = CommandRecorder::new();
        draw_pie(&mut first, &store(), &config, None);
        draw_pie(&mut second, &store(), &config, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_pie_only_clears() {
        let config = ChartConfig {
            seed: Vec::new(),
            ..ChartConfig::default()
        };
        let mut recorder = CommandRecorder::new();
        let spans = draw_pie(&mut recorder, &CategoryStore::from_config(&config), &config, None);
        assert!(spans.is_empty());
        assert_eq!(recorder.commands, vec![DrawCommand::Clear]);
    }

    #[test]
    fn test_legend_entries() {
        let entries = legend(&store());
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Shower (40%)", "Kitchen (25%)", "Laundry (20%)", "Outdoor / Other (15%)"]
        );
        assert_eq!(entries[0].color.as_str(), "#6fb3ff");
    }

    #[test]
    fn test_weekly_chart_layout() {
        let config = ChartConfig::default();
        let mut recorder = CommandRecorder::new();
        draw_weekly(&mut recorder, &weekly_series(), &config);

        let polylines: Vec<&Vec<Point>> = recorder
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokePolyline { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        // axes + trend line
        assert_eq!(polylines.len(), 2);
        let line = polylines[1];
        assert_eq!(line.len(), 7);
        assert_eq!(line[0].x, 40.0);
        assert_eq!(line[6].x, 280.0);
        // The peak (90) sits below the top of the plot because of headroom
        let peak = line[3].y;
        assert!(peak > 40.0);
        assert!((peak - (280.0 - 90.0 / 99.0 * 240.0)).abs() < 1e-9);
    }

    #[test]
    fn test_daily_chart_bars_and_labels() {
        let config = ChartConfig::default();
        let mut recorder = CommandRecorder::new();
        draw_daily(&mut recorder, &daily_series(), &config);

        let bars: Vec<(Rect, &Color)> = recorder
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FilledRoundedRect { rect, color, .. } => Some((*rect, color)),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 3);
        // Tallest bar is "Last Week"
        assert!(bars[2].0.height > bars[0].0.height);
        assert!(bars[0].0.height > bars[1].0.height);
        assert_eq!(bars[1].1.as_str(), "#ffd27f");
        assert_eq!(recorder.texts(), vec!["Today", "Yesterday", "Last Week"]);
    }

    #[test]
    fn test_summaries() {
        assert_eq!(breakdown_summary(false).title, "Total Usage");
        assert!(breakdown_summary(true).description.contains("use New"));
        assert_eq!(
            weekly_summary(&weekly_series()).description,
            "Total weekly usage: 525 L (example data for prototype)."
        );
        let shower = UsageCategory::new("Shower", 40.0, "#6fb3ff");
        assert_eq!(
            selection_summary(&shower, 40, false).description,
            "40% of today's water usage (approx.)."
        );
        assert_eq!(
            selection_summary(&shower, 40, true).description,
            "Editing mode: 40% of today's water usage."
        );
        assert!(chart_tap_summary(ViewMode::Daily)
            .description
            .contains("daily comparison chart"));
    }
}
