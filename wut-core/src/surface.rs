//! Drawing surface abstraction.
//!
//! Renderers issue an ordered sequence of primitive calls against a
//! [`Surface`]. The browser binds it to a Canvas 2D context, the CLI to SVG,
//! and tests to a [`CommandRecorder`].

use crate::category::Color;
use crate::geometry::{Point, WedgeSpan};
use serde::Serialize;

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Center,
}

impl Align {
    /// Canvas `textAlign` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Center => "center",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: Color::from(color),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Drawing primitives understood by every backend.
pub trait Surface {
    /// Wipe the whole surface.
    fn clear(&mut self);

    /// Pie slice from `center` out to `radius` over `span`.
    fn filled_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, color: &Color);

    /// Outline of a pie slice.
    fn stroke_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, stroke: &Stroke);

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke);

    fn filled_circle(&mut self, center: Point, radius: f64, color: &Color);

    fn filled_rounded_rect(&mut self, rect: Rect, corner_radius: f64, color: &Color);

    fn text(&mut self, text: &str, at: Point, align: Align, color: &Color);
}

/// A recorded primitive call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    FilledWedge {
        center: Point,
        radius: f64,
        span: WedgeSpan,
        color: Color,
    },
    StrokeWedge {
        center: Point,
        radius: f64,
        span: WedgeSpan,
        stroke: Stroke,
    },
    StrokePolyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    FilledCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    FilledRoundedRect {
        rect: Rect,
        corner_radius: f64,
        color: Color,
    },
    Text {
        text: String,
        at: Point,
        align: Align,
        color: Color,
    },
}

/// Surface that just records what was drawn.
///
/// `clear` drops everything recorded so far, mirroring a real canvas.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled wedges as (radius, span, color).
    pub fn wedges(&self) -> Vec<(f64, WedgeSpan, &Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FilledWedge {
                    radius,
                    span,
                    color,
                    ..
                } => Some((*radius, *span, color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandRecorder {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn filled_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, color: &Color) {
        self.commands.push(DrawCommand::FilledWedge {
            center,
            radius,
            span,
            color: color.clone(),
        });
    }

    fn stroke_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeWedge {
            center,
            radius,
            span,
            stroke: stroke.clone(),
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn filled_circle(&mut self, center: Point, radius: f64, color: &Color) {
        self.commands.push(DrawCommand::FilledCircle {
            center,
            radius,
            color: color.clone(),
        });
    }

    fn filled_rounded_rect(&mut self, rect: Rect, corner_radius: f64, color: &Color) {
        self.commands.push(DrawCommand::FilledRoundedRect {
            rect,
            corner_radius,
            color: color.clone(),
        });
    }

    fn text(&mut self, text: &str, at: Point, align: Align, color: &Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            align,
            color: color.clone(),
        });
    }
}
