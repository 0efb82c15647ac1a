//! Canvas 2D implementation of the drawing surface.

use crate::js_bridge;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wut_core::geometry::{Point, WedgeSpan};
use wut_core::surface::{Align, Rect, Stroke, Surface};
use wut_core::{Color, TrackerError};

const LABEL_FONT: &str = "11px system-ui";

/// A `<canvas>` element bound once, then drawn into on every render pass.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Bind to the canvas with DOM id `canvas_id`.
    pub fn bind(canvas_id: &str) -> Result<Self, TrackerError> {
        let canvas: HtmlCanvasElement = js_bridge::element_by_id(canvas_id)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| TrackerError::Surface(js_bridge::describe(&e)))?
            .ok_or_else(|| TrackerError::Surface("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| TrackerError::Surface("unexpected context type".to_string()))?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn wedge_path(&self, center: Point, radius: f64, span: WedgeSpan) {
        self.ctx.begin_path();
        self.ctx.move_to(center.x, center.y);
        let _ = self
            .ctx
            .arc(center.x, center.y, radius, span.start_angle, span.end_angle);
        self.ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn filled_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, color: &Color) {
        self.wedge_path(center, radius, span);
        self.ctx.set_fill_style_str(color.as_str());
        self.ctx.fill();
    }

    fn stroke_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, stroke: &Stroke) {
        self.wedge_path(center, radius, span);
        self.ctx.set_stroke_style_str(stroke.color.as_str());
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for point in rest {
            self.ctx.line_to(point.x, point.y);
        }
        self.ctx.set_stroke_style_str(stroke.color.as_str());
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn filled_circle(&mut self, center: Point, radius: f64, color: &Color) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.set_fill_style_str(color.as_str());
        self.ctx.fill();
    }

    fn filled_rounded_rect(&mut self, rect: Rect, corner_radius: f64, color: &Color) {
        let r = corner_radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        let _ = self.ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = self.ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = self.ctx.arc_to(x, y + h, x, y, r);
        let _ = self.ctx.arc_to(x, y, x + w, y, r);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color.as_str());
        self.ctx.fill();
    }

    fn text(&mut self, text: &str, at: Point, align: Align, color: &Color) {
        self.ctx.set_fill_style_str(color.as_str());
        self.ctx.set_font(LABEL_FONT);
        self.ctx.set_text_align(align.as_str());
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }
}
