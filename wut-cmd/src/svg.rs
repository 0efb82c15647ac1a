//! SVG implementation of the drawing surface.

use std::f64::consts::TAU;
use std::fmt::Write;
use wut_core::geometry::{polar, Point, WedgeSpan};
use wut_core::surface::{Align, Rect, Stroke, Surface};
use wut_core::Color;

/// Sweeps this close to a full turn are drawn as circles; an SVG arc whose
/// endpoints coincide draws nothing.
const FULL_TURN_EPSILON: f64 = 1e-9;

/// Collects SVG elements; [`SvgSurface::finish`] wraps them in a document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn text_anchor(align: Align) -> &'static str {
    match align {
        Align::Center => "middle",
    }
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Path data for a pie slice, or `None` for a whole disc.
    fn wedge_path(center: Point, radius: f64, span: WedgeSpan) -> Option<String> {
        if span.sweep() >= TAU - FULL_TURN_EPSILON {
            return None;
        }
        let from = polar(center, radius, span.start_angle);
        let to = polar(center, radius, span.end_angle);
        let large_arc = if span.sweep() > TAU / 2.0 { 1 } else { 0 };
        Some(format!(
            "M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z",
            center.x, center.y, from.x, from.y, radius, radius, large_arc, to.x, to.y
        ))
    }

    fn wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, paint: &str) {
        let element = match Self::wedge_path(center, radius, span) {
            Some(d) => format!(r#"<path d="{}" {}/>"#, d, paint),
            None => format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}/>"#,
                center.x, center.y, radius, paint
            ),
        };
        self.elements.push(element);
    }

    /// The complete SVG document.
    pub fn finish(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="system-ui, sans-serif" font-size="11">"#,
            w = self.width,
            h = self.height
        );
        for element in &self.elements {
            let _ = writeln!(out, "  {}", element);
        }
        out.push_str("</svg>");
        out
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.elements.clear();
    }

    fn filled_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, color: &Color) {
        let paint = format!(r#"fill="{}""#, escape(color.as_str()));
        self.wedge(center, radius, span, &paint);
    }

    fn stroke_wedge(&mut self, center: Point, radius: f64, span: WedgeSpan, stroke: &Stroke) {
        let paint = format!(
            r#"fill="none" stroke="{}" stroke-width="{}""#,
            escape(stroke.color.as_str()),
            stroke.width
        );
        self.wedge(center, radius, span, &paint);
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        if points.is_empty() {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        self.elements.push(format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            coords.join(" "),
            escape(stroke.color.as_str()),
            stroke.width
        ));
    }

    fn filled_circle(&mut self, center: Point, radius: f64, color: &Color) {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
            center.x,
            center.y,
            radius,
            escape(color.as_str())
        ));
    }

    fn filled_rounded_rect(&mut self, rect: Rect, corner_radius: f64, color: &Color) {
        self.elements.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{:.2}" fill="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            corner_radius,
            escape(color.as_str())
        ));
    }

    fn text(&mut self, text: &str, at: Point, align: Align, color: &Color) {
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" fill="{}">{}</text>"#,
            at.x,
            at.y,
            text_anchor(align),
            escape(color.as_str()),
            escape(text)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wut_core::geometry::START_ANGLE;

    #[test]
    fn test_wedge_path_arc_flags() {
        let center = Point::new(160.0, 160.0);
        let small = WedgeSpan {
            start_angle: START_ANGLE,
            end_angle: START_ANGLE + 1.0,
        };
        let d = SvgSurface::wedge_path(center, 100.0, small).unwrap();
        assert!(d.starts_with("M 160.00 160.00 L 160.00 60.00 A 100.00 100.00 0 0 1"));

        let large = WedgeSpan {
            start_angle: START_ANGLE,
            end_angle: START_ANGLE + 4.0,
        };
        assert!(SvgSurface::wedge_path(center, 100.0, large).unwrap().contains(" 0 1 1 "));
    }

    #[test]
    fn test_full_turn_is_a_circle() {
        let mut svg = SvgSurface::new(320.0, 320.0);
        let whole = WedgeSpan {
            start_angle: START_ANGLE,
            end_angle: START_ANGLE + TAU,
        };
        svg.filled_wedge(Point::new(160.0, 160.0), 120.0, whole, &Color::from("#6fb3ff"));
        assert!(svg.finish().contains(r##"<circle cx="160.00" cy="160.00" r="120.00" fill="#6fb3ff"/>"##));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.text("Bath & <Spa>", Point::new(1.0, 2.0), Align::Center, &Color::from("#555"));
        let doc = svg.finish();
        assert!(doc.contains("Bath &amp; &lt;Spa&gt;"));
        assert!(doc.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_clear_drops_elements() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.filled_circle(Point::new(1.0, 1.0), 2.0, &Color::from("#fff"));
        svg.clear();
        let doc = svg.finish();
        assert!(!doc.contains("<circle"));
        assert!(doc.ends_with("</svg>"));
    }
}
