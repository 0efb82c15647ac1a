//! Pie wedge geometry and hit-testing.
//!
//! Angles follow the canvas convention: radians, y axis pointing down, so
//! increasing angles run clockwise on screen. The pie starts at 12 o'clock
//! ([`START_ANGLE`]) and wedges partition one full turn from there.

use crate::category::UsageCategory;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Angle of the first wedge's leading edge (12 o'clock).
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Angular interval `[start_angle, end_angle]` of one category's wedge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WedgeSpan {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl WedgeSpan {
    /// Inclusive at both ends.
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle <= self.end_angle
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle halfway through the wedge.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Where the pie sits on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieLayout {
    pub center: Point,
    pub radius: f64,
    pub hit_slack: f64,
}

/// One wedge per category, in order, starting at [`START_ANGLE`].
///
/// The running angle is accumulated in `f64` without per-wedge rounding, and
/// the last wedge is pinned to exactly one full turn so the spans close the
/// circle. An empty collection yields no wedges.
pub fn compute_wedges(categories: &[UsageCategory]) -> Vec<WedgeSpan> {
    let total: f64 = categories.iter().map(|c| c.value()).sum();
    if categories.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    let end = START_ANGLE + TAU;
    let mut start_angle = START_ANGLE;
    let mut spans = Vec::with_capacity(categories.len());
    for (i, category) in categories.iter().enumerate() {
        let end_angle = if i + 1 == categories.len() {
            end
        } else {
            start_angle + category.value() / total * TAU
        };
        spans.push(WedgeSpan {
            start_angle,
            end_angle,
        });
        start_angle = end_angle;
    }
    spans
}

/// Map an `atan2` result into `[START_ANGLE, START_ANGLE + 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle < START_ANGLE {
        angle + TAU
    } else {
        angle
    }
}

/// Index of the wedge under `point`, if any.
///
/// Anything farther than `radius + hit_slack` from the center misses. Wedges
/// are scanned in order and the first containing span wins, so a boundary
/// angle belongs to the earlier wedge.
pub fn hit_test(point: Point, layout: &PieLayout, wedges: &[WedgeSpan]) -> Option<usize> {
    let dx = point.x - layout.center.x;
    let dy = point.y - layout.center.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance > layout.radius + layout.hit_slack {
        return None;
    }

    let angle = normalize_angle(dy.atan2(dx));
    wedges.iter().position(|span| span.contains(angle))
}

/// Point at `distance` from `center` along `angle`.
pub fn polar(center: Point, distance: f64, angle: f64) -> Point {
    Point::new(
        center.x + distance * angle.cos(),
        center.y + distance * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn categories(values: &[f64]) -> Vec<UsageCategory> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| UsageCategory::new(&format!("c{}", i), *v, "#000000"))
            .collect()
    }

    fn layout() -> PieLayout {
        PieLayout {
            center: Point::new(160.0, 160.0),
            radius: 120.0,
            hit_slack: 15.0,
        }
    }

    #[test]
    fn test_quarters() {
        let wedges = compute_wedges(&categories(&[1.0, 1.0, 1.0, 1.0]));
        assert_eq!(wedges.len(), 4);
        assert!((wedges[0].start_angle + FRAC_PI_2).abs() < EPS);
        assert!((wedges[0].end_angle - 0.0).abs() < EPS);
        assert!((wedges[3].end_angle - (START_ANGLE + TAU)).abs() < EPS);
    }

    #[test]
    fn test_empty_collection_has_no_wedges() {
        assert!(compute_wedges(&[]).is_empty());
        assert_eq!(hit_test(Point::new(160.0, 100.0), &layout(), &[]), None);
    }

    #[test]
    fn test_hit_test_seed_layout() {
        let wedges = compute_wedges(&categories(&[40.0, 25.0, 20.0, 15.0]));
        let layout = layout();
        // Just right of 12 o'clock lands in the first wedge
        assert_eq!(hit_test(Point::new(170.0, 60.0), &layout, &wedges), Some(0));
        // 9 o'clock is at 75% of the turn: the last wedge starts at 85%
        assert_eq!(hit_test(Point::new(60.0, 160.0), &layout, &wedges), Some(2));
        // Just left of 12 o'clock is the tail of the last wedge
        assert_eq!(hit_test(Point::new(150.0, 60.0), &layout, &wedges), Some(3));
    }

    #[test]
    fn test_hit_slack_ring_is_clickable() {
        let wedges = compute_wedges(&categories(&[1.0]));
        let layout = layout();
        assert_eq!(hit_test(Point::new(160.0 + 130.0, 160.0), &layout, &wedges), Some(0));
        assert_eq!(hit_test(Point::new(160.0 + 135.0, 160.0), &layout, &wedges), Some(0));
        assert_eq!(hit_test(Point::new(160.0 + 135.5, 160.0), &layout, &wedges), None);
    }

    #[test]
    fn test_boundary_goes_to_earlier_wedge() {
        let wedges = compute_wedges(&categories(&[1.0, 1.0]));
        // 6 o'clock is the exact boundary between the two halves
        let bottom = Point::new(160.0, 260.0);
        assert!((wedges[0].end_angle - FRAC_PI_2).abs() < EPS);
        assert_eq!(hit_test(bottom, &layout(), &wedges), Some(0));
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-3.0) - (-3.0 + TAU)).abs() < EPS);
        assert_eq!(normalize_angle(START_ANGLE), START_ANGLE);
        assert_eq!(normalize_angle(1.0), 1.0);
    }

    proptest! {
        #[test]
        fn test_wedges_partition_full_turn(values in prop::collection::vec(0.001f64..10_000.0, 1..40)) {
            let wedges = compute_wedges(&categories(&values));
            prop_assert_eq!(wedges.len(), values.len());
            prop_assert!((wedges[0].start_angle - START_ANGLE).abs() < EPS);
            prop_assert!((wedges[wedges.len() - 1].end_angle - (START_ANGLE + TAU)).abs() < EPS);
            for pair in wedges.windows(2) {
                prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() < EPS);
                prop_assert!(pair[0].sweep() >= 0.0);
            }
        }

        #[test]
        fn test_interior_angles_hit_their_wedge(
            values in prop::collection::vec(1.0f64..100.0, 1..12),
            frac in 0.05f64..0.95,
            dist in 0.0f64..120.0,
        ) {
            let wedges = compute_wedges(&categories(&values));
            let layout = layout();
            for (i, span) in wedges.iter().enumerate() {
                let angle = span.start_angle + span.sweep() * frac;
                let point = polar(layout.center, dist.max(1.0), angle);
                prop_assert_eq!(hit_test(point, &layout, &wedges), Some(i));
            }
        }

        #[test]
        fn test_far_points_miss(
            values in prop::collection::vec(1.0f64..100.0, 1..12),
            angle in -10.0f64..10.0,
            extra in 0.01f64..500.0,
        ) {
            let wedges = compute_wedges(&categories(&values));
            let layout = layout();
            let point = polar(layout.center, layout.radius + layout.hit_slack + extra, angle);
            prop_assert_eq!(hit_test(point, &layout, &wedges), None);
        }
    }
}
