//! Slice geometry for host renderers.
//!
//! Coordinates live in a 100x100 viewbox centred on (50, 50). Angles are in
//! degrees, measured the same way the rotation planner measures them.
use serde::{Deserialize, Serialize};

use crate::constants::{LABEL_RADIUS, PALETTE, VIEWBOX_CENTER, WHEEL_RADIUS};
use crate::numbers::usize_to_f64;
use crate::rotation::slice_angle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn on_circle(radius: f64, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            x: radius.mul_add(radians.cos(), VIEWBOX_CENTER),
            y: radius.mul_add(radians.sin(), VIEWBOX_CENTER),
        }
    }
}

/// Drawing data for one slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceGeometry {
    pub index: usize,
    pub start_degrees: f64,
    pub end_degrees: f64,
    pub mid_degrees: f64,
    pub arc_start: Point,
    pub arc_end: Point,
    pub large_arc: bool,
    pub label_anchor: Point,
    /// Labels are flipped to read outward from the hub.
    pub label_rotation: f64,
    pub color: &'static str,
}

impl SliceGeometry {
    /// Geometry of slice `index` on a wheel of `slices`.
    #[must_use]
    pub fn new(index: usize, slices: usize) -> Self {
        let slice = slice_angle(slices.max(1));
        let start = usize_to_f64(index) * slice;
        let end = usize_to_f64(index + 1) * slice;
        let mid = start + slice / 2.0;
        Self {
            index,
            start_degrees: start,
            end_degrees: end,
            mid_degrees: mid,
            arc_start: Point::on_circle(WHEEL_RADIUS, start),
            arc_end: Point::on_circle(WHEEL_RADIUS, end),
            large_arc: slice > 180.0,
            label_anchor: Point::on_circle(LABEL_RADIUS, mid),
            label_rotation: mid + 180.0,
            color: slice_color(index),
        }
    }

    /// SVG path data for the wedge.
    #[must_use]
    pub fn svg_path(&self) -> String {
        format!(
            "M {c} {c} L {} {} A {r} {r} 0 {} 1 {} {} Z",
            self.arc_start.x,
            self.arc_start.y,
            u8::from(self.large_arc),
            self.arc_end.x,
            self.arc_end.y,
            c = VIEWBOX_CENTER,
            r = WHEEL_RADIUS,
        )
    }
}

#[must_use]
pub fn slice_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[must_use]
pub fn wheel_geometry(slices: usize) -> Vec<SliceGeometry> {
    (0..slices)
        .map(|index| SliceGeometry::new(index, slices))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn quarter_slices_meet_at_axis_points() {
        let slices = wheel_geometry(4);
        assert_eq!(slices.len(), 4);
        let first = &slices[0];
        assert!((first.arc_start.x - 100.0).abs() < TOLERANCE);
        assert!((first.arc_start.y - 50.0).abs() < TOLERANCE);
        assert!((first.arc_end.x - 50.0).abs() < TOLERANCE);
        assert!((first.arc_end.y - 100.0).abs() < TOLERANCE);
        assert!((first.mid_degrees - 45.0).abs() < TOLERANCE);
        assert!(!first.large_arc);
        for pair in slices.windows(2) {
            assert!((pair[0].arc_end.x - pair[1].arc_start.x).abs() < TOLERANCE);
            assert!((pair[0].arc_end.y - pair[1].arc_start.y).abs() < TOLERANCE);
        }
    }

    #[test]
    fn label_anchor_sits_inside_rim() {
        let geometry = SliceGeometry::new(1, 2);
        assert!((geometry.mid_degrees - 270.0).abs() < TOLERANCE);
        assert!((geometry.label_anchor.x - 50.0).abs() < TOLERANCE);
        assert!((geometry.label_anchor.y - 18.0).abs() < TOLERANCE);
        assert!((geometry.label_rotation - 450.0).abs() < TOLERANCE);
    }

    #[test]
    fn colors_cycle_through_palette() {
        assert_eq!(slice_color(0), "#06AEEF");
        assert_eq!(slice_color(7), "#06B6D4");
        assert_eq!(slice_color(8), slice_color(0));
    }

    #[test]
    fn svg_path_draws_wedge_from_center() {
        let path = SliceGeometry::new(0, 2).svg_path();
        assert!(path.starts_with("M 50 50 L 100 50 A 50 50 0 0 1 "));
        assert!(path.ends_with(" Z"));
    }
}
