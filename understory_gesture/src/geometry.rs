// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger geometry: distance, angle and midpoint between touch points.
//!
//! These are the only measurements the pinch/rotate recognizer needs. They are
//! pure and total over finite inputs.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::geometry::{pairwise_angle, pairwise_center, pairwise_distance};
//!
//! let a = Point::new(0.0, 0.0);
//! let b = Point::new(3.0, 4.0);
//! assert_eq!(pairwise_distance(a, b), 5.0);
//! assert_eq!(pairwise_center(a, b), Point::new(1.5, 2.0));
//! assert!(pairwise_angle(a, b) > 0.0 && pairwise_angle(a, b) < 90.0);
//! ```

use kurbo::Point;

/// Euclidean distance between two touch points.
#[must_use]
pub fn pairwise_distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Angle in degrees of the vector from `a` to `b`, normalized into `[0, 360)`.
///
/// The angle is measured with `atan2(dy, dx)`, so in a y-down coordinate
/// system it grows clockwise.
#[must_use]
pub fn pairwise_angle(a: Point, b: Point) -> f64 {
    let deg = (b - a).atan2().to_degrees();
    if deg >= 0.0 {
        return deg;
    }
    // A tiny negative angle would otherwise round up to exactly 360.
    let wrapped = deg + 360.0;
    if wrapped < 360.0 { wrapped } else { 0.0 }
}

/// Midpoint of two touch points.
#[must_use]
pub fn pairwise_center(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Distance, angle and midpoint of the first two contacts of a touch set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoFingerGeometry {
    /// Distance between the two contacts, in view units.
    pub distance: f64,
    /// Angle of the vector from the first to the second contact, in degrees.
    pub angle: f64,
    /// Midpoint of the two contacts.
    pub center: Point,
}

impl TwoFingerGeometry {
    /// Measures the first two points of `touches`.
    ///
    /// Returns `None` when fewer than two points are supplied. Extra contacts
    /// beyond the second are ignored.
    #[must_use]
    pub fn from_touches(touches: &[Point]) -> Option<Self> {
        match touches {
            [a, b, ..] => Some(Self {
                distance: pairwise_distance(*a, *b),
                angle: pairwise_angle(*a, *b),
                center: pairwise_center(*a, *b),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(-2.0, 7.5);
        let b = Point::new(10.0, -1.5);
        assert!(close(pairwise_distance(a, b), pairwise_distance(b, a)));
        assert!(close(pairwise_distance(a, b), 15.0));
    }

    #[test]
    fn distance_of_coincident_points_is_zero() {
        let p = Point::new(4.0, 4.0);
        assert_eq!(pairwise_distance(p, p), 0.0);
    }

    #[test]
    fn angle_quadrants() {
        let o = Point::ORIGIN;
        assert!(close(pairwise_angle(o, Point::new(1.0, 0.0)), 0.0));
        assert!(close(pairwise_angle(o, Point::new(0.0, 1.0)), 90.0));
        assert!(close(pairwise_angle(o, Point::new(-1.0, 0.0)), 180.0));
        assert!(close(pairwise_angle(o, Point::new(0.0, -1.0)), 270.0));
        assert!(close(pairwise_angle(o, Point::new(1.0, -1.0)), 315.0));
    }

    #[test]
    fn angle_is_never_negative() {
        for i in 0..72 {
            let theta = f64::from(i) * 5.0_f64.to_radians();
            let b = Point::ORIGIN + Vec2::from_angle(theta);
            let deg = pairwise_angle(Point::ORIGIN, b);
            assert!((0.0..360.0).contains(&deg), "angle {deg} out of range");
        }
    }

    #[test]
    fn center_is_midpoint() {
        let c = pairwise_center(Point::new(0.0, 10.0), Point::new(20.0, 30.0));
        assert_eq!(c, Point::new(10.0, 20.0));
    }

    #[test]
    fn geometry_needs_two_points() {
        assert!(TwoFingerGeometry::from_touches(&[]).is_none());
        assert!(TwoFingerGeometry::from_touches(&[Point::ORIGIN]).is_none());

        let g = TwoFingerGeometry::from_touches(&[
            Point::new(0.0, 0.0),
            Point::new(0.0, 8.0),
            Point::new(100.0, 100.0),
        ])
        .unwrap();
        assert!(close(g.distance, 8.0));
        assert!(close(g.angle, 90.0));
        assert_eq!(g.center, Point::new(0.0, 4.0));
    }
}
