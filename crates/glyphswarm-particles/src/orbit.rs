//! Cyclic target generator for orbiting particles.

use std::f32::consts::TAU;

use glyphswarm_core::Point;

/// Number of evenly spaced sample angles on an orbit.
pub const ORBIT_SAMPLES: usize = 16;

/// Successive points on a circle around a fixed center.
///
/// Each [`advance`](OrbitPath::advance) yields the point for the current
/// sample and moves to the next one, wrapping after [`ORBIT_SAMPLES`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    center: Point,
    radius: f32,
    index: usize,
    travel_factor: f32,
}

impl OrbitPath {
    pub fn new(center: Point, radius: f32, travel_factor: f32) -> Self {
        Self {
            center,
            radius,
            index: 0,
            travel_factor,
        }
    }

    /// Return the current sample point and step to the next sample.
    pub fn advance(&mut self) -> Point {
        let angle = TAU * self.index as f32 / ORBIT_SAMPLES as f32;
        self.index = (self.index + 1) % ORBIT_SAMPLES;
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Index of the sample the next `advance` returns.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Divisor applied to the remaining distance on each step.
    pub fn travel_factor(&self) -> f32 {
        self.travel_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_point_is_east_of_center() {
        let mut orbit = OrbitPath::new(Point::new(10.0, 20.0), 2.0, 5.0);
        assert_eq!(orbit.advance(), Point::new(12.0, 20.0));
        assert_eq!(orbit.index(), 1);
    }

    #[test]
    fn test_cycle_repeats_after_full_turn() {
        let mut orbit = OrbitPath::new(Point::new(3.0, -4.0), 5.0, 4.0);
        let first: Vec<Point> = (0..ORBIT_SAMPLES).map(|_| orbit.advance()).collect();
        assert_eq!(orbit.index(), 0);
        let second: Vec<Point> = (0..ORBIT_SAMPLES).map(|_| orbit.advance()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_points_lie_on_circle() {
        let center = Point::new(1.0, 1.0);
        let mut orbit = OrbitPath::new(center, 3.0, 4.0);
        for _ in 0..ORBIT_SAMPLES {
            let p = orbit.advance();
            assert!((p.distance(center) - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_quarter_turn() {
        let mut orbit = OrbitPath::new(Point::ORIGIN, 1.0, 4.0);
        for _ in 0..ORBIT_SAMPLES / 4 {
            orbit.advance();
        }
        let p = orbit.advance();
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }
}
