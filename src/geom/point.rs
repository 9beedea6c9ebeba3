use crate::Vector;
use crate::geom::EPS;
use std::fmt;
use std::ops::{Add, Sub};

pub mod check;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0., 0., 0.)
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }

    /// Returns a copy moved along `direction` by `distance`.
    ///
    /// The direction is normalized first; a zero-length direction
    /// returns the point unchanged.
    pub fn move_along(&self, direction: &Vector, distance: f64) -> Self {
        match direction.normalize() {
            Ok(d) => *self + d * distance,
            Err(_) => *self,
        }
    }

    /// Checks if this point lies on the segment between `p1` and `p2`.
    pub fn is_on_segment(&self, p1: Point, p2: Point) -> bool {
        if !check::are_points_collinear(&[p1, p2, *self]) {
            return false;
        }
        self.x <= p1.x.max(p2.x) + EPS
            && self.x >= p1.x.min(p2.x) - EPS
            && self.y <= p1.y.max(p2.y) + EPS
            && self.y >= p1.y.min(p2.y) - EPS
            && self.z <= p1.z.max(p2.z) + EPS
            && self.z >= p1.z.min(p2.z) - EPS
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
            z: self.z + other.dz,
        }
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}
