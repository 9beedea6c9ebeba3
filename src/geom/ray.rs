//! Ray casting infrastructure.
//!
//! Provides a Ray struct and ray/polygon intersection tests used by the
//! obstruction scene and the exposure checks.

use crate::{Point, Polygon, Vector};
use anyhow::Result;

/// A ray defined by an origin point and a direction vector.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector (normalized on construction)
    pub direction: Vector,
}

impl Ray {
    /// Creates a new ray from origin point and direction vector.
    ///
    /// The direction vector is normalized; zero-length directions are
    /// rejected.
    pub fn new(origin: Point, direction: Vector) -> Result<Self> {
        let direction = direction.normalize()?;
        Ok(Self { origin, direction })
    }

    /// Creates a ray from two points (origin to target).
    pub fn from_points(origin: Point, target: Point) -> Result<Self> {
        Self::new(origin, target - origin)
    }

    /// Returns the point along the ray at parameter t.
    ///
    /// point = origin + t * direction
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Calculates the intersection of this ray with a polygon.
    ///
    /// Returns `Some((t, point))` where `t` is the ray parameter (equal
    /// to the distance from the origin, since the direction is
    /// normalized) and `point` is the intersection point. Only
    /// intersections in front of the origin (t > 0) are returned.
    pub fn intersect_polygon(&self, polygon: &Polygon) -> Option<(f64, Point)> {
        let (a, b, c, d) = polygon.plane_coefficients();
        let plane_normal = Vector::new(a, b, c);

        // Ray parallel to plane?
        let denom = plane_normal.dot(&self.direction);
        if denom.abs() < 1e-10 {
            return None;
        }

        // Plane: a*x + b*y + c*z + d = 0; ray: P = origin + t * direction
        let origin_dot = a * self.origin.x + b * self.origin.y + c * self.origin.z + d;
        let t = -origin_dot / denom;

        // Small epsilon to avoid self-intersection at the origin
        if t < 1e-10 {
            return None;
        }

        let intersection_point = self.point_at(t);

        if polygon.is_point_inside(intersection_point, true) {
            Some((t, intersection_point))
        } else {
            None
        }
    }

    /// Calculates all intersections of this ray with a set of polygons,
    /// sorted by distance ascending.
    ///
    /// Returns `(t, point, index)` triples where `index` refers to the
    /// polygon's position in `polygons`.
    pub fn intersect_polygons(&self, polygons: &[&Polygon]) -> Vec<(f64, Point, usize)> {
        let mut hits: Vec<(f64, Point, usize)> = polygons
            .iter()
            .enumerate()
            .filter_map(|(idx, polygon)| {
                self.intersect_polygon(polygon)
                    .map(|(t, point)| (t, point, idx))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits
    }

    /// Returns the closest intersection (smallest positive t), if any.
    pub fn closest_intersection(&self, polygons: &[&Polygon]) -> Option<(f64, Point, usize)> {
        self.intersect_polygons(polygons).into_iter().next()
    }
}
