use crate::Point;
use crate::Vector;
use crate::geom::point::check::are_points_collinear;
use crate::geom::triangles::{TriangleIndex, is_point_inside_triangle, triangulate};
use anyhow::{Result, anyhow};
use std::fmt;

/// On-plane tolerance for containment tests of ray-computed points.
const PLANE_EPS: f64 = 1e-9;

/// A planar polygon with a precomputed triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    name: String,
    pts: Vec<Point>,
    tri: Vec<TriangleIndex>,
    /// Unit normal of the polygon's plane.
    pub vn: Vector,
}

impl Polygon {
    /// Creates a polygon from at least 3 non-collinear points.
    ///
    /// If `normal` is not given, it is computed from the first
    /// non-collinear triple of vertices.
    pub fn new(name: &str, pts: Vec<Point>, normal: Option<Vector>) -> Result<Self> {
        if pts.len() < 3 {
            return Err(anyhow!(
                "Polygon {} needs at least 3 points, got {}",
                name,
                pts.len()
            ));
        }
        if are_points_collinear(&pts) {
            return Err(anyhow!("Polygon {} points are collinear", name));
        }
        let vn = match normal {
            Some(v) => v.normalize()?,
            None => Self::find_normal(&pts)?,
        };
        let (pts, tri) = triangulate(pts, vn, 0)?;
        Ok(Self {
            name: name.to_string(),
            pts,
            tri,
            vn,
        })
    }

    fn find_normal(pts: &[Point]) -> Result<Vector> {
        for i in 1..pts.len() - 1 {
            if let Ok(vn) = Vector::normal(pts[0], pts[i], pts[i + 1]) {
                return Ok(vn);
            }
        }
        Err(anyhow!("Cannot compute a normal from collinear points"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    /// Returns the coefficients (a, b, c, d) of the plane equation
    /// `a*x + b*y + c*z + d = 0`, where (a, b, c) is the unit normal.
    pub fn plane_coefficients(&self) -> (f64, f64, f64, f64) {
        let p0 = self.pts[0];
        let d = -(self.vn.dx * p0.x + self.vn.dy * p0.y + self.vn.dz * p0.z);
        (self.vn.dx, self.vn.dy, self.vn.dz, d)
    }

    /// Signed distance from `p` to the polygon's plane.
    pub fn distance_to_plane(&self, p: Point) -> f64 {
        let (a, b, c, d) = self.plane_coefficients();
        a * p.x + b * p.y + c * p.z + d
    }

    /// Projects `p` onto the polygon's plane.
    pub fn project(&self, p: Point) -> Point {
        p + self.vn * (-self.distance_to_plane(p))
    }

    /// Checks if a point lies inside the polygon.
    ///
    /// The point must lie on the polygon's plane. If `boundary_in` is
    /// true, points on edges or vertices count as inside.
    ///
    /// The on-plane tolerance is looser than the core epsilon because
    /// tested points often come from ray intersections computed
    /// hundreds of model units from the origin.
    pub fn is_point_inside(&self, ptest: Point, boundary_in: bool) -> bool {
        if self.distance_to_plane(ptest).abs() > PLANE_EPS {
            return false;
        }
        if self.is_point_on_boundary(ptest) {
            return boundary_in;
        }
        self.tri.iter().any(|t| {
            is_point_inside_triangle(ptest, self.pts[t.0], self.pts[t.1], self.pts[t.2])
        })
    }

    /// Checks if the projection of `p` onto the polygon's plane falls
    /// within the polygon (boundary included).
    pub fn contains_projection(&self, p: Point) -> bool {
        self.is_point_inside(self.project(p), true)
    }

    /// Surface area (sum of triangle areas).
    pub fn area(&self) -> f64 {
        self.tri
            .iter()
            .map(|t| {
                let v1 = self.pts[t.1] - self.pts[t.0];
                let v2 = self.pts[t.2] - self.pts[t.0];
                v1.cross(&v2).length() / 2.0
            })
            .sum()
    }

    fn is_point_on_boundary(&self, ptest: Point) -> bool {
        let n = self.pts.len();
        for pt in &self.pts {
            if ptest.is_close(pt) {
                return true;
            }
        }
        for i in 0..n {
            let p1 = self.pts[i];
            let p2 = self.pts[(i + 1) % n];
            if ptest.is_on_segment(p1, p2) {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({}, {} vertices)", self.name, self.pts.len())
    }
}
