//! Triangulation of the sunlit wedge between shadow boundaries.

use log::warn;

use crate::geom::triangles::Triangle;
use crate::Point;

use super::boundary::BoundaryRecord;

/// Tolerance for rejecting degenerate candidate triangles.
///
/// Looser than the core geometric epsilon; boundary points come from
/// ray intersections hundreds of model units from the apex.
pub const DEGENERATE_EPS: f64 = 1e-6;

/// How boundary points are ordered before fanning triangles.
///
/// The two modes are never mixed within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryOrdering {
    /// Chronological sweep order (sample index). Used for the standard
    /// wedge between the first and last blocked directions.
    #[default]
    SweepOrder,
    /// Angular order around the apex in the ground plane. Used for the
    /// fan over directly visible boundary points.
    Angular,
}

/// Accumulated triangles plus the count of candidates rejected as
/// degenerate. Degeneracy is recoverable: the triangle is dropped and
/// counted, never escalated to a failure.
#[derive(Debug, Default)]
pub struct WedgeTriangles {
    pub triangles: Vec<Triangle>,
    pub degenerate_skipped: usize,
}

impl WedgeTriangles {
    /// Validates and appends a candidate triangle.
    ///
    /// Rejected candidates (coincident or collinear vertices) bump the
    /// skip counter and log a warning.
    pub fn push_candidate(&mut self, p0: Point, p1: Point, p2: Point) {
        match accept_triangle(p0, p1, p2) {
            Some(tri) => self.triangles.push(tri),
            None => {
                self.degenerate_skipped += 1;
                warn!(
                    "Skipping degenerate triangle: ({:?}, {:?}, {:?})",
                    p0, p1, p2
                );
            }
        }
    }
}

/// Returns the triangle in canonical vertex order, or `None` when the
/// vertices are coincident or collinear within [`DEGENERATE_EPS`].
fn accept_triangle(p0: Point, p1: Point, p2: Point) -> Option<Triangle> {
    if p0.distance_to(&p1) < DEGENERATE_EPS
        || p1.distance_to(&p2) < DEGENERATE_EPS
        || p0.distance_to(&p2) < DEGENERATE_EPS
    {
        return None;
    }
    let cross = (p1 - p0).cross(&(p2 - p0));
    if cross.length() < DEGENERATE_EPS {
        return None;
    }
    // Canonical order: vertices sorted by distance from the model
    // origin, so equal triangles compare equal regardless of the order
    // their vertices were produced in.
    let origin = Point::origin();
    let mut vs = [p0, p1, p2];
    vs.sort_by(|a, b| a.distance_to(&origin).total_cmp(&b.distance_to(&origin)));
    Some(Triangle(vs[0], vs[1], vs[2]))
}

/// Closes the sunlit wedge at `apex` into triangles.
///
/// Interior triangles connect consecutive records: the last point of
/// each record to the first point of the next. When an extreme
/// direction of the sweep is unblocked, a closing triangle to the
/// corresponding far reference point is added on that side.
///
/// Triangle counts for `n` records: n-1 when both extremes are
/// blocked, n when exactly one is, n+1 when neither is.
pub fn triangulate_wedge(
    apex: Point,
    records: &[BoundaryRecord],
    first_blocked: bool,
    last_blocked: bool,
    far_first: Point,
    far_last: Point,
) -> WedgeTriangles {
    let mut out = WedgeTriangles::default();
    let Some(first) = records.first() else {
        return out;
    };
    // records is non-empty here, so last() exists too
    let last = &records[records.len() - 1];

    if !first_blocked {
        out.push_candidate(apex, far_first, first.first_point);
    }
    for pair in records.windows(2) {
        out.push_candidate(apex, pair[0].last_point, pair[1].first_point);
    }
    if !last_blocked {
        out.push_candidate(apex, last.last_point, far_last);
    }
    out
}

/// Sorts points by their angle around `apex` in the ground plane.
///
/// Uses `total_cmp`, so the order is total even for points directly
/// above the apex (angle 0).
pub fn sort_by_sun_angle(apex: Point, points: &mut [Point]) {
    points.sort_by(|a, b| {
        let angle_a = (a.y - apex.y).atan2(a.x - apex.x);
        let angle_b = (b.y - apex.y).atan2(b.x - apex.x);
        angle_a.total_cmp(&angle_b)
    });
}

/// Fans triangles from `apex` over angularly-sorted boundary points,
/// consuming the points in non-overlapping pairs.
///
/// An odd trailing point is left unpaired and produces no triangle.
pub fn triangulate_visible_fan(apex: Point, points: &[Point]) -> WedgeTriangles {
    let mut sorted = points.to_vec();
    sort_by_sun_angle(apex, &mut sorted);

    let mut out = WedgeTriangles::default();
    for pair in sorted.chunks_exact(2) {
        out.push_candidate(apex, pair[0], pair[1]);
    }
    out
}
