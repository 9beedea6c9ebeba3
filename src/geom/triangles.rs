use crate::Point;
use crate::geom::EPS;
use crate::geom::bboxes::is_point_inside_bbox;
use crate::geom::point::check::{are_points_collinear, is_point_on_same_side};
use crate::geom::vector::Vector;
use anyhow::{Result, anyhow};

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

/// A triangle given by its three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub Point, pub Point, pub Point);

impl Triangle {
    /// Returns the triangle's vertices as a slice-friendly array.
    pub fn vertices(&self) -> [Point; 3] {
        [self.0, self.1, self.2]
    }

    /// Returns true if both triangles have the same vertex set,
    /// regardless of vertex order.
    pub fn same_vertices(&self, other: &Triangle) -> bool {
        self.vertices()
            .iter()
            .all(|v| other.vertices().iter().any(|w| v.is_close(w)))
            && other
                .vertices()
                .iter()
                .all(|w| self.vertices().iter().any(|v| w.is_close(v)))
    }
}

/// Triangulates the polygon defined by points `pts` and normal `vn`
/// using ear clipping.
pub fn triangulate(
    mut pts: Vec<Point>,
    vn: Vector,
    num_try: usize,
) -> Result<(Vec<Point>, Vec<TriangleIndex>)> {
    if num_try >= 2 {
        return Err(anyhow!("Ear-clipping algorithm failed."));
    }
    if vn.length() < EPS {
        return Err(anyhow!("Normal vector cannot have zero length"));
    }

    let mut vertices: Vec<usize> = (0..pts.len()).collect();
    let mut triangles: Vec<TriangleIndex> = Vec::new();
    let mut pos: usize = 0;
    let mut num_fail: usize = 0;

    while vertices.len() > 2 {
        if num_fail > pts.len() {
            // Try with flipped points
            pts = pts.iter().rev().cloned().collect();
            return triangulate(pts, vn, num_try + 1);
        }

        // If last vertex, start from the beginning
        if pos > vertices.len() - 1 {
            pos = 0;
        }

        let prev_pos = if pos > 0 { pos - 1 } else { vertices.len() - 1 };
        let next_pos = if pos < vertices.len() - 1 { pos + 1 } else { 0 };

        let prev_id = vertices[prev_pos];
        let curr_id = vertices[pos];
        let next_id = vertices[next_pos];

        let convex_corner = is_corner_convex(&pts[prev_id], &pts[curr_id], &pts[next_id], &vn);

        if convex_corner {
            // Check if no other point is within this triangle
            // Needed for non-convex polygons
            let any_point_inside = vertices.iter().any(|&test_id| {
                test_id != prev_id
                    && test_id != curr_id
                    && test_id != next_id
                    && is_point_inside_triangle(
                        pts[test_id],
                        pts[prev_id],
                        pts[curr_id],
                        pts[next_id],
                    )
            });
            if !any_point_inside {
                triangles.push(TriangleIndex(prev_id, curr_id, next_id));
                vertices.remove(pos);
                continue;
            } else {
                // There is some point inside this triangle
                // so it is not an ear
                num_fail += 1;
            }
        } else {
            // Non-convex corner
            num_fail += 1;
        }
        pos += 1;
    }

    Ok((pts, triangles))
}

/// Checks if the angle at corner p2 (p1->p2->p3) is less than 180 degrees.
///
/// Done by comparing the polygon normal with the cross product of the
/// corner edges. Points are expected counter-clockwise with respect to
/// the surface front side.
pub fn is_corner_convex(p1: &Point, p2: &Point, p3: &Point, vn: &Vector) -> bool {
    let v1 = *p2 - *p1;
    let v2 = *p3 - *p2;
    let corner_n = match v1.cross(&v2).normalize() {
        Ok(n) => n,
        Err(_) => return false, // Collinear points p1, p2, p3
    };
    // If the corner normal matches vn, the corner must be convex
    corner_n.is_close(vn)
}

/// Tests if point `ptest` is inside the triangle `(p1, p2, p3)`.
///
/// Uses the "same side" technique. Does not test if the point is
/// coplanar with the triangle.
pub fn is_point_inside_triangle(ptest: Point, p1: Point, p2: Point, p3: Point) -> bool {
    if !is_point_inside_bbox(ptest, &[p1, p2, p3]) {
        return false;
    }
    // At any of the three vertices
    if ptest.is_close(&p1) || ptest.is_close(&p2) || ptest.is_close(&p3) {
        return true;
    }
    // On any of the edges
    for (pa, pb) in [(p1, p2), (p2, p3), (p3, p1)] {
        if are_points_collinear(&[pa, pb, ptest]) {
            return ptest.is_on_segment(pa, pb);
        }
    }

    let side1 = is_point_on_same_side(p1, p2, ptest, p3).unwrap_or(false);
    let side2 = is_point_on_same_side(p2, p3, ptest, p1).unwrap_or(false);
    let side3 = is_point_on_same_side(p3, p1, ptest, p2).unwrap_or(false);

    side1 && side2 && side3
}
