use super::*;
use crate::Vector;

/// Checks if (multiple) points are collinear
pub fn are_points_collinear(pts: &[Point]) -> bool {
    if pts.len() <= 2 {
        return true; // 1 or 2 points are always collinear
    }
    // Direction of the first pair of distinct points; all other
    // directions from pts[0] must be parallel to it.
    let mut dir: Option<Vector> = None;
    for p in pts.iter().skip(1) {
        let v = *p - pts[0];
        let v = match v.normalize() {
            Ok(v) => v,
            Err(_) => continue, // Coincident with pts[0]
        };
        match dir {
            None => dir = Some(v),
            Some(d) => {
                if d.cross(&v).length() > EPS {
                    return false;
                }
            }
        }
    }
    true
}

/// Checks if `ptest` lies on the same side of the line `p1`-`p2` as `pref`.
///
/// Returns `None` if `pref` (or `ptest`) lies on the line itself,
/// or if `p1` and `p2` coincide.
pub fn is_point_on_same_side(p1: Point, p2: Point, ptest: Point, pref: Point) -> Option<bool> {
    let edge = p2 - p1;
    let cp_test = edge.cross(&(ptest - p1));
    let cp_ref = edge.cross(&(pref - p1));
    if cp_ref.length() < EPS || cp_test.length() < EPS {
        return None;
    }
    Some(cp_test.dot(&cp_ref) > 0.)
}
