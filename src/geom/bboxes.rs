use crate::geom::EPS;
use crate::geom::point::Point;

/// Returns the min and max corners of the bounding box holding all `pts`.
pub fn bounding_box(pts: &[Point]) -> (Point, Point) {
    let mut pmin = pts[0];
    let mut pmax = pts[0];
    for p in pts.iter().skip(1) {
        pmin.x = pmin.x.min(p.x);
        pmin.y = pmin.y.min(p.y);
        pmin.z = pmin.z.min(p.z);
        pmax.x = pmax.x.max(p.x);
        pmax.y = pmax.y.max(p.y);
        pmax.z = pmax.z.max(p.z);
    }
    (pmin, pmax)
}

/// Checks whether a point is inside the bounding box holding all points `pts`.
pub fn is_point_inside_bbox(ptest: Point, pts: &[Point]) -> bool {
    let (pmin, pmax) = bounding_box(pts);
    is_point_inside_bounds(ptest, pmin, pmax)
}

/// Checks whether a point lies within the box spanned by `pmin` and `pmax`.
///
/// The boundary counts as inside.
pub fn is_point_inside_bounds(ptest: Point, pmin: Point, pmax: Point) -> bool {
    ptest.x >= pmin.x - EPS
        && ptest.x <= pmax.x + EPS
        && ptest.y >= pmin.y - EPS
        && ptest.y <= pmax.y + EPS
        && ptest.z >= pmin.z - EPS
        && ptest.z <= pmax.z + EPS
}
