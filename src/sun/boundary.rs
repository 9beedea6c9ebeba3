//! Boundary extraction: from raw ray hits to per-obstruction extreme pairs.

use std::collections::HashMap;

use anyhow::Result;

use crate::scene::ObstructionId;
use crate::{ObstructionQuery, Point, Vector};

use super::samples::SunSample;

/// The entry/exit extreme pair of ray-hit points attributed to one
/// obstructing object across the full sweep of sun samples.
///
/// At most one record exists per obstructing object per analysis run;
/// records are never mutated after extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRecord {
    pub obstruction: ObstructionId,
    /// Hit point of the earliest sample that reached this object.
    pub first_point: Point,
    /// Hit point of the latest sample that reached this object.
    pub last_point: Point,
    /// Sweep index of `first_point` (used for sun-hour labels).
    pub first_sample: usize,
    /// Sweep index of `last_point`.
    pub last_sample: usize,
}

/// Output of sweeping all sun samples over the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySweep {
    /// Records sorted by sweep order (first sample ascending, identity
    /// as the final tie-break, so the order is total).
    pub records: Vec<BoundaryRecord>,
    /// Stopping hit of the first sampled ray, or its synthetic far
    /// point when the ray left the scene unobstructed.
    pub first_ray_point: Option<Point>,
    /// Stopping hit (or synthetic far point) of the last sampled ray.
    pub last_ray_point: Option<Point>,
}

/// Running (min, max) extremes for one obstruction.
///
/// Keyed by (sweep index, hit distance) so memory stays bounded by the
/// number of distinct obstructions, not by samples x hits.
struct ExtremeTracker {
    first: (usize, f64, Point),
    last: (usize, f64, Point),
}

impl ExtremeTracker {
    fn new(sample: usize, distance: f64, point: Point) -> Self {
        Self {
            first: (sample, distance, point),
            last: (sample, distance, point),
        }
    }

    fn update(&mut self, sample: usize, distance: f64, point: Point) {
        if sample < self.first.0 || (sample == self.first.0 && distance < self.first.1) {
            self.first = (sample, distance, point);
        }
        if sample > self.last.0 || (sample == self.last.0 && distance > self.last.1) {
            self.last = (sample, distance, point);
        }
    }

    fn into_record(self, obstruction: ObstructionId) -> BoundaryRecord {
        BoundaryRecord {
            obstruction,
            first_point: self.first.2,
            last_point: self.last.2,
            first_sample: self.first.0,
            last_sample: self.last.0,
        }
    }
}

/// Sweeps all sun samples and reduces the hits to boundary records.
///
/// Per ray, hits are scanned outward from the analysis point:
/// - hits behind the facing plane are skipped (only when a facing
///   normal is supplied),
/// - hits inside a transparent opening are recorded under the opening's
///   identity but do not stop the ray,
/// - hits that do not project onto real solid geometry are rejected,
/// - the first validated opaque hit stops the ray.
///
/// The caller decides whether fewer than 2 records is a failure.
pub fn extract_boundaries<Q: ObstructionQuery + ?Sized>(
    query: &Q,
    origin: Point,
    samples: &[SunSample],
    facing_normal: Option<Vector>,
    far_distance: f64,
) -> Result<BoundarySweep> {
    let mut groups: HashMap<ObstructionId, ExtremeTracker> = HashMap::new();
    let mut first_ray_point = None;
    let mut last_ray_point = None;
    let last_index = samples.len().saturating_sub(1);

    for sample in samples {
        let i = sample.index;
        let mut hits = query.cast(origin, sample.direction)?;
        // The query should return hits ordered by distance, but the
        // contract does not guarantee it.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        if hits.is_empty() {
            // Synthetic far hit, kept only for the sweep's extreme rays
            let far = origin.move_along(&sample.direction, far_distance);
            if i == 0 {
                first_ray_point = Some(far);
            }
            if i == last_index {
                last_ray_point = Some(far);
            }
            continue;
        }

        for hit in &hits {
            if let Some(n) = facing_normal {
                if (hit.point - origin).dot(&n) <= 0.0 {
                    continue; // Behind the target's facing plane
                }
            }
            // A window does not stop the ray; its hit point is still
            // recorded under the opening's own identity.
            if let Some(opening) = query.opening_at(hit.point) {
                groups
                    .entry(opening)
                    .and_modify(|t| t.update(i, hit.distance, hit.point))
                    .or_insert_with(|| ExtremeTracker::new(i, hit.distance, hit.point));
                continue;
            }
            if !query.is_valid_solid_hit(&hit.obstruction, hit.point) {
                continue; // Spurious or coplanar false hit
            }
            groups
                .entry(hit.obstruction.clone())
                .and_modify(|t| t.update(i, hit.distance, hit.point))
                .or_insert_with(|| ExtremeTracker::new(i, hit.distance, hit.point));
            if i == 0 {
                first_ray_point = Some(hit.point);
            }
            if i == last_index {
                last_ray_point = Some(hit.point);
            }
            // The ray stops at the first opaque obstacle
            break;
        }
    }

    let mut records: Vec<BoundaryRecord> = groups
        .into_iter()
        .map(|(id, tracker)| tracker.into_record(id))
        .collect();
    records.sort_by(|a, b| {
        (a.first_sample, a.last_sample, &a.obstruction)
            .cmp(&(b.first_sample, b.last_sample, &b.obstruction))
    });

    Ok(BoundarySweep {
        records,
        first_ray_point,
        last_ray_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObstructionHit;
    use crate::sun::samples::{SunFrame, sample_sun_vectors};

    /// Query scripted with per-direction hit lists. Directions are
    /// matched by dot product so it works regardless of call order.
    struct ScriptedQuery {
        scripts: Vec<(Vector, Vec<ObstructionHit>)>,
        openings: Vec<(ObstructionId, Point, Point)>,
        invalid: Vec<ObstructionId>,
    }

    impl ScriptedQuery {
        fn new() -> Self {
            Self {
                scripts: vec![],
                openings: vec![],
                invalid: vec![],
            }
        }

        fn on(&mut self, direction: Vector, hits: Vec<(f64, &str)>) {
            let direction = direction.normalize().unwrap();
            let hits = hits
                .into_iter()
                .map(|(distance, id)| ObstructionHit {
                    distance,
                    obstruction: ObstructionId::from(id),
                    // Hit points on the ray from the conventional origin
                    point: Point::new(0., 0., 1.) + direction * distance,
                })
                .collect();
            self.scripts.push((direction, hits));
        }
    }

    impl ObstructionQuery for ScriptedQuery {
        fn cast(&self, _origin: Point, direction: Vector) -> Result<Vec<ObstructionHit>> {
            let direction = direction.normalize()?;
            for (dir, hits) in &self.scripts {
                if dir.dot(&direction) > 0.9999 {
                    return Ok(hits.clone());
                }
            }
            Ok(vec![])
        }

        fn opening_at(&self, point: Point) -> Option<ObstructionId> {
            use crate::geom::bboxes::is_point_inside_bounds;
            self.openings
                .iter()
                .find(|(_, min, max)| is_point_inside_bounds(point, *min, *max))
                .map(|(id, _, _)| id.clone())
        }

        fn is_valid_solid_hit(&self, id: &ObstructionId, _point: Point) -> bool {
            !self.invalid.contains(id)
        }
    }

    const ORIGIN: Point = Point {
        x: 0.,
        y: 0.,
        z: 1.,
    };

    fn three_frames() -> Vec<SunFrame> {
        // Due-east, between, due-north directions on the horizon
        vec![
            SunFrame::new(0.0, std::f64::consts::FRAC_PI_2),
            SunFrame::new(0.0, std::f64::consts::FRAC_PI_4),
            SunFrame::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_grouping_and_extreme_pairs() -> Result<()> {
        let samples = sample_sun_vectors(&three_frames());
        let mut query = ScriptedQuery::new();
        // Samples 0 and 1 hit wall-a, sample 2 hits wall-b
        query.on(samples[0].direction, vec![(5.0, "wall-a")]);
        query.on(samples[1].direction, vec![(6.0, "wall-a")]);
        query.on(samples[2].direction, vec![(4.0, "wall-b")]);

        let sweep = extract_boundaries(&query, ORIGIN, &samples, None, 500.0)?;
        assert_eq!(sweep.records.len(), 2);

        let a = &sweep.records[0];
        assert_eq!(a.obstruction, ObstructionId::from("wall-a"));
        assert_eq!(a.first_sample, 0);
        assert_eq!(a.last_sample, 1);
        assert!(a.first_point.is_close(&(ORIGIN + samples[0].direction * 5.0)));
        assert!(a.last_point.is_close(&(ORIGIN + samples[1].direction * 6.0)));

        let b = &sweep.records[1];
        assert_eq!(b.obstruction, ObstructionId::from("wall-b"));
        assert_eq!(b.first_sample, 2);
        assert_eq!(b.last_sample, 2);

        // Extreme ray points are the stopping hits
        assert!(sweep.first_ray_point.unwrap().is_close(&a.first_point));
        assert!(sweep.last_ray_point.unwrap().is_close(&b.first_point));
        Ok(())
    }

    #[test]
    fn test_ray_stops_at_first_opaque_hit() -> Result<()> {
        let samples = sample_sun_vectors(&three_frames());
        let mut query = ScriptedQuery::new();
        // Two opaque obstacles on the same ray; only the nearer is kept
        query.on(samples[0].direction, vec![(5.0, "near"), (9.0, "far")]);
        query.on(samples[1].direction, vec![(5.0, "near")]);
        query.on(samples[2].direction, vec![(5.0, "near")]);

        let sweep = extract_boundaries(&query, ORIGIN, &samples, None, 500.0)?;
        assert_eq!(sweep.records.len(), 1);
        assert_eq!(sweep.records[0].obstruction, ObstructionId::from("near"));
        Ok(())
    }

    #[test]
    fn test_opening_does_not_stop_the_ray() -> Result<()> {
        let samples = sample_sun_vectors(&three_frames());
        let mut query = ScriptedQuery::new();
        query.on(samples[0].direction, vec![(3.0, "wall-with-window"), (8.0, "back-wall")]);
        query.on(samples[1].direction, vec![(8.0, "back-wall")]);
        query.on(samples[2].direction, vec![(8.0, "back-wall")]);
        // The first hit of sample 0 falls inside a window volume
        let hit0 = ORIGIN + samples[0].direction * 3.0;
        query.openings.push((
            ObstructionId::from("window-0"),
            hit0 + Vector::new(-0.1, -0.1, -0.1),
            hit0 + Vector::new(0.1, 0.1, 0.1),
        ));

        let sweep = extract_boundaries(&query, ORIGIN, &samples, None, 500.0)?;
        // The window is recorded under its own identity and the ray
        // continued to the back wall.
        assert_eq!(sweep.records.len(), 2);
        let ids: Vec<&str> = sweep.records.iter().map(|r| r.obstruction.as_str()).collect();
        assert!(ids.contains(&"window-0"));
        assert!(ids.contains(&"back-wall"));
        let back = sweep
            .records
            .iter()
            .find(|r| r.obstruction.as_str() == "back-wall")
            .unwrap();
        assert_eq!(back.first_sample, 0);
        assert_eq!(back.last_sample, 2);
        Ok(())
    }

    #[test]
    fn test_invalid_solid_hits_are_rejected() -> Result<()> {
        let samples = sample_sun_vectors(&three_frames());
        let mut query = ScriptedQuery::new();
        query.on(samples[0].direction, vec![(2.0, "ghost"), (5.0, "wall")]);
        query.on(samples[1].direction, vec![(5.0, "wall")]);
        query.on(samples[2].direction, vec![(5.0, "wall")]);
        query.invalid.push(ObstructionId::from("ghost"));

        let sweep = extract_boundaries(&query, ORIGIN, &samples, None, 500.0)?;
        assert_eq!(sweep.records.len(), 1);
        assert_eq!(sweep.records[0].obstruction, ObstructionId::from("wall"));
        Ok(())
    }

    #[test]
    fn test_facing_normal_rejects_hits_behind_target() -> Result<()> {
        let samples = sample_sun_vectors(&three_frames());
        let mut query = ScriptedQuery::new();
        query.on(samples[0].direction, vec![(5.0, "east-wall")]);
        query.on(samples[1].direction, vec![(5.0, "diag-wall")]);
        query.on(samples[2].direction, vec![(5.0, "north-wall")]);

        // Facing due east: the due-north hit lies in the facing plane
        // (dot = 0) and must be rejected.
        let facing = Some(Vector::new(1.0, 0.0, 0.0));
        let sweep = extract_boundaries(&query, ORIGIN, &samples, facing, 500.0)?;
        let ids: Vec<&str> = sweep.records.iter().map(|r| r.obstruction.as_str()).collect();
        assert!(ids.contains(&"east-wall"));
        assert!(ids.contains(&"diag-wall"));
        assert!(!ids.contains(&"north-wall"));
        Ok(())
    }

    #[test]
    fn test_unobstructed_extreme_rays_get_synthetic_far_points() -> Result<()> {
        let samples = sample_sun_vectors(&three_frames());
        let mut query = ScriptedQuery::new();
        // Only the middle sample hits anything
        query.on(samples[1].direction, vec![(5.0, "wall")]);

        let sweep = extract_boundaries(&query, ORIGIN, &samples, None, 500.0)?;
        let far0 = ORIGIN + samples[0].direction * 500.0;
        let far2 = ORIGIN + samples[2].direction * 500.0;
        assert!(sweep.first_ray_point.unwrap().distance_to(&far0) < 1e-9);
        assert!(sweep.last_ray_point.unwrap().distance_to(&far2) < 1e-9);
        Ok(())
    }

    #[test]
    fn test_extraction_is_idempotent() -> Result<()> {
        let samples = sample_sun_vectors(&three_frames());
        let mut query = ScriptedQuery::new();
        query.on(samples[0].direction, vec![(5.0, "wall-a")]);
        query.on(samples[1].direction, vec![(6.0, "wall-a"), (9.0, "wall-b")]);
        query.on(samples[2].direction, vec![(4.0, "wall-b")]);

        let sweep1 = extract_boundaries(&query, ORIGIN, &samples, None, 500.0)?;
        let sweep2 = extract_boundaries(&query, ORIGIN, &samples, None, 500.0)?;
        assert_eq!(sweep1, sweep2);
        Ok(())
    }
}
