//! Direct-sunlight exposure checks.

use anyhow::Result;
use rayon::prelude::*;

use crate::{ObstructionQuery, Point};

use super::samples::SunSample;

/// Distance margin for the strictly-closer obstruction test.
///
/// A hit at exactly the target distance (the target lying on an
/// obstruction surface) does not count as blocking.
const BLOCK_EPS: f64 = 1e-6;

/// Checks if `target` is reachable from `origin` without obstruction.
///
/// The point is exposed iff no hit lies strictly closer than the target.
pub fn is_point_exposed<Q: ObstructionQuery + ?Sized>(
    query: &Q,
    origin: Point,
    target: Point,
) -> Result<bool> {
    let distance = origin.distance_to(&target);
    if distance < BLOCK_EPS {
        return Ok(true); // Coincident points, trivially exposed
    }
    let hits = query.cast(origin, target - origin)?;
    Ok(!hits.iter().any(|h| h.distance < distance - BLOCK_EPS))
}

/// Counts how many sun samples reach the analysis point unobstructed.
///
/// Each sample is tested against its far reference point
/// (`origin + direction * far_distance`). Samples are independent, so
/// they are evaluated in parallel; the query only sees concurrent reads.
pub fn count_exposed_samples<Q: ObstructionQuery + ?Sized>(
    query: &Q,
    origin: Point,
    samples: &[SunSample],
    far_distance: f64,
) -> Result<usize> {
    let exposed: Vec<bool> = samples
        .par_iter()
        .map(|sample| {
            let target = origin.move_along(&sample.direction, far_distance);
            is_point_exposed(query, origin, target)
        })
        .collect::<Result<Vec<bool>>>()?;
    Ok(exposed.into_iter().filter(|&e| e).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObstructionHit, ObstructionId};
    use crate::sun::samples::{SunFrame, sample_sun_vectors};
    use crate::Vector;
    use anyhow::anyhow;

    /// Query that never reports a hit.
    struct OpenSky;

    impl ObstructionQuery for OpenSky {
        fn cast(&self, _origin: Point, _direction: Vector) -> Result<Vec<ObstructionHit>> {
            Ok(vec![])
        }
        fn opening_at(&self, _point: Point) -> Option<ObstructionId> {
            None
        }
        fn is_valid_solid_hit(&self, _id: &ObstructionId, _point: Point) -> bool {
            true
        }
    }

    /// Query that reports a hit at a fixed distance for every ray.
    struct WallEverywhere {
        distance: f64,
    }

    impl ObstructionQuery for WallEverywhere {
        fn cast(&self, origin: Point, direction: Vector) -> Result<Vec<ObstructionHit>> {
            let point = origin.move_along(&direction, self.distance);
            Ok(vec![ObstructionHit {
                distance: self.distance,
                obstruction: ObstructionId::from("wall"),
                point,
            }])
        }
        fn opening_at(&self, _point: Point) -> Option<ObstructionId> {
            None
        }
        fn is_valid_solid_hit(&self, _id: &ObstructionId, _point: Point) -> bool {
            true
        }
    }

    /// Query whose service is down.
    struct Broken;

    impl ObstructionQuery for Broken {
        fn cast(&self, _origin: Point, _direction: Vector) -> Result<Vec<ObstructionHit>> {
            Err(anyhow!("scene unavailable"))
        }
        fn opening_at(&self, _point: Point) -> Option<ObstructionId> {
            None
        }
        fn is_valid_solid_hit(&self, _id: &ObstructionId, _point: Point) -> bool {
            false
        }
    }

    fn day_frames(n: usize) -> Vec<SunFrame> {
        (0..n)
            .map(|i| SunFrame::new(0.5, 1.0 + 0.1 * i as f64))
            .collect()
    }

    #[test]
    fn test_no_hits_means_full_exposure() -> Result<()> {
        let samples = sample_sun_vectors(&day_frames(10));
        let n = count_exposed_samples(&OpenSky, Point::new(0., 0., 1.), &samples, 500.0)?;
        assert_eq!(n, 10);
        Ok(())
    }

    #[test]
    fn test_hit_closer_than_reference_blocks_every_sample() -> Result<()> {
        let samples = sample_sun_vectors(&day_frames(10));
        let query = WallEverywhere { distance: 3.0 };
        let n = count_exposed_samples(&query, Point::new(0., 0., 1.), &samples, 500.0)?;
        assert_eq!(n, 0);
        Ok(())
    }

    #[test]
    fn test_hit_beyond_reference_does_not_block() -> Result<()> {
        let samples = sample_sun_vectors(&day_frames(4));
        let query = WallEverywhere { distance: 600.0 };
        let n = count_exposed_samples(&query, Point::new(0., 0., 1.), &samples, 500.0)?;
        assert_eq!(n, 4);
        Ok(())
    }

    #[test]
    fn test_hit_exactly_at_target_is_not_blocking() -> Result<()> {
        let query = WallEverywhere { distance: 5.0 };
        let origin = Point::new(0., 0., 1.);
        let target = Point::new(5., 0., 1.);
        assert!(is_point_exposed(&query, origin, target)?);
        // But a target just beyond the wall is blocked
        let target = Point::new(5.1, 0., 1.);
        assert!(!is_point_exposed(&query, origin, target)?);
        Ok(())
    }

    #[test]
    fn test_query_failure_propagates() {
        let samples = sample_sun_vectors(&day_frames(3));
        let result = count_exposed_samples(&Broken, Point::new(0., 0., 1.), &samples, 500.0);
        assert!(result.is_err());
    }
}
