//! Orchestration of one sun-hour analysis run.

use log::{debug, warn};

use crate::geom::EPS;
use crate::scene::MeshSink;
use crate::{ObstructionQuery, Point, Vector};

use super::boundary::extract_boundaries;
use super::error::AnalysisError;
use super::exposure::{count_exposed_samples, is_point_exposed};
use super::result::AnalysisResult;
use super::samples::{sample_sun_vectors, SunFrame};
use super::wedge::{triangulate_visible_fan, triangulate_wedge, BoundaryOrdering, WedgeTriangles};

/// Parameters of one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct SunHourConfig {
    /// Distance of the far reference points, in model units.
    pub far_distance: f64,
    /// Minutes between consecutive sun frames.
    pub minutes_per_frame: u32,
    /// Clock hour of the first frame (for sun-hour labels).
    pub start_hour: u32,
    /// Which triangulation the run produces.
    pub ordering: BoundaryOrdering,
}

impl Default for SunHourConfig {
    fn default() -> Self {
        Self {
            far_distance: 500.0,
            minutes_per_frame: 1,
            start_hour: 7,
            ordering: BoundaryOrdering::default(),
        }
    }
}

/// One-shot analysis over a borrowed obstruction query.
pub struct SunHourAnalysis<'a, Q: ObstructionQuery + ?Sized> {
    query: &'a Q,
    config: SunHourConfig,
}

impl<'a, Q: ObstructionQuery + ?Sized> SunHourAnalysis<'a, Q> {
    pub fn new(query: &'a Q) -> Self {
        Self {
            query,
            config: SunHourConfig::default(),
        }
    }

    pub fn with_config(query: &'a Q, config: SunHourConfig) -> Self {
        Self { query, config }
    }

    /// Runs the full pipeline for one analysis point.
    ///
    /// Pure with respect to the host: nothing is written anywhere.
    /// Output goes to the scene only via [`commit_triangles`] and only
    /// after this returns `Ok`.
    pub fn run(
        &self,
        point: Point,
        facing_normal: Option<Vector>,
        frames: &[SunFrame],
    ) -> Result<AnalysisResult, AnalysisError> {
        if frames.is_empty() {
            return Err(AnalysisError::InvalidInput("no sun frames supplied"));
        }
        if !(point.x.is_finite() && point.y.is_finite() && point.z.is_finite()) {
            return Err(AnalysisError::InvalidInput(
                "analysis point has non-finite coordinates",
            ));
        }
        if let Some(n) = facing_normal {
            if n.length() < EPS {
                return Err(AnalysisError::InvalidInput("zero-length facing normal"));
            }
        }

        let samples = sample_sun_vectors(frames);
        let exposed = count_exposed_samples(self.query, point, &samples, self.config.far_distance)
            .map_err(AnalysisError::QueryUnavailable)?;
        debug!("{exposed}/{} samples exposed", samples.len());

        let sweep = extract_boundaries(
            self.query,
            point,
            &samples,
            facing_normal,
            self.config.far_distance,
        )
        .map_err(AnalysisError::QueryUnavailable)?;
        if sweep.records.len() < 2 {
            return Err(AnalysisError::InsufficientBoundaryData {
                found: sweep.records.len(),
            });
        }

        let first_dir = samples[0].direction;
        let last_dir = samples[samples.len() - 1].direction;
        let far_first = point.move_along(&first_dir, self.config.far_distance);
        let far_last = point.move_along(&last_dir, self.config.far_distance);

        let wedge = match self.config.ordering {
            BoundaryOrdering::SweepOrder => {
                // Probe past each extreme boundary point: if the day's
                // extreme ray was stopped there, the obstruction lies
                // strictly closer than the probe target.
                let first = &sweep.records[0];
                let last = &sweep.records[sweep.records.len() - 1];
                let probe_first = first.first_point.move_along(&first_dir, self.config.far_distance);
                let probe_last = last.last_point.move_along(&last_dir, self.config.far_distance);
                let first_blocked = !is_point_exposed(self.query, point, probe_first)
                    .map_err(AnalysisError::QueryUnavailable)?;
                let last_blocked = !is_point_exposed(self.query, point, probe_last)
                    .map_err(AnalysisError::QueryUnavailable)?;
                triangulate_wedge(
                    point,
                    &sweep.records,
                    first_blocked,
                    last_blocked,
                    far_first,
                    far_last,
                )
            }
            BoundaryOrdering::Angular => self.visible_fan(point, &sweep.records)?,
        };
        debug!(
            "{} triangles, {} degenerate candidates skipped",
            wedge.triangles.len(),
            wedge.degenerate_skipped
        );

        Ok(AnalysisResult {
            exposed_minutes: exposed as u32 * self.config.minutes_per_frame,
            boundary_records: sweep.records,
            triangles: wedge.triangles,
            degenerate_skipped: wedge.degenerate_skipped,
        })
    }

    /// Fans triangles over the boundary extreme points that have an
    /// unobstructed sight line from the analysis point.
    fn visible_fan(
        &self,
        point: Point,
        records: &[super::boundary::BoundaryRecord],
    ) -> Result<WedgeTriangles, AnalysisError> {
        let mut visible = Vec::with_capacity(records.len() * 2);
        for record in records {
            for candidate in [record.first_point, record.last_point] {
                if is_point_exposed(self.query, point, candidate)
                    .map_err(AnalysisError::QueryUnavailable)?
                {
                    visible.push(candidate);
                }
            }
        }
        Ok(triangulate_visible_fan(point, &visible))
    }
}

/// Outcome of committing a result's triangles to a sink.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub emitted: usize,
    pub failed: usize,
}

/// Writes the result's triangles into the host scene.
///
/// A failed triangle is reported and skipped; the remaining triangles
/// are still emitted.
pub fn commit_triangles(result: &AnalysisResult, sink: &mut dyn MeshSink) -> EmitSummary {
    let mut summary = EmitSummary::default();
    for triangle in &result.triangles {
        match sink.emit(triangle) {
            Ok(()) => summary.emitted += 1,
            Err(err) => {
                summary.failed += 1;
                warn!("Failed to emit triangle: {err:#}");
            }
        }
    }
    summary
}
