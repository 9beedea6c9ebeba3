use crate::geom::triangles::Triangle;

use super::boundary::BoundaryRecord;

/// Everything produced by one analysis run.
///
/// Pure data: committing triangles to a mesh sink is a separate step,
/// so a run can be inspected or discarded without side effects.
#[derive(Debug)]
pub struct AnalysisResult {
    /// Total minutes of direct sun at the analysis point.
    pub exposed_minutes: u32,
    /// Boundary records in sweep order.
    pub boundary_records: Vec<BoundaryRecord>,
    /// Sunlit-wedge triangles in canonical vertex order.
    pub triangles: Vec<Triangle>,
    /// Candidate triangles rejected as degenerate.
    pub degenerate_skipped: usize,
}

impl AnalysisResult {
    /// Splits the exposure into whole hours and leftover minutes.
    pub fn hours_and_minutes(&self) -> (u32, u32) {
        (self.exposed_minutes / 60, self.exposed_minutes % 60)
    }
}

/// Clock label ("HH:MM") of a sample, given the sweep's start hour and
/// the minutes between consecutive frames.
pub fn sample_hour_label(index: usize, start_hour: u32, minutes_per_frame: u32) -> String {
    let total = start_hour * 60 + index as u32 * minutes_per_frame;
    format!("{:02}:{:02}", (total / 60) % 24, total % 60)
}
