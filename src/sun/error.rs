use thiserror::Error;

/// Failure modes of one analysis run.
///
/// Degenerate triangle candidates are not represented here: they are
/// recovered locally (skipped and counted) and never abort a run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The caller's input cannot be analyzed at all.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// The sweep found too few boundary records to close a wedge.
    #[error("Insufficient boundary data: found {found} record(s), need at least 2")]
    InsufficientBoundaryData { found: usize },

    /// The obstruction query failed mid-run.
    #[error("Obstruction query unavailable")]
    QueryUnavailable(#[source] anyhow::Error),
}
