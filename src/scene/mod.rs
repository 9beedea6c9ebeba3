//! Contracts between the analysis engine and the host scene.
//!
//! The engine never reads geometry directly; all scene access goes
//! through [`ObstructionQuery`], and all geometry output goes through
//! [`MeshSink`]. This keeps the analysis a pure function over read-only
//! queries and makes it testable without a host runtime.

pub mod model;

pub use model::{Obstruction, Opening, SceneModel};

use crate::{Point, Triangle, Vector};
use anyhow::Result;
use std::fmt;

/// Opaque identity of a scene object that can obstruct a sun ray.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstructionId(String);

impl ObstructionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObstructionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single ray/scene intersection.
///
/// Produced transiently per ray cast; not retained beyond one ray's
/// processing.
#[derive(Debug, Clone)]
pub struct ObstructionHit {
    /// Distance from the ray origin.
    pub distance: f64,
    /// Identity of the obstructing object.
    pub obstruction: ObstructionId,
    /// World-space hit point.
    pub point: Point,
}

/// Read-only scene query answered by the host.
///
/// Implementations must be `Sync`: exposure checks for independent sun
/// samples run in parallel, and every call is a concurrent read of a
/// scene that does not change during the analysis.
pub trait ObstructionQuery: Sync {
    /// Casts a ray from `origin` along `direction` and returns all
    /// intersections with the scene.
    ///
    /// Hits should be ordered by distance ascending, but callers re-sort
    /// defensively. An empty vector (not an error) means nothing was
    /// hit. An `Err` means the query service itself is unavailable and
    /// aborts the whole analysis.
    fn cast(&self, origin: Point, direction: Vector) -> Result<Vec<ObstructionHit>>;

    /// Returns the identity of a transparent opening (e.g. a window)
    /// whose bounding volume contains `point`, if any.
    fn opening_at(&self, point: Point) -> Option<ObstructionId>;

    /// Confirms that a hit at `point` projects onto real, non-degenerate
    /// solid geometry of the given object. Used to reject spurious or
    /// coplanar false hits.
    fn is_valid_solid_hit(&self, id: &ObstructionId, point: Point) -> bool;
}

/// Receives the accepted triangles of a finished analysis.
pub trait MeshSink {
    /// Emits one triangle into the host scene.
    ///
    /// A failure affects only this triangle; already-emitted triangles
    /// stay valid.
    fn emit(&mut self, triangle: &Triangle) -> Result<()>;
}

/// In-memory sink collecting emitted triangles.
#[derive(Debug, Default)]
pub struct MeshBuffer {
    pub triangles: Vec<Triangle>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshSink for MeshBuffer {
    fn emit(&mut self, triangle: &Triangle) -> Result<()> {
        self.triangles.push(*triangle);
        Ok(())
    }
}
