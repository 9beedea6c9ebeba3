pub mod geom;
pub mod scene;
pub mod sun;

// Prelude
pub use geom::point::Point;
pub use geom::polygon::Polygon;
pub use geom::ray::Ray;
pub use geom::triangles::Triangle;
pub use geom::vector::Vector;
pub use scene::{MeshBuffer, MeshSink, ObstructionHit, ObstructionId, ObstructionQuery, SceneModel};
pub use sun::analysis::{commit_triangles, EmitSummary, SunHourAnalysis, SunHourConfig};
pub use sun::boundary::BoundaryRecord;
pub use sun::error::AnalysisError;
pub use sun::result::AnalysisResult;
pub use sun::samples::SunFrame;
pub use sun::wedge::BoundaryOrdering;
