//! In-memory reference implementation of [`ObstructionQuery`].
//!
//! Obstructions are polygon sets (walls, floors, roofs, masses) and
//! openings are axis-aligned volumes embedded in them. A ray through a
//! window still hits the wall polygon; the hit is classified as an
//! opening because its point falls inside the window's volume.

use crate::geom::EPS;
use crate::geom::bboxes::is_point_inside_bounds;
use crate::{ObstructionHit, ObstructionId, ObstructionQuery, Point, Polygon, Ray, Vector};
use anyhow::{Context, Result};

/// An opaque scene object: a named set of polygons.
#[derive(Debug, Clone)]
pub struct Obstruction {
    pub id: ObstructionId,
    pub polygons: Vec<Polygon>,
}

/// A transparent insert (e.g. a window) given by its bounding volume.
#[derive(Debug, Clone)]
pub struct Opening {
    pub id: ObstructionId,
    pub min: Point,
    pub max: Point,
}

/// Polygon-soup obstruction scene.
#[derive(Debug, Default)]
pub struct SceneModel {
    obstructions: Vec<Obstruction>,
    openings: Vec<Opening>,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_obstruction(&mut self, id: impl Into<String>, polygons: Vec<Polygon>) {
        self.obstructions.push(Obstruction {
            id: ObstructionId::new(id),
            polygons,
        });
    }

    pub fn add_opening(&mut self, id: impl Into<String>, min: Point, max: Point) {
        self.openings.push(Opening {
            id: ObstructionId::new(id),
            min,
            max,
        });
    }

    fn find_obstruction(&self, id: &ObstructionId) -> Option<&Obstruction> {
        self.obstructions.iter().find(|o| &o.id == id)
    }
}

impl ObstructionQuery for SceneModel {
    fn cast(&self, origin: Point, direction: Vector) -> Result<Vec<ObstructionHit>> {
        let ray = Ray::new(origin, direction).context("Cannot cast obstruction ray")?;
        let mut hits = Vec::new();
        for obstruction in &self.obstructions {
            for polygon in &obstruction.polygons {
                if let Some((t, point)) = ray.intersect_polygon(polygon) {
                    hits.push(ObstructionHit {
                        distance: t,
                        obstruction: obstruction.id.clone(),
                        point,
                    });
                }
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(hits)
    }

    fn opening_at(&self, point: Point) -> Option<ObstructionId> {
        self.openings
            .iter()
            .find(|o| is_point_inside_bounds(point, o.min, o.max))
            .map(|o| o.id.clone())
    }

    fn is_valid_solid_hit(&self, id: &ObstructionId, point: Point) -> bool {
        let Some(obstruction) = self.find_obstruction(id) else {
            return false;
        };
        obstruction
            .polygons
            .iter()
            .any(|p| p.area() > EPS && p.contains_projection(point))
    }
}
