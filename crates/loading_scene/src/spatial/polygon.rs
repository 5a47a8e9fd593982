//! Open polygon footprint and point containment

use crate::foundation::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest footprint the crossing test can enclose anything with
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Polygon construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolygonError {
    /// Not enough vertices to enclose an area
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

/// Axis-aligned 2D bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Bounds2 {
    /// Bounding box of a set of points, `None` if the set is empty
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().skip(1).fold(Self { min: first, max: first }, |bounds, p| Self {
            min: bounds.min.inf(p),
            max: bounds.max.sup(p),
        }))
    }

    /// Whether the point lies inside or on the box
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Ordered vertex list describing a spawn footprint
///
/// Edges connect consecutive vertices only. The segment from the last vertex
/// back to the first is never tested, so the shape behaves as an open chain
/// under the crossing test. Footprints are authored with that in mind.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    bounds: Bounds2,
}

impl Polygon {
    /// Create a polygon from its vertices
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, PolygonError> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(PolygonError::TooFewVertices(vertices.len()));
        }
        let bounds = Bounds2::from_points(&vertices).ok_or(PolygonError::TooFewVertices(0))?;
        Ok(Self { vertices, bounds })
    }

    /// Axis-aligned bounds of the vertices
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Average of the vertices
    pub fn vertex_centroid(&self) -> Vec2 {
        let sum = self.vertices.iter().fold(Vec2::zeros(), |acc, v| acc + v);
        sum / self.vertices.len() as f32
    }

    /// Even-odd crossing test against the consecutive edges
    ///
    /// Casts a ray towards +X and flips on every edge it crosses. Points
    /// exactly on an edge may land on either side.
    pub fn contains(&self, point: Vec2) -> bool {
        let (x, y) = (point.x, point.y);
        let mut inside = false;

        for edge in self.vertices.windows(2) {
            let (x1, y1) = (edge[0].x, edge[0].y);
            let (x2, y2) = (edge[1].x, edge[1].y);

            if (y < y1) != (y < y2) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1 {
                inside = !inside;
            }
        }

        inside
    }

    /// Vertices lifted onto the plane `z = depth`, for previewing the footprint
    pub fn preview_points(&self, depth: f32) -> Vec<Vec3> {
        self.vertices.iter().map(|v| Vec3::new(v.x, v.y, depth)).collect()
    }
}
