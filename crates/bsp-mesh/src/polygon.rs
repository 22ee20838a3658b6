//! Face boundary reconstruction.

use bsp_decode::{Edge, Face, MapGeometry, SurfEdge};
use glam::Vec3;

use crate::error::{Error, ReferenceKind, Result};

/// Why a face contributes no geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Fewer than three surfedges.
    TooFewEdges,
    /// Displacement surface.
    Displacement,
}

/// Reason `face` is skipped, or `None` if it becomes a polygon.
#[must_use]
pub const fn skip_reason(face: &Face) -> Option<SkipReason> {
    if face.surfedge_count < 3 {
        Some(SkipReason::TooFewEdges)
    } else if face.is_displacement() {
        Some(SkipReason::Displacement)
    } else {
        None
    }
}

/// Whether `face` is a planar face with at least three edges.
#[must_use]
pub const fn is_eligible(face: &Face) -> bool {
    skip_reason(face).is_none()
}

/// Vertex index at which `surfedge` starts its side of the polygon.
///
/// `None` if the edge index is out of range.
#[must_use]
pub fn resolve_vertex_index(surfedge: SurfEdge, edges: &[Edge]) -> Option<u16> {
    let index = usize::try_from(surfedge.edge_index).ok()?;
    edges
        .get(index)
        .map(|edge| edge.start(surfedge.direction))
}

/// Boundary of face `face_index` in authored winding order.
///
/// Ineligible faces yield an empty boundary. Any index that leaves its array
/// is an [`Error::InvalidReference`].
pub fn build_polygon(face_index: usize, face: &Face, geometry: &MapGeometry) -> Result<Vec<Vec3>> {
    if !is_eligible(face) {
        return Ok(Vec::new());
    }

    let out_of_range = |kind, index: i64, len| Error::InvalidReference {
        face: face_index,
        kind,
        index,
        len,
    };

    let range = face.surfedge_range().ok_or_else(|| {
        out_of_range(
            ReferenceKind::SurfEdge,
            i64::from(face.first_surfedge),
            geometry.surfedges.len(),
        )
    })?;
    let surfedges = geometry.surfedges.get(range.clone()).ok_or_else(|| {
        out_of_range(
            ReferenceKind::SurfEdge,
            i64::try_from(range.end - 1).unwrap_or(i64::MAX),
            geometry.surfedges.len(),
        )
    })?;

    surfedges
        .iter()
        .map(|&surfedge| {
            let vertex = resolve_vertex_index(surfedge, &geometry.edges).ok_or_else(|| {
                out_of_range(
                    ReferenceKind::Edge,
                    i64::from(surfedge.edge_index),
                    geometry.edges.len(),
                )
            })?;
            geometry
                .vertices
                .get(usize::from(vertex))
                .copied()
                .map(Vec3::from)
                .ok_or_else(|| {
                    out_of_range(
                        ReferenceKind::Vertex,
                        i64::from(vertex),
                        geometry.vertices.len(),
                    )
                })
        })
        .collect()
}
