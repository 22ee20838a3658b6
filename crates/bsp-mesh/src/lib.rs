//! Rebuild brush geometry from Source engine BSP maps and export it as STL.
//!
//! Decoding is delegated to [`bsp_decode`]. This crate walks every planar face
//! through its surfedges, fans the resulting polygon into triangles, gives each
//! triangle a normal, and writes the lot as binary STL.
//!
//! # Key functions
//!
//! - [`convert_file`]: Path to path, creating the output only on success
//! - [`convert_reader`]: Any `Read + Seek` source into any `Write` sink
//! - [`Pipeline`]: The same steps one at a time, with an observable state
//!
//! Progress and diagnostics go to a caller-supplied [`Reporter`]; use
//! [`TracingReporter`] to forward them to `tracing`.

mod error;

pub mod normals;
pub mod options;
pub mod pipeline;
pub mod polygon;
pub mod report;
pub mod stl;
pub mod triangulate;

pub use error::{Error, ReferenceKind, Result, Stage};
pub use normals::face_normal;
pub use options::ExportOptions;
pub use pipeline::{Pipeline, PipelineState, convert_file, convert_reader};
pub use polygon::{SkipReason, build_polygon, is_eligible, resolve_vertex_index, skip_reason};
pub use report::{NullReporter, Reporter, Severity, TracingReporter};
pub use stl::{save_stl, write_stl};
pub use triangulate::fan;

use glam::Vec3;

/// One output triangle with its normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    /// Unit normal, or zero for a collinear triangle.
    pub normal: Vec3,
}

impl Triangle {
    /// Triangle with its normal computed by [`face_normal`].
    #[must_use]
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal: face_normal(v0, v1, v2),
        }
    }
}

/// Face accounting for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Faces in the face lump.
    pub faces: usize,
    /// Faces turned into triangles.
    pub converted: usize,
    pub skipped_displacement: usize,
    /// Faces with fewer than three edges.
    pub skipped_degenerate: usize,
    pub triangles: usize,
}

impl MeshStats {
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped_displacement + self.skipped_degenerate
    }
}

/// Triangulated world geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub stats: MeshStats,
}
