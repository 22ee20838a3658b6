//! Error types for map conversion.

use std::fmt;
use std::path::PathBuf;

use bsp_decode::DecodeError;
use thiserror::Error;

use crate::pipeline::PipelineState;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Opening the input file.
    Open,
    /// Reading the header and lump directory.
    Header,
    /// Decoding the geometry lumps.
    Lumps,
    /// Rebuilding and triangulating faces.
    Geometry,
    /// Serializing the mesh.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Header => "header",
            Self::Lumps => "lump",
            Self::Geometry => "geometry",
            Self::Write => "write",
        })
    }
}

/// Array a face reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    SurfEdge,
    Edge,
    Vertex,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SurfEdge => "surfedge",
            Self::Edge => "edge",
            Self::Vertex => "vertex",
        })
    }
}

/// Errors that can occur while converting a map.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container could not be decoded.
    #[error("{stage} stage failed: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: DecodeError,
    },

    /// A face refers to an element past the end of its array.
    #[error("face {face}: {kind} index {index} out of range ({len} available)")]
    InvalidReference {
        /// Index of the face in the face lump.
        face: usize,
        kind: ReferenceKind,
        /// The offending index.
        index: i64,
        /// Length of the array it points into.
        len: usize,
    },

    /// No face produced a triangle.
    #[error("no usable geometry: {faces} faces, {skipped} skipped")]
    EmptyMesh {
        /// Faces in the face lump.
        faces: usize,
        /// Faces skipped as displacements or with fewer than three edges.
        skipped: usize,
    },

    /// Serializing the mesh failed.
    #[error("failed to write {target}: {source}")]
    WriteFailed {
        /// Output path, or a description of the sink.
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// A pipeline step was called out of order.
    #[error("cannot run {stage} stage: pipeline is {found:?}, expected {expected:?}")]
    InvalidState {
        /// Stage that was attempted.
        stage: Stage,
        expected: PipelineState,
        found: PipelineState,
    },
}

impl Error {
    /// Stage the error originated in.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::OpenFailed { .. } => Stage::Open,
            Self::Decode { stage, .. } => *stage,
            Self::InvalidReference { .. } | Self::EmptyMesh { .. } => Stage::Geometry,
            Self::WriteFailed { .. } => Stage::Write,
            Self::InvalidState { stage, .. } => *stage,
        }
    }

    /// Directory index of the lump involved, for lump-level decode errors.
    #[must_use]
    pub const fn lump(&self) -> Option<usize> {
        match self {
            Self::Decode { source, .. } => source.lump(),
            _ => None,
        }
    }

    pub(crate) const fn decode(stage: Stage, source: DecodeError) -> Self {
        Self::Decode { stage, source }
    }
}
