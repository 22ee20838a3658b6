//! Decode Source engine BSP map containers.
//!
//! This crate reads the fixed header, the 64-entry lump directory and the four
//! lumps that describe brush geometry: vertices, edges, surfedges and faces.
//! Everything else in the container is left untouched.
//!
//! # Design principles
//!
//! - **Synchronous**: Plain `Read + Seek`, no async, no threads
//! - **Exact layouts**: Every record is decoded field by field in wire order,
//!   and has a matching encoder
//! - **Quiet**: No logging; callers decide what to report
//!
//! # Key functions
//!
//! - [`read_header`]: Parse the header and lump directory
//! - [`read_lump`]: Decode one lump into a `Vec` of records
//! - [`read_geometry`]: Decode all four geometry lumps into [`MapGeometry`]

mod error;

pub mod edges;
pub mod faces;
pub mod header;
pub mod lump;
pub mod vertices;

pub use edges::{Direction, Edge, SurfEdge};
pub use error::{DecodeError, DecodeResult};
pub use faces::{Face, NO_DISPLACEMENT};
pub use header::{
    ContainerHeader, EXPECTED_VERSION, HEADER_SIZE, IDENT, LUMP_COUNT, LumpDescriptor,
    read_header,
};
pub use lump::{LumpKind, MapGeometry, Record, encode_lump, read_geometry, read_lump};
pub use vertices::Vertex;
