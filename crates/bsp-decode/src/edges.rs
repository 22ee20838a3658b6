//! Edge and surfedge lump records.
//!
//! Faces never name vertices directly. A face owns a run of surfedges, each
//! surfedge selects an edge and a direction, and the direction picks which end
//! of the edge starts that side of the polygon. Two faces sharing an edge walk
//! it in opposite directions.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::lump::{LumpKind, Record};

/// A pair of vertex indices (4 bytes: two little-endian `u16`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Edge {
    pub v0: u16,
    pub v1: u16,
}

impl Edge {
    #[must_use]
    pub const fn new(v0: u16, v1: u16) -> Self {
        Self { v0, v1 }
    }

    /// Vertex at which a walk in `direction` starts.
    #[must_use]
    pub const fn start(self, direction: Direction) -> u16 {
        match direction {
            Direction::Forward => self.v0,
            Direction::Reverse => self.v1,
        }
    }
}

impl Record for Edge {
    const KIND: LumpKind = LumpKind::Edges;
    const SIZE: usize = 4;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            v0: reader.read_u16::<LittleEndian>()?,
            v1: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.v0)?;
        writer.write_u16::<LittleEndian>(self.v1)
    }
}

/// Which way an edge is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `v0 -> v1`.
    Forward,
    /// `v1 -> v0`.
    Reverse,
}

/// A directed reference into the edge array (4 bytes: one little-endian `i32`).
///
/// On disk the sign carries the direction: non-negative values walk the edge
/// forward, negative values walk edge `-value` in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfEdge {
    pub edge_index: u32,
    pub direction: Direction,
}

impl SurfEdge {
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        let direction = if raw >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        Self {
            edge_index: raw.unsigned_abs(),
            direction,
        }
    }

    /// Signed on-disk form.
    ///
    /// A reverse reference to edge 0 has no distinct encoding and comes back
    /// as a forward reference.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_raw(self) -> i32 {
        let magnitude = self.edge_index as i32;
        match self.direction {
            Direction::Forward => magnitude,
            Direction::Reverse => magnitude.wrapping_neg(),
        }
    }
}

impl From<i32> for SurfEdge {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}

impl Record for SurfEdge {
    const KIND: LumpKind = LumpKind::SurfEdges;
    const SIZE: usize = 4;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_i32::<LittleEndian>().map(Self::from_raw)
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.to_raw())
    }
}
