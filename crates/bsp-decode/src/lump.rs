//! Generic fixed-size record lump decoding.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::{DecodeError, DecodeResult};
use crate::header::ContainerHeader;
use crate::{Edge, Face, SurfEdge, Vertex};

/// Geometry lumps consumed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LumpKind {
    Vertices,
    Faces,
    Edges,
    SurfEdges,
}

impl LumpKind {
    /// Directory index of this lump.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Vertices => 3,
            Self::Faces => 7,
            Self::Edges => 12,
            Self::SurfEdges => 13,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertices => "vertices",
            Self::Faces => "faces",
            Self::Edges => "edges",
            Self::SurfEdges => "surfedges",
        }
    }
}

impl fmt::Display for LumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (lump {})", self.name(), self.index())
    }
}

/// A record type stored as a homogeneous array in one lump.
///
/// Implementations read and write fields one by one in wire order; no layout
/// is inferred from the Rust struct.
pub trait Record: Sized {
    /// Lump holding records of this type.
    const KIND: LumpKind;

    /// Encoded size of one record in bytes.
    const SIZE: usize;

    /// Read one record. Fails with `UnexpectedEof` if fewer than
    /// [`Self::SIZE`] bytes remain.
    fn decode<R: Read>(reader: &mut R) -> io::Result<Self>;

    /// Write the [`Self::SIZE`]-byte encoding.
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()>;
}

/// Decode every whole record of `T`'s lump.
///
/// The stream is left positioned just past the last decoded record. A lump
/// whose declared extent runs past the end of the stream is rejected before
/// anything is read.
pub fn read_lump<T: Record, R: Read + Seek>(
    reader: &mut R,
    header: &ContainerHeader,
) -> DecodeResult<Vec<T>> {
    let lump = T::KIND.index();
    let descriptor = header.lump(T::KIND);
    let malformed = || DecodeError::MalformedLump {
        lump,
        offset: descriptor.offset,
        length: descriptor.length,
    };
    let offset = u64::try_from(descriptor.offset).map_err(|_| malformed())?;
    let length = u64::try_from(descriptor.length).map_err(|_| malformed())?;

    let end = reader.seek(SeekFrom::End(0))?;
    let available = end.saturating_sub(offset);
    let truncated = || DecodeError::TruncatedLump {
        lump,
        offset,
        needed: length,
        available,
    };
    if length > available {
        return Err(truncated());
    }

    let count = descriptor.record_count(T::SIZE);
    let mut buf = vec![0u8; count * T::SIZE];
    reader.seek(SeekFrom::Start(offset))?;
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            truncated()
        } else {
            DecodeError::Io(e)
        }
    })?;

    let mut records = buf.as_slice();
    let decoded = (0..count)
        .map(|_| T::decode(&mut records))
        .collect::<io::Result<Vec<_>>>()?;
    Ok(decoded)
}

/// Encode a slice of records back into lump bytes.
pub fn encode_lump<T: Record>(records: &[T]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(records.len() * T::SIZE);
    for record in records {
        record.encode(&mut out)?;
    }
    Ok(out)
}

/// The four geometry lumps of one map, fully decoded.
///
/// Faces address the other arrays by index, so all four stay alive for as
/// long as geometry is being built from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapGeometry {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub surfedges: Vec<SurfEdge>,
    pub faces: Vec<Face>,
}

/// Decode the vertex, edge, surfedge and face lumps, in that order.
pub fn read_geometry<R: Read + Seek>(
    reader: &mut R,
    header: &ContainerHeader,
) -> DecodeResult<MapGeometry> {
    Ok(MapGeometry {
        vertices: read_lump(reader, header)?,
        edges: read_lump(reader, header)?,
        surfedges: read_lump(reader, header)?,
        faces: read_lump(reader, header)?,
    })
}
