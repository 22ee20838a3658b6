//! Vertex lump records.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec3;

use crate::lump::{LumpKind, Record};

/// A world-space position (12 bytes: three little-endian `f32`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

const _: () = assert!(std::mem::size_of::<Vertex>() == <Vertex as Record>::SIZE);

impl Vertex {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vertex> for Vec3 {
    fn from(vertex: Vertex) -> Self {
        vertex.to_vec3()
    }
}

impl Record for Vertex {
    const KIND: LumpKind = LumpKind::Vertices;
    const SIZE: usize = 12;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            x: reader.read_f32::<LittleEndian>()?,
            y: reader.read_f32::<LittleEndian>()?,
            z: reader.read_f32::<LittleEndian>()?,
        })
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(self.x)?;
        writer.write_f32::<LittleEndian>(self.y)?;
        writer.write_f32::<LittleEndian>(self.z)
    }
}
