//! Face lump records.

use std::io::{self, Read, Write};
use std::ops::Range;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::lump::{LumpKind, Record};

/// `dispinfo` value marking a face as ordinary planar geometry.
pub const NO_DISPLACEMENT: i16 = -1;

/// One face record (56 bytes, version 20 layout).
///
/// Only `first_surfedge`, `surfedge_count` and `dispinfo` take part in
/// geometry reconstruction. The remaining fields are decoded so that the
/// record round-trips byte for byte.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Face {
    pub plane_num: u16,
    pub side: u8,
    pub on_node: u8,
    pub first_surfedge: i32,
    pub surfedge_count: i16,
    pub texinfo: i16,
    pub dispinfo: i16,
    pub surface_fog_volume_id: i16,
    pub styles: [i8; 4],
    pub light_offset: i32,
    pub area: f32,
    pub lightmap_mins: [i32; 2],
    pub lightmap_size: [i32; 2],
    pub orig_face: i32,
    pub num_prims: u16,
    pub first_prim_id: u16,
    pub smoothing_groups: u32,
}

impl Face {
    /// Planar face over `surfedge_count` surfedges starting at `first_surfedge`.
    #[must_use]
    pub fn planar(first_surfedge: i32, surfedge_count: i16) -> Self {
        Self {
            first_surfedge,
            surfedge_count,
            dispinfo: NO_DISPLACEMENT,
            ..Self::default()
        }
    }

    /// Whether the face is displacement geometry rather than a flat polygon.
    #[must_use]
    pub const fn is_displacement(&self) -> bool {
        self.dispinfo != NO_DISPLACEMENT
    }

    /// Indices into the surfedge array covered by this face.
    ///
    /// `None` when the start or count is negative.
    #[must_use]
    pub fn surfedge_range(&self) -> Option<Range<usize>> {
        let start = usize::try_from(self.first_surfedge).ok()?;
        let count = usize::try_from(self.surfedge_count).ok()?;
        Some(start..start + count)
    }
}

impl Record for Face {
    const KIND: LumpKind = LumpKind::Faces;
    const SIZE: usize = 56;

    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            plane_num: r.read_u16::<LittleEndian>()?,
            side: r.read_u8()?,
            on_node: r.read_u8()?,
            first_surfedge: r.read_i32::<LittleEndian>()?,
            surfedge_count: r.read_i16::<LittleEndian>()?,
            texinfo: r.read_i16::<LittleEndian>()?,
            dispinfo: r.read_i16::<LittleEndian>()?,
            surface_fog_volume_id: r.read_i16::<LittleEndian>()?,
            styles: [r.read_i8()?, r.read_i8()?, r.read_i8()?, r.read_i8()?],
            light_offset: r.read_i32::<LittleEndian>()?,
            area: r.read_f32::<LittleEndian>()?,
            lightmap_mins: [r.read_i32::<LittleEndian>()?, r.read_i32::<LittleEndian>()?],
            lightmap_size: [r.read_i32::<LittleEndian>()?, r.read_i32::<LittleEndian>()?],
            orig_face: r.read_i32::<LittleEndian>()?,
            num_prims: r.read_u16::<LittleEndian>()?,
            first_prim_id: r.read_u16::<LittleEndian>()?,
            smoothing_groups: r.read_u32::<LittleEndian>()?,
        })
    }

    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u16::<LittleEndian>(self.plane_num)?;
        w.write_u8(self.side)?;
        w.write_u8(self.on_node)?;
        w.write_i32::<LittleEndian>(self.first_surfedge)?;
        w.write_i16::<LittleEndian>(self.surfedge_count)?;
        w.write_i16::<LittleEndian>(self.texinfo)?;
        w.write_i16::<LittleEndian>(self.dispinfo)?;
        w.write_i16::<LittleEndian>(self.surface_fog_volume_id)?;
        for style in self.styles {
            w.write_i8(style)?;
        }
        w.write_i32::<LittleEndian>(self.light_offset)?;
        w.write_f32::<LittleEndian>(self.area)?;
        for v in self.lightmap_mins.iter().chain(&self.lightmap_size) {
            w.write_i32::<LittleEndian>(*v)?;
        }
        w.write_i32::<LittleEndian>(self.orig_face)?;
        w.write_u16::<LittleEndian>(self.num_prims)?;
        w.write_u16::<LittleEndian>(self.first_prim_id)?;
        w.write_u32::<LittleEndian>(self.smoothing_groups)
    }
}
