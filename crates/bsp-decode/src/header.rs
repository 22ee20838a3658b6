//! Container header and lump directory.

use std::borrow::Cow;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{DecodeError, DecodeResult};
use crate::lump::LumpKind;

/// Magic identifier at offset 0.
pub const IDENT: [u8; 4] = *b"VBSP";

/// Format version this decoder is written against.
pub const EXPECTED_VERSION: i32 = 20;

/// Number of entries in the lump directory.
pub const LUMP_COUNT: usize = 64;

/// Size of the identifier and version fields.
const PREAMBLE_SIZE: usize = 8;

/// Total header size: preamble, directory and trailing revision.
pub const HEADER_SIZE: usize = PREAMBLE_SIZE + LUMP_COUNT * LumpDescriptor::SIZE + 4;

/// One directory entry locating a lump inside the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LumpDescriptor {
    pub offset: i32,
    pub length: i32,
    pub version: i32,
    pub four_cc: i32,
}

impl LumpDescriptor {
    /// Encoded size in bytes.
    pub const SIZE: usize = 16;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            offset: reader.read_i32::<LittleEndian>()?,
            length: reader.read_i32::<LittleEndian>()?,
            version: reader.read_i32::<LittleEndian>()?,
            four_cc: reader.read_i32::<LittleEndian>()?,
        })
    }

    /// Write the 16-byte encoding.
    pub fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.offset)?;
        writer.write_i32::<LittleEndian>(self.length)?;
        writer.write_i32::<LittleEndian>(self.version)?;
        writer.write_i32::<LittleEndian>(self.four_cc)
    }

    /// Number of whole records of `record_size` bytes this lump holds.
    ///
    /// Trailing bytes that do not fill a record are ignored. Negative lengths
    /// hold no records.
    #[must_use]
    pub fn record_count(&self, record_size: usize) -> usize {
        usize::try_from(self.length).map_or(0, |length| length / record_size)
    }
}

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub ident: [u8; 4],
    pub version: i32,
    pub lumps: [LumpDescriptor; LUMP_COUNT],
    pub revision: i32,
}

impl ContainerHeader {
    /// Header with the expected identifier and version and an empty directory.
    #[must_use]
    pub fn new(revision: i32) -> Self {
        Self {
            ident: IDENT,
            version: EXPECTED_VERSION,
            lumps: [LumpDescriptor::default(); LUMP_COUNT],
            revision,
        }
    }

    /// Directory entry for one of the geometry lumps.
    #[must_use]
    pub const fn lump(&self, kind: LumpKind) -> &LumpDescriptor {
        &self.lumps[kind.index()]
    }

    /// Whether `version` matches [`EXPECTED_VERSION`].
    #[must_use]
    pub const fn has_expected_version(&self) -> bool {
        self.version == EXPECTED_VERSION
    }

    /// Identifier as text, with invalid bytes replaced.
    #[must_use]
    pub fn ident_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.ident)
    }

    /// Write the [`HEADER_SIZE`]-byte form.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.ident)?;
        writer.write_i32::<LittleEndian>(self.version)?;
        for lump in &self.lumps {
            lump.encode(writer)?;
        }
        writer.write_i32::<LittleEndian>(self.revision)
    }

    /// Encode the header into its [`HEADER_SIZE`]-byte form.
    pub fn encode(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        self.write(&mut out)?;
        Ok(out)
    }
}

/// Read the container header from the start of `reader`.
///
/// The identifier is checked before the directory is read, so a foreign file
/// fails after eight bytes. An unexpected version is accepted; callers decide
/// whether to warn about it with [`ContainerHeader::has_expected_version`].
pub fn read_header<R: Read>(reader: &mut R) -> DecodeResult<ContainerHeader> {
    let mut preamble = [0u8; PREAMBLE_SIZE];
    let got = read_up_to(reader, &mut preamble)?;
    if got < PREAMBLE_SIZE {
        return Err(DecodeError::MalformedHeader {
            needed: PREAMBLE_SIZE,
            got,
        });
    }

    let mut fields = preamble.as_slice();
    let mut ident = [0u8; 4];
    fields.read_exact(&mut ident)?;
    let version = fields.read_i32::<LittleEndian>()?;
    if ident != IDENT {
        return Err(DecodeError::UnsupportedFormat { ident });
    }

    let mut rest = [0u8; HEADER_SIZE - PREAMBLE_SIZE];
    let got = read_up_to(reader, &mut rest)?;
    if got < rest.len() {
        return Err(DecodeError::MalformedHeader {
            needed: HEADER_SIZE,
            got: PREAMBLE_SIZE + got,
        });
    }

    let mut fields = rest.as_slice();
    let mut lumps = [LumpDescriptor::default(); LUMP_COUNT];
    for lump in &mut lumps {
        *lump = LumpDescriptor::decode(&mut fields)?;
    }
    let revision = fields.read_i32::<LittleEndian>()?;

    Ok(ContainerHeader {
        ident,
        version,
        lumps,
        revision,
    })
}

/// Fill as much of `buf` as the stream allows, returning the byte count.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
