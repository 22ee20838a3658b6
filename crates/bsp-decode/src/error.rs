//! Error types for container decoding.

use thiserror::Error;

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a map container.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended before the fixed-size header was complete.
    #[error("malformed header: needed {needed} bytes, got {got}")]
    MalformedHeader {
        /// Bytes required for the header section being read.
        needed: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// The magic identifier does not name a supported container.
    #[error(
        "unsupported format: identifier {:?} is not \"VBSP\"",
        String::from_utf8_lossy(.ident)
    )]
    UnsupportedFormat {
        /// The four bytes found at offset 0.
        ident: [u8; 4],
    },

    /// A lump declares more bytes than the stream holds.
    #[error(
        "truncated lump {lump} at offset {offset}: needed {needed} bytes, {available} available"
    )]
    TruncatedLump {
        /// Directory index of the lump.
        lump: usize,
        /// Byte offset of the lump.
        offset: u64,
        /// Bytes required for the declared record count.
        needed: u64,
        /// Bytes left in the stream from `offset`.
        available: u64,
    },

    /// A directory entry has a negative offset or length.
    #[error("malformed lump {lump}: offset {offset}, length {length}")]
    MalformedLump {
        /// Directory index of the lump.
        lump: usize,
        /// Offset as stored in the directory.
        offset: i32,
        /// Length as stored in the directory.
        length: i32,
    },

    /// Underlying stream error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Directory index of the lump involved, if the error is lump-specific.
    #[must_use]
    pub const fn lump(&self) -> Option<usize> {
        match self {
            Self::TruncatedLump { lump, .. } | Self::MalformedLump { lump, .. } => Some(*lump),
            _ => None,
        }
    }
}
