//! Binary STL output.
//!
//! ```text
//! UINT8[80]    : header (free text, space padded)
//! UINT32       : number of triangles
//! foreach triangle
//!     REAL32[3] : normal vector
//!     REAL32[3] : vertex 1
//!     REAL32[3] : vertex 2
//!     REAL32[3] : vertex 3
//!     UINT16    : attribute byte count (always 0)
//! end
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::Vec3;

use crate::Triangle;
use crate::error::{Error, Result};

/// Header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle record in bytes.
pub const TRIANGLE_SIZE: usize = 50;

/// Exact size of a file holding `triangles` triangles.
#[must_use]
pub const fn file_size(triangles: u32) -> u64 {
    (HEADER_SIZE as u64) + 4 + (TRIANGLE_SIZE as u64) * (triangles as u64)
}

/// Build the 80-byte header from `text`.
///
/// Longer text is cut at 80 bytes; shorter text is padded with spaces.
#[must_use]
pub fn header(text: &str) -> [u8; HEADER_SIZE] {
    let mut header = [b' '; HEADER_SIZE];
    let bytes = text.as_bytes();
    let len = bytes.len().min(HEADER_SIZE);
    header[..len].copy_from_slice(&bytes[..len]);
    header
}

/// Serialize `triangles` as binary STL into `writer`.
///
/// Normals are written as stored on each triangle, zero vectors included.
pub fn write_stl<W: Write>(mut writer: W, triangles: &[Triangle], header_text: &str) -> io::Result<()> {
    let count = u32::try_from(triangles.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} triangles exceed the STL count field", triangles.len()),
        )
    })?;

    writer.write_all(&header(header_text))?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; TRIANGLE_SIZE];
    for triangle in triangles {
        put_vec3(&mut record[0..12], triangle.normal);
        for (i, vertex) in triangle.vertices.iter().enumerate() {
            let start = 12 + i * 12;
            put_vec3(&mut record[start..start + 12], *vertex);
        }
        record[48..50].copy_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }

    writer.flush()
}

/// Create or truncate `path` and write `triangles` to it.
pub fn save_stl<P: AsRef<Path>>(path: P, triangles: &[Triangle], header_text: &str) -> Result<()> {
    let path = path.as_ref();
    let failed = |source| Error::WriteFailed {
        target: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(failed)?;
    write_stl(BufWriter::new(file), triangles, header_text).map_err(failed)
}

fn put_vec3(out: &mut [u8], v: Vec3) {
    out[0..4].copy_from_slice(&v.x.to_le_bytes());
    out[4..8].copy_from_slice(&v.y.to_le_bytes());
    out[8..12].copy_from_slice(&v.z.to_le_bytes());
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn f32_at(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn header_is_space_padded() {
        let h = header("HL2 BSP to STL");
        assert_eq!(&h[..14], b"HL2 BSP to STL");
        assert!(h[14..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn long_header_is_cut() {
        let text = "x".repeat(100);
        let h = header(&text);
        assert!(h.iter().all(|&b| b == b'x'));
    }

    #[test]
    fn layout_of_one_triangle() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        let mut out = Vec::new();
        write_stl(&mut out, &[tri], "test").unwrap();

        assert_eq!(out.len() as u64, file_size(1));
        assert_eq!(u32::from_le_bytes([out[80], out[81], out[82], out[83]]), 1);
        // Normal.
        assert_eq!(f32_at(&out, 84), 0.0);
        assert_eq!(f32_at(&out, 92), 1.0);
        // Second vertex x, third vertex y.
        assert_eq!(f32_at(&out, 108), 1.0);
        assert_eq!(f32_at(&out, 124), 1.0);
        assert_eq!(&out[132..134], &[0, 0]);
    }

    #[test]
    fn empty_mesh_is_just_header_and_count() {
        let mut out = Vec::new();
        write_stl(&mut out, &[], "empty").unwrap();
        assert_eq!(out.len(), 84);
        assert_eq!(&out[80..84], &[0, 0, 0, 0]);
    }

    #[test]
    fn zero_normal_passes_through() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0));
        assert_eq!(tri.normal, Vec3::ZERO);
        let mut out = Vec::new();
        write_stl(&mut out, &[tri], "").unwrap();
        assert!(out[84..96].iter().all(|&b| b == 0));
    }

    #[test]
    fn save_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.stl");
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        save_stl(&path, &[tri, tri], "two").unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), file_size(2));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.stl");
        let err = save_stl(&path, &[], "x").unwrap_err();
        match err {
            Error::WriteFailed { target, .. } => assert!(target.ends_with("out.stl")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
