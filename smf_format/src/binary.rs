//! Compact SMF encoding. All fields are little-endian:
//!
//! | offset | field        | type                          |
//! |--------|--------------|-------------------------------|
//! | 0      | magic        | `b"SMF\0"`                    |
//! | 4      | version      | `u8`                          |
//! | 5      | vertex count | `u32`                         |
//! | 9      | index count  | `u32`                         |
//! | 13     | vertices     | vertex count × 8 × `f32`      |
//! | ...    | indices      | index count × `u32`           |

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};
use crate::mesh::{IndexedMesh, Vertex};
use crate::vector::{Vector2, Vector3};

pub const MAGIC: [u8; 4] = *b"SMF\0";
pub const VERSION: u8 = 1;

pub const HEADER_SIZE: usize = 13;
pub const VERTEX_SIZE: usize = 32;
pub const INDEX_SIZE: usize = 4;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u8,
    vertex_count: u32,
    index_count: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct VertexRecord {
    position: [f32; 3],
    texcoord: [f32; 2],
    normal: [f32; 3],
}

impl From<&Vertex> for VertexRecord {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position.into(),
            texcoord: v.texcoord.into(),
            normal: v.normal.into(),
        }
    }
}

impl From<VertexRecord> for Vertex {
    fn from(r: VertexRecord) -> Self {
        let [px, py, pz] = r.position.map(f64::from);
        let [tu, tv] = r.texcoord.map(f64::from);
        let [nx, ny, nz] = r.normal.map(f64::from);
        Self {
            position: Vector3::new(px, py, pz),
            texcoord: Vector2::new(tu, tv),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct TriangleRecord {
    indices: [u32; 3],
}

/// Number of bytes [`write`] produces for `mesh`.
pub fn encoded_len(mesh: &IndexedMesh) -> usize {
    HEADER_SIZE + mesh.vertices().len() * VERTEX_SIZE + mesh.indices().len() * INDEX_SIZE
}

pub fn write<W: Write>(mesh: &IndexedMesh, mut writer: W) -> Result<()> {
    let header = Header {
        magic: MAGIC,
        version: VERSION,
        vertex_count: mesh.vertex_count(),
        index_count: mesh.index_count(),
    };
    bincode::serialize_into(&mut writer, &header)?;

    for vertex in mesh.vertices() {
        bincode::serialize_into(&mut writer, &VertexRecord::from(vertex))?;
    }

    // every triangle writes its own corners
    for indices in mesh.triangles() {
        bincode::serialize_into(&mut writer, &TriangleRecord { indices })?;
    }

    Ok(())
}

pub fn to_bytes(mesh: &IndexedMesh) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(encoded_len(mesh));
    write(mesh, &mut bytes)?;
    Ok(bytes)
}

pub fn read(bytes: &[u8]) -> Result<IndexedMesh> {
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::UnexpectedEnd("header"));
    }

    let mut reader = bytes;
    let header: Header = bincode::deserialize_from(&mut reader)?;

    if header.magic != MAGIC {
        return Err(FormatError::InvalidMagic(header.magic));
    }
    if header.version != VERSION {
        return Err(FormatError::UnsupportedVersion(header.version));
    }

    let vertex_count = header.vertex_count as usize;
    let index_count = header.index_count as usize;
    if index_count % 3 != 0 {
        return Err(FormatError::IncompleteTriangle(index_count));
    }

    let body = vertex_count
        .checked_mul(VERTEX_SIZE)
        .zip(index_count.checked_mul(INDEX_SIZE))
        .and_then(|(v, i)| v.checked_add(i))
        .ok_or(FormatError::TooLarge)?;
    if reader.len() < body {
        return Err(FormatError::UnexpectedEnd("records"));
    }

    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let record: VertexRecord = bincode::deserialize_from(&mut reader)?;
        vertices.push(record.into());
    }

    let mut indices = Vec::with_capacity(index_count);
    for _ in 0..index_count / 3 {
        let record: TriangleRecord = bincode::deserialize_from(&mut reader)?;
        indices.extend_from_slice(&record.indices);
    }

    if !reader.is_empty() {
        log::warn!("Ignoring {} trailing bytes", reader.len());
    }

    IndexedMesh::from_parts(vertices, indices)
}
