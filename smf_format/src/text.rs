//! Human-readable SMF encoding.
//!
//! ```text
//! #SimpleModelv1
//! <vertex count> <index count>
//! <px> <py> <pz> <tu> <tv> <nx> <ny> <nz>     (one line per vertex)
//! <i0> <i1> <i2>                              (one line per triangle)
//! ```

use std::fmt::{self, Write};
use std::str::{FromStr, SplitWhitespace};

use crate::error::{FormatError, Result};
use crate::mesh::{IndexedMesh, Vertex};
use crate::vector::{Vector2, Vector3};

pub const HEADER: &str = "#SimpleModelv1";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Writes the text encoding of `mesh` into `out`.
///
/// Floats use the shortest representation that parses back to the same value.
pub fn write_fmt<W: Write>(mesh: &IndexedMesh, out: &mut W) -> fmt::Result {
    write!(out, "{}{}", HEADER, LINE_ENDING)?;
    write!(
        out,
        "{} {}{}",
        mesh.vertex_count(),
        mesh.index_count(),
        LINE_ENDING
    )?;

    for v in mesh.vertices() {
        write!(
            out,
            "{} {} {} {} {} {} {} {}{}",
            v.position.x,
            v.position.y,
            v.position.z,
            v.texcoord.x,
            v.texcoord.y,
            v.normal.x,
            v.normal.y,
            v.normal.z,
            LINE_ENDING
        )?;
    }

    for [a, b, c] in mesh.triangles() {
        write!(out, "{} {} {}{}", a, b, c, LINE_ENDING)?;
    }

    Ok(())
}

pub fn to_string(mesh: &IndexedMesh) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let written = write_fmt(mesh, &mut out);
    debug_assert!(written.is_ok());
    out
}

/// Reads a mesh back from its text encoding. Any whitespace separates tokens.
pub fn read(input: &str) -> Result<IndexedMesh> {
    let mut tokens = input.split_whitespace();

    match tokens.next() {
        Some(HEADER) => {}
        Some(other) => return Err(FormatError::InvalidHeader(other.to_owned())),
        None => return Err(FormatError::UnexpectedEnd("header")),
    }

    let vertex_count: usize = next_number(&mut tokens, "vertex count")?;
    let index_count: usize = next_number(&mut tokens, "index count")?;

    let mut vertices = Vec::new();
    for _ in 0..vertex_count {
        let mut n = [0f64; 8];
        for value in n.iter_mut() {
            *value = next_number(&mut tokens, "vertex")?;
        }
        vertices.push(Vertex {
            position: Vector3::new(n[0], n[1], n[2]),
            texcoord: Vector2::new(n[3], n[4]),
            normal: Vector3::new(n[5], n[6], n[7]),
        });
    }

    let indices = (0..index_count)
        .map(|_| next_number(&mut tokens, "index"))
        .collect::<Result<Vec<u32>>>()?;

    if tokens.next().is_some() {
        log::warn!("Ignoring trailing data after {} indices", index_count);
    }

    IndexedMesh::from_parts(vertices, indices)
}

fn next_number<T: FromStr>(tokens: &mut SplitWhitespace, field: &'static str) -> Result<T> {
    let token = tokens.next().ok_or(FormatError::UnexpectedEnd(field))?;
    token.parse().map_err(|_| FormatError::InvalidNumber {
        field,
        token: token.to_owned(),
    })
}
