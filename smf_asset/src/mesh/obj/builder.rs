use std::fmt;

use log::debug;
use smf_format::{FormatError, IndexedMesh, Vector2, Vector3, Vertex};

/// One face corner as written in the source file: 1-based indices into the position, texture
/// coordinate and normal lists.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceVertexRef {
    pub position_index: i32,
    pub texcoord_index: i32,
    pub normal_index: i32,
}

impl SourceVertexRef {
    pub fn new(position_index: i32, texcoord_index: i32, normal_index: i32) -> Self {
        Self {
            position_index,
            texcoord_index,
            normal_index,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceFace {
    pub a: SourceVertexRef,
    pub b: SourceVertexRef,
    pub c: SourceVertexRef,
}

/// The raw lists of a parsed model, already converted to left-handed coordinates.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceMesh {
    positions: Vec<Vector3>,
    texcoords: Vec<Vector2>,
    normals: Vec<Vector3>,
    faces: Vec<SourceFace>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceList {
    Position,
    Texcoord,
    Normal,
}

impl fmt::Display for SourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceList::Position => "position",
            SourceList::Texcoord => "texcoord",
            SourceList::Normal => "normal",
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FlattenError {
    #[error("Face {face}: {list} index {index} is out of range, {len} {list}s defined")]
    IndexOutOfRange {
        list: SourceList,
        index: i32,
        len: usize,
        face: usize,
    },
    #[error("Failed to build indexed mesh: {0}")]
    Format(#[from] FormatError),
}

impl SourceMesh {
    pub fn from_parts(
        positions: Vec<Vector3>,
        texcoords: Vec<Vector2>,
        normals: Vec<Vector3>,
        faces: Vec<SourceFace>,
    ) -> Self {
        Self {
            positions,
            texcoords,
            normals,
            faces,
        }
    }

    pub fn positions(&self) -> &[Vector3] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[Vector2] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    pub fn faces(&self) -> &[SourceFace] {
        &self.faces
    }

    /// Expands every face corner into its own vertex.
    ///
    /// Corners are never shared, even if two of them resolve to identical data, so the index
    /// buffer of the result is always `0, 1, 2, ..`.
    pub fn flatten(&self) -> Result<IndexedMesh, FlattenError> {
        let mut mesh = IndexedMesh::with_capacity(self.faces.len());

        for (i, face) in self.faces.iter().enumerate() {
            let face_number = i + 1;
            let corners = [
                self.resolve(&face.a, face_number)?,
                self.resolve(&face.b, face_number)?,
                self.resolve(&face.c, face_number)?,
            ];
            mesh.push_triangle(corners)?;
        }

        debug!(
            "Flattened {} faces into {} vertices",
            self.faces.len(),
            mesh.vertex_count()
        );

        Ok(mesh)
    }

    fn resolve(&self, corner: &SourceVertexRef, face: usize) -> Result<Vertex, FlattenError> {
        Ok(Vertex {
            position: lookup(&self.positions, SourceList::Position, corner.position_index, face)?,
            texcoord: lookup(&self.texcoords, SourceList::Texcoord, corner.texcoord_index, face)?,
            normal: lookup(&self.normals, SourceList::Normal, corner.normal_index, face)?,
        })
    }
}

fn lookup<T: Copy>(list: &[T], kind: SourceList, index: i32, face: usize) -> Result<T, FlattenError> {
    // indices are 1-based
    usize::try_from(i64::from(index) - 1)
        .ok()
        .and_then(|i| list.get(i))
        .copied()
        .ok_or(FlattenError::IndexOutOfRange {
            list: kind,
            index,
            len: list.len(),
            face,
        })
}

/// Collects parsed records and applies the right- to left-handed conversion on the way in.
#[derive(Debug, Default)]
pub(crate) struct SourceMeshBuilder {
    mesh: SourceMesh,
}

impl SourceMeshBuilder {
    pub(crate) fn push_position(&mut self, position: [f64; 3]) {
        self.mesh.positions.push(Vector3::from(position).flip_z());
    }

    pub(crate) fn push_texcoord(&mut self, [u, v]: [f64; 2]) {
        self.mesh.texcoords.push(Vector2::new(u, 1.0 - v));
    }

    pub(crate) fn push_normal(&mut self, normal: [f64; 3]) {
        self.mesh.normals.push(Vector3::from(normal).flip_z());
    }

    /// Takes the corners in file order and stores them reversed, so triangles keep facing the
    /// same way after the z axis is mirrored.
    pub(crate) fn push_face(&mut self, [first, second, third]: [SourceVertexRef; 3]) {
        self.mesh.faces.push(SourceFace {
            a: third,
            b: second,
            c: first,
        });
    }

    pub(crate) fn build(self) -> SourceMesh {
        self.mesh
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn corner(i: i32) -> SourceVertexRef {
        SourceVertexRef::new(i, i, i)
    }

    fn quad() -> SourceMesh {
        SourceMesh::from_parts(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            vec![
                Vector2::new(0.0, 1.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 0.0),
            ],
            vec![Vector3::new(0.0, 0.0, -1.0); 4],
            vec![
                SourceFace {
                    a: corner(3),
                    b: corner(2),
                    c: corner(1),
                },
                SourceFace {
                    a: corner(4),
                    b: corner(3),
                    c: corner(1),
                },
            ],
        )
    }

    #[test]
    fn test_flatten_counts() -> Result<(), FlattenError> {
        let mesh = quad().flatten()?;

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.index_count(), 6);
        for (i, index) in mesh.indices().iter().enumerate() {
            assert_eq!(*index as usize, i);
        }

        Ok(())
    }

    #[test]
    fn test_flatten_does_not_share_vertices() -> Result<(), FlattenError> {
        let mesh = quad().flatten()?;
        let vertices = mesh.vertices();

        // source vertex 3 and 1 are used by both faces and get duplicated
        assert_eq!(vertices[0], vertices[4]);
        assert_eq!(vertices[2], vertices[5]);
        assert_eq!(vertices[0].position, Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(vertices[0].texcoord, Vector2::new(1.0, 0.0));
        assert_eq!(vertices[3].position, Vector3::new(0.0, 1.0, 0.0));

        Ok(())
    }

    #[test]
    fn test_flatten_out_of_range() {
        let mut mesh = quad();
        mesh.positions.truncate(3);

        let err = mesh.flatten().unwrap_err();
        assert!(matches!(
            err,
            FlattenError::IndexOutOfRange {
                list: SourceList::Position,
                index: 4,
                len: 3,
                face: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            "Face 2: position index 4 is out of range, 3 positions defined"
        );
    }

    #[test]
    fn test_flatten_rejects_zero_and_negative() {
        let mut mesh = quad();
        mesh.faces[0].b.normal_index = 0;
        assert!(matches!(
            mesh.flatten(),
            Err(FlattenError::IndexOutOfRange {
                list: SourceList::Normal,
                index: 0,
                ..
            })
        ));

        mesh.faces[0].b.normal_index = 1;
        mesh.faces[0].c.texcoord_index = -1;
        assert!(matches!(
            mesh.flatten(),
            Err(FlattenError::IndexOutOfRange {
                list: SourceList::Texcoord,
                index: -1,
                ..
            })
        ));
    }

    #[test]
    fn test_flatten_empty() -> Result<(), FlattenError> {
        let mesh = SourceMesh::default().flatten()?;
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        Ok(())
    }

    #[test]
    fn test_builder_conversion() {
        let mut builder = SourceMeshBuilder::default();
        builder.push_position([1.0, 2.0, 3.0]);
        builder.push_texcoord([0.25, 0.25]);
        builder.push_normal([0.0, 0.0, 1.0]);
        builder.push_face([corner(1), corner(2), corner(3)]);
        let mesh = builder.build();

        assert_eq!(mesh.positions(), &[Vector3::new(1.0, 2.0, -3.0)]);
        assert_eq!(mesh.texcoords(), &[Vector2::new(0.25, 0.75)]);
        assert_eq!(mesh.normals(), &[Vector3::new(0.0, 0.0, -1.0)]);
        assert_eq!(
            mesh.faces(),
            &[SourceFace {
                a: corner(3),
                b: corner(2),
                c: corner(1)
            }]
        );
    }
}
