use crate::error::{FormatError, Result};
use crate::vector::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A fully resolved vertex, ready to be uploaded into a vertex buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vector3,
    pub texcoord: Vector2,
    pub normal: Vector3,
}

/// A flat vertex buffer plus a triangle list indexing into it.
///
/// The index buffer always holds whole triangles, and every index points into the vertex buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Builds a mesh from raw buffers, e.g. ones read back from a file.
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        if vertices.len() > u32::MAX as usize || indices.len() > u32::MAX as usize {
            return Err(FormatError::TooLarge);
        }
        if indices.len() % 3 != 0 {
            return Err(FormatError::IncompleteTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(FormatError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self { vertices, indices })
    }

    /// Appends a triangle whose three corners each get their own new vertex.
    pub fn push_triangle(&mut self, corners: [Vertex; 3]) -> Result<()> {
        if self.vertices.len() + 3 > u32::MAX as usize {
            return Err(FormatError::TooLarge);
        }

        for vertex in corners {
            self.vertices.push(vertex);
            self.indices.push((self.vertices.len() - 1) as u32);
        }

        Ok(())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates the index buffer one triangle at a time, in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn vertex(x: f64) -> Vertex {
        Vertex {
            position: Vector3::new(x, 0.0, 0.0),
            ..Vertex::default()
        }
    }

    #[test]
    fn test_push_triangle() -> Result<()> {
        let mut mesh = IndexedMesh::new();
        mesh.push_triangle([vertex(0.0), vertex(1.0), vertex(2.0)])?;
        mesh.push_triangle([vertex(0.0), vertex(1.0), vertex(2.0)])?;

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.vertices()[4], vertex(1.0));

        Ok(())
    }

    #[test]
    fn test_from_parts() -> Result<()> {
        let mesh = IndexedMesh::from_parts(vec![vertex(0.0), vertex(1.0), vertex(2.0)], vec![2, 1, 0])?;
        assert_eq!(mesh.triangle_count(), 1);

        assert!(matches!(
            IndexedMesh::from_parts(vec![vertex(0.0)], vec![0, 0]),
            Err(FormatError::IncompleteTriangle(2))
        ));
        assert!(matches!(
            IndexedMesh::from_parts(vec![vertex(0.0)], vec![0, 0, 1]),
            Err(FormatError::IndexOutOfRange {
                index: 1,
                vertex_count: 1
            })
        ));

        Ok(())
    }
}
