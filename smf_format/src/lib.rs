//! Hardware-oriented mesh structures of the Simple Model Format (SMF) and their
//! text and binary encodings.

pub mod binary;
pub mod error;
pub mod format;
pub mod mesh;
pub mod text;
pub mod vector;

pub use error::{FormatError, Result};
pub use format::{deserialize, serialize, write, Format};
pub use mesh::{IndexedMesh, Vertex};
pub use vector::{Vector2, Vector3};
