//! CPU mesh data, procedural generators and GPU upload.
//!
//! A mesh is one vertex buffer plus one or more submeshes, each an index range
//! with its own topology. The vertex layout travels with the mesh as a
//! [`VertexDescriptor`] so pipelines can be built to match it.

mod data;
mod gpu;
mod sphere;
mod vertex;
mod wireframe;

pub use data::{Indices, MeshData, MeshError, Submesh};
pub use gpu::{GpuMesh, GpuSubmesh};
pub use sphere::SphereParams;
pub use vertex::{MeshVertex, VertexAttribute, VertexDescriptor, VertexSemantic};
