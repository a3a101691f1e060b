use thiserror::Error;

use super::{MeshVertex, VertexDescriptor};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("sphere needs at least 3 radial and 2 vertical segments, got {radial}x{vertical}")]
    TooFewSegments { radial: u32, vertical: u32 },

    #[error("sphere extent must be finite and positive, got {0:?}")]
    InvalidExtent([f32; 3]),

    #[error("mesh with {0} vertices exceeds 32-bit indexing")]
    TooManyVertices(usize),
}

/// Index data of one submesh.
#[derive(Debug, Clone, PartialEq)]
pub enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    /// Picks the narrowest index type able to address `vertex_count` vertices.
    pub fn for_vertex_count(vertex_count: usize, indices: Vec<u32>) -> Self {
        if vertex_count <= u16::MAX as usize + 1 {
            Indices::U16(indices.into_iter().map(|i| i as u16).collect())
        } else {
            Indices::U32(indices)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Indices::U16(v) => v.len(),
            Indices::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            Indices::U16(_) => wgpu::IndexFormat::Uint16,
            Indices::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Indices::U16(v) => bytemuck::cast_slice(v),
            Indices::U32(v) => bytemuck::cast_slice(v),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            Indices::U16(v) => Box::new(v.iter().map(|&i| i as u32)),
            Indices::U32(v) => Box::new(v.iter().copied()),
        }
    }
}

/// A draw range within a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Submesh {
    pub indices: Indices,
    pub topology: wgpu::PrimitiveTopology,
}

impl Submesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Immutable CPU-side mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub submeshes: Vec<Submesh>,
}

impl MeshData {
    pub fn descriptor(&self) -> VertexDescriptor {
        MeshVertex::descriptor()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Same vertices, every triangle-list submesh replaced by its unique edges
    /// as a line list. Other submeshes are kept as they are.
    pub fn to_wireframe(&self) -> MeshData {
        let submeshes = self
            .submeshes
            .iter()
            .map(|s| match s.topology {
                wgpu::PrimitiveTopology::TriangleList => Submesh {
                    indices: super::wireframe::edge_indices(&s.indices),
                    topology: wgpu::PrimitiveTopology::LineList,
                },
                _ => s.clone(),
            })
            .collect();

        MeshData {
            vertices: self.vertices.clone(),
            submeshes,
        }
    }
}
