use crate::render::{BufferOf, GpuResources, RenderBackend};

use super::{MeshData, VertexDescriptor};

/// One submesh whose indices live on the GPU.
pub struct GpuSubmesh<R: GpuResources> {
    pub index_buffer: R::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
    pub topology: wgpu::PrimitiveTopology,
}

/// Mesh uploaded to a backend: one vertex buffer, one index buffer per submesh.
pub struct GpuMesh<R: GpuResources> {
    pub vertex_buffer: R::Buffer,
    pub descriptor: VertexDescriptor,
    pub submeshes: Vec<GpuSubmesh<R>>,
}

impl<R: GpuResources> GpuMesh<R> {
    pub fn upload<B>(backend: &B, mesh: &MeshData, label: &str) -> Self
    where
        B: RenderBackend<Resources = R>,
    {
        let vertex_buffer: BufferOf<B> = backend.create_buffer(
            &format!("{label} vertices"),
            bytemuck::cast_slice(&mesh.vertices),
            wgpu::BufferUsages::VERTEX,
        );

        let submeshes = mesh
            .submeshes
            .iter()
            .enumerate()
            .map(|(i, s)| GpuSubmesh {
                index_buffer: backend.create_buffer(
                    &format!("{label} indices {i}"),
                    s.indices.as_bytes(),
                    wgpu::BufferUsages::INDEX,
                ),
                index_count: s.index_count(),
                index_format: s.indices.format(),
                topology: s.topology,
            })
            .collect();

        Self {
            vertex_buffer,
            descriptor: mesh.descriptor(),
            submeshes,
        }
    }
}
