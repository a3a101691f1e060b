use bytemuck::{Pod, Zeroable};

/// Interleaved vertex produced by the mesh generators.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Layout of [`MeshVertex`] in a vertex buffer.
    pub fn descriptor() -> VertexDescriptor {
        VertexDescriptor {
            stride: std::mem::size_of::<MeshVertex>() as u64,
            attributes: vec![
                VertexAttribute {
                    semantic: VertexSemantic::Position,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                },
                VertexAttribute {
                    semantic: VertexSemantic::Normal,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                },
                VertexAttribute {
                    semantic: VertexSemantic::TexCoord,
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                },
            ],
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VertexSemantic {
    Position,
    Normal,
    TexCoord,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub semantic: VertexSemantic,
    pub format: wgpu::VertexFormat,
    /// Byte offset within one vertex.
    pub offset: u64,
}

/// Describes how vertices are laid out in buffer slot 0.
///
/// Attribute `i` is bound to shader location `i`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VertexDescriptor {
    pub stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexDescriptor {
    /// wgpu attributes in shader-location order.
    pub fn wgpu_attributes(&self) -> Vec<wgpu::VertexAttribute> {
        self.attributes
            .iter()
            .enumerate()
            .map(|(location, a)| wgpu::VertexAttribute {
                format: a.format,
                offset: a.offset,
                shader_location: location as u32,
            })
            .collect()
    }

    /// Buffer layout borrowing attributes produced by [`Self::wgpu_attributes`].
    pub fn buffer_layout<'a>(
        &self,
        attributes: &'a [wgpu::VertexAttribute],
    ) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }

    /// True when every attribute lies inside the stride without overlapping the next.
    pub fn is_consistent(&self) -> bool {
        let mut end = 0u64;
        for a in &self.attributes {
            if a.offset < end {
                return false;
            }
            end = a.offset + a.format.size();
        }
        !self.attributes.is_empty() && end <= self.stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_descriptor_matches_struct() {
        let d = MeshVertex::descriptor();
        assert_eq!(d.stride, 32);
        assert!(d.is_consistent());
        assert_eq!(d.attributes[1].offset, std::mem::offset_of!(MeshVertex, normal) as u64);
        assert_eq!(d.attributes[2].offset, std::mem::offset_of!(MeshVertex, uv) as u64);
    }

    #[test]
    fn wgpu_attributes_use_index_as_location() {
        let attrs = MeshVertex::descriptor().wgpu_attributes();
        let locations: Vec<u32> = attrs.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }

    #[test]
    fn overlapping_attributes_are_inconsistent() {
        let mut d = MeshVertex::descriptor();
        d.attributes[1].offset = 8;
        assert!(!d.is_consistent());
    }
}
