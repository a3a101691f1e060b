use crate::mesh::VertexDescriptor;
use crate::shader::{ShaderLibrary, ShaderStage};

use super::{PipelineDesc, PipelineOf, RenderBackend, SetupError};

pub const DEFAULT_VERTEX_ENTRY: &str = "vertex_main";
pub const DEFAULT_FRAGMENT_ENTRY: &str = "fragment_main";

/// Builds a render pipeline for a mesh layout and the backend's color format.
///
/// Entry points and device features are checked before anything is compiled,
/// so a bad shader library is reported by name.
pub struct PipelineBuilder<'a> {
    shader: &'a ShaderLibrary,
    label: &'a str,
    vertex_entry: &'a str,
    fragment_entry: &'a str,
    topology: wgpu::PrimitiveTopology,
    polygon_mode: wgpu::PolygonMode,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(shader: &'a ShaderLibrary) -> Self {
        Self {
            shader,
            label: "vitrine pipeline",
            vertex_entry: DEFAULT_VERTEX_ENTRY,
            fragment_entry: DEFAULT_FRAGMENT_ENTRY,
            topology: wgpu::PrimitiveTopology::TriangleList,
            polygon_mode: wgpu::PolygonMode::Fill,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn with_topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_polygon_mode(mut self, polygon_mode: wgpu::PolygonMode) -> Self {
        self.polygon_mode = polygon_mode;
        self
    }

    pub fn build<B: RenderBackend>(
        self,
        backend: &B,
        vertex_layout: &VertexDescriptor,
    ) -> Result<PipelineOf<B>, SetupError> {
        let vertex_entry = self.shader.require(ShaderStage::Vertex, self.vertex_entry)?;
        let fragment_entry = self
            .shader
            .require(ShaderStage::Fragment, self.fragment_entry)?;

        if !vertex_layout.is_consistent() {
            return Err(SetupError::InvalidVertexLayout(vertex_layout.clone()));
        }

        if self.polygon_mode != wgpu::PolygonMode::Fill && !backend.supports_line_fill() {
            return Err(SetupError::MissingFeature {
                label: self.label.to_string(),
                feature: wgpu::Features::POLYGON_MODE_LINE,
            });
        }

        let color_format = backend.color_format();
        log::info!(
            "building pipeline `{}`: {}/{} from `{}`, {:?} {:?}, target {:?}",
            self.label,
            vertex_entry,
            fragment_entry,
            self.shader.label(),
            self.topology,
            self.polygon_mode,
            color_format
        );

        backend.create_pipeline(&PipelineDesc {
            label: self.label,
            shader: self.shader,
            vertex_entry,
            fragment_entry,
            vertex_layout,
            color_format,
            topology: self.topology,
            polygon_mode: self.polygon_mode,
        })
    }
}
